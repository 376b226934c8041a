use good_lp::{coin_cbc, Solution, SolverModel};

use crate::models::{Assignment, HourSlot};

use super::constraints::{self, ScheduleModel};
use super::error::SolverError;

/// Solve the assignment problem for a decision grid within a wall-clock
/// budget, returning the chosen assignments (including overflow rows)
/// or `SolverError::NoSchedule` if no feasible solution was found.
pub fn solve(grid: &[HourSlot], budget_secs: u64) -> Result<Vec<Assignment>, SolverError> {
    let ScheduleModel {
        vars,
        objective,
        constraints,
        x,
    } = constraints::build(grid);

    let mut model = vars
        .minimise(objective)
        .using(coin_cbc)
        .set_parameter("sec", &budget_secs.to_string())
        .set_parameter("ratioGap", "0.0001");

    for constraint in constraints {
        model = model.with(constraint);
    }

    let solution = model.solve().map_err(|err| {
        tracing::warn!(error = %err, "solver found no feasible schedule");
        SolverError::NoSchedule
    })?;

    let mut assignments = Vec::new();
    for row in grid {
        let key = (row.staff_id, row.date, row.hour);
        let Some(&v) = x.get(&key) else { continue };
        if solution.value(v) > 0.5 {
            assignments.push(Assignment {
                date: row.date,
                hour: row.hour,
                staff_id: row.staff_id,
                name: row.name.clone(),
                level: row.level,
                status: row.status.clone(),
                salary: row.salary,
            });
        }
    }

    assignments.sort_by_key(|a| (a.date, a.hour, a.staff_id));
    Ok(assignments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(date: &str, hour: u32, staff_id: i64, level: i32, status: &str, sales: f64) -> HourSlot {
        HourSlot::new(
            date.parse().unwrap(),
            hour,
            staff_id,
            format!("staff-{staff_id}"),
            level,
            status.to_string(),
            sales,
        )
    }

    fn single_day_grid(staff: &[(i64, i32, &str)], sales: f64) -> Vec<HourSlot> {
        let date = "2026-01-05";
        let mut grid = Vec::new();
        for hour in 9..=24 {
            for &(staff_id, level, status) in staff {
                grid.push(row(date, hour, staff_id, level, status, sales));
            }
            grid.push(row(date, hour, 1500, 0, "help", sales));
        }
        grid
    }

    #[test]
    fn trivial_single_day_schedule_is_feasible() {
        let grid = single_day_grid(&[(1001, 3, "full_time")], 20_000.0);
        let assignments = solve(&grid, 5).unwrap();
        assert!(!assignments.is_empty());
    }

    #[test]
    fn coverage_from_overflow_only_when_no_real_staff() {
        let date: NaiveDate = "2026-01-05".parse().unwrap();
        let mut grid = Vec::new();
        for hour in 9..=24 {
            grid.push(row("2026-01-05", hour, 1500, 0, "help", 200_000.0));
        }
        let assignments = solve(&grid, 5).unwrap();
        assert!(assignments.iter().all(|a| a.staff_id == 1500));
        assert!(assignments.iter().any(|a| a.date == date));

        // The overflow worker is a bounded slack, not a single binary: it
        // must be able to stand in for every unit of uncovered demand, not
        // just one, so the assigned count per hour matches the coverage
        // target exactly even where that target exceeds one.
        let total: usize = assignments.len();
        let expected: f64 = (9..=24)
            .map(|hour| {
                let sales_per_hour = 200_000.0 * crate::models::intraday_profile(hour);
                super::constraints::coverage_target(sales_per_hour)
            })
            .sum();
        assert_eq!(total as f64, expected);
    }

    #[test]
    fn night_ban_keeps_high_schooler_off_late_hours() {
        let grid = single_day_grid(&[(2000, 3, "high_school")], 100_000.0);
        let assignments = solve(&grid, 5).unwrap();
        assert!(!assignments
            .iter()
            .any(|a| a.staff_id == 2000 && a.hour >= 22));
    }

    #[test]
    fn skill_floor_forces_overflow_when_no_staff_qualifies() {
        let grid = single_day_grid(&[(1001, 2, "full_time"), (1002, 2, "full_time")], 30_000.0);
        let assignments = solve(&grid, 5).unwrap();
        assert!(assignments.iter().all(|a| a.staff_id == 1500));
    }

    #[rstest::rstest]
    #[case(22)]
    #[case(23)]
    #[case(24)]
    fn high_schooler_is_never_assigned_at_or_past_the_ban_hour(#[case] banned_hour: u32) {
        let grid = single_day_grid(&[(2000, 3, "high_school")], 80_000.0);
        let assignments = solve(&grid, 5).unwrap();
        assert!(!assignments
            .iter()
            .any(|a| a.staff_id == 2000 && a.hour == banned_hour));
    }

    #[rstest::rstest]
    #[case(1)]
    #[case(2)]
    #[case(7)]
    fn international_staff_never_exceeds_the_cumulative_cap_over_the_window(#[case] days: i64) {
        let start: NaiveDate = "2026-01-05".parse().unwrap();
        let mut grid = Vec::new();
        for offset in 0..days {
            let date = start + chrono::Duration::days(offset);
            for hour in 9..=24 {
                grid.push(row(
                    &date.format("%Y-%m-%d").to_string(),
                    hour,
                    3000,
                    4,
                    "international",
                    100_000.0,
                ));
                grid.push(row(&date.format("%Y-%m-%d").to_string(), hour, 1500, 0, "help", 100_000.0));
            }
        }

        let assignments = solve(&grid, 5).unwrap();
        let worked = assignments.iter().filter(|a| a.staff_id == 3000).count();
        assert!(worked as i64 <= 28, "international staff worked {worked} hours over {days} days");
    }
}
