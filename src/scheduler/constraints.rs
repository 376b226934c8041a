use std::collections::HashMap;

use chrono::NaiveDate;
use good_lp::{constraint, variable, Constraint, Expression, ProblemVariables, Variable};

use crate::models::{
    HourSlot, CONTINUOUS_WORK_MAX, CONTINUOUS_WORK_WINDOW, COVERAGE_DIVISOR, FIRST_HOUR,
    HIGH_SCHOOL_NIGHT_BAN_HOUR, INTERNATIONAL_WEEKLY_CAP, LAST_HOUR, LONG_SHIFT_THRESHOLD,
    MAX_BREAK_STARTS_PER_DAY, OVERFLOW_STAFF_ID, OVERFLOW_WEIGHT, REAL_WEIGHT,
};

/// Upper bound on a single real staff member's hours worked in one day
/// (16 hours in the 9..24 grid); used as the big-M coefficient linking
/// the day-is-long boolean to the daily total.
const DAY_LONG_BIG_M: f64 = (LAST_HOUR - FIRST_HOUR + 1) as f64;

/// The assembled mixed-integer model for one scheduling window: the
/// decision variables, the objective, and every hard constraint from
/// the specification, expressed as linear constraints over binaries
/// (real staff) and bounded integers (the overflow slack).
pub struct ScheduleModel {
    pub vars: ProblemVariables,
    pub objective: Expression,
    pub constraints: Vec<Constraint>,
    pub x: HashMap<(i64, NaiveDate, u32), Variable>,
}

/// Build the model for a decision grid.
///
/// One `x` binary per real-staff grid row. The overflow worker's row is
/// a slack variable, not a binary: it is a synthetic stand-in for
/// "uncovered demand," and a given hour's coverage target can exceed 1,
/// so it is modeled as a bounded integer `0..=coverage_target(hour)`
/// rather than a single 0/1 indicator — a lone binary could only ever
/// absorb one unit of shortfall and would make the coverage equality
/// infeasible whenever more than one worker is needed and no real staff
/// are available. Auxiliary break-start (`b`) and day-is-long (`L`)
/// booleans are added per real staff member per day.
pub fn build(grid: &[HourSlot]) -> ScheduleModel {
    let mut vars = ProblemVariables::new();
    let mut x: HashMap<(i64, NaiveDate, u32), Variable> = HashMap::new();
    let mut objective = Expression::from(0.0);

    for row in grid {
        let v = if row.staff_id == OVERFLOW_STAFF_ID {
            let target = coverage_target(row.pred_sales_per_hour);
            vars.add(variable().integer().min(0.0).max(target))
        } else {
            vars.add(variable().binary())
        };
        x.insert((row.staff_id, row.date, row.hour), v);
        let weight = if row.staff_id == OVERFLOW_STAFF_ID {
            OVERFLOW_WEIGHT
        } else {
            REAL_WEIGHT
        };
        objective = objective + v * weight;
    }

    let mut constraints = Vec::new();

    add_coverage_and_skill_floor(grid, &x, &mut constraints);
    add_night_ban(grid, &x, &mut constraints);
    add_international_cap(grid, &x, &mut constraints);

    for (staff_id, date) in real_staff_days(grid) {
        add_continuous_work_bound(staff_id, date, &x, &mut constraints);
        add_break_rules(staff_id, date, &x, &mut vars, &mut constraints);
    }

    ScheduleModel {
        vars,
        objective,
        constraints,
        x,
    }
}

fn real_staff_days(grid: &[HourSlot]) -> Vec<(i64, NaiveDate)> {
    let mut seen = std::collections::HashSet::new();
    let mut pairs = Vec::new();
    for row in grid {
        if row.staff_id == OVERFLOW_STAFF_ID {
            continue;
        }
        if seen.insert((row.staff_id, row.date)) {
            pairs.push((row.staff_id, row.date));
        }
    }
    pairs
}

/// Coverage target for a hour's predicted sales: one worker per
/// `COVERAGE_DIVISOR` yen of predicted hourly sales, at least one.
pub(crate) fn coverage_target(sales_per_hour: f64) -> f64 {
    (sales_per_hour / COVERAGE_DIVISOR).floor().max(1.0)
}

fn add_coverage_and_skill_floor(
    grid: &[HourSlot],
    x: &HashMap<(i64, NaiveDate, u32), Variable>,
    constraints: &mut Vec<Constraint>,
) {
    let mut by_hour: HashMap<(NaiveDate, u32), Vec<&HourSlot>> = HashMap::new();
    for row in grid {
        by_hour.entry((row.date, row.hour)).or_default().push(row);
    }

    for ((date, hour), rows) in by_hour {
        let coverage_sum: Expression = rows
            .iter()
            .map(|r| x[&(r.staff_id, date, hour)])
            .sum();
        let sales_per_hour = rows
            .first()
            .map(|r| r.pred_sales_per_hour)
            .unwrap_or(0.0);
        constraints.push(constraint!(coverage_sum == coverage_target(sales_per_hour)));

        let qualified_sum: Expression = rows
            .iter()
            .filter(|r| r.staff_id == OVERFLOW_STAFF_ID || r.level >= 3)
            .map(|r| x[&(r.staff_id, date, hour)])
            .sum();
        constraints.push(constraint!(qualified_sum >= 1.0));
    }
}

fn add_night_ban(
    grid: &[HourSlot],
    x: &HashMap<(i64, NaiveDate, u32), Variable>,
    constraints: &mut Vec<Constraint>,
) {
    for row in grid {
        if row.status == "high_school" && row.hour >= HIGH_SCHOOL_NIGHT_BAN_HOUR {
            let v = x[&(row.staff_id, row.date, row.hour)];
            constraints.push(constraint!(v == 0.0));
        }
    }
}

fn add_international_cap(
    grid: &[HourSlot],
    x: &HashMap<(i64, NaiveDate, u32), Variable>,
    constraints: &mut Vec<Constraint>,
) {
    let mut by_staff: HashMap<i64, Vec<&HourSlot>> = HashMap::new();
    for row in grid {
        if row.staff_id != OVERFLOW_STAFF_ID && row.status == "international" {
            by_staff.entry(row.staff_id).or_default().push(row);
        }
    }

    for (staff_id, rows) in by_staff {
        let total: Expression = rows
            .iter()
            .map(|r| x[&(staff_id, r.date, r.hour)])
            .sum();
        constraints.push(constraint!(total <= INTERNATIONAL_WEEKLY_CAP as f64));
    }
}

fn add_continuous_work_bound(
    staff_id: i64,
    date: NaiveDate,
    x: &HashMap<(i64, NaiveDate, u32), Variable>,
    constraints: &mut Vec<Constraint>,
) {
    let last_window_start = LAST_HOUR - CONTINUOUS_WORK_WINDOW + 1;
    for window_start in FIRST_HOUR..=last_window_start {
        let window_sum: Expression = (window_start..window_start + CONTINUOUS_WORK_WINDOW)
            .filter_map(|hour| x.get(&(staff_id, date, hour)).copied())
            .sum();
        constraints.push(constraint!(window_sum <= CONTINUOUS_WORK_MAX as f64));
    }
}

fn add_break_rules(
    staff_id: i64,
    date: NaiveDate,
    x: &HashMap<(i64, NaiveDate, u32), Variable>,
    vars: &mut ProblemVariables,
    constraints: &mut Vec<Constraint>,
) {
    let mut breaks: HashMap<u32, Variable> = HashMap::new();
    let mut break_sum = Expression::from(0.0);

    for hour in (FIRST_HOUR + 1)..=LAST_HOUR {
        let (Some(&prev), Some(&curr)) = (
            x.get(&(staff_id, date, hour - 1)),
            x.get(&(staff_id, date, hour)),
        ) else {
            continue;
        };

        let b = vars.add(variable().binary());
        breaks.insert(hour, b);
        break_sum = break_sum + b;

        // A break start is a 1 -> 0 transition between consecutive hours.
        constraints.push(constraint!(b >= prev - curr));

        // After a break starts, the worker must return if the grid has a
        // next hour, bounding the break's length.
        if let Some(&next) = x.get(&(staff_id, date, hour + 1)) {
            constraints.push(constraint!(next >= b));
        }
    }

    constraints.push(constraint!(break_sum.clone() <= MAX_BREAK_STARTS_PER_DAY as f64));

    let day_total: Expression = (FIRST_HOUR..=LAST_HOUR)
        .filter_map(|hour| x.get(&(staff_id, date, hour)).copied())
        .sum();

    let day_is_long = vars.add(variable().binary());

    // day_total > LONG_SHIFT_THRESHOLD  <=>  day_is_long == 1
    constraints.push(constraint!(
        day_total.clone() - DAY_LONG_BIG_M * day_is_long <= LONG_SHIFT_THRESHOLD as f64
    ));
    constraints.push(constraint!(
        day_total - (LONG_SHIFT_THRESHOLD as f64 + 1.0) * day_is_long >= 0.0
    ));

    // day_is_long == 1 implies at least one break start that day.
    constraints.push(constraint!(break_sum - day_is_long >= 0.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HourSlot;

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

    #[test]
    fn builds_one_variable_per_grid_row() {
        let grid = vec![
            row("2026-01-05", 9, 1001, 3, "full_time", 50_000.0),
            row("2026-01-05", 9, 1500, 0, "help", 50_000.0),
        ];
        let model = build(&grid);
        assert_eq!(model.x.len(), 2);
    }

    #[test]
    fn night_ban_rows_get_a_fixed_zero_constraint() {
        let grid = vec![row("2026-01-05", 22, 2000, 3, "high_school", 50_000.0)];
        let model = build(&grid);
        // coverage+skill floor (2) + night ban (1) for a single-row hour.
        assert!(model.constraints.len() >= 3);
    }

    #[rstest::rstest]
    #[case(0.0, 1.0)]
    #[case(4_999.0, 1.0)]
    #[case(5_000.0, 1.0)]
    #[case(12_500.0, 2.0)]
    #[case(49_999.0, 9.0)]
    #[case(50_000.0, 10.0)]
    fn coverage_target_is_sales_divided_by_divisor_floored_at_one(
        #[case] sales_per_hour: f64,
        #[case] expected: f64,
    ) {
        assert_eq!(coverage_target(sales_per_hour), expected);
    }
}
