use chrono::NaiveDate;

use super::constants::{intraday_profile, salary_for_level};

/// One (staff, date, hour) row of the decision grid.
///
/// Derived fresh by the grid builder for every scheduling run; never
/// persisted. Exactly one row exists per (staff_id, date, hour) for staff
/// eligible in that range, plus one row per (date, hour) for the
/// synthetic overflow worker.
#[derive(Debug, Clone, PartialEq)]
pub struct HourSlot {
    pub date: NaiveDate,
    pub hour: u32,
    pub staff_id: i64,
    pub name: String,
    pub level: i32,
    pub status: String,
    pub predicted_sales: f64,
    pub pred_sales_per_hour: f64,
    pub salary: i64,
}

impl HourSlot {
    pub fn new(
        date: NaiveDate,
        hour: u32,
        staff_id: i64,
        name: String,
        level: i32,
        status: String,
        predicted_sales: f64,
    ) -> Self {
        let pred_sales_per_hour = predicted_sales * intraday_profile(hour);
        let salary = salary_for_level(level);
        Self {
            date,
            hour,
            staff_id,
            name,
            level,
            status,
            predicted_sales,
            pred_sales_per_hour,
            salary,
        }
    }

    /// Sort key matching the canonical grid order: (date, hour, staff_id).
    pub fn sort_key(&self) -> (NaiveDate, u32, i64) {
        (self.date, self.hour, self.staff_id)
    }
}
