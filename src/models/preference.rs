use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A staff member's willingness to work on a given date, by segment.
///
/// Segments: morning = hours 9..13, afternoon = 14..18, night = 19..23.
/// Eligibility for the grid is "a preference record exists for this staff
/// in range" regardless of which segment flags are set; the flags are
/// carried through for callers that want stricter per-segment gating, but
/// the grid builder does not enforce it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftPreference {
    pub staff_id: i64,
    pub date: NaiveDate,
    pub morning: bool,
    pub afternoon: bool,
    pub night: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewShiftPreference {
    pub staff_id: i64,
    pub date: NaiveDate,
    #[serde(default)]
    pub morning: bool,
    #[serde(default)]
    pub afternoon: bool,
    #[serde(default)]
    pub night: bool,
}

pub const MORNING_HOURS: std::ops::Range<u32> = 9..13;
pub const AFTERNOON_HOURS: std::ops::Range<u32> = 14..18;
pub const NIGHT_HOURS: std::ops::Range<u32> = 19..23;
