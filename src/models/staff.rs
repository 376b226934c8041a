use serde::{Deserialize, Serialize};
use validator::Validate;

/// Work status of a staff member. Drives several hard constraints in the
/// scheduler (international weekly cap, high-schooler night ban).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffStatus {
    FullTime,
    PartTime,
    HighSchool,
    International,
}

impl StaffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffStatus::FullTime => "full_time",
            StaffStatus::PartTime => "part_time",
            StaffStatus::HighSchool => "high_school",
            StaffStatus::International => "international",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "full_time" => Some(StaffStatus::FullTime),
            "part_time" => Some(StaffStatus::PartTime),
            "high_school" => Some(StaffStatus::HighSchool),
            "international" => Some(StaffStatus::International),
            _ => None,
        }
    }
}

/// A registered employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub level: i32,
    pub status: StaffStatus,
    pub e_mail: String,
    pub gender: String,
}

/// Fields accepted when registering a new staff member. Server assigns
/// the id, starting at 1001 and increasing monotonically.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewStaff {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 14, max = 100))]
    pub age: i32,
    #[validate(range(min = 1, max = 5))]
    pub level: i32,
    pub status: String,
    #[validate(email)]
    pub e_mail: String,
    pub gender: String,
}

/// Fields accepted when updating an existing staff member. Only level
/// and status are described by the specification as mutable in practice,
/// but the PUT endpoint accepts any subset of the record's fields.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct StaffPatch {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(range(min = 14, max = 100))]
    pub age: Option<i32>,
    #[validate(range(min = 1, max = 5))]
    pub level: Option<i32>,
    pub status: Option<String>,
    #[validate(email)]
    pub e_mail: Option<String>,
    pub gender: Option<String>,
}
