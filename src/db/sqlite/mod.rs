mod assignments;
mod predictions;
mod preferences;
mod staff;

pub use assignments::SqliteAssignmentRepo;
pub use predictions::SqliteDailyPredictionRepo;
pub use preferences::SqliteShiftPreferenceRepo;
pub use staff::SqliteStaffRepo;
