use thiserror::Error;

pub mod entries;
pub mod month;
pub mod schedule;


pub use entries::{generate, Account, JournalEntry};
pub use month::MonthKey;
pub use schedule::{Reference, Schedule, ScheduleRow};

/// The user-supplied target month could not be parsed.
#[derive(Debug, PartialEq, Error)]
pub enum InputError {
    #[error("invalid target month '{0}', expected YYYY-MM (e.g. 2024-05)")]
    BadTargetMonth(String),
}

/// The loaded schedule cannot answer for the requested month.
#[derive(Debug, PartialEq, Error)]
pub enum DataError {
    #[error("month {0} has no column in the loaded schedule, no entries can be generated")]
    MonthNotCovered(MonthKey),
}
