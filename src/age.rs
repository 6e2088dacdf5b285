use chrono::{Local, NaiveDate};
use hourglass_rs::SafeTimeProvider;

use crate::errors::{Result, SimulationError};

/// current calendar day in the server's local time zone
pub fn local_today(time_provider: &SafeTimeProvider) -> NaiveDate {
    time_provider.now().with_timezone(&Local).date_naive()
}

/// whole years elapsed between `date_of_birth` and `today`
///
/// Counts birthday anniversaries reached on or before `today`. A birthday on
/// 29 February is reached on 1 March in non-leap years.
pub fn calculate_age(date_of_birth: NaiveDate, today: NaiveDate) -> Result<u32> {
    today
        .years_since(date_of_birth)
        .ok_or(SimulationError::InvalidDate {
            date_of_birth,
            today,
        })
}
