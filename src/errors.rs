use chrono::NaiveDate;
use thiserror::Error;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("invalid date: date of birth {date_of_birth} cannot be in the future (today is {today})")]
    InvalidDate {
        date_of_birth: NaiveDate,
        today: NaiveDate,
    },

    #[error("invalid age: {age} cannot be negative")]
    InvalidAge {
        age: i32,
    },

    #[error("invalid arguments for installment: principal {principal}, monthly rate {rate}, periods {periods}")]
    InvalidArgument {
        principal: Money,
        rate: Rate,
        periods: i64,
    },

    #[error("calculation error: {message}")]
    Calculation {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, SimulationError>;
