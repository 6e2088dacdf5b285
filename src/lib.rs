pub mod age;
pub mod api;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod installment;
pub mod logging;
pub mod rates;
pub mod server;
pub mod simulator;
pub mod types;
pub mod validation;

// re-export key types
pub use age::{calculate_age, local_today};
pub use config::{CliArgs, ConfigError, LogFormat, ServerConfig};
pub use decimal::{Money, Rate};
pub use errors::{Result, SimulationError};
pub use installment::calculate_installment;
pub use rates::{RateBand, RateSchedule, ScheduleError};
pub use simulator::{LoanSimulator, Simulate};
pub use types::{RateQuote, SimulationRequest, SimulationResult};
pub use validation::{FieldErrors, SimulationForm};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
