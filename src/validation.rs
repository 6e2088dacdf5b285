use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::SimulationRequest;

pub const LOAN_AMOUNT: &str = "loanAmount";
pub const DATE_OF_BIRTH: &str = "dateOfBirth";
pub const PAYMENT_TERM_MONTHS: &str = "paymentTermMonths";

/// simulation input as received, before any checks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationForm {
    #[serde(default)]
    pub loan_amount: Option<Decimal>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub payment_term_months: Option<i64>,
}

/// field name -> message, ordered by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// record a failure; the first message for a field wins
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

impl SimulationForm {
    /// check every field against `today` and build a request, or report all failures
    pub fn validate(&self, today: NaiveDate) -> Result<SimulationRequest, FieldErrors> {
        let mut errors = FieldErrors::new();

        let loan_amount = match self.loan_amount {
            None => {
                errors.add(LOAN_AMOUNT, "loan amount must not be null.");
                None
            }
            Some(amount) if amount <= Decimal::ZERO => {
                errors.add(LOAN_AMOUNT, "loan amount must be positive.");
                None
            }
            Some(amount) => Some(Money::from_decimal(amount)),
        };

        let date_of_birth = match self.date_of_birth {
            None => {
                errors.add(DATE_OF_BIRTH, "date of birth must not be null.");
                None
            }
            Some(date) if date >= today => {
                errors.add(DATE_OF_BIRTH, "date of birth must be in the past.");
                None
            }
            Some(date) => Some(date),
        };

        let payment_term_months = match self.payment_term_months {
            None => {
                errors.add(PAYMENT_TERM_MONTHS, "payment term must not be null.");
                None
            }
            Some(months) if months <= 0 => {
                errors.add(PAYMENT_TERM_MONTHS, "payment term must be positive.");
                None
            }
            Some(months) => match u32::try_from(months) {
                Ok(months) => Some(months),
                Err(_) => {
                    errors.add(
                        PAYMENT_TERM_MONTHS,
                        format!("payment term must not exceed {} months.", u32::MAX),
                    );
                    None
                }
            },
        };

        match (loan_amount, date_of_birth, payment_term_months) {
            (Some(amount), Some(dob), Some(months)) if errors.is_empty() => {
                Ok(SimulationRequest::new(amount, dob, months))
            }
            _ => Err(errors),
        }
    }
}
