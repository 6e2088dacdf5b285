use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};

/// a validated loan simulation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub loan_amount: Money,
    pub date_of_birth: NaiveDate,
    pub payment_term_months: u32,
}

impl SimulationRequest {
    pub fn new(loan_amount: Money, date_of_birth: NaiveDate, payment_term_months: u32) -> Self {
        Self {
            loan_amount,
            date_of_birth,
            payment_term_months,
        }
    }
}

/// outcome of a loan simulation
///
/// `monthly_installment` is rounded to cents. The totals are exact products
/// and differences of that installment, so they carry whatever scale falls out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub total_amount_payable: Money,
    pub monthly_installment: Money,
    pub total_interest_paid: Money,
}

/// intermediate values of a simulation, useful for logging and auditing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateQuote {
    pub age: u32,
    pub annual_rate: Rate,
    pub monthly_rate: Rate,
}
