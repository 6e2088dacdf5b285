//! Wire shapes for the simulation endpoint.
//!
//! The request body is [`crate::validation::SimulationForm`]; amounts in the
//! response are JSON numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::SimulationResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount_payable: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_installment: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_interest_paid: Decimal,
}

impl From<SimulationResult> for SimulationResponse {
    fn from(result: SimulationResult) -> Self {
        Self {
            total_amount_payable: result.total_amount_payable.as_decimal(),
            monthly_installment: result.monthly_installment.as_decimal(),
            total_interest_paid: result.total_interest_paid.as_decimal(),
        }
    }
}
