use chrono::NaiveDate;
use hourglass_rs::{SafeTimeProvider, TimeSource};

use crate::age::{calculate_age, local_today};
use crate::errors::{Result, SimulationError};
use crate::installment::calculate_installment;
use crate::rates::RateSchedule;
use crate::types::{RateQuote, SimulationRequest, SimulationResult};

/// anything that can turn a validated request into repayment terms
pub trait Simulate: Send + Sync {
    /// simulate as of the given calendar day
    fn simulate(&self, request: &SimulationRequest, today: NaiveDate) -> Result<SimulationResult>;
}

/// stateless loan calculator over an age-banded rate schedule
#[derive(Debug, Clone, Default)]
pub struct LoanSimulator {
    schedule: RateSchedule,
}

impl LoanSimulator {
    pub fn new(schedule: RateSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &RateSchedule {
        &self.schedule
    }

    /// age and rates that apply to a borrower on `today`
    pub fn quote(&self, date_of_birth: NaiveDate, today: NaiveDate) -> Result<RateQuote> {
        let age = calculate_age(date_of_birth, today)?;
        let signed_age = i32::try_from(age).map_err(|_| SimulationError::Calculation {
            message: format!("age {} out of range", age),
        })?;
        let annual_rate = self.schedule.annual_rate_for_age(signed_age)?;

        Ok(RateQuote {
            age,
            annual_rate,
            monthly_rate: annual_rate.monthly_rate(),
        })
    }

    /// simulate as of `today`
    pub fn simulate_on(&self, request: &SimulationRequest, today: NaiveDate) -> Result<SimulationResult> {
        let quote = self.quote(request.date_of_birth, today)?;

        let monthly_installment = calculate_installment(
            request.loan_amount,
            quote.monthly_rate,
            i64::from(request.payment_term_months),
        )?;

        let total_amount_payable = monthly_installment
            .times(request.payment_term_months)
            .ok_or_else(|| SimulationError::Calculation {
                message: format!(
                    "total of {} installments of {} overflows",
                    request.payment_term_months, monthly_installment
                ),
            })?;
        let total_interest_paid = total_amount_payable
            .checked_sub(request.loan_amount)
            .ok_or_else(|| SimulationError::Calculation {
                message: format!("interest on {} overflows", request.loan_amount),
            })?;

        tracing::debug!(
            age = quote.age,
            annual_rate = %quote.annual_rate,
            monthly_rate = %quote.monthly_rate.as_decimal(),
            installment = %monthly_installment,
            "simulation computed"
        );

        Ok(SimulationResult {
            total_amount_payable,
            monthly_installment,
            total_interest_paid,
        })
    }

    /// simulate as of the provider's current day, sampled once
    pub fn simulate_with(
        &self,
        request: &SimulationRequest,
        time_provider: &SafeTimeProvider,
    ) -> Result<SimulationResult> {
        let today = local_today(time_provider);
        self.simulate_on(request, today)
    }

    /// simulate with system time
    pub fn simulate_now(&self, request: &SimulationRequest) -> Result<SimulationResult> {
        let time = SafeTimeProvider::new(TimeSource::System);
        self.simulate_with(request, &time)
    }
}

impl Simulate for LoanSimulator {
    fn simulate(&self, request: &SimulationRequest, today: NaiveDate) -> Result<SimulationResult> {
        self.simulate_on(request, today)
    }
}
