use rust_decimal::{Decimal, MathematicalOps};

use crate::decimal::{Money, Rate};
use crate::errors::{Result, SimulationError};

/// fixed periodic payment that repays `principal` over `periods` at `periodic_rate`
///
/// Annuity formula `pmt = (pv * r) / (1 - (1 + r)^-n)`, rounded to cents with
/// ties to even. All three arguments must be strictly positive.
pub fn calculate_installment(principal: Money, periodic_rate: Rate, periods: i64) -> Result<Money> {
    if !principal.is_positive() || !periodic_rate.is_positive() || periods <= 0 {
        return Err(SimulationError::InvalidArgument {
            principal,
            rate: periodic_rate,
            periods,
        });
    }

    let r = periodic_rate.as_decimal();
    let pv = principal.as_decimal();

    // (1 + r)^-n; past Decimal's range it is indistinguishable from zero
    let discount = (Decimal::ONE + r)
        .checked_powu(periods.unsigned_abs())
        .and_then(|compound| Decimal::ONE.checked_div(compound))
        .unwrap_or(Decimal::ZERO);

    let denominator = Decimal::ONE - discount;
    if denominator <= Decimal::ZERO {
        return Err(SimulationError::Calculation {
            message: format!("rate {} too small to amortize over {} periods", periodic_rate, periods),
        });
    }

    let interest = pv.checked_mul(r).ok_or_else(|| SimulationError::Calculation {
        message: format!("principal {} overflows at rate {}", principal, periodic_rate),
    })?;

    let payment = interest
        .checked_div(denominator)
        .ok_or_else(|| SimulationError::Calculation {
            message: format!("installment for principal {} overflows", principal),
        })?;

    Ok(Money::from_decimal(payment).round_currency())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn pmt(pv: Decimal, r: Decimal, n: i64) -> Result<Money> {
        calculate_installment(Money::from_decimal(pv), Rate::from_decimal(r), n)
    }

    #[test]
    fn test_one_percent_monthly_over_a_year() {
        let installment = pmt(dec!(10000), dec!(0.01), 12).unwrap();
        assert_eq!(installment.to_string(), "888.49");
    }

    #[test]
    fn test_quantized_monthly_rates() {
        // annual 3% -> 0.0025 monthly
        assert_eq!(pmt(dec!(10000), dec!(0.0025), 12).unwrap().to_string(), "846.94");
        // annual 5% -> 0.0042 monthly
        assert_eq!(pmt(dec!(10000), dec!(0.0042), 12).unwrap().to_string(), "856.26");
        // annual 2% -> 0.0017 monthly
        assert_eq!(pmt(dec!(10000), dec!(0.0017), 12).unwrap().to_string(), "842.57");
        // annual 4% -> 0.0033 monthly
        assert_eq!(pmt(dec!(10000), dec!(0.0033), 12).unwrap().to_string(), "851.32");
    }

    #[test]
    fn test_single_period_repays_principal_plus_interest() {
        assert_eq!(pmt(dec!(1000), dec!(0.01), 1).unwrap().as_decimal(), dec!(1010.00));
    }

    #[test]
    fn test_invalid_arguments() {
        // negative principal
        assert!(matches!(
            pmt(dec!(-1), dec!(0.01), 12),
            Err(SimulationError::InvalidArgument { .. })
        ));
        // zero principal
        assert!(pmt(dec!(0), dec!(0.01), 12).is_err());
        // negative rate
        assert!(pmt(dec!(10000), dec!(-0.01), 12).is_err());
        // zero rate
        assert!(pmt(dec!(10000), dec!(0), 12).is_err());
        // zero periods
        assert!(pmt(dec!(10000), dec!(0.01), 0).is_err());
        // negative periods
        assert!(pmt(dec!(10000), dec!(0.01), -12).is_err());
        // all invalid
        assert_eq!(
            pmt(dec!(-1), dec!(-0.01), -1).unwrap_err(),
            SimulationError::InvalidArgument {
                principal: Money::from_decimal(dec!(-1)),
                rate: Rate::from_decimal(dec!(-0.01)),
                periods: -1,
            }
        );
    }

    #[test]
    fn test_increases_with_principal() {
        let mut previous = Money::ZERO;
        for pv in [1_000, 5_000, 10_000, 50_000, 250_000] {
            let installment = pmt(Decimal::from(pv), dec!(0.0025), 24).unwrap();
            assert!(installment > previous, "pv {}", pv);
            previous = installment;
        }
    }

    #[test]
    fn test_decreases_with_term() {
        let mut previous = pmt(dec!(10000), dec!(0.0042), 1).unwrap();
        for n in [2, 6, 12, 24, 60, 120, 360] {
            let installment = pmt(dec!(10000), dec!(0.0042), n).unwrap();
            assert!(installment < previous, "n {}", n);
            previous = installment;
        }
    }

    #[test]
    fn test_very_long_term_converges_to_interest_only() {
        // (1 + r)^n overflows Decimal, so the payment is just the interest
        let installment = pmt(dec!(10000), dec!(0.01), 100_000).unwrap();
        assert_eq!(installment.as_decimal(), dec!(100.00));
    }
}
