use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decimal::Rate;
use crate::errors::{Result, SimulationError};

/// one step of the age-banded rate table
///
/// A band covers every age above the previous band's `max_age` up to and
/// including its own. The last band has no `max_age` and is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,
    pub annual_rate: Rate,
}

impl RateBand {
    pub fn up_to(max_age: u32, annual_rate: Decimal) -> Self {
        Self {
            max_age: Some(max_age),
            annual_rate: Rate::from_decimal(annual_rate),
        }
    }

    pub fn open_ended(annual_rate: Decimal) -> Self {
        Self {
            max_age: None,
            annual_rate: Rate::from_decimal(annual_rate),
        }
    }

    fn covers(&self, age: u32) -> bool {
        self.max_age.is_none_or(|max| age <= max)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("rate schedule has no bands")]
    Empty,

    #[error("band {index}: max age {max_age} does not exceed the previous band's {previous}")]
    NotAscending {
        index: usize,
        max_age: u32,
        previous: u32,
    },

    #[error("band {index}: only the last band may be open-ended")]
    OpenEndedBeforeLast {
        index: usize,
    },

    #[error("last band must be open-ended so every age has a rate")]
    MissingOpenEnded,

    #[error("band {index}: annual rate {rate} must be within (0, 1]")]
    RateOutOfRange {
        index: usize,
        rate: Rate,
    },

    #[error("band {index}: annual rate {rate} rounds to a zero monthly rate")]
    ZeroMonthlyRate {
        index: usize,
        rate: Rate,
    },
}

/// age-banded annual interest rates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSchedule", into = "RawSchedule")]
pub struct RateSchedule {
    bands: Vec<RateBand>,
}

#[derive(Serialize, Deserialize)]
struct RawSchedule {
    bands: Vec<RateBand>,
}

impl TryFrom<RawSchedule> for RateSchedule {
    type Error = ScheduleError;

    fn try_from(raw: RawSchedule) -> std::result::Result<Self, Self::Error> {
        RateSchedule::new(raw.bands)
    }
}

impl From<RateSchedule> for RawSchedule {
    fn from(schedule: RateSchedule) -> Self {
        RawSchedule { bands: schedule.bands }
    }
}

impl Default for RateSchedule {
    /// 0-25: 5%, 26-40: 3%, 41-60: 2%, 61+: 4%
    fn default() -> Self {
        Self {
            bands: vec![
                RateBand::up_to(25, dec!(0.05)),
                RateBand::up_to(40, dec!(0.03)),
                RateBand::up_to(60, dec!(0.02)),
                RateBand::open_ended(dec!(0.04)),
            ],
        }
    }
}

impl RateSchedule {
    /// build a schedule, checking that the bands cover every age exactly once
    pub fn new(bands: Vec<RateBand>) -> std::result::Result<Self, ScheduleError> {
        if bands.is_empty() {
            return Err(ScheduleError::Empty);
        }

        let last = bands.len() - 1;
        let mut previous: Option<u32> = None;

        for (index, band) in bands.iter().enumerate() {
            let rate = band.annual_rate.as_decimal();
            if rate <= Decimal::ZERO || rate > Decimal::ONE {
                return Err(ScheduleError::RateOutOfRange {
                    index,
                    rate: band.annual_rate,
                });
            }
            if !band.annual_rate.monthly_rate().is_positive() {
                return Err(ScheduleError::ZeroMonthlyRate {
                    index,
                    rate: band.annual_rate,
                });
            }

            match band.max_age {
                None if index != last => return Err(ScheduleError::OpenEndedBeforeLast { index }),
                None => {}
                Some(_) if index == last => return Err(ScheduleError::MissingOpenEnded),
                Some(max_age) => {
                    if let Some(prev) = previous {
                        if max_age <= prev {
                            return Err(ScheduleError::NotAscending {
                                index,
                                max_age,
                                previous: prev,
                            });
                        }
                    }
                    previous = Some(max_age);
                }
            }
        }

        Ok(Self { bands })
    }

    pub fn bands(&self) -> &[RateBand] {
        &self.bands
    }

    /// annual rate for a borrower of the given age
    pub fn annual_rate_for_age(&self, age: i32) -> Result<Rate> {
        let age = u32::try_from(age).map_err(|_| SimulationError::InvalidAge { age })?;

        self.bands
            .iter()
            .find(|band| band.covers(age))
            .map(|band| band.annual_rate)
            .ok_or(SimulationError::Calculation {
                message: format!("no rate band covers age {}", age),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(age: i32) -> Decimal {
        RateSchedule::default().annual_rate_for_age(age).unwrap().as_decimal()
    }

    #[test]
    fn test_default_bands() {
        assert_eq!(rate(0), dec!(0.05));
        assert_eq!(rate(18), dec!(0.05));
        assert_eq!(rate(25), dec!(0.05));

        assert_eq!(rate(26), dec!(0.03));
        assert_eq!(rate(40), dec!(0.03));

        assert_eq!(rate(41), dec!(0.02));
        assert_eq!(rate(60), dec!(0.02));

        assert_eq!(rate(61), dec!(0.04));
        assert_eq!(rate(100), dec!(0.04));
    }

    #[test]
    fn test_every_age_in_band_gets_band_rate() {
        for age in 0..=25 {
            assert_eq!(rate(age), dec!(0.05), "age {}", age);
        }
        for age in 26..=40 {
            assert_eq!(rate(age), dec!(0.03), "age {}", age);
        }
        for age in 41..=60 {
            assert_eq!(rate(age), dec!(0.02), "age {}", age);
        }
        for age in 61..=130 {
            assert_eq!(rate(age), dec!(0.04), "age {}", age);
        }
    }

    #[test]
    fn test_negative_age_rejected() {
        let err = RateSchedule::default().annual_rate_for_age(-1).unwrap_err();
        assert_eq!(err, SimulationError::InvalidAge { age: -1 });
    }

    #[test]
    fn test_schedule_validation() {
        assert_eq!(RateSchedule::new(vec![]), Err(ScheduleError::Empty));

        assert_eq!(
            RateSchedule::new(vec![RateBand::up_to(25, dec!(0.05))]),
            Err(ScheduleError::MissingOpenEnded)
        );

        assert_eq!(
            RateSchedule::new(vec![
                RateBand::open_ended(dec!(0.05)),
                RateBand::open_ended(dec!(0.04)),
            ]),
            Err(ScheduleError::OpenEndedBeforeLast { index: 0 })
        );

        assert_eq!(
            RateSchedule::new(vec![
                RateBand::up_to(40, dec!(0.05)),
                RateBand::up_to(40, dec!(0.03)),
                RateBand::open_ended(dec!(0.04)),
            ]),
            Err(ScheduleError::NotAscending {
                index: 1,
                max_age: 40,
                previous: 40,
            })
        );

        assert!(matches!(
            RateSchedule::new(vec![RateBand::open_ended(dec!(0))]),
            Err(ScheduleError::RateOutOfRange { index: 0, .. })
        ));
        assert!(matches!(
            RateSchedule::new(vec![RateBand::open_ended(dec!(1.5))]),
            Err(ScheduleError::RateOutOfRange { index: 0, .. })
        ));
    }

    #[test]
    fn test_rate_with_zero_monthly_rate_rejected() {
        // 0.0005 / 12 rounds down, 0.0006 / 12 is a tie that rounds to even
        for annual in [dec!(0.0005), dec!(0.0006)] {
            assert_eq!(
                RateSchedule::new(vec![
                    RateBand::up_to(40, dec!(0.03)),
                    RateBand::open_ended(annual),
                ]),
                Err(ScheduleError::ZeroMonthlyRate {
                    index: 1,
                    rate: Rate::from_decimal(annual),
                })
            );
        }

        let schedule = RateSchedule::new(vec![RateBand::open_ended(dec!(0.0007))]).unwrap();
        let monthly = schedule.annual_rate_for_age(30).unwrap().monthly_rate();
        assert_eq!(monthly.as_decimal(), dec!(0.0001));
    }

    #[test]
    fn test_single_flat_band() {
        let schedule = RateSchedule::new(vec![RateBand::open_ended(dec!(0.07))]).unwrap();
        assert_eq!(schedule.annual_rate_for_age(0).unwrap().as_decimal(), dec!(0.07));
        assert_eq!(schedule.annual_rate_for_age(99).unwrap().as_decimal(), dec!(0.07));
    }

    #[test]
    fn test_schedule_from_toml() {
        let text = r#"
            [[bands]]
            max_age = 30
            annual_rate = "0.06"

            [[bands]]
            annual_rate = "0.01"
        "#;
        let schedule: RateSchedule = toml::from_str(text).unwrap();
        assert_eq!(schedule.annual_rate_for_age(30).unwrap().as_decimal(), dec!(0.06));
        assert_eq!(schedule.annual_rate_for_age(31).unwrap().as_decimal(), dec!(0.01));

        let invalid = r#"
            [[bands]]
            max_age = 30
            annual_rate = "0.06"
        "#;
        assert!(toml::from_str::<RateSchedule>(invalid).is_err());
    }
}
