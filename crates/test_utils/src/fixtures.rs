//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for the dues billing domain. Fixture values are
//! fixed and predictable so scenario tests can assert exact amounts.

use chrono::NaiveDate;
use core_kernel::{Currency, Money};
use rust_decimal_macros::dec;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// The standard monthly dues amount used across scenario tests
    pub fn monthly_dues() -> Money {
        Money::new(dec!(500.00), Currency::USD)
    }

    /// A partial payment that leaves a balance
    pub fn partial_payment() -> Money {
        Money::new(dec!(200.00), Currency::USD)
    }

    /// A zero amount
    pub fn zero() -> Money {
        Money::zero(Currency::USD)
    }

    /// A PHP amount for currency mismatch tests
    pub fn php_500() -> Money {
        Money::new(dec!(500.00), Currency::PHP)
    }
}

/// Fixture for calendar test data
pub struct DateFixtures;

impl DateFixtures {
    /// The date the standard test config took effect
    pub fn config_activation() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid fixture date")
    }

    /// A date inside March 2024's grace window (due day 1, 15-day grace)
    pub fn within_grace() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).expect("valid fixture date")
    }

    /// A date well past March 2024's grace window
    pub fn past_grace() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 20).expect("valid fixture date")
    }
}
