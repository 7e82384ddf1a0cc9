//! Test Data Builders
//!
//! Builder patterns for constructing billing test data with sensible
//! defaults, so tests specify only the fields they care about.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Currency, Money, OrgId, UnitId};
use domain_dues::{
    BillingConfig, DiscountConfig, DiscountType, PenaltyPolicy, PenaltyRateType, UnitStanding,
};

use crate::fixtures::{DateFixtures, MoneyFixtures};

/// Builder for billing configs
pub struct BillingConfigBuilder {
    org_id: OrgId,
    monthly_dues_amount: Money,
    billing_day: u8,
    grace_period_days: u16,
    is_active: bool,
    activated_on: NaiveDate,
}

impl Default for BillingConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BillingConfigBuilder {
    /// Creates a builder with the standard test config: 500.00 dues, billing
    /// day 1, 15-day grace, active since 2024-01-01
    pub fn new() -> Self {
        Self {
            org_id: OrgId::new(),
            monthly_dues_amount: MoneyFixtures::monthly_dues(),
            billing_day: 1,
            grace_period_days: 15,
            is_active: true,
            activated_on: DateFixtures::config_activation(),
        }
    }

    /// Sets the monthly dues amount
    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.monthly_dues_amount = Money::new(amount, Currency::USD);
        self
    }

    /// Sets the billing day of month
    pub fn with_billing_day(mut self, day: u8) -> Self {
        self.billing_day = day;
        self
    }

    /// Sets the org-level grace period
    pub fn with_grace_period_days(mut self, days: u16) -> Self {
        self.grace_period_days = days;
        self
    }

    /// Sets the activation date
    pub fn activated_on(mut self, date: NaiveDate) -> Self {
        self.activated_on = date;
        self
    }

    /// Marks billing suspended
    pub fn suspended(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn build(self) -> BillingConfig {
        let mut config = BillingConfig::new(
            self.org_id,
            self.monthly_dues_amount,
            self.billing_day,
            self.grace_period_days,
            self.activated_on,
        );
        config.is_active = self.is_active;
        config
    }
}

/// Builder for unit standing records
pub struct UnitStandingBuilder {
    unit_id: UnitId,
    billable_from: NaiveDate,
    is_active: bool,
    is_exempt: bool,
    on_time_streak_months: u32,
}

impl Default for UnitStandingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitStandingBuilder {
    /// Creates a builder for an active, non-exempt unit billable from the
    /// standard config activation date
    pub fn new() -> Self {
        Self {
            unit_id: UnitId::new(),
            billable_from: DateFixtures::config_activation(),
            is_active: true,
            is_exempt: false,
            on_time_streak_months: 0,
        }
    }

    pub fn with_unit_id(mut self, id: UnitId) -> Self {
        self.unit_id = id;
        self
    }

    pub fn billable_from(mut self, date: NaiveDate) -> Self {
        self.billable_from = date;
        self
    }

    pub fn with_streak(mut self, months: u32) -> Self {
        self.on_time_streak_months = months;
        self
    }

    pub fn exempt(mut self) -> Self {
        self.is_exempt = true;
        self
    }

    pub fn archived(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn build(self) -> UnitStanding {
        let mut unit = UnitStanding::new(self.unit_id, self.billable_from);
        unit.is_active = self.is_active;
        unit.is_exempt = self.is_exempt;
        unit.on_time_streak_months = self.on_time_streak_months;
        unit
    }
}

/// Builder for discount configs
pub struct DiscountBuilder {
    name: String,
    discount_type: DiscountType,
    value: Decimal,
    min_months: u32,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl Default for DiscountBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscountBuilder {
    /// Creates a builder for a 10% discount with no standing requirement
    pub fn new() -> Self {
        Self {
            name: "Test discount".to_string(),
            discount_type: DiscountType::Percentage,
            value: dec!(10),
            min_months: 0,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn percentage(mut self, value: Decimal) -> Self {
        self.discount_type = DiscountType::Percentage;
        self.value = value;
        self
    }

    pub fn fixed_amount(mut self, value: Decimal) -> Self {
        self.discount_type = DiscountType::FixedAmount;
        self.value = value;
        self
    }

    pub fn with_min_months(mut self, months: u32) -> Self {
        self.min_months = months;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Backdates creation, for tie-break ordering tests
    pub fn created_days_ago(mut self, days: i64) -> Self {
        self.created_at = Utc::now() - Duration::days(days);
        self
    }

    pub fn build(self) -> DiscountConfig {
        let mut discount = DiscountConfig::new(self.name, self.discount_type, self.value)
            .with_min_months(self.min_months);
        discount.is_active = self.is_active;
        discount.created_at = self.created_at;
        discount
    }
}

/// Builder for penalty policies
pub struct PenaltyPolicyBuilder {
    name: String,
    rate_type: PenaltyRateType,
    rate_value: Decimal,
    grace_period_days: Option<u16>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl Default for PenaltyPolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PenaltyPolicyBuilder {
    /// Creates a builder for a 10% late fee with no grace override
    pub fn new() -> Self {
        Self {
            name: "Test late fee".to_string(),
            rate_type: PenaltyRateType::Percent,
            rate_value: dec!(10),
            grace_period_days: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn percent(mut self, value: Decimal) -> Self {
        self.rate_type = PenaltyRateType::Percent;
        self.rate_value = value;
        self
    }

    pub fn fixed_amount(mut self, value: Decimal) -> Self {
        self.rate_type = PenaltyRateType::FixedAmount;
        self.rate_value = value;
        self
    }

    pub fn with_grace_period_days(mut self, days: u16) -> Self {
        self.grace_period_days = Some(days);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Backdates creation, for first-by-creation-order tests
    pub fn created_days_ago(mut self, days: i64) -> Self {
        self.created_at = Utc::now() - Duration::days(days);
        self
    }

    pub fn build(self) -> PenaltyPolicy {
        let mut policy = PenaltyPolicy::new(self.name, self.rate_type, self.rate_value);
        policy.grace_period_days = self.grace_period_days;
        policy.is_active = self.is_active;
        policy.created_at = self.created_at;
        policy
    }
}
