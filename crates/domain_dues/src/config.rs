//! Billing configuration records
//!
//! Configuration is owned by the organization and read by the engine, never
//! mutated by it. The config is passed explicitly into every engine call;
//! the engine keeps no ambient or global configuration state.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{BillingConfigId, DiscountId, Money, OrgId, PenaltyPolicyId, Rate};

use crate::error::DuesError;

/// Latest day-of-month a billing day may be configured for
///
/// Restricting configuration to 1-28 keeps configured due dates valid in
/// every month; the due-date derivation still clamps defensively.
pub const MAX_BILLING_DAY: u8 = 28;

/// Organization-wide recurring dues configuration
///
/// Exactly one active config is expected per organization at a time; the
/// engine trusts the caller to supply the active record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingConfig {
    /// Unique identifier
    pub id: BillingConfigId,
    /// Owning organization
    pub org_id: OrgId,
    /// The per-period dues amount, copied into each statement at generation
    pub monthly_dues_amount: Money,
    /// Day of month statements fall due, 1-28
    pub billing_day: u8,
    /// Days after the due date before a penalty may accrue
    pub grace_period_days: u16,
    /// Whether billing is currently active for the organization
    pub is_active: bool,
    /// Date this config took effect; units are never billed for periods
    /// before it
    pub activated_on: NaiveDate,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl BillingConfig {
    /// Creates a new active billing config
    pub fn new(
        org_id: OrgId,
        monthly_dues_amount: Money,
        billing_day: u8,
        grace_period_days: u16,
        activated_on: NaiveDate,
    ) -> Self {
        Self {
            id: BillingConfigId::new_v7(),
            org_id,
            monthly_dues_amount,
            billing_day,
            grace_period_days,
            is_active: true,
            activated_on,
            created_at: Utc::now(),
        }
    }

    /// Suspends billing under this config
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Validates the config for use in a generation run
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` when the dues amount is not positive or the
    /// billing day falls outside 1-28.
    pub fn validate(&self) -> Result<(), DuesError> {
        if !self.monthly_dues_amount.is_positive() {
            return Err(DuesError::invalid_config(format!(
                "monthly dues amount must be positive, got {}",
                self.monthly_dues_amount
            )));
        }
        if self.billing_day < 1 || self.billing_day > MAX_BILLING_DAY {
            return Err(DuesError::invalid_config(format!(
                "billing day must be 1-{}, got {}",
                MAX_BILLING_DAY, self.billing_day
            )));
        }
        Ok(())
    }
}

/// Selects the organization's active billing config from its on-file records
///
/// Exactly one active record is expected; if several are active the
/// earliest-created one wins, keeping selection deterministic.
///
/// # Errors
///
/// Returns `NoActiveConfig` when no record is active, so a generation run
/// triggered against a fully suspended organization fails explicitly rather
/// than billing from a stale config.
pub fn active_config(configs: &[BillingConfig]) -> Result<&BillingConfig, DuesError> {
    configs
        .iter()
        .filter(|c| c.is_active)
        .min_by_key(|c| c.created_at)
        .ok_or(DuesError::NoActiveConfig)
}

/// How a discount value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// Value is a percentage of the base amount, 0-100
    Percentage,
    /// Value is a flat currency amount
    FixedAmount,
}

/// A named reduction rule for units in good standing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountConfig {
    /// Unique identifier
    pub id: DiscountId,
    /// Display name
    pub name: String,
    /// How `value` is interpreted
    pub discount_type: DiscountType,
    /// Percentage (0-100) or flat currency amount
    pub value: Decimal,
    /// Minimum consecutive on-time-paid months required to qualify;
    /// 0 means no standing requirement
    pub min_months: u32,
    /// Whether this discount is currently offered
    pub is_active: bool,
    /// Created timestamp; breaks ties when two discounts reduce equally
    pub created_at: DateTime<Utc>,
}

impl DiscountConfig {
    /// Creates a new active discount
    pub fn new(name: impl Into<String>, discount_type: DiscountType, value: Decimal) -> Self {
        Self {
            id: DiscountId::new_v7(),
            name: name.into(),
            discount_type,
            value,
            min_months: 0,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Sets the standing requirement
    pub fn with_min_months(mut self, min_months: u32) -> Self {
        self.min_months = min_months;
        self
    }

    /// Computes the absolute currency reduction against a base amount
    ///
    /// The result is clamped into `[0, base]` so a discount can never drive
    /// the net amount negative.
    pub fn reduction(&self, base: Money) -> Money {
        let raw = match self.discount_type {
            DiscountType::Percentage => Rate::from_percentage(self.value).apply(&base),
            DiscountType::FixedAmount => Money::new(self.value, base.currency()),
        };
        raw.clamp_to(base)
            .expect("reduction is computed in the base currency")
    }
}

/// How a penalty rate value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PenaltyRateType {
    /// Value is a percentage of the base amount per period
    Percent,
    /// Value is a flat currency amount
    FixedAmount,
}

/// A named late-fee rule
///
/// At most one active penalty policy is applied per statement; penalties
/// never stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenaltyPolicy {
    /// Unique identifier
    pub id: PenaltyPolicyId,
    /// Display name
    pub name: String,
    /// How `rate_value` is interpreted
    pub rate_type: PenaltyRateType,
    /// Percentage or flat currency amount
    pub rate_value: Decimal,
    /// Policy-level override of the org-level grace period
    pub grace_period_days: Option<u16>,
    /// Whether this policy is currently in force
    pub is_active: bool,
    /// Created timestamp; disambiguates multiple active policies
    pub created_at: DateTime<Utc>,
}

impl PenaltyPolicy {
    /// Creates a new active penalty policy
    pub fn new(name: impl Into<String>, rate_type: PenaltyRateType, rate_value: Decimal) -> Self {
        Self {
            id: PenaltyPolicyId::new_v7(),
            name: name.into(),
            rate_type,
            rate_value,
            grace_period_days: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Overrides the org-level grace period for this policy
    pub fn with_grace_period_days(mut self, days: u16) -> Self {
        self.grace_period_days = Some(days);
        self
    }

    /// Returns the grace period in force: the policy override if present,
    /// else the org-level default
    pub fn effective_grace_days(&self, org_default: u16) -> u16 {
        self.grace_period_days.unwrap_or(org_default)
    }

    /// Computes the penalty amount against a base amount
    ///
    /// Percent penalties are computed against the base, never against the
    /// discounted amount. The result is clamped to be non-negative.
    pub fn amount(&self, base: Money) -> Money {
        let raw = match self.rate_type {
            PenaltyRateType::Percent => Rate::from_percentage(self.rate_value).apply(&base),
            PenaltyRateType::FixedAmount => Money::new(self.rate_value, base.currency()),
        };
        raw.clamp_non_negative()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn base() -> Money {
        Money::new(dec!(500.00), Currency::USD)
    }

    fn config(amount: Decimal, billing_day: u8) -> BillingConfig {
        BillingConfig::new(
            OrgId::new(),
            Money::new(amount, Currency::USD),
            billing_day,
            15,
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(config(dec!(500), 1).validate().is_ok());
        assert!(config(dec!(0.01), 28).validate().is_ok());
    }

    #[test]
    fn test_active_config_selects_active_record() {
        let mut suspended = config(dec!(400), 1);
        suspended.deactivate();
        let active = config(dec!(500), 1);

        let configs = [suspended, active.clone()];
        let selected = active_config(&configs).unwrap();
        assert_eq!(selected.id, active.id);
    }

    #[test]
    fn test_active_config_errors_when_all_suspended() {
        let mut suspended = config(dec!(500), 1);
        suspended.deactivate();

        assert!(matches!(
            active_config(&[suspended]),
            Err(DuesError::NoActiveConfig)
        ));
        assert!(matches!(active_config(&[]), Err(DuesError::NoActiveConfig)));
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        assert!(matches!(
            config(dec!(0), 1).validate(),
            Err(DuesError::InvalidConfig { .. })
        ));
        assert!(matches!(
            config(dec!(-10), 1).validate(),
            Err(DuesError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_billing_day_out_of_range_rejected() {
        assert!(config(dec!(500), 0).validate().is_err());
        assert!(config(dec!(500), 29).validate().is_err());
    }

    #[test]
    fn test_percentage_discount_reduction() {
        let d = DiscountConfig::new("Loyalty", DiscountType::Percentage, dec!(10));
        assert_eq!(d.reduction(base()).amount(), dec!(50.00));
    }

    #[test]
    fn test_fixed_discount_reduction() {
        let d = DiscountConfig::new("Promo", DiscountType::FixedAmount, dec!(40));
        assert_eq!(d.reduction(base()).amount(), dec!(40.00));
    }

    #[test]
    fn test_oversized_discount_clamps_to_base() {
        let d = DiscountConfig::new("Full waiver", DiscountType::FixedAmount, dec!(9999));
        assert_eq!(d.reduction(base()), base());

        let d = DiscountConfig::new("Overshoot", DiscountType::Percentage, dec!(150));
        assert_eq!(d.reduction(base()), base());
    }

    #[test]
    fn test_penalty_amount_percent_of_base() {
        let p = PenaltyPolicy::new("Late fee", PenaltyRateType::Percent, dec!(10));
        assert_eq!(p.amount(base()).amount(), dec!(50.00));
    }

    #[test]
    fn test_penalty_amount_never_negative() {
        let p = PenaltyPolicy::new("Broken", PenaltyRateType::FixedAmount, dec!(-25));
        assert!(p.amount(base()).is_zero());
    }

    #[test]
    fn test_effective_grace_prefers_policy_override() {
        let p = PenaltyPolicy::new("Late fee", PenaltyRateType::Percent, dec!(10))
            .with_grace_period_days(5);
        assert_eq!(p.effective_grace_days(15), 5);

        let p = PenaltyPolicy::new("Late fee", PenaltyRateType::Percent, dec!(10));
        assert_eq!(p.effective_grace_days(15), 15);
    }
}
