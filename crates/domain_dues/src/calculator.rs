//! Statement Calculator
//!
//! Pure pricing of a dues statement from a billing config and resolved
//! rules. Nothing here persists; the returned statement is handed to the
//! caller's store.
//!
//! Monetary results are rounded to two decimal places with round-half-up,
//! once at the end of each derived field's computation.

use chrono::NaiveDate;

use core_kernel::{is_past_grace, BillingPeriod, Money, StatementId};

use crate::config::{BillingConfig, PenaltyPolicy};
use crate::error::DuesError;
use crate::resolver::ResolvedRules;
use crate::statement::{DuesStatement, StatementStatus};
use crate::unit::UnitStanding;

/// Computes a fully-priced statement for one (unit, period)
///
/// Pricing rules:
/// - `base` is the configured dues amount and must be positive
/// - the discount reduction is clamped into `[0, base]`
/// - a percent penalty is computed against the base, not the discounted
///   amount
/// - `net = max(0, base - discount + penalty)`
/// - `balance = max(0, net - prior_paid)`
///
/// # Errors
///
/// Returns `InvalidConfig` when the config fails validation, or a money
/// error when `prior_paid` is in a different currency than the base.
pub fn compute_statement(
    config: &BillingConfig,
    unit: &UnitStanding,
    period: BillingPeriod,
    resolved: &ResolvedRules,
    prior_paid: Money,
    as_of: NaiveDate,
) -> Result<DuesStatement, DuesError> {
    config.validate()?;

    let base_amount = config.monthly_dues_amount.round_half_up();

    let discount_amount = match &resolved.discount {
        Some(d) => d.reduction.round_half_up(),
        None => Money::zero(base_amount.currency()),
    };

    let penalty_amount = match &resolved.penalty {
        Some(p) => p.amount(base_amount).round_half_up(),
        None => Money::zero(base_amount.currency()),
    };

    let net_amount = base_amount
        .checked_sub(&discount_amount)?
        .checked_add(&penalty_amount)?
        .clamp_non_negative()
        .round_half_up();

    let balance_due = net_amount
        .checked_sub(&prior_paid)?
        .clamp_non_negative()
        .round_half_up();

    let due_date = period.due_date(u32::from(config.billing_day));
    let grace_days = resolved
        .penalty
        .as_ref()
        .map(|p| p.effective_grace_days(config.grace_period_days))
        .unwrap_or(config.grace_period_days);

    let status = derive_status(
        unit.is_exempt,
        net_amount,
        prior_paid,
        balance_due,
        due_date,
        grace_days,
        as_of,
    );

    let paid_date = (balance_due.is_zero() && prior_paid.is_positive()).then_some(as_of);

    Ok(DuesStatement {
        id: StatementId::new_v7(),
        unit_id: unit.unit_id,
        period,
        base_amount,
        discount_amount,
        penalty_amount,
        net_amount,
        amount_paid: prior_paid,
        balance_due,
        status,
        due_date,
        paid_date,
        created_at: chrono::Utc::now(),
    })
}

/// Re-derives the time-sensitive fields of an existing statement
///
/// A statement created as Unpaid becomes Overdue purely through elapsed
/// time, and its penalty may start accruing, with no new payment event.
/// This recomputes `penalty_amount`, `net_amount`, `balance_due`, `status`,
/// and `paid_date`; it never touches `base_amount`, `due_date`,
/// `discount_amount`, or `amount_paid`.
///
/// `policy` is the single penalty policy in force (from the resolver), or
/// `None` when the organization has none.
pub fn reevaluate(
    statement: &DuesStatement,
    config: &BillingConfig,
    policy: Option<&PenaltyPolicy>,
    as_of: NaiveDate,
) -> Result<DuesStatement, DuesError> {
    // Outstanding balance before any penalty decides whether one accrues.
    // A penalty that already accrued sticks even after the statement is
    // settled; it is not forgiven retroactively by the payment.
    let pre_penalty_outstanding = statement
        .base_amount
        .checked_sub(&statement.discount_amount)?
        .checked_sub(&statement.amount_paid)?
        .clamp_non_negative();
    let already_accrued = statement.penalty_amount.is_positive();

    let penalty_applies = policy.is_some_and(|p| {
        is_past_grace(
            statement.due_date,
            p.effective_grace_days(config.grace_period_days),
            as_of,
        ) && (pre_penalty_outstanding.is_positive() || already_accrued)
    });

    let penalty_amount = match policy {
        Some(p) if penalty_applies => p.amount(statement.base_amount).round_half_up(),
        _ => Money::zero(statement.base_amount.currency()),
    };

    let net_amount = statement
        .base_amount
        .checked_sub(&statement.discount_amount)?
        .checked_add(&penalty_amount)?
        .clamp_non_negative()
        .round_half_up();

    let balance_due = net_amount
        .checked_sub(&statement.amount_paid)?
        .clamp_non_negative()
        .round_half_up();

    let grace_days = policy
        .map(|p| p.effective_grace_days(config.grace_period_days))
        .unwrap_or(config.grace_period_days);

    let was_waived = statement.status == StatementStatus::Waived;
    let status = derive_status(
        was_waived,
        net_amount,
        statement.amount_paid,
        balance_due,
        statement.due_date,
        grace_days,
        as_of,
    );

    let paid_date = match statement.paid_date {
        Some(d) => Some(d),
        None => (balance_due.is_zero() && statement.amount_paid.is_positive()).then_some(as_of),
    };

    Ok(DuesStatement {
        penalty_amount,
        net_amount,
        balance_due,
        status,
        paid_date,
        ..statement.clone()
    })
}

/// Derives the statement status, in order of precedence:
/// Waived, Paid, Partial, Overdue, Unpaid
fn derive_status(
    is_exempt: bool,
    net_amount: Money,
    amount_paid: Money,
    balance_due: Money,
    due_date: NaiveDate,
    grace_days: u16,
    as_of: NaiveDate,
) -> StatementStatus {
    if is_exempt {
        StatementStatus::Waived
    } else if balance_due.is_zero() {
        StatementStatus::Paid
    } else if amount_paid.is_positive() && amount_paid < net_amount {
        StatementStatus::Partial
    } else if is_past_grace(due_date, grace_days, as_of) {
        StatementStatus::Overdue
    } else {
        StatementStatus::Unpaid
    }
}
