//! Dues statements
//!
//! A `DuesStatement` is the generated bill for one unit for one calendar
//! period. `base_amount` and `due_date` are fixed at creation; `amount_paid`,
//! `penalty_amount`, and `status` evolve as payments arrive and time passes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{BillingPeriod, Money, StatementId, UnitId};

use crate::error::DuesError;

/// Statement payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatementStatus {
    /// No payment received, within grace
    Unpaid,
    /// Some payment received, balance remains
    Partial,
    /// Fully settled
    Paid,
    /// Balance remains past the due date plus grace period
    Overdue,
    /// Unit is exempt from dues for this period
    Waived,
}

/// The idempotency key for a statement: one per (unit, month, year)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatementKey {
    pub unit_id: UnitId,
    pub month: u32,
    pub year: i32,
}

impl StatementKey {
    pub fn new(unit_id: UnitId, period: BillingPeriod) -> Self {
        Self {
            unit_id,
            month: period.month(),
            year: period.year(),
        }
    }
}

/// A generated dues bill for one unit for one billing period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuesStatement {
    /// Unique identifier
    pub id: StatementId,
    /// Billed unit
    pub unit_id: UnitId,
    /// Billing period this statement covers
    pub period: BillingPeriod,
    /// The configured dues amount at generation time; write-once
    pub base_amount: Money,
    /// Applied discount, 0 <= discount <= base
    pub discount_amount: Money,
    /// Applied late penalty, >= 0; recomputable as time passes
    pub penalty_amount: Money,
    /// base - discount + penalty, clamped >= 0
    pub net_amount: Money,
    /// Total received; monotonically non-decreasing
    pub amount_paid: Money,
    /// net - paid, clamped >= 0
    pub balance_due: Money,
    /// Current payment status
    pub status: StatementStatus,
    /// Derived from the config billing day; write-once
    pub due_date: NaiveDate,
    /// Set when the balance reaches zero
    pub paid_date: Option<NaiveDate>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl DuesStatement {
    /// Returns the idempotency key for this statement
    pub fn key(&self) -> StatementKey {
        StatementKey::new(self.unit_id, self.period)
    }

    /// Returns true if nothing further is owed
    pub fn is_settled(&self) -> bool {
        self.balance_due.is_zero()
    }

    /// Records a payment against the statement
    ///
    /// `amount_paid` only ever grows; the balance re-derives from the
    /// current net amount and the status moves to Paid or Partial. Whether a
    /// remaining balance is Overdue is a question of elapsed time and is
    /// answered by `calculator::reevaluate`, not here.
    ///
    /// # Errors
    ///
    /// Rejects non-positive amounts and currency mismatches.
    pub fn record_payment(&mut self, amount: Money, on: NaiveDate) -> Result<(), DuesError> {
        if !amount.is_positive() {
            return Err(DuesError::invalid_payment(format!(
                "payment amount must be positive, got {amount}"
            )));
        }

        self.amount_paid = self.amount_paid.checked_add(&amount)?;
        self.balance_due = self
            .net_amount
            .checked_sub(&self.amount_paid)?
            .clamp_non_negative()
            .round_half_up();

        if self.balance_due.is_zero() {
            self.status = StatementStatus::Paid;
            if self.paid_date.is_none() {
                self.paid_date = Some(on);
            }
        } else {
            self.status = StatementStatus::Partial;
        }

        Ok(())
    }
}
