//! Billing domain errors and non-fatal integrity warnings

use core_kernel::{MoneyError, UnitId};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur in the dues billing domain
#[derive(Debug, Error)]
pub enum DuesError {
    /// Billing configuration fails validation
    #[error("Invalid billing config: {reason}")]
    InvalidConfig { reason: String },

    /// No active billing config was supplied when generation was triggered
    #[error("No active billing config for organization")]
    NoActiveConfig,

    /// A statement already exists for this (unit, month, year)
    ///
    /// The engine treats this as an idempotent skip, never a failure of the
    /// generation run; the variant exists so stores can report the conflict.
    #[error("Statement already exists for unit {unit_id} in {year:04}-{month:02}")]
    DuplicateStatement {
        unit_id: UnitId,
        month: u32,
        year: i32,
    },

    /// Payment recording rejected (non-positive amount)
    #[error("Invalid payment: {reason}")]
    InvalidPayment { reason: String },

    /// Monetary arithmetic error
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}

impl DuesError {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        DuesError::InvalidConfig {
            reason: reason.into(),
        }
    }

    pub fn invalid_payment(reason: impl Into<String>) -> Self {
        DuesError::InvalidPayment {
            reason: reason.into(),
        }
    }
}

/// Non-fatal data-integrity conditions detected during rule resolution
///
/// Warnings never abort a billing run; they accumulate on the run outcome so
/// the caller can surface them for operator correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntegrityWarning {
    /// More than one active penalty policy was supplied; the resolver picked
    /// the first by creation order.
    MultipleActivePenaltyPolicies { count: usize },
}

impl fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityWarning::MultipleActivePenaltyPolicies { count } => write!(
                f,
                "{count} active penalty policies found; applied the earliest-created one"
            ),
        }
    }
}
