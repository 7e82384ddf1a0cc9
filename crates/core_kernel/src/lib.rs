//! Core Kernel - Foundational types and utilities for the dues billing system
//!
//! This crate provides the fundamental building blocks used by the billing
//! domain:
//! - Money types with precise decimal arithmetic
//! - Billing periods and calendar arithmetic
//! - Common identifiers and value objects

pub mod error;
pub mod identifiers;
pub mod money;
pub mod temporal;

pub use error::CoreError;
pub use identifiers::{
    BillingConfigId, DiscountId, OrgId, PaymentId, PenaltyPolicyId, StatementId, UnitId,
};
pub use money::{Currency, Money, MoneyError, Rate};
pub use temporal::{grace_deadline, is_past_grace, BillingPeriod, TemporalError};
