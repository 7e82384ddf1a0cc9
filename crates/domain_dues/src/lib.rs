//! Dues Billing Domain - Recurring Statement Generation
//!
//! This crate implements the recurring-dues billing engine for the property
//! management system: given an organization's billing configuration, its
//! discount and penalty rules, and its unit registry, it prices monthly dues
//! statements and plans which ones need generating.
//!
//! # Components
//!
//! The engine has three internally-ordered parts:
//! - **Rule Resolver** (`resolver`): picks the single applicable discount
//!   and penalty policy for a (unit, period)
//! - **Statement Calculator** (`calculator`): pure pricing of a statement
//!   from config, resolved rules, and prior payments
//! - **Generation Scheduler** (`scheduler`): plans the missing
//!   (unit, period) pairs, idempotently
//!
//! The `engine` module ties them together behind the externally visible
//! "generate statements" entry point and the `StatementStore` port. The
//! engine is stateless: configuration is passed explicitly into every call
//! and nothing is ever read from ambient state.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_dues::{run_generation, InMemoryStatementStore};
//!
//! let mut store = InMemoryStatementStore::new();
//! let outcome = run_generation(&config, &units, &discounts, &penalties, &mut store, today)?;
//! println!("{} statements created", outcome.created);
//! ```

pub mod calculator;
pub mod config;
pub mod engine;
pub mod error;
pub mod resolver;
pub mod scheduler;
pub mod statement;
pub mod unit;

pub use calculator::{compute_statement, reevaluate};
pub use config::{
    active_config, BillingConfig, DiscountConfig, DiscountType, PenaltyPolicy, PenaltyRateType,
};
pub use engine::{run_generation, GenerationOutcome, InMemoryStatementStore, StatementStore};
pub use error::{DuesError, IntegrityWarning};
pub use resolver::{resolve_rules, PenaltyContext, ResolvedDiscount, ResolvedRules};
pub use scheduler::{plan_generation, GenerationTarget};
pub use statement::{DuesStatement, StatementKey, StatementStatus};
pub use unit::UnitStanding;
