//! Billing engine entry point
//!
//! This is the orchestration boundary behind the dashboard's "Generate
//! Statements" action: plan the missing (unit, period) pairs, resolve rules
//! and price a statement for each, and persist through the `StatementStore`
//! port. Everything else in this crate is a pure computation; only the store
//! is a collaborator.

use chrono::NaiveDate;
use std::collections::HashMap;

use core_kernel::{Money, UnitId};

use crate::calculator::compute_statement;
use crate::config::{BillingConfig, DiscountConfig, PenaltyPolicy};
use crate::error::{DuesError, IntegrityWarning};
use crate::resolver::{resolve_rules, PenaltyContext};
use crate::scheduler::plan_generation;
use crate::statement::{DuesStatement, StatementKey};
use crate::unit::UnitStanding;

/// Persistence port for dues statements
///
/// Implementations hold the uniqueness constraint on (unit, month, year);
/// `insert` must report `DuplicateStatement` on conflict so the engine can
/// treat it as an idempotent skip. All operations are synchronous: the
/// engine never blocks or suspends.
pub trait StatementStore {
    /// Returns the keys of all existing statements for the organization
    fn existing_keys(&self) -> Vec<StatementKey>;

    /// Persists a newly generated statement
    ///
    /// # Errors
    ///
    /// Returns `DuplicateStatement` when a statement already exists for the
    /// same (unit, month, year).
    fn insert(&mut self, statement: DuesStatement) -> Result<(), DuesError>;
}

/// A HashMap-backed store for tests and single-process callers
///
/// Enforces the same (unit, month, year) uniqueness a database constraint
/// would.
#[derive(Debug, Default)]
pub struct InMemoryStatementStore {
    statements: HashMap<StatementKey, DuesStatement>,
}

impl InMemoryStatementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored statement for a key, if any
    pub fn get(&self, key: &StatementKey) -> Option<&DuesStatement> {
        self.statements.get(key)
    }

    /// Returns all stored statements
    pub fn all(&self) -> impl Iterator<Item = &DuesStatement> {
        self.statements.values()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl StatementStore for InMemoryStatementStore {
    fn existing_keys(&self) -> Vec<StatementKey> {
        self.statements.keys().copied().collect()
    }

    fn insert(&mut self, statement: DuesStatement) -> Result<(), DuesError> {
        let key = statement.key();
        if self.statements.contains_key(&key) {
            return Err(DuesError::DuplicateStatement {
                unit_id: key.unit_id,
                month: key.month,
                year: key.year,
            });
        }
        self.statements.insert(key, statement);
        Ok(())
    }
}

/// Result of a generation run
#[derive(Debug, Clone, Default)]
pub struct GenerationOutcome {
    /// Statements created and persisted
    pub created: usize,
    /// Targets skipped because a statement already existed at insert time
    pub skipped: usize,
    /// Non-fatal integrity conditions, deduplicated across the run
    pub warnings: Vec<IntegrityWarning>,
}

/// Runs a full statement-generation pass for one organization
///
/// Filters the rule collections to active entries, plans the missing
/// (unit, period) pairs, then resolves, prices, and persists a statement
/// for each. Duplicate-key conflicts at insert time count as skips, never
/// failures. An invalid config aborts the whole run before anything is
/// written; integrity warnings accumulate and are returned alongside the
/// created count.
///
/// # Errors
///
/// `InvalidConfig` on a broken active config; store errors other than
/// duplicates propagate unchanged.
pub fn run_generation<S: StatementStore>(
    config: &BillingConfig,
    units: &[UnitStanding],
    discounts: &[DiscountConfig],
    penalties: &[PenaltyPolicy],
    store: &mut S,
    as_of: NaiveDate,
) -> Result<GenerationOutcome, DuesError> {
    let active_discounts: Vec<DiscountConfig> =
        discounts.iter().filter(|d| d.is_active).cloned().collect();
    let active_penalties: Vec<PenaltyPolicy> =
        penalties.iter().filter(|p| p.is_active).cloned().collect();

    let existing = store.existing_keys();
    let targets = plan_generation(config, units, &existing, as_of)?;

    let units_by_id: HashMap<UnitId, &UnitStanding> =
        units.iter().map(|u| (u.unit_id, u)).collect();

    let mut outcome = GenerationOutcome::default();

    for target in targets {
        let Some(unit) = units_by_id.get(&target.unit_id) else {
            // plan_generation only emits units it was given
            continue;
        };

        let due_date = target.period.due_date(u32::from(config.billing_day));
        let ctx = PenaltyContext {
            due_date,
            org_grace_period_days: config.grace_period_days,
            as_of,
            // Nothing has been paid against a statement that does not exist yet
            outstanding: config.monthly_dues_amount,
        };

        let resolved = resolve_rules(
            unit,
            &active_discounts,
            &active_penalties,
            &ctx,
            config.monthly_dues_amount,
        );
        for warning in &resolved.warnings {
            if !outcome.warnings.contains(warning) {
                outcome.warnings.push(warning.clone());
            }
        }

        let statement = compute_statement(
            config,
            unit,
            target.period,
            &resolved,
            Money::zero(config.monthly_dues_amount.currency()),
            as_of,
        )?;

        match store.insert(statement) {
            Ok(()) => outcome.created += 1,
            Err(DuesError::DuplicateStatement { .. }) => {
                // Idempotency invariant: a concurrent or prior run won; skip
                outcome.skipped += 1;
            }
            Err(other) => return Err(other),
        }
    }

    tracing::info!(
        org_id = %config.org_id,
        created = outcome.created,
        skipped = outcome.skipped,
        warnings = outcome.warnings.len(),
        "dues generation run complete"
    );

    Ok(outcome)
}
