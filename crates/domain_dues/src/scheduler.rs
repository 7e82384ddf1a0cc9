//! Generation Scheduler
//!
//! Decides which (unit, period) pairs are missing a statement and need one
//! created. Planning is idempotent and side-effect-free: the true duplicate
//! guard is the store's uniqueness constraint on (unit, month, year); the
//! in-memory check here is an optimization, not the sole guarantee.

use chrono::NaiveDate;
use std::collections::HashSet;

use core_kernel::{BillingPeriod, UnitId};

use crate::config::BillingConfig;
use crate::error::DuesError;
use crate::statement::StatementKey;
use crate::unit::UnitStanding;

/// A (unit, period) pair due for statement generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationTarget {
    pub unit_id: UnitId,
    pub period: BillingPeriod,
}

/// Plans which statements to generate as of a given date
///
/// For each active unit, candidate periods run from the later of the unit's
/// billable-from date and the config's activation date through `as_of`'s
/// period, inclusive. Candidates with an existing statement are skipped.
///
/// An inactive config means billing is suspended: the plan is empty, which
/// is a valid state rather than an error.
///
/// # Errors
///
/// Returns `InvalidConfig` when an active config fails validation; a broken
/// config must never produce a partial billing run.
pub fn plan_generation(
    config: &BillingConfig,
    units: &[UnitStanding],
    existing: &[StatementKey],
    as_of: NaiveDate,
) -> Result<Vec<GenerationTarget>, DuesError> {
    if !config.is_active {
        tracing::debug!(org_id = %config.org_id, "billing suspended; nothing to plan");
        return Ok(Vec::new());
    }
    config.validate()?;

    let existing: HashSet<&StatementKey> = existing.iter().collect();
    let current_period = BillingPeriod::containing(as_of);
    let mut targets = Vec::new();

    for unit in units {
        if !unit.is_active {
            tracing::debug!(unit_id = %unit.unit_id, "skipping archived unit");
            continue;
        }

        let billing_start = unit.billable_from.max(config.activated_on);
        let start_period = BillingPeriod::containing(billing_start);

        for period in start_period.through(current_period) {
            let key = StatementKey::new(unit.unit_id, period);
            if existing.contains(&key) {
                continue;
            }
            targets.push(GenerationTarget {
                unit_id: unit.unit_id,
                period,
            });
        }
    }

    Ok(targets)
}
