//! Rule Resolver
//!
//! Selects which discount (at most one) and which penalty policy (at most
//! one) apply to a unit for a billing period. Pure functions of their
//! inputs; callers pre-filter the rule collections to active entries.

use chrono::NaiveDate;

use core_kernel::{is_past_grace, Money};

use crate::config::{DiscountConfig, PenaltyPolicy};
use crate::error::IntegrityWarning;
use crate::unit::UnitStanding;

/// A discount selected for a statement, with its computed reduction
#[derive(Debug, Clone)]
pub struct ResolvedDiscount {
    pub discount: DiscountConfig,
    /// Absolute currency reduction against the base amount, clamped to
    /// `[0, base]`
    pub reduction: Money,
}

/// The outcome of rule resolution for one (unit, period)
#[derive(Debug, Clone, Default)]
pub struct ResolvedRules {
    /// Zero or one discount; discounts never stack
    pub discount: Option<ResolvedDiscount>,
    /// Zero or one penalty policy; penalties never stack
    pub penalty: Option<PenaltyPolicy>,
    /// Non-fatal integrity conditions detected while resolving
    pub warnings: Vec<IntegrityWarning>,
}

/// Temporal context for penalty eligibility
#[derive(Debug, Clone, Copy)]
pub struct PenaltyContext {
    /// The statement's due date
    pub due_date: NaiveDate,
    /// Org-level grace period, used when a policy carries no override
    pub org_grace_period_days: u16,
    /// Evaluation date
    pub as_of: NaiveDate,
    /// Balance outstanding at evaluation time; no penalty accrues on a
    /// settled statement
    pub outstanding: Money,
}

/// Selects the single applicable discount for a unit, if any
///
/// A discount is eligible when the unit's on-time streak meets its standing
/// requirement. Among eligible discounts the one with the largest absolute
/// currency reduction against `base` wins; ties break to the earliest
/// created.
pub fn select_discount(
    unit: &UnitStanding,
    discounts: &[DiscountConfig],
    base: Money,
) -> Option<ResolvedDiscount> {
    let mut best: Option<ResolvedDiscount> = None;

    for candidate in discounts {
        if !unit.meets_streak(candidate.min_months) {
            continue;
        }
        let reduction = candidate.reduction(base);
        let replaces = match &best {
            None => true,
            Some(current) => {
                reduction.amount() > current.reduction.amount()
                    || (reduction.amount() == current.reduction.amount()
                        && candidate.created_at < current.discount.created_at)
            }
        };
        if replaces {
            best = Some(ResolvedDiscount {
                discount: candidate.clone(),
                reduction,
            });
        }
    }

    best
}

/// Selects the applicable penalty policy, if any
///
/// More than one active policy is a configuration error: the resolver
/// proceeds deterministically with the earliest-created policy and records
/// an integrity warning rather than failing the run. The selected policy
/// applies only when the due date plus its effective grace period is
/// strictly before the evaluation date and a balance is outstanding.
pub fn select_penalty(
    penalties: &[PenaltyPolicy],
    ctx: &PenaltyContext,
) -> (Option<PenaltyPolicy>, Vec<IntegrityWarning>) {
    let mut warnings = Vec::new();

    if penalties.len() > 1 {
        tracing::warn!(
            count = penalties.len(),
            "multiple active penalty policies; applying the earliest-created one"
        );
        warnings.push(IntegrityWarning::MultipleActivePenaltyPolicies {
            count: penalties.len(),
        });
    }

    let policy = penalties.iter().min_by_key(|p| p.created_at);

    let applies = policy.is_some_and(|p| {
        is_past_grace(
            ctx.due_date,
            p.effective_grace_days(ctx.org_grace_period_days),
            ctx.as_of,
        ) && ctx.outstanding.is_positive()
    });

    (applies.then(|| policy.cloned()).flatten(), warnings)
}

/// Resolves the full rule set for one (unit, period)
pub fn resolve_rules(
    unit: &UnitStanding,
    discounts: &[DiscountConfig],
    penalties: &[PenaltyPolicy],
    ctx: &PenaltyContext,
    base: Money,
) -> ResolvedRules {
    let discount = select_discount(unit, discounts, base);
    let (penalty, warnings) = select_penalty(penalties, ctx);

    ResolvedRules {
        discount,
        penalty,
        warnings,
    }
}
