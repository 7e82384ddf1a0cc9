//! Unit registry collaborator records
//!
//! The unit registry lives outside this crate; the engine only sees the
//! per-unit standing snapshot it needs for rule resolution and generation
//! planning.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::UnitId;

/// A billable unit's standing, as supplied by the unit registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitStanding {
    /// Unit identifier
    pub unit_id: UnitId,
    /// First date the unit is billable (registration date)
    pub billable_from: NaiveDate,
    /// False when the unit is archived or soft-deleted
    pub is_active: bool,
    /// True when the unit is exempt from dues; statements are still
    /// generated but carry the Waived status
    pub is_exempt: bool,
    /// Consecutive on-time-paid months, used for discount eligibility
    pub on_time_streak_months: u32,
}

impl UnitStanding {
    /// Creates an active, non-exempt unit with no payment history
    pub fn new(unit_id: UnitId, billable_from: NaiveDate) -> Self {
        Self {
            unit_id,
            billable_from,
            is_active: true,
            is_exempt: false,
            on_time_streak_months: 0,
        }
    }

    /// Sets the on-time payment streak
    pub fn with_streak(mut self, months: u32) -> Self {
        self.on_time_streak_months = months;
        self
    }

    /// Marks the unit exempt from dues
    pub fn exempt(mut self) -> Self {
        self.is_exempt = true;
        self
    }

    /// Archives the unit
    pub fn archived(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Returns true if the unit's streak satisfies a discount's standing
    /// requirement
    pub fn meets_streak(&self, min_months: u32) -> bool {
        self.on_time_streak_months >= min_months
    }
}
