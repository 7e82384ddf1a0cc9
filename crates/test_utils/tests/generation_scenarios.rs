//! Builder-driven generation scenarios
//!
//! Runs the billing engine end to end through the fixtures and builders,
//! exercising the combinations an association actually configures: loyalty
//! discounts gated on standing, a late-fee policy, exempt units, and a
//! suspended config.

use rust_decimal_macros::dec;

use domain_dues::{run_generation, InMemoryStatementStore, StatementStatus};
use test_utils::{
    BillingConfigBuilder, DateFixtures, DiscountBuilder, PenaltyPolicyBuilder, UnitStandingBuilder,
};

#[test]
fn test_mixed_roster_generation() {
    let config = BillingConfigBuilder::new().build();
    let loyal = UnitStandingBuilder::new().with_streak(12).build();
    let fresh = UnitStandingBuilder::new().build();
    let exempt = UnitStandingBuilder::new().exempt().build();
    let archived = UnitStandingBuilder::new().archived().build();

    let discounts = vec![DiscountBuilder::new()
        .named("Loyalty")
        .percentage(dec!(10))
        .with_min_months(12)
        .build()];
    let penalties = vec![PenaltyPolicyBuilder::new().build()];

    let mut store = InMemoryStatementStore::new();
    let outcome = run_generation(
        &config,
        &[loyal.clone(), fresh.clone(), exempt.clone(), archived],
        &discounts,
        &penalties,
        &mut store,
        DateFixtures::within_grace(),
    )
    .unwrap();

    // Three active units, three periods each (Jan-Mar); archived unit skipped
    assert_eq!(outcome.created, 9);
    assert!(outcome.warnings.is_empty());

    // The loyal unit got the 10% reduction on every statement; the current
    // period (March, still within grace) carries no penalty, so net is 450
    for stmt in store.all().filter(|s| s.unit_id == loyal.unit_id) {
        assert_eq!(stmt.discount_amount.amount(), dec!(50.00));
    }
    let march = store
        .all()
        .find(|s| s.unit_id == loyal.unit_id && s.period.month() == 3)
        .unwrap();
    assert_eq!(march.net_amount.amount(), dec!(450.00));
    assert!(march.penalty_amount.is_zero());

    // The fresh unit did not qualify
    for stmt in store.all().filter(|s| s.unit_id == fresh.unit_id) {
        assert!(stmt.discount_amount.is_zero());
    }

    // The exempt unit's statements are waived
    for stmt in store.all().filter(|s| s.unit_id == exempt.unit_id) {
        assert_eq!(stmt.status, StatementStatus::Waived);
    }
}

#[test]
fn test_catchup_run_penalizes_only_lapsed_periods() {
    let config = BillingConfigBuilder::new().build();
    let unit = UnitStandingBuilder::new().build();
    let penalties = vec![PenaltyPolicyBuilder::new().percent(dec!(10)).build()];

    // April 10: March's deadline (Mar 16) has passed, April's (Apr 16) has not
    let as_of = chrono::NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();

    let mut store = InMemoryStatementStore::new();
    let outcome = run_generation(&config, &[unit], &[], &penalties, &mut store, as_of).unwrap();

    // Jan through Apr
    assert_eq!(outcome.created, 4);

    let mut by_month: Vec<_> = store.all().collect();
    by_month.sort_by_key(|s| (s.period.year(), s.period.month()));

    assert_eq!(by_month[0].status, StatementStatus::Overdue);
    assert_eq!(by_month[0].penalty_amount.amount(), dec!(50.00));
    assert_eq!(by_month[2].status, StatementStatus::Overdue);
    assert_eq!(by_month[3].status, StatementStatus::Unpaid);
    assert!(by_month[3].penalty_amount.is_zero());
}

#[test]
fn test_suspended_config_generates_nothing() {
    let config = BillingConfigBuilder::new().suspended().build();
    let unit = UnitStandingBuilder::new().build();

    let mut store = InMemoryStatementStore::new();
    let outcome = run_generation(
        &config,
        &[unit],
        &[],
        &[],
        &mut store,
        DateFixtures::within_grace(),
    )
    .unwrap();

    assert_eq!(outcome.created, 0);
    assert!(store.is_empty());
}

#[test]
fn test_duplicate_policies_warn_but_apply_earliest() {
    let config = BillingConfigBuilder::new().build();
    let unit = UnitStandingBuilder::new().build();

    let older = PenaltyPolicyBuilder::new()
        .named("Original late fee")
        .percent(dec!(10))
        .created_days_ago(365)
        .build();
    let newer = PenaltyPolicyBuilder::new()
        .named("Accidental duplicate")
        .fixed_amount(dec!(100))
        .build();

    let mut store = InMemoryStatementStore::new();
    let outcome = run_generation(
        &config,
        &[unit],
        &[],
        &[newer, older],
        &mut store,
        DateFixtures::past_grace(),
    )
    .unwrap();

    assert_eq!(outcome.warnings.len(), 1);

    // The earliest-created (10%) policy priced the overdue periods, not the
    // 100 flat duplicate
    let overdue = store
        .all()
        .find(|s| s.status == StatementStatus::Overdue)
        .unwrap();
    assert_eq!(overdue.penalty_amount.amount(), dec!(50.00));
}
