//! Integration tests for billing period arithmetic
//!
//! The scheduler and calculator lean on this module for candidate-period
//! enumeration, due-date derivation, and grace-deadline checks.

use chrono::NaiveDate;
use core_kernel::{grace_deadline, is_past_grace, BillingPeriod};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod period_tests {
    use super::*;

    #[test]
    fn test_containing_maps_date_to_period() {
        let period = BillingPeriod::containing(date(2024, 3, 17));
        assert_eq!(period, BillingPeriod::new(2024, 3).unwrap());
    }

    #[test]
    fn test_next_rolls_over_year_boundary() {
        let dec = BillingPeriod::new(2023, 12).unwrap();
        assert_eq!(dec.next(), BillingPeriod::new(2024, 1).unwrap());
    }

    #[test]
    fn test_through_spans_year_boundary() {
        let start = BillingPeriod::new(2023, 11).unwrap();
        let end = BillingPeriod::new(2024, 1).unwrap();

        let months: Vec<u32> = start.through(end).map(|p| p.month()).collect();
        assert_eq!(months, vec![11, 12, 1]);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(BillingPeriod::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(BillingPeriod::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(BillingPeriod::new(2024, 4).unwrap().days_in_month(), 30);
        assert_eq!(BillingPeriod::new(2024, 1).unwrap().days_in_month(), 31);
    }
}

mod due_date_tests {
    use super::*;

    #[test]
    fn test_billing_day_30_in_nonleap_february() {
        let feb = BillingPeriod::new(2023, 2).unwrap();
        assert_eq!(feb.due_date(30), date(2023, 2, 28));
    }

    #[test]
    fn test_billing_day_within_month_is_exact() {
        let mar = BillingPeriod::new(2024, 3).unwrap();
        assert_eq!(mar.due_date(1), date(2024, 3, 1));
        assert_eq!(mar.due_date(28), date(2024, 3, 28));
    }
}

mod grace_tests {
    use super::*;

    #[test]
    fn test_deadline_day_itself_is_within_grace() {
        let due = date(2024, 3, 1);
        assert_eq!(grace_deadline(due, 15), date(2024, 3, 16));

        // Strictly-after semantics: the deadline day is still in grace
        assert!(!is_past_grace(due, 15, date(2024, 3, 16)));
        assert!(is_past_grace(due, 15, date(2024, 3, 17)));
    }

    #[test]
    fn test_zero_grace_means_overdue_day_after_due() {
        let due = date(2024, 3, 1);
        assert!(!is_past_grace(due, 0, due));
        assert!(is_past_grace(due, 0, date(2024, 3, 2)));
    }
}
