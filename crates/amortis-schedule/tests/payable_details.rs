//! Payable amounts for an installment paid before, on or after its due date.

use amortis_core::daycounts::{DaysInMonthType, DaysInYearType};
use amortis_core::types::{Date, RepaymentFrequency};
use amortis_schedule::boundaries::generate_boundaries;
use amortis_schedule::prelude::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn seven_percent_loan() -> ProgressiveLoanInterestScheduleModel {
    let config = ScheduleConfig::new(dec!(7), RepaymentFrequency::monthly())
        .with_days_in_year(DaysInYearType::Days360)
        .with_days_in_month(DaysInMonthType::Days30);
    let boundaries = generate_boundaries(date(2024, 1, 1), 6, config.repayment_frequency).unwrap();
    let mut model = ProgressiveLoanInterestScheduleModel::generate(boundaries, config).unwrap();
    model.add_disbursement(date(2024, 1, 1), dec!(100)).unwrap();
    model
}

#[test]
fn test_paid_on_disbursement_day() {
    let model = seven_percent_loan();
    let details = model.payable_details(date(2024, 2, 1), date(2024, 1, 1)).unwrap();

    assert_eq!(details.outstanding_balance.amount(), dec!(100));
    assert_eq!(details.principal_due.amount(), dec!(17.01));
    assert!(details.interest_due.is_zero());
    assert_eq!(details.emi.amount(), dec!(17.01));
}

#[test]
fn test_paid_on_due_date() {
    let model = seven_percent_loan();
    let details = model.payable_details(date(2024, 3, 1), date(2024, 3, 1)).unwrap();

    assert_eq!(details.outstanding_balance.amount(), dec!(83.57));
    assert_eq!(details.principal_due.amount(), dec!(16.52));
    assert_eq!(details.interest_due.amount(), dec!(0.49));

    let period = model.find_period_by_due_date(date(2024, 3, 1)).unwrap();
    assert_eq!(details.interest_due, period.interest_due);
    assert_eq!(details.principal_due, period.principal_due);
}

#[test]
fn test_paid_mid_period() {
    let model = seven_percent_loan();
    let details = model.payable_details(date(2024, 3, 1), date(2024, 2, 15)).unwrap();

    assert_eq!(details.outstanding_balance.amount(), dec!(83.57));
    assert_eq!(details.principal_due.amount(), dec!(16.77));
    assert_eq!(details.interest_due.amount(), dec!(0.24));

    // The schedule itself is unchanged.
    assert_eq!(model.periods()[1].interest_periods.len(), 1);
}

#[test]
fn test_last_period_pays_remaining_balance() {
    let model = seven_percent_loan();
    let details = model.payable_details(date(2024, 7, 1), date(2024, 7, 1)).unwrap();

    assert_eq!(details.outstanding_balance.amount(), dec!(16.90));
    assert_eq!(details.principal_due.amount(), dec!(16.90));
    assert_eq!(details.interest_due.amount(), dec!(0.10));
    assert_eq!(details.emi.amount(), dec!(17.00));
}

#[test]
fn test_late_last_payment_accrues_until_paid() {
    let model = seven_percent_loan();
    // 44 days of interest on a 30-day period: 16.90 * 0.008555555556
    let details = model.payable_details(date(2024, 7, 1), date(2024, 7, 15)).unwrap();

    assert_eq!(details.outstanding_balance.amount(), dec!(16.90));
    assert_eq!(details.principal_due.amount(), dec!(16.90));
    assert_eq!(details.interest_due.amount(), dec!(0.14));
    assert_eq!(details.emi.amount(), dec!(17.04));

    let last = model.periods().last().unwrap();
    assert_eq!(last.interest_due.amount(), dec!(0.10));
    assert_eq!(last.interest_periods[0].due, date(2024, 7, 1));
}

#[test]
fn test_late_payment_before_last_period_stops_at_due_date() {
    let model = seven_percent_loan();
    let on_time = model.payable_details(date(2024, 3, 1), date(2024, 3, 1)).unwrap();
    let late = model.payable_details(date(2024, 3, 1), date(2024, 3, 20)).unwrap();
    assert_eq!(late, on_time);
}

#[test]
fn test_invalid_requests() {
    let model = seven_percent_loan();

    let err = model.payable_details(date(2024, 3, 2), date(2024, 3, 1)).unwrap_err();
    assert!(err.is_invariant_violation());

    let err = model.payable_details(date(2024, 3, 1), date(2024, 1, 31)).unwrap_err();
    assert!(err.is_invariant_violation());
}

#[test]
fn test_early_payment_then_correction() {
    let mut model = seven_percent_loan();
    let details = model.payable_details(date(2024, 3, 1), date(2024, 2, 15)).unwrap();

    // Book the early principal as a correction of the interest base.
    model
        .add_balance_correction(date(2024, 2, 15), -details.principal_due.amount())
        .unwrap();

    let february = model.find_period_by_due_date(date(2024, 3, 1)).unwrap();
    assert_eq!(february.interest_periods[0].interest_due.amount(), dec!(0.24));
    assert_eq!(february.interest_periods[1].interest_due.amount(), dec!(0.20));
    assert!(model.periods().last().unwrap().remaining_balance.is_zero());
}
