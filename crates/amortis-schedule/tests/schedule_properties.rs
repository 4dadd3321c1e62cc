//! Property tests: closure and replay determinism.

use amortis_core::daycounts::{DaysInMonthType, DaysInYearType};
use amortis_core::types::{Date, PeriodFrequencyType, RepaymentFrequency};
use amortis_schedule::boundaries::generate_boundaries;
use amortis_schedule::prelude::*;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn frequency() -> impl Strategy<Value = (RepaymentFrequency, DaysInYearType, DaysInMonthType)> {
    prop_oneof![
        (
            prop_oneof![
                Just(DaysInYearType::Actual),
                Just(DaysInYearType::Days360),
                Just(DaysInYearType::Days365)
            ],
            prop_oneof![Just(DaysInMonthType::Actual), Just(DaysInMonthType::Days30)],
            1u32..4
        )
            .prop_map(|(year, month, every)| (
                RepaymentFrequency::new(PeriodFrequencyType::Months, every),
                year,
                month
            )),
        (1u32..3).prop_map(|every| (
            RepaymentFrequency::new(PeriodFrequencyType::Weeks, every),
            DaysInYearType::Days364,
            DaysInMonthType::NotApplicable
        )),
        (7u32..31).prop_map(|every| (
            RepaymentFrequency::new(PeriodFrequencyType::Days, every),
            DaysInYearType::Days365,
            DaysInMonthType::NotApplicable
        )),
    ]
}

#[derive(Debug, Clone)]
struct Scenario {
    config: ScheduleConfig,
    start: Date,
    periods: u32,
    /// (day offset from start, amount in cents)
    disbursements: Vec<(i64, i64)>,
}

fn scenario() -> impl Strategy<Value = Scenario> {
    (
        frequency(),
        0i64..3000,
        0i64..1500,
        2u32..24,
        prop::collection::vec((0u32..1000, 100i64..10_000_000), 1..5),
    )
        .prop_map(|((freq, diy, dim), rate_bp, start_offset, periods, raw)| {
            let config = ScheduleConfig::new(Decimal::new(rate_bp, 2), freq)
                .with_days_in_year(diy)
                .with_days_in_month(dim);
            let start = Date::from_ymd(2020, 1, 1).unwrap().add_days(start_offset);
            Scenario {
                config,
                start,
                periods,
                disbursements: raw.into_iter().map(|(o, c)| (i64::from(o), c)).collect(),
            }
        })
}

fn events_for(scenario: &Scenario, boundaries: &[PeriodBoundary]) -> Vec<(Date, Decimal)> {
    let first = boundaries[0].from;
    let term = first.days_between(&boundaries[boundaries.len() - 1].due);
    let mut events: Vec<(Date, Decimal)> = scenario
        .disbursements
        .iter()
        .enumerate()
        .map(|(i, (offset, cents))| {
            // the first disbursement funds the loan on its start date
            let day = if i == 0 { 0 } else { offset % term };
            (first.add_days(day), Decimal::new(*cents, 2))
        })
        .collect();
    events.sort_by_key(|(d, _)| *d);
    events
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn final_balance_is_zero(s in scenario()) {
        let boundaries = generate_boundaries(s.start, s.periods, s.config.repayment_frequency).unwrap();
        let events = events_for(&s, &boundaries);
        let mut model = ProgressiveLoanInterestScheduleModel::generate(boundaries, s.config.clone()).unwrap();
        for (date, amount) in &events {
            model.add_disbursement(*date, *amount).unwrap();
        }

        let last = model.periods().last().unwrap();
        prop_assert!(last.remaining_balance.is_zero());
        prop_assert_eq!(model.total_principal(), model.total_disbursed());
    }

    #[test]
    fn schedule_invariants_hold(s in scenario()) {
        let boundaries = generate_boundaries(s.start, s.periods, s.config.repayment_frequency).unwrap();
        let events = events_for(&s, &boundaries);
        let mut model = ProgressiveLoanInterestScheduleModel::generate(boundaries, s.config.clone()).unwrap();
        for (date, amount) in &events {
            model.add_disbursement(*date, *amount).unwrap();
        }

        for (idx, period) in model.periods().iter().enumerate() {
            prop_assert_eq!(period.number as usize, idx + 1);
            let ips = &period.interest_periods;
            prop_assert!(!ips.is_empty());
            prop_assert_eq!(ips[0].from, period.from);
            prop_assert_eq!(ips[ips.len() - 1].due, period.due);
            prop_assert!(ips.windows(2).all(|w| w[0].due == w[1].from && w[0].from < w[0].due));
            prop_assert!(ips.iter().all(|ip| ip.rate_factor_minus_1 >= Decimal::ZERO));
            let interest: Decimal = ips.iter().map(|ip| ip.interest_due.amount()).sum();
            prop_assert_eq!(interest, period.interest_due.amount());
        }
        prop_assert!(model.periods().windows(2).all(|w| w[0].due == w[1].from));
    }

    #[test]
    fn replay_matches_incremental(s in scenario()) {
        let boundaries = generate_boundaries(s.start, s.periods, s.config.repayment_frequency).unwrap();
        let events = events_for(&s, &boundaries);
        let mut incremental =
            ProgressiveLoanInterestScheduleModel::generate(boundaries.clone(), s.config.clone()).unwrap();
        for (date, amount) in &events {
            incremental.add_disbursement(*date, *amount).unwrap();
        }

        let replayed = ProgressiveLoanInterestScheduleModel::from_events(
            boundaries.clone(),
            s.config.clone(),
            incremental.events(),
        )
        .unwrap();
        prop_assert_eq!(incremental.periods(), replayed.periods());

        let mut rescheduled = incremental.clone();
        rescheduled.reschedule(boundaries).unwrap();
        prop_assert_eq!(incremental.periods(), rescheduled.periods());
    }
}
