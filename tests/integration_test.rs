//! Integration tests for the allocation decision.
//!
//! Tests cover:
//! - Scenario grid: all pass, two pass, none pass, missing dividend series
//! - Data gathering through the data port with a mock source
//! - As-of slicing reproducing an earlier round
//! - Property tests: weights sum to 0 or 1, idempotence, skipped tickers never weighted

mod common;

use approx::assert_relative_eq;
use common::*;
use fundscreen::domain::allocation::allocate;
use fundscreen::domain::error::FundscreenError;
use fundscreen::domain::fundamental_data::FundamentalData;
use fundscreen::domain::records::{
    DividendRecord, FinancialStatementRecord, InstitutionalOwnershipRecord, SeriesKind,
};
use fundscreen::domain::screen::{ScreenCriteria, ScreenOutcome};
use fundscreen::domain::strategy::{DividendQualityStrategy, Strategy};
use fundscreen::ports::data_port::FundamentalDataPort;

fn run_with(port: &MockDataPort) -> fundscreen::domain::allocation::AllocationMap {
    let strategy = DividendQualityStrategy::default();
    let data = port.fetch_requests(&strategy.data_requests()).unwrap();
    strategy.run(&data).weights
}

mod scenarios {
    use super::*;

    #[test]
    fn all_four_pass_get_a_quarter_each() {
        let port = MockDataPort::new()
            .passing("AAPL")
            .passing("MSFT")
            .passing("JNJ")
            .passing("XOM");
        let weights = run_with(&port);

        assert_eq!(weights.len(), 4);
        for ticker in default_tickers() {
            assert_relative_eq!(weights.get(&ticker).unwrap(), 0.25);
        }
        assert_relative_eq!(weights.total(), 1.0);
    }

    #[test]
    fn two_pass_get_half_each() {
        let port = MockDataPort::new()
            .passing("AAPL")
            .failing("MSFT")
            .passing("JNJ")
            .failing("XOM");
        let weights = run_with(&port);

        assert_relative_eq!(weights.get("AAPL").unwrap(), 0.5);
        assert_relative_eq!(weights.get("JNJ").unwrap(), 0.5);
        assert_eq!(weights.get("MSFT"), Some(0.0));
        assert_eq!(weights.get("XOM"), Some(0.0));
        assert_relative_eq!(weights.total(), 1.0);
    }

    #[test]
    fn none_pass_returns_zeroes_unnormalized() {
        let port = MockDataPort::new()
            .failing("AAPL")
            .failing("MSFT")
            .failing("JNJ")
            .failing("XOM");
        let weights = run_with(&port);

        assert_eq!(weights.len(), 4);
        assert!(weights.iter().all(|(_, w)| w == 0.0));
        assert_eq!(weights.total(), 0.0);
    }

    #[test]
    fn empty_dividend_series_skips_ticker() {
        let port = MockDataPort::new()
            .passing("AAPL")
            .passing("MSFT")
            .passing("JNJ")
            .passing("XOM")
            .without_dividends("JNJ");
        let weights = run_with(&port);

        assert!(!weights.contains("JNJ"));
        assert_eq!(weights.len(), 3);
        for ticker in ["AAPL", "MSFT", "XOM"] {
            assert_relative_eq!(weights.get(ticker).unwrap(), 1.0 / 3.0);
        }
    }

    #[test]
    fn ticker_with_no_data_at_all_is_absent() {
        let port = MockDataPort::new().passing("AAPL");
        let weights = run_with(&port);

        assert_eq!(weights.len(), 1);
        assert_eq!(weights.get("AAPL"), Some(1.0));
    }

    #[test]
    fn explain_matches_run() {
        let port = MockDataPort::new()
            .passing("AAPL")
            .failing("MSFT")
            .without_dividends("XOM");
        let strategy = DividendQualityStrategy::default();
        let data = port.fetch_requests(&strategy.data_requests()).unwrap();

        let screened = strategy.explain(&data);
        assert_eq!(screened.allocation, strategy.run(&data).weights);
        assert_eq!(screened.outcomes[0].outcome, ScreenOutcome::Passed);
        assert!(matches!(screened.outcomes[1].outcome, ScreenOutcome::Failed(_)));
        assert_eq!(
            screened.outcomes[2].outcome,
            ScreenOutcome::Skipped(SeriesKind::ALL.to_vec())
        );
        assert_eq!(
            screened.outcomes[3].outcome,
            ScreenOutcome::Skipped(SeriesKind::ALL.to_vec())
        );
    }
}

mod data_port {
    use super::*;

    #[test]
    fn fetch_requests_visits_every_request_in_order() {
        let port = MockDataPort::new().passing("AAPL");
        let strategy = DividendQualityStrategy::default();
        port.fetch_requests(&strategy.data_requests()).unwrap();

        let calls = port.calls.borrow();
        assert_eq!(calls.len(), 12);
        assert_eq!(calls[0], "dividend:AAPL");
        assert_eq!(calls[3], "dividend:XOM");
        assert_eq!(calls[4], "financial_statement:AAPL");
        assert_eq!(calls[11], "institutional_ownership:XOM");
    }

    #[test]
    fn fetch_error_propagates() {
        let port = MockDataPort::new()
            .passing("AAPL")
            .with_error("MSFT", "corrupt file");
        let strategy = DividendQualityStrategy::default();
        let err = port.fetch_requests(&strategy.data_requests()).unwrap_err();
        assert!(matches!(err, FundscreenError::Data { reason } if reason == "corrupt file"));
    }
}

mod as_of {
    use super::*;

    #[test]
    fn earlier_round_sees_earlier_records() {
        // AAPL passes in Q1 and fails in Q2 on ownership; MSFT passes in both.
        let port = MockDataPort::new()
            .with_fundamentals("AAPL", date(2024, 3, 31), 100.0, 50.0, 0.24, 60.0)
            .with_fundamentals("AAPL", date(2024, 6, 30), 100.0, 50.0, 0.25, 45.0)
            .with_fundamentals("MSFT", date(2024, 3, 31), 100.0, 30.0, 0.75, 72.0)
            .with_fundamentals("MSFT", date(2024, 6, 30), 100.0, 30.0, 0.75, 72.0);
        let strategy = DividendQualityStrategy::default();
        let data = port.fetch_requests(&strategy.data_requests()).unwrap();

        let latest = strategy.run(&data).weights;
        assert_eq!(latest.get("AAPL"), Some(0.0));
        assert_eq!(latest.get("MSFT"), Some(1.0));

        let q1 = strategy.run(&data.as_of(date(2024, 4, 1))).weights;
        assert_relative_eq!(q1.get("AAPL").unwrap(), 0.5);
        assert_relative_eq!(q1.get("MSFT").unwrap(), 0.5);

        let before = strategy.run(&data.as_of(date(2024, 1, 1))).weights;
        assert!(before.is_empty());
    }
}

mod custom_universe {
    use super::*;

    #[test]
    fn raw_weight_is_not_universe_aware_but_normalization_is() {
        let tickers: Vec<String> = ["A", "B", "C", "D", "E", "F"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut port = MockDataPort::new();
        for t in &tickers {
            port = port.passing(t);
        }
        let strategy = DividendQualityStrategy {
            tickers: tickers.clone(),
            ..DividendQualityStrategy::default()
        };
        let data = port.fetch_requests(&strategy.data_requests()).unwrap();

        let weights = strategy.run(&data).weights;
        for t in &tickers {
            assert_relative_eq!(weights.get(t).unwrap(), 1.0 / 6.0, epsilon = 1e-12);
        }
    }
}

mod properties {
    use super::*;
    use proptest::prelude::*;
    use proptest::strategy::Strategy;

    fn ticker_strategy() -> impl Strategy<Value = (bool, bool, bool, f64, f64, f64, f64)> {
        (
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            0.0f64..1e9,
            0.0f64..1e9,
            -1.0f64..5.0,
            0.0f64..100.0,
        )
    }

    fn build_data(
        cases: &[(bool, bool, bool, f64, f64, f64, f64)],
    ) -> (Vec<String>, FundamentalData) {
        let date = date(2024, 6, 30);
        let mut data = FundamentalData::new();
        let mut tickers = Vec::new();
        for (i, &(has_div, has_fs, has_own, revenue, cost, dividend, ownership)) in
            cases.iter().enumerate()
        {
            let ticker = format!("T{i}");
            if has_div {
                data.insert_dividends(&ticker, vec![DividendRecord { date, dividend }]);
            }
            if has_fs {
                data.insert_financial_statements(
                    &ticker,
                    vec![FinancialStatementRecord {
                        date,
                        revenue,
                        cost_of_revenue: cost,
                    }],
                );
            }
            if has_own {
                data.insert_institutional_ownership(
                    &ticker,
                    vec![InstitutionalOwnershipRecord {
                        date,
                        ownership_percent: ownership,
                    }],
                );
            }
            tickers.push(ticker);
        }
        (tickers, data)
    }

    proptest! {
        #[test]
        fn weights_sum_to_zero_or_one(cases in prop::collection::vec(ticker_strategy(), 0..8)) {
            let (tickers, data) = build_data(&cases);
            let weights = allocate(&tickers, &data, &ScreenCriteria::default());
            let total = weights.total();
            prop_assert!(total.abs() < 1e-9 || (total - 1.0).abs() < 1e-9, "total = {}", total);
            prop_assert!(weights.iter().all(|(_, w)| w >= 0.0));
        }

        #[test]
        fn allocation_is_idempotent(cases in prop::collection::vec(ticker_strategy(), 0..8)) {
            let (tickers, data) = build_data(&cases);
            let criteria = ScreenCriteria::default();
            prop_assert_eq!(
                allocate(&tickers, &data, &criteria),
                allocate(&tickers, &data, &criteria)
            );
        }

        #[test]
        fn incomplete_tickers_never_weighted(cases in prop::collection::vec(ticker_strategy(), 1..8)) {
            let (tickers, data) = build_data(&cases);
            let weights = allocate(&tickers, &data, &ScreenCriteria::default());
            for (ticker, &(has_div, has_fs, has_own, ..)) in tickers.iter().zip(cases.iter()) {
                if !(has_div && has_fs && has_own) {
                    prop_assert!(!weights.contains(ticker));
                }
            }
        }
    }
}
