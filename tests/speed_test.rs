//! Standard speed report, run as a test
//!
//! Every strategy must reproduce the analytic grand total before its row is
//! printed. Run with `--nocapture` to see the table.

use bufbench::{run_to_stdout, RunConfig, Strategy};

#[test]
fn speed_report() {
    let config = RunConfig::standard();
    let rows = run_to_stdout(&config).expect("all strategies must agree");

    assert_eq!(rows.len(), 5 * Strategy::ALL.len());
    for (chunk, size) in rows.chunks(4).zip(&config.configurations) {
        let expected = bufbench::expected_sum(size.longs, size.doubles) * size.iterations as f64;
        for (m, strategy) in chunk.iter().zip(Strategy::ALL) {
            assert_eq!(m.strategy, strategy);
            assert_eq!(m.size, format!("{}/{}", size.longs, size.doubles));
            assert!((m.total - expected).abs() <= 1e-6, "{} total {}", strategy.label(), m.total);
        }
    }
}

#[test]
fn two_by_two_is_seven_hundred_thousand() {
    let config = bufbench::SizeConfig::new(2, 2, 100_000);
    let rows = bufbench::run_configuration(&config, 1e-6).unwrap();
    for m in rows {
        assert_eq!(m.total, 700_000.0, "{}", m.strategy.label());
    }
}
