//! Bill calculation over the CSV fixtures in `tests/fixtures`

use rust_decimal_macros::dec;
use std::path::PathBuf;
use telbill_core::{traits::BillCalculator, traits::CallLogSource, BillError};
use telbill_services::{
    load_log_file, CallLogFile, CallLogParser, MostCalledNumberWaiver, Promotion,
    TelephoneBillCalculator,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("telbill_services=debug")
        .with_test_writer()
        .try_init();
}

#[test]
fn test_empty_log() {
    init_tracing();
    let log = load_log_file(&fixture("empty.csv")).unwrap();

    let calculator = TelephoneBillCalculator::default();
    assert_eq!(calculator.calculate_log(&log).unwrap(), dec!(0.0));
}

// The only number called is also the most called one
#[test]
fn test_apply_promo() {
    init_tracing();
    let source = CallLogFile::new(fixture("same_number.csv"), CallLogParser::default());
    let records = source.load_records().unwrap();
    assert_eq!(records.len(), 3);

    let calculator = TelephoneBillCalculator::default();
    let bill = calculator.calculate_bill(&records);

    assert_eq!(bill.total, dec!(0.0));
    assert_eq!(bill.waived_amount, dec!(13.2));
    assert_eq!(
        bill.waived_number.map(|n| n.to_string()),
        Some("420774".to_string())
    );
}

// The most called number is reset
#[test]
fn test_calculate_price_simple() {
    init_tracing();
    let log = load_log_file(&fixture("multiple_numbers.csv")).unwrap();

    let calculator = TelephoneBillCalculator::default();
    assert_eq!(calculator.calculate_log(&log).unwrap(), dec!(9.5));
}

// Calls within the day window, outside it and longer than 5 minutes
#[test]
fn test_calculate_price_complex() {
    init_tracing();
    let source = CallLogFile::new(
        fixture("multiple_numbers_complex.csv"),
        CallLogParser::default(),
    );
    let records = source.load_records().unwrap();

    let calculator = TelephoneBillCalculator::default();
    let bill = calculator.calculate_bill(&records);

    assert_eq!(bill.total, dec!(223.7));
    assert_eq!(bill.waived_amount, dec!(46.5));

    let subtotals: Vec<(String, usize, _)> = bill
        .subtotals
        .iter()
        .map(|s| (s.number.to_string(), s.calls, s.amount))
        .collect();
    assert_eq!(
        subtotals,
        vec![
            ("420774".to_string(), 1, dec!(13.5)),
            ("420775".to_string(), 2, dec!(42.7)),
            ("420776".to_string(), 0, dec!(0)),
            ("420777".to_string(), 1, dec!(61.0)),
            ("420778".to_string(), 1, dec!(106.5)),
        ]
    );
}

#[test]
fn test_total_matches_ledger_after_promotion() {
    let source = CallLogFile::new(
        fixture("multiple_numbers_complex.csv"),
        CallLogParser::default(),
    );
    let records = source.load_records().unwrap();
    let calculator = TelephoneBillCalculator::default();

    let mut ledger = calculator.build_ledger(&records);
    let before = ledger.total();
    let waived = MostCalledNumberWaiver::select(&ledger).unwrap();
    let waived_subtotal = ledger.subtotal(&waived);

    MostCalledNumberWaiver.apply(&mut ledger);

    assert!(ledger.prices(&waived).is_empty());
    assert_eq!(before - ledger.total(), waived_subtotal);
    assert_eq!(ledger.total(), calculator.calculate(&records));
}

#[test]
fn test_missing_fixture() {
    let err = load_log_file(&fixture("does_not_exist.csv")).unwrap_err();
    assert!(matches!(err, BillError::LogRead { .. }));
}
