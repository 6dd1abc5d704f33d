mod common;
use arecanut::core::features::{LagOrder, derive_features};
use arecanut::models::price_record::PriceRecord;
use common::ymd;

fn records(rows: &[((i32, u32, u32), f64)]) -> Vec<PriceRecord> {
    rows.iter()
        .enumerate()
        .map(|(i, ((y, m, d), price))| PriceRecord {
            id: i as i64 + 1,
            date: ymd(*y, *m, *d),
            modal_price: *price,
        })
        .collect()
}

#[test]
fn test_lag_is_previous_row_with_backfilled_first() {
    let recs = records(&[
        ((2024, 1, 1), 28000.0),
        ((2024, 2, 1), 29500.0),
        ((2024, 3, 1), 27000.0),
    ]);

    let rows = derive_features(&recs, LagOrder::Stored);

    let months: Vec<u32> = rows.iter().map(|r| r.month).collect();
    let lags: Vec<f64> = rows.iter().map(|r| r.lag_price).collect();
    let targets: Vec<f64> = rows.iter().map(|r| r.target_price).collect();

    assert_eq!(months, vec![1, 2, 3]);
    assert_eq!(lags, vec![29500.0, 28000.0, 29500.0]);
    assert_eq!(targets, vec![28000.0, 29500.0, 27000.0]);
}

#[test]
fn test_derivation_is_deterministic() {
    let recs = records(&[
        ((2024, 5, 1), 31000.0),
        ((2024, 1, 1), 28000.0),
        ((2024, 9, 1), 33000.0),
        ((2024, 2, 1), 29500.0),
    ]);

    let first = derive_features(&recs, LagOrder::Stored);
    let second = derive_features(&recs, LagOrder::Stored);

    assert_eq!(first, second);
}

#[test]
fn test_stored_order_is_not_resorted_by_date() {
    let recs = records(&[
        ((2024, 3, 1), 27000.0),
        ((2024, 1, 1), 28000.0),
        ((2024, 2, 1), 29500.0),
    ]);

    let rows = derive_features(&recs, LagOrder::Stored);

    assert_eq!(rows[1].month, 1);
    assert_eq!(rows[1].lag_price, 27000.0);
}

#[test]
fn test_date_order_uses_previous_calendar_date() {
    let recs = records(&[
        ((2024, 3, 1), 27000.0),
        ((2024, 1, 1), 28000.0),
        ((2024, 2, 1), 29500.0),
    ]);

    let rows = derive_features(&recs, LagOrder::Date);

    let months: Vec<u32> = rows.iter().map(|r| r.month).collect();
    let lags: Vec<f64> = rows.iter().map(|r| r.lag_price).collect();
    assert_eq!(months, vec![1, 2, 3]);
    assert_eq!(lags, vec![29500.0, 28000.0, 29500.0]);
}

#[test]
fn test_non_finite_prices_are_dropped() {
    let recs = records(&[
        ((2024, 1, 1), 28000.0),
        ((2024, 2, 1), f64::NAN),
        ((2024, 3, 1), 27000.0),
    ]);

    let rows = derive_features(&recs, LagOrder::Stored);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].lag_price, 28000.0);
    assert_eq!(rows[0].lag_price, 27000.0);
}

#[test]
fn test_single_and_empty_inputs() {
    let single = derive_features(&records(&[((2024, 6, 1), 30000.0)]), LagOrder::Stored);
    assert_eq!(single.len(), 1);
    assert_eq!(single[0].lag_price, 30000.0);

    assert!(derive_features(&[], LagOrder::Stored).is_empty());
}
