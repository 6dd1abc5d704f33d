use crate::models::price_record::PriceRecord;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyAverage {
    pub month: u32,
    pub average: f64,
    pub samples: usize,
}

/// `(date, modal_price)` series in calendar order.
pub fn price_trend(records: &[PriceRecord]) -> Vec<(NaiveDate, f64)> {
    let mut series: Vec<(NaiveDate, f64)> =
        records.iter().map(|r| (r.date, r.modal_price)).collect();
    series.sort_by_key(|(d, _)| *d);
    series
}

/// Mean modal price per calendar month, over all years. Only months with data.
pub fn monthly_average(records: &[PriceRecord]) -> Vec<MonthlyAverage> {
    let mut buckets: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
    for r in records {
        let entry = buckets.entry(r.date.month()).or_insert((0.0, 0));
        entry.0 += r.modal_price;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(month, (sum, samples))| MonthlyAverage {
            month,
            average: sum / samples as f64,
            samples,
        })
        .collect()
}
