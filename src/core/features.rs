use crate::models::feature_row::FeatureRow;
use crate::models::price_record::PriceRecord;
use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Which row counts as "previous" when computing the lag feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LagOrder {
    /// Previous row as stored (upload order), whatever its date.
    #[default]
    Stored,
    /// Previous calendar date; rows sharing a date keep their upload order.
    Date,
}

/// Build the supervised table `(month, lag_price) -> target_price`.
///
/// Rows whose price is not a finite number are dropped first. The lag of the
/// first row does not exist and is back-filled with the next row's price; a
/// lone row uses its own price.
pub fn derive_features(records: &[PriceRecord], order: LagOrder) -> Vec<FeatureRow> {
    let mut rows: Vec<&PriceRecord> = records
        .iter()
        .filter(|r| r.modal_price.is_finite())
        .collect();

    if order == LagOrder::Date {
        rows.sort_by_key(|r| r.date);
    }

    let backfill = rows
        .get(1)
        .or_else(|| rows.first())
        .map(|r| r.modal_price);

    rows.iter()
        .enumerate()
        .map(|(i, r)| {
            let lag_price = if i == 0 {
                backfill.unwrap_or(r.modal_price)
            } else {
                rows[i - 1].modal_price
            };

            FeatureRow {
                month: r.date.month(),
                lag_price,
                target_price: r.modal_price,
            }
        })
        .collect()
}
