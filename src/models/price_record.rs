use chrono::NaiveDate;
use serde::Serialize;

/// Storage format of `arecanut_prices.date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRecord {
    pub id: i64,           // ⇔ arecanut_prices.id (AUTOINCREMENT)
    pub date: NaiveDate,   // ⇔ arecanut_prices.date (TEXT "YYYY-MM-DD")
    pub modal_price: f64,  // ⇔ arecanut_prices.modal_price (REAL NOT NULL)
}

/// A price observation parsed from an upload, not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPriceRecord {
    pub date: NaiveDate,
    pub modal_price: f64,
}

impl NewPriceRecord {
    pub fn new(date: NaiveDate, modal_price: f64) -> Self {
        Self { date, modal_price }
    }

    pub fn date_str(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}
