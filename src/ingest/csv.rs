use crate::errors::{AppError, AppResult};
use crate::models::price_record::NewPriceRecord;
use crate::utils::date::parse_flexible_date;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;
use std::path::Path;

pub const DATE_COLUMN: &str = "date";
pub const PRICE_COLUMN: &str = "modal_price";

/// A data row that could not be turned into a record.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: String,
}

/// Outcome of reading one upload. Nothing has been written yet.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub records: Vec<NewPriceRecord>,
    pub skipped: Vec<SkippedRow>,
}

impl IngestReport {
    pub fn total_rows(&self) -> usize {
        self.records.len() + self.skipped.len()
    }
}

pub fn read_csv_path(path: &Path) -> AppResult<IngestReport> {
    let file = std::fs::File::open(path)?;
    read_csv(file)
}

/// Read an upload with at least a `date` and a `modal_price` column.
///
/// Extra columns are ignored. A missing required column rejects the whole
/// file; a row with an unparseable date or price is skipped and reported.
pub fn read_csv<R: Read>(reader: R) -> AppResult<IngestReport> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let date_idx = column_index(&headers, DATE_COLUMN);
    let price_idx = column_index(&headers, PRICE_COLUMN);

    let (date_idx, price_idx) = match (date_idx, price_idx) {
        (Some(d), Some(p)) => (d, p),
        (d, p) => {
            let mut missing = Vec::new();
            if d.is_none() {
                missing.push(DATE_COLUMN);
            }
            if p.is_none() {
                missing.push(PRICE_COLUMN);
            }
            return Err(AppError::SchemaMismatch(missing.join(", ")));
        }
    };

    let mut report = IngestReport::default();

    for result in rdr.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        let raw_date = row.get(date_idx).unwrap_or("");
        let raw_price = row.get(price_idx).unwrap_or("");

        let Some(date) = parse_flexible_date(raw_date) else {
            report.skipped.push(SkippedRow {
                line,
                reason: format!("invalid date '{}'", raw_date),
            });
            continue;
        };

        let Some(price) = parse_price(raw_price) else {
            report.skipped.push(SkippedRow {
                line,
                reason: format!("invalid modal_price '{}'", raw_price),
            });
            continue;
        };

        report.records.push(NewPriceRecord::new(date, price));
    }

    Ok(report)
}

fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}') == name)
}

/// Numeric price; thousands separators and a rupee sign are tolerated.
fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | '₹' | ' '))
        .collect();

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
