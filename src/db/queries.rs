use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::price_record::{DATE_FORMAT, NewPriceRecord, PriceRecord};
use chrono::NaiveDate;
use rusqlite::{OptionalExtension, Result, Row, params};

/// Append all records in a single transaction.
///
/// Either every row is written or none is. No deduplication: uploading the
/// same file twice stores its rows twice.
pub fn append(pool: &mut DbPool, records: &[NewPriceRecord]) -> AppResult<usize> {
    let written = pool.with_conn(|conn| {
        let tx = conn.transaction()?;
        {
            let mut stmt =
                tx.prepare_cached("INSERT INTO arecanut_prices (date, modal_price) VALUES (?1, ?2)")?;
            for r in records {
                stmt.execute(params![r.date_str(), r.modal_price])?;
            }
        }
        tx.commit()?;
        Ok(records.len())
    })?;

    Ok(written)
}

/// Every stored record in storage (insertion) order.
pub fn load_all(pool: &DbPool) -> AppResult<Vec<PriceRecord>> {
    let mut stmt = pool
        .conn
        .prepare("SELECT id, date, modal_price FROM arecanut_prices ORDER BY id ASC")?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_records(pool: &DbPool) -> AppResult<i64> {
    let count = pool
        .conn
        .query_row("SELECT COUNT(*) FROM arecanut_prices", [], |row| row.get(0))?;
    Ok(count)
}

/// Last record in storage order, i.e. the most recently uploaded row.
pub fn latest_record(pool: &DbPool) -> AppResult<Option<PriceRecord>> {
    let rec = pool
        .conn
        .query_row(
            "SELECT id, date, modal_price FROM arecanut_prices ORDER BY id DESC LIMIT 1",
            [],
            map_row,
        )
        .optional()?;
    Ok(rec)
}

/// Earliest and latest calendar dates present in the store.
pub fn date_range(pool: &DbPool) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    let bounds: (Option<String>, Option<String>) = pool.conn.query_row(
        "SELECT MIN(date), MAX(date) FROM arecanut_prices",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    match bounds {
        (Some(first), Some(last)) => Ok(Some((parse_date(&first)?, parse_date(&last)?))),
        _ => Ok(None),
    }
}

pub fn map_row(row: &Row) -> Result<PriceRecord> {
    let date_str: String = row.get("date")?;

    let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(PriceRecord {
        id: row.get("id")?,
        date,
        modal_price: row.get("modal_price")?,
    })
}

fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| AppError::InvalidDate(s.to_string()))
}
