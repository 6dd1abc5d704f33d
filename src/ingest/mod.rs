//! Upload ingestion: turn a tabular file into records ready for the store.

pub mod csv;

pub use self::csv::{IngestReport, SkippedRow, read_csv, read_csv_path};
