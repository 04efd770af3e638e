//! rekap-ingest: ledger export ingestion (CSV) into core transactions.

pub mod error;
pub mod parsers;
pub mod types;

pub use error::IngestError;
pub use parsers::ledger_csv::{parse_ledger, read_ledger};
pub use types::Ledger;
