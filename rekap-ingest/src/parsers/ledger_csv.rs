//! Branch ledger export parser (CSV).
//!
//! Expected header (order free, extra columns ignored, padding tolerated):
//!   VOUCHER NO, TRANS. DATE, ENTRY DATE, DESCRIPTION, DEBIT
//!
//! TRANS. DATE, DESCRIPTION and DEBIT are required. Dates are dd/mm/yyyy.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use rekap_core::{parse_row_date, Transaction};
use tracing::{debug, warn};

use crate::error::IngestError;
use crate::parsers::amount::AmountParser;
use crate::types::Ledger;

const TRANS_DATE: &[&str] = &["TRANS. DATE", "TRANS DATE", "TRANS.DATE", "TRANSACTION DATE", "TANGGAL"];
const DESCRIPTION: &[&str] = &["DESCRIPTION", "KETERANGAN"];
const DEBIT: &[&str] = &["DEBIT"];
const ENTRY_DATE: &[&str] = &["ENTRY DATE", "ENTRY. DATE", "TGL ENTRY"];
const VOUCHER: &[&str] = &["VOUCHER NO", "VOUCHER NO.", "VOUCHER", "NO VOUCHER"];

/// Column positions resolved from the header row
struct Columns {
    trans_date: usize,
    description: usize,
    debit: usize,
    entry_date: Option<usize>,
    voucher: Option<usize>,
}

impl Columns {
    fn resolve(headers: &[String]) -> Result<Self, IngestError> {
        let find = |aliases: &[&str]| headers.iter().position(|h| aliases.contains(&h.as_str()));

        let trans_date = find(TRANS_DATE);
        let description = find(DESCRIPTION);
        let debit = find(DEBIT);

        match (trans_date, description, debit) {
            (Some(trans_date), Some(description), Some(debit)) => Ok(Self {
                trans_date,
                description,
                debit,
                entry_date: find(ENTRY_DATE),
                voucher: find(VOUCHER),
            }),
            _ => {
                let mut missing = Vec::new();
                if trans_date.is_none() {
                    missing.push(TRANS_DATE[0].to_string());
                }
                if description.is_none() {
                    missing.push(DESCRIPTION[0].to_string());
                }
                if debit.is_none() {
                    missing.push(DEBIT[0].to_string());
                }
                Err(IngestError::MissingColumns {
                    missing,
                    found: headers.to_vec(),
                })
            }
        }
    }
}

/// Trim, collapse inner whitespace, upper-case.
pub fn normalize_header(h: &str) -> String {
    h.trim_start_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Open and parse a ledger CSV file.
pub fn read_ledger(path: impl AsRef<Path>) -> Result<Ledger, IngestError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_ledger(file)
}

/// Parse ledger CSV content. Fails as a whole if the header is unusable or a
/// record is malformed; individual bad cells become markers instead.
pub fn parse_ledger<R: Read>(reader: R) -> Result<Ledger, IngestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(IngestError::from_csv)?
        .iter()
        .map(normalize_header)
        .collect();
    let cols = Columns::resolve(&headers)?;
    let amounts = AmountParser::new()?;

    let mut transactions = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(IngestError::from_csv)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.iter().all(|f| f.trim().is_empty()) {
            debug!(line, "skipping blank record");
            continue;
        }

        let cell = |idx: usize| record.get(idx).map(str::trim).filter(|s| !s.is_empty());

        let raw_debit = cell(cols.debit).unwrap_or("");
        let debit = match amounts.parse(raw_debit) {
            Some(v) if v < 0.0 => {
                warn!(line, raw = raw_debit, "negative debit, counted as 0");
                0.0
            }
            Some(v) => v,
            None => {
                warn!(line, raw = raw_debit, "non-numeric debit, counted as 0");
                0.0
            }
        };

        transactions.push(Transaction {
            voucher: cols.voucher.and_then(cell).map(str::to_string),
            trans_date: parse_row_date(cell(cols.trans_date)),
            entry_date: cols.entry_date.map(|idx| parse_row_date(cell(idx))),
            description: cell(cols.description).map(str::to_string),
            debit,
        });
    }

    debug!(rows = transactions.len(), "ledger parsed");

    Ok(Ledger {
        transactions,
        has_entry_date: cols.entry_date.is_some(),
        headers,
    })
}
