//! Date utilities: day/month/year parsing and formatting.

use anyhow::{anyhow, Result};
use chrono::NaiveDate;

use crate::transaction::RowDate;

/// Parse a `d/m/Y` date such as "06/01/2025" or "6/1/2025".
///
/// A trailing time part ("06/01/2025 00:00:00") is ignored. ISO dates
/// ("2025-01-06") are accepted too since spreadsheet exports sometimes emit them.
pub fn parse_dmy(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let date_part = s.split(|c: char| c.is_whitespace() || c == 'T').next()?;

    if date_part.contains('-') {
        return NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok();
    }

    let mut it = date_part.split('/');
    let d: u32 = parse_digits(it.next()?, 2)?;
    let m: u32 = parse_digits(it.next()?, 2)?;
    let y: i32 = parse_digits(it.next()?, 4)?;
    if it.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(y, m, d)
}

fn parse_digits<T: std::str::FromStr>(s: &str, max_len: usize) -> Option<T> {
    if s.is_empty() || s.len() > max_len || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Classify a raw date cell. Empty cells are `Missing`, unparseable ones `Invalid`.
pub fn parse_row_date(raw: Option<&str>) -> RowDate {
    match raw.map(str::trim) {
        None | Some("") => RowDate::Missing,
        Some(s) => match parse_dmy(s) {
            Some(d) => RowDate::Parsed(d),
            None => RowDate::Invalid { raw: s.to_string() },
        },
    }
}

/// Strict variant for user input (week anchor, CLI flags).
pub fn parse_dmy_strict(s: &str) -> Result<NaiveDate> {
    parse_dmy(s).ok_or_else(|| anyhow!("invalid date '{s}' (expected dd/mm/yyyy)"))
}

/// Format as dd/mm/yyyy.
pub fn format_dmy(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
