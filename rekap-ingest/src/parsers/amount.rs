//! Debit cell parsing.
//!
//! Ledger exports mix "150000", "150,000.00", "150.000" and "Rp 150.000,50";
//! an empty cell or a lone "-" means no debit.

use regex::Regex;

pub struct AmountParser {
    currency_re: Regex,
    dotted_thousands_re: Regex,
    comma_thousands_re: Regex,
    plain_re: Regex,
}

impl AmountParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            currency_re: Regex::new(r"(?i)^(rp|idr)\.?\s*")?,
            dotted_thousands_re: Regex::new(r"^\d{1,3}(\.\d{3})+(,\d+)?$")?,
            comma_thousands_re: Regex::new(r"^\d{1,3}(,\d{3})+(\.\d+)?$")?,
            plain_re: Regex::new(r"^\d+([.,]\d+)?$")?,
        })
    }

    /// Parse a debit cell. `None` means the cell is not a number at all.
    pub fn parse(&self, raw: &str) -> Option<f64> {
        let mut s = raw.trim();
        if s.is_empty() || s == "-" {
            return Some(0.0);
        }

        let mut negative = false;
        if let Some(inner) = s.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
            negative = true;
            s = inner.trim();
        }
        if let Some(rest) = s.strip_prefix('-') {
            negative = !negative;
            s = rest.trim();
        }

        let s = self.currency_re.replace(s, "");
        let s = s.replace(' ', "");

        let normalized = if self.dotted_thousands_re.is_match(&s) {
            s.replace('.', "").replace(',', ".")
        } else if self.comma_thousands_re.is_match(&s) {
            s.replace(',', "")
        } else if self.plain_re.is_match(&s) {
            s.replace(',', ".")
        } else {
            return None;
        };

        let value: f64 = normalized.parse().ok()?;
        Some(if negative { -value } else { value })
    }
}
