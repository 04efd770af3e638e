//! Keyword matching for free-text descriptions.
//!
//! Two stages: exact containment, then fuzzy similarity scores (0-100)
//! compared against a threshold. Keywords of three characters or fewer are
//! abbreviations ("mc", "bm", "fsa") and only ever match whole words, so
//! "bbm" does not count as "bm".

use std::collections::BTreeSet;

const SHORT_KEYWORD_LEN: usize = 3;

/// Similarity of one keyword against one text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityScores {
    /// Indel edit-distance ratio of the whole strings
    pub ratio: f64,
    /// Best ratio of the keyword against an equally long slice of the text
    pub partial: f64,
    /// Ratio after sorting tokens on both sides
    pub token_sort: f64,
    /// Ratio tolerant of extra words in the text
    pub token_set: f64,
}

impl SimilarityScores {
    const ZERO: SimilarityScores = SimilarityScores {
        ratio: 0.0,
        partial: 0.0,
        token_sort: 0.0,
        token_set: 0.0,
    };

    pub fn best(&self) -> f64 {
        self.ratio
            .max(self.partial)
            .max(self.token_sort)
            .max(self.token_set)
    }
}

/// Does `text` mean any of `keywords`?
///
/// A missing text is treated as empty and only matches an empty keyword.
pub fn matches<S: AsRef<str>>(text: Option<&str>, keywords: &[S], threshold: u8) -> bool {
    let text = text.unwrap_or("").to_lowercase();

    if keywords
        .iter()
        .any(|k| contains_keyword(&text, &k.as_ref().to_lowercase()))
    {
        return true;
    }

    let text = normalize(&text);
    let threshold = f64::from(threshold);
    keywords
        .iter()
        .any(|k| scores_normalized(&text, &normalize(k.as_ref())).best() >= threshold)
}

/// Fuzzy scores of `keyword` against `text`, both normalized first.
pub fn similarity_scores(text: &str, keyword: &str) -> SimilarityScores {
    scores_normalized(&normalize(text), &normalize(keyword))
}

fn scores_normalized(text: &str, keyword: &str) -> SimilarityScores {
    if text.is_empty() || keyword.is_empty() {
        return SimilarityScores::ZERO;
    }
    let text_chars: Vec<char> = text.chars().collect();
    let kw_chars: Vec<char> = keyword.chars().collect();

    SimilarityScores {
        ratio: ratio(&kw_chars, &text_chars),
        partial: partial_ratio(keyword, &kw_chars, text, &text_chars),
        token_sort: token_sort_ratio(keyword, text),
        token_set: token_set_ratio(keyword, text),
    }
}

/// Exact stage. Short keywords need word boundaries on both sides.
fn contains_keyword(text: &str, keyword: &str) -> bool {
    if keyword.is_empty() {
        return true;
    }
    if keyword.chars().count() > SHORT_KEYWORD_LEN {
        return text.contains(keyword);
    }
    text.match_indices(keyword).any(|(i, m)| {
        let before = text[..i].chars().next_back();
        let after = text[i + m.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Lower-case, punctuation to spaces, single-spaced, trimmed.
fn normalize(s: &str) -> String {
    s.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// 100 * (1 - indel_distance / total_len)
fn ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * lcs_len(a, b) as f64 / total as f64
}

fn ratio_str(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio(&a, &b)
}

fn partial_ratio(keyword: &str, kw: &[char], text: &str, txt: &[char]) -> f64 {
    // Abbreviations are compared against whole tokens only
    if kw.len() <= SHORT_KEYWORD_LEN {
        return text
            .split(' ')
            .map(|token| ratio_str(keyword, token))
            .fold(0.0, f64::max);
    }
    if txt.len() <= kw.len() {
        return ratio(kw, txt);
    }

    let mut best = 0.0f64;
    for window in txt.windows(kw.len()) {
        best = best.max(ratio(kw, window));
        if best >= 100.0 {
            break;
        }
    }
    best
}

fn sorted_tokens(s: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = s.split(' ').collect();
    tokens.sort_unstable();
    tokens
}

fn token_sort_ratio(keyword: &str, text: &str) -> f64 {
    ratio_str(&sorted_tokens(keyword).join(" "), &sorted_tokens(text).join(" "))
}

/// Extra words in the text never lower the score; words missing from the
/// text do.
fn token_set_ratio(keyword: &str, text: &str) -> f64 {
    let kw: BTreeSet<&str> = keyword.split(' ').collect();
    let tx: BTreeSet<&str> = text.split(' ').collect();

    let sect: Vec<&str> = kw.intersection(&tx).copied().collect();
    let kw_rest: Vec<&str> = kw.difference(&tx).copied().collect();
    let tx_rest: Vec<&str> = tx.difference(&kw).copied().collect();

    if sect.is_empty() {
        return ratio_str(&kw_rest.join(" "), &tx_rest.join(" "));
    }
    if kw_rest.is_empty() {
        return 100.0;
    }

    let base = sect.join(" ");
    let with_kw = format!("{} {}", base, kw_rest.join(" "));
    let with_tx = if tx_rest.is_empty() {
        base.clone()
    } else {
        format!("{} {}", base, tx_rest.join(" "))
    };

    let mut best = ratio_str(&base, &with_kw).max(ratio_str(&with_kw, &with_tx));
    if !tx_rest.is_empty() {
        best = best.max(ratio_str(&base, &with_tx));
    }
    best
}
