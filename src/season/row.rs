//! Per-row validation and numeric coercion.

use std::sync::LazyLock;

use csv::StringRecord;
use regex::Regex;

use crate::domain::SeasonRecord;
use crate::season::header::{ColumnMap, SeasonField};

static SEASON_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}$").unwrap());

/// Result of processing one source row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Keep(SeasonRecord),
    Drop(DropReason),
}

/// Why a row was not turned into a `SeasonRecord`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// The normalized season label is not `YYYY-YY` (career totals, team
    /// splits, blank spacer rows, ...).
    NotASeason(String),
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DropReason::NotASeason(s) => write!(f, "season label {s:?} is not YYYY-YY"),
        }
    }
}

/// Turn one record into a kept season or a drop decision.
pub fn process_row(record: &StringRecord, columns: &ColumnMap) -> RowOutcome {
    let season = normalize_season(cell(record, columns, SeasonField::Season));
    if !is_season_label(&season) {
        return RowOutcome::Drop(DropReason::NotASeason(season));
    }

    RowOutcome::Keep(SeasonRecord {
        season,
        fg: coerce_number(cell(record, columns, SeasonField::Fg)),
        tp3: coerce_number(cell(record, columns, SeasonField::Tp3)),
        tp2: coerce_number(cell(record, columns, SeasonField::Tp2)),
        ft: coerce_number(cell(record, columns, SeasonField::Ft)),
    })
}

/// Trimmed cell text; short rows read as empty cells.
fn cell<'a>(record: &'a StringRecord, columns: &ColumnMap, field: SeasonField) -> &'a str {
    record.get(columns.get(field)).map(str::trim).unwrap_or("")
}

/// Trim and replace en/em dashes with `-`.
pub fn normalize_season(raw: &str) -> String {
    raw.trim().replace(['\u{2013}', '\u{2014}'], "-")
}

pub fn is_season_label(s: &str) -> bool {
    SEASON_RE.is_match(s)
}

/// Loose numeric coercion: blank is `0`, decimal text is its value,
/// `Infinity` and unsigned `0x`/`0o`/`0b` literals are accepted, everything
/// else is `NaN`.
pub fn coerce_number(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(v) = radix_literal(s) {
        return v;
    }
    // `str::parse` also accepts `inf`/`nan` spellings; only plain decimal
    // literals count as numbers here.
    if !s.chars().all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')) {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

fn radix_literal(s: &str) -> Option<f64> {
    let (radix, digits) = match s.get(..2)? {
        "0x" | "0X" => (16, &s[2..]),
        "0o" | "0O" => (8, &s[2..]),
        "0b" | "0B" => (2, &s[2..]),
        _ => return None,
    };
    // `from_str_radix` tolerates a leading `+`.
    if digits.starts_with('+') {
        return Some(f64::NAN);
    }
    Some(u128::from_str_radix(digits, radix).map_or(f64::NAN, |v| v as f64))
}

/// Default decimal text for a percentage (`NaN` and infinities spelled out).
pub fn format_number(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        let text = if v > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if v == 0.0 {
        "0".to_string()
    } else {
        format!("{v}")
    }
}
