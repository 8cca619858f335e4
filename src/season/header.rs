//! Header reconciliation for the season table.
//!
//! The source tables use the basketball-reference spelling (`FG%`, `3P%`,
//! ...); the normalized output uses `fg`, `tp3`, ... Both are accepted so a
//! normalized file can be fed back in unchanged, with the source spelling
//! always tried first.

use csv::StringRecord;

use crate::domain::HeaderMatch;
use crate::error::AppError;

/// The five columns the normalizer needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonField {
    Season,
    Fg,
    Tp3,
    Tp2,
    Ft,
}

impl SeasonField {
    /// Output column order.
    pub const ALL: [SeasonField; 5] = [
        SeasonField::Season,
        SeasonField::Fg,
        SeasonField::Tp3,
        SeasonField::Tp2,
        SeasonField::Ft,
    ];

    /// Header spelling used by the source tables.
    pub fn source_name(self) -> &'static str {
        match self {
            SeasonField::Season => "Season",
            SeasonField::Fg => "FG%",
            SeasonField::Tp3 => "3P%",
            SeasonField::Tp2 => "2P%",
            SeasonField::Ft => "FT%",
        }
    }

    /// Column name written to the normalized CSV.
    pub fn output_name(self) -> &'static str {
        match self {
            SeasonField::Season => "season",
            SeasonField::Fg => "fg",
            SeasonField::Tp3 => "tp3",
            SeasonField::Tp2 => "tp2",
            SeasonField::Ft => "ft",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Resolved source column index for every `SeasonField`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    indices: [usize; 5],
}

impl ColumnMap {
    pub fn get(&self, field: SeasonField) -> usize {
        self.indices[field.index()]
    }
}

/// Locate all five required columns, or fail listing every column that could
/// not be found together with the headers that are actually present.
pub fn resolve_columns(headers: &StringRecord, mode: HeaderMatch) -> Result<ColumnMap, AppError> {
    let mut indices = [0usize; 5];
    let mut missing = Vec::new();

    for field in SeasonField::ALL {
        match find_column(headers, field, mode) {
            Some(idx) => indices[field.index()] = idx,
            None => missing.push(field),
        }
    }

    if missing.is_empty() {
        return Ok(ColumnMap { indices });
    }

    let expected = missing
        .iter()
        .map(|f| format!("`{}`", f.source_name()))
        .collect::<Vec<_>>()
        .join(", ");
    let found = headers
        .iter()
        .map(|h| format!("`{}`", h.trim()))
        .collect::<Vec<_>>()
        .join(", ");
    Err(AppError::precondition(format!(
        "Missing required column(s): {expected}. Found headers: [{found}]"
    )))
}

/// Search passes run across all headers, one at a time, so a better-ranked
/// spelling anywhere in the row beats a weaker match further left. The
/// output name only matches exactly: source tables carry `FG`/`FT` count
/// columns that would otherwise fold onto `fg`/`ft`.
fn find_column(headers: &StringRecord, field: SeasonField, mode: HeaderMatch) -> Option<usize> {
    let source = field.source_name();
    let output = field.output_name();

    match mode {
        HeaderMatch::Strict => position(headers, |h| h.trim() == source),
        HeaderMatch::Tolerant => {
            let folded = normalize_header_name(source);
            let squashed = squash(source);

            position(headers, |h| normalize_header_name(h) == folded)
                .or_else(|| position(headers, |h| squash(h) == squashed))
                .or_else(|| match field {
                    SeasonField::Season => {
                        position(headers, |h| normalize_header_name(h).contains("season"))
                    }
                    _ => None,
                })
        }
    }
    .or_else(|| position(headers, |h| h.trim() == output))
}

fn position(headers: &StringRecord, pred: impl Fn(&str) -> bool) -> Option<usize> {
    headers.iter().position(pred)
}

fn normalize_header_name(name: &str) -> String {
    // A BOM that survived blob-level stripping (e.g. a re-saved file with a
    // doubled marker) would otherwise hide the first column.
    name.trim().trim_start_matches('\u{feff}').to_lowercase()
}

fn squash(name: &str) -> String {
    normalize_header_name(name)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}
