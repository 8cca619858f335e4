//! Season-stats normalization.
//!
//! Turns a loosely formatted per-season shooting table into an ordered list of
//! `SeasonRecord`s and back into a fixed-shape CSV (`season,fg,tp3,tp2,ft`).
//!
//! - **Strict schema**: all five columns must resolve, or the run fails
//! - **Row filter**: only `YYYY-YY` seasons survive; summary rows are dropped
//! - **Lenient values**: percentages are coerced, never rejected

pub mod header;
pub mod row;

use csv::StringRecord;

use crate::domain::{HeaderMatch, SeasonRecord};
use crate::error::AppError;

pub use header::{ColumnMap, SeasonField, resolve_columns};
pub use row::{DropReason, RowOutcome, coerce_number, format_number, process_row};

/// A row that did not become a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRow {
    pub line: u64,
    pub reason: DropReason,
}

/// Normalizer output: kept records plus bookkeeping for the run summary.
#[derive(Debug, Clone)]
pub struct SeasonTable {
    pub records: Vec<SeasonRecord>,
    pub rows_read: usize,
    pub dropped: Vec<DroppedRow>,
    /// Number of percentage cells that coerced to `NaN`.
    pub nan_cells: usize,
}

/// Parse and normalize raw season CSV text.
pub fn normalize_seasons(text: &str, mode: HeaderMatch) -> Result<SeasonTable, AppError> {
    let text = text.trim_start_matches('\u{feff}');

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::precondition(format!("Failed to read CSV headers: {e}")))?
        .clone();
    let columns = resolve_columns(&headers, mode)?;

    let mut records = Vec::new();
    let mut dropped = Vec::new();
    let mut rows_read = 0usize;
    let mut nan_cells = 0usize;

    for (idx, result) in reader.records().enumerate() {
        let record: StringRecord =
            result.map_err(|e| AppError::precondition(format!("Malformed CSV row: {e}")))?;
        // Fall back to "header + 1-based row" when the reader has no position.
        let line = record.position().map(|p| p.line()).unwrap_or(idx as u64 + 2);
        rows_read += 1;

        match process_row(&record, &columns) {
            RowOutcome::Keep(rec) => {
                let nans = [rec.fg, rec.tp3, rec.tp2, rec.ft].iter().filter(|v| v.is_nan()).count();
                if nans > 0 {
                    tracing::warn!(line, season = %rec.season, nans, "non-numeric percentage kept as NaN");
                    nan_cells += nans;
                }
                records.push(rec);
            }
            RowOutcome::Drop(reason) => {
                tracing::debug!(line, %reason, "dropping row");
                dropped.push(DroppedRow { line, reason });
            }
        }
    }

    if records.is_empty() {
        return Err(AppError::empty(format!(
            "No season rows remain after filtering ({rows_read} row(s) read, none matched YYYY-YY)."
        )));
    }

    Ok(SeasonTable {
        records,
        rows_read,
        dropped,
        nan_cells,
    })
}

/// Serialize records as `season,fg,tp3,tp2,ft` CSV text.
pub fn render_csv(records: &[SeasonRecord]) -> Result<String, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(SeasonField::ALL.map(SeasonField::output_name))
        .map_err(|e| AppError::io(format!("Failed to write season CSV header: {e}")))?;

    for r in records {
        writer
            .write_record([
                r.season.clone(),
                format_number(r.fg),
                format_number(r.tp3),
                format_number(r.tp2),
                format_number(r.ft),
            ])
            .map_err(|e| AppError::io(format!("Failed to write season CSV row: {e}")))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::io(format!("Failed to flush season CSV: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::io(format!("Season CSV is not UTF-8: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const SAMPLE: &str = "\u{feff}Season,Age,Tm,FG%,3P%,2P%,eFG%,FT%\n\
        2009-10,21,GSW,.462,.437,.482,.535,.885\n\
        2010\u{2013}11,22,GSW,.480,.442,.507,.559,.934\n\
        2011-12,23,GSW,.490,.455,.513,.554,.809\n\
        17 Yrs,,,.473,.426,.519,.580,.910\n";

    fn same(a: f64, b: f64) -> bool {
        (a.is_nan() && b.is_nan()) || a == b
    }

    fn same_record(a: &SeasonRecord, b: &SeasonRecord) -> bool {
        a.season == b.season && same(a.fg, b.fg) && same(a.tp3, b.tp3) && same(a.tp2, b.tp2) && same(a.ft, b.ft)
    }

    #[test]
    fn keeps_seasons_in_order_and_drops_totals() {
        let table = normalize_seasons(SAMPLE, HeaderMatch::Tolerant).unwrap();
        let seasons: Vec<&str> = table.records.iter().map(|r| r.season.as_str()).collect();
        assert_eq!(seasons, ["2009-10", "2010-11", "2011-12"]);
        assert_eq!(table.rows_read, 4);
        assert_eq!(table.dropped.len(), 1);
        assert_eq!(table.dropped[0].line, 5);
        assert_eq!(table.dropped[0].reason, DropReason::NotASeason("17 Yrs".to_string()));
    }

    #[test]
    fn full_table_reads_percentage_columns() {
        let text = "Season,Age,Tm,FG,FGA,FG%,3P,3PA,3P%,2P,2PA,2P%,FT,FTA,FT%\n\
            2015-16,27,GSW,10.2,20.2,.504,5.1,11.2,.454,5.1,9.0,.566,4.6,5.1,.908\n";
        let table = normalize_seasons(text, HeaderMatch::Tolerant).unwrap();
        assert_eq!(
            table.records,
            [SeasonRecord {
                season: "2015-16".to_string(),
                fg: 0.504,
                tp3: 0.454,
                tp2: 0.566,
                ft: 0.908,
            }]
        );
        assert_eq!(
            render_csv(&table.records).unwrap(),
            "season,fg,tp3,tp2,ft\n2015-16,0.504,0.454,0.566,0.908\n"
        );
    }

    #[test]
    fn duplicate_seasons_are_kept() {
        let text = "Season,FG%,3P%,2P%,FT%\n2019-20,.4,.3,.5,.9\n2019-20,.5,.3,.5,.9\n";
        let table = normalize_seasons(text, HeaderMatch::Tolerant).unwrap();
        assert_eq!(table.records.len(), 2);
    }

    #[test]
    fn missing_ft_column_is_fatal() {
        let text = "Season,FG%,3P%,2P%\n2015-16,.504,.454,.566\n";
        let err = normalize_seasons(text, HeaderMatch::Tolerant).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Precondition);
        assert!(err.message().contains("FT%"));
    }

    #[test]
    fn no_valid_rows_is_empty_result() {
        let text = "Season,FG%,3P%,2P%,FT%\nCareer,.4,.3,.5,.9\n";
        let err = normalize_seasons(text, HeaderMatch::Tolerant).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyResult);
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn header_only_is_empty_result() {
        let err = normalize_seasons("Season,FG%,3P%,2P%,FT%\n", HeaderMatch::Tolerant).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyResult);
    }

    #[test]
    fn nan_survives_serialization() {
        let text = "Season,FG%,3P%,2P%,FT%\n2012-13,.451,N/A,,.900\n";
        let table = normalize_seasons(text, HeaderMatch::Tolerant).unwrap();
        assert_eq!(table.nan_cells, 1);
        let rec = &table.records[0];
        assert!(rec.tp3.is_nan());
        assert_eq!(rec.tp2, 0.0);

        let csv = render_csv(&table.records).unwrap();
        assert_eq!(csv, "season,fg,tp3,tp2,ft\n2012-13,0.451,NaN,0,0.9\n");
    }

    #[test]
    fn output_reparses_to_same_records() {
        let text = "Season,FG%,3P%,2P%,FT%\n2014-15,.487,.443,.529,.914\n2015-16,.504,N/A,.566,\n";
        let first = normalize_seasons(text, HeaderMatch::Tolerant).unwrap();
        let csv = render_csv(&first.records).unwrap();
        let second = normalize_seasons(&csv, HeaderMatch::Tolerant).unwrap();

        assert_eq!(first.records.len(), second.records.len());
        for (a, b) in first.records.iter().zip(&second.records) {
            assert!(same_record(a, b), "{a:?} != {b:?}");
        }
        assert_eq!(render_csv(&second.records).unwrap(), csv);
    }
}
