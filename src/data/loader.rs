//! Source table loading.
//!
//! Reads the delimited results file into `RawRecord`s. Only the diet group,
//! sex and indicator columns are kept; nulls survive as `None` so the
//! aggregator can decide what to drop. Label cells are kept verbatim.

use crate::error::{DataError, Result};
use crate::models::{Indicator, RawRecord, INDICATOR_COUNT};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Column holding the diet group label.
pub const DIET_GROUP_COLUMN: &str = "diet_group";

/// Column holding the sex label.
pub const SEX_COLUMN: &str = "sex";

/// Cell contents treated as missing values, besides the empty cell.
const NULL_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Column positions resolved from the header row.
struct ColumnIndex {
    diet_group: usize,
    sex: usize,
    indicators: [usize; INDICATOR_COUNT],
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| DataError::MissingColumn(name.to_string()))
        };

        let mut indicators = [0; INDICATOR_COUNT];
        for indicator in Indicator::ALL {
            indicators[indicator.index()] = find(indicator.column())?;
        }

        Ok(Self {
            diet_group: find(DIET_GROUP_COLUMN)?,
            sex: find(SEX_COLUMN)?,
            indicators,
        })
    }
}

/// Load the source table from a file.
pub fn load_csv(path: &Path, delimiter: u8) -> Result<Vec<RawRecord>> {
    info!("Loading data from: {}", path.display());

    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = load_from_reader(file, delimiter)?;
    info!("Read {} records from {}", records.len(), path.display());

    Ok(records)
}

/// Load the source table from any reader. The first row must be the header.
pub fn load_from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Vec<RawRecord>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(reader);

    let columns = ColumnIndex::from_headers(rdr.headers()?)?;
    debug!(
        "Resolved columns: diet_group={}, sex={}, indicators={:?}",
        columns.diet_group, columns.sex, columns.indicators
    );

    let mut records = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let row = result?;
        // Header is line 1.
        let line = i + 2;

        let mut values = [None; INDICATOR_COUNT];
        for indicator in Indicator::ALL {
            let raw = row.get(columns.indicators[indicator.index()]);
            values[indicator.index()] = parse_number(raw, indicator.column(), line)?;
        }

        records.push(RawRecord {
            diet_group: text_cell(row.get(columns.diet_group)),
            sex: text_cell(row.get(columns.sex)),
            values,
        });
    }

    Ok(records)
}

/// True if the cell should be read as a missing value.
pub fn is_null(cell: &str) -> bool {
    cell.is_empty() || NULL_TOKENS.contains(&cell)
}

fn text_cell(cell: Option<&str>) -> Option<String> {
    cell.filter(|c| !is_null(c)).map(str::to_string)
}

/// Numeric cells tolerate surrounding whitespace.
fn parse_number(cell: Option<&str>, column: &str, line: usize) -> Result<Option<f64>> {
    let Some(cell) = cell.map(str::trim).filter(|c| !is_null(c)) else {
        return Ok(None);
    };

    match cell.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(DataError::InvalidNumber {
            row: line,
            column: column.to_string(),
            value: cell.to_string(),
        }),
    }
}

/// Bundled sample table used across the crate's tests.
#[cfg(test)]
pub(crate) const SAMPLE_CSV: &str = include_str!("../../fixtures/sample_results.csv");

#[cfg(test)]
pub(crate) fn sample_records() -> Vec<RawRecord> {
    load_from_reader(SAMPLE_CSV.as_bytes(), b',').expect("sample fixture should parse")
}
