//! Loader for the semicolon-delimited survey CSV.

use crate::Result;
use crate::diagnostics;
use crate::questions;

use anyhow::{Context, bail};
use chrono::{NaiveDate, NaiveDateTime};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// The survey responses, loaded once and never mutated afterwards.
///
/// Cells are kept verbatim except for the `Timestamp` column, which is parsed
/// day-first at load time and normalized to `YYYY-MM-DD HH:MM:SS` so the raw
/// table in the report shows one uniform shape. An empty cell means "missing".
#[derive(Debug, Clone)]
pub struct SurveyTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl SurveyTable {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| diagnostics::error_message(format!("open {}", path.display())))?;
        Self::from_reader(file)
            .with_context(|| diagnostics::error_message(format!("read {}", path.display())))
    }

    /// Parse a semicolon-delimited CSV stream into a table.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().delimiter(b';').from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .context("read CSV headers")?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let Some(ts_idx) = headers.iter().position(|h| h == questions::TIMESTAMP) else {
            bail!(
                "{}",
                diagnostics::error_message(format!(
                    "missing required column '{}' (is the file semicolon-delimited?)",
                    questions::TIMESTAMP
                ))
            );
        };

        let mut rows = Vec::new();
        for (idx, record) in rdr.records().enumerate() {
            // +2: records start after the header line, and lines are 1-based.
            let line = idx + 2;
            let record = record.with_context(|| format!("CSV parse error at line {}", line))?;

            let mut row: Vec<String> = record.iter().map(str::to_string).collect();

            let raw_ts = row[ts_idx].trim();
            if !raw_ts.is_empty() {
                let ts = parse_day_first(raw_ts).with_context(|| {
                    diagnostics::error_message(format!(
                        "unparseable timestamp {:?} at line {}",
                        raw_ts, line
                    ))
                })?;
                row[ts_idx] = ts.format("%Y-%m-%d %H:%M:%S").to_string();
            }

            rows.push(row);
        }

        Ok(SurveyTable { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of response rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Cells of a column, top to bottom. Missing columns are a hard error.
    pub fn column(&self, name: &str) -> Result<Vec<&str>> {
        let Some(idx) = self.headers.iter().position(|h| h == name) else {
            bail!(
                "{}",
                diagnostics::error_message(format!("missing required column '{}'", name))
            );
        };
        Ok(self.rows.iter().map(|r| r[idx].as_str()).collect())
    }
}

/// Parse a timestamp with day-first interpretation ("31/01/2025" is January 31).
///
/// ISO `Y-m-d` shapes are unambiguous and accepted as well.
fn parse_day_first(s: &str) -> Result<NaiveDateTime> {
    const DATETIME_FORMATS: &[&str] = &[
        "%d/%m/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M",
        "%d.%m.%Y %H:%M:%S",
        "%d.%m.%Y %H:%M",
        "%d-%m-%Y %H:%M:%S",
        "%d-%m-%Y %H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d.%m.%Y", "%d-%m-%Y", "%Y-%m-%d"];

    for fmt in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(ts);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            if let Some(ts) = d.and_hms_opt(0, 0, 0) {
                return Ok(ts);
            }
        }
    }
    bail!("no day-first format matched {:?}", s)
}
