//! Exchange bhavcopy normalization and flat-file bar I/O.
//!
//! Daily bhavcopy files arrive with shouting headers, stray padding and
//! comma-grouped numbers. This module maps them onto the canonical bar
//! shape, filters to the wanted trading series, and merges days into
//! per-symbol tables with first-wins deduplication. Downloading the files
//! is someone else's job; everything here works on local readers.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::{BarSeries, CoreError, DailyBar, FeatureRow, Symbol, TradeDate, ValidationError};

/// Row shape of the normalized per-symbol CSV files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarRecord {
    pub date: TradeDate,
    pub symbol: Symbol,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub last: Option<f64>,
    pub prev_close: Option<f64>,
    pub turnover: Option<f64>,
}

impl BarRecord {
    pub fn from_bar(symbol: Symbol, bar: &DailyBar) -> Self {
        Self {
            date: bar.date,
            symbol,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            last: bar.last,
            prev_close: bar.prev_close,
            turnover: bar.turnover,
        }
    }

    /// Rebuild the validated bar, re-checking invariants on data read back
    /// from disk.
    pub fn into_bar(self) -> Result<DailyBar, ValidationError> {
        DailyBar::new(
            self.date,
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
            self.last,
            self.prev_close,
            self.turnover,
        )
    }
}

struct ColumnMap {
    symbol: usize,
    series: usize,
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: usize,
    last: Option<usize>,
    prev_close: Option<usize>,
    turnover: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, ValidationError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|header| header.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &'static str| {
            find(name).ok_or(ValidationError::MissingColumn { column: name })
        };

        Ok(Self {
            symbol: require("SYMBOL")?,
            series: require("SERIES")?,
            date: require("DATE1")?,
            open: require("OPEN_PRICE")?,
            high: require("HIGH_PRICE")?,
            low: require("LOW_PRICE")?,
            close: require("CLOSE_PRICE")?,
            volume: require("TTL_TRD_QNTY")?,
            last: find("LAST_PRICE"),
            prev_close: find("PREV_CLOSE"),
            turnover: find("TURNOVER_LACS"),
        })
    }
}

/// Parse an exchange bhavcopy CSV into normalized records.
///
/// Only rows whose SERIES value appears in `keep_series` survive; an empty
/// slice keeps every series. Header and field padding is trimmed and
/// comma-grouped numbers are accepted.
pub fn parse_bhavcopy<R: Read>(
    reader: R,
    keep_series: &[String],
) -> Result<Vec<BarRecord>, CoreError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns = ColumnMap::from_headers(csv_reader.headers()?)?;

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let series = field(&record, columns.series);
        if !keep_series.is_empty()
            && !keep_series.iter().any(|s| s.eq_ignore_ascii_case(series))
        {
            continue;
        }

        let symbol = Symbol::parse(field(&record, columns.symbol))?;
        let date = TradeDate::parse_bhavcopy(field(&record, columns.date))?;
        let bar = DailyBar::new(
            date,
            parse_numeric("OPEN_PRICE", field(&record, columns.open))?,
            parse_numeric("HIGH_PRICE", field(&record, columns.high))?,
            parse_numeric("LOW_PRICE", field(&record, columns.low))?,
            parse_numeric("CLOSE_PRICE", field(&record, columns.close))?,
            parse_numeric("TTL_TRD_QNTY", field(&record, columns.volume))?,
            parse_optional(&record, columns.last, "LAST_PRICE")?,
            parse_optional(&record, columns.prev_close, "PREV_CLOSE")?,
            parse_optional(&record, columns.turnover, "TURNOVER_LACS")?,
        )?;
        records.push(BarRecord::from_bar(symbol, &bar));
    }
    Ok(records)
}

fn field<'r>(record: &'r csv::StringRecord, index: usize) -> &'r str {
    record.get(index).unwrap_or("").trim()
}

fn parse_numeric(column: &'static str, value: &str) -> Result<f64, ValidationError> {
    let cleaned = value.replace(',', "");
    cleaned
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidNumeric {
            column,
            value: value.to_owned(),
        })
}

fn parse_optional(
    record: &csv::StringRecord,
    index: Option<usize>,
    column: &'static str,
) -> Result<Option<f64>, ValidationError> {
    let Some(index) = index else {
        return Ok(None);
    };
    let value = field(record, index);
    if value.is_empty() || value == "-" {
        return Ok(None);
    }
    parse_numeric(column, value).map(Some)
}

/// Group records per symbol, sorting each group by date and keeping the
/// first record seen for any duplicate date.
pub fn group_by_symbol(records: Vec<BarRecord>) -> BTreeMap<Symbol, Vec<BarRecord>> {
    let mut grouped: BTreeMap<Symbol, Vec<BarRecord>> = BTreeMap::new();
    for record in records {
        grouped.entry(record.symbol.clone()).or_default().push(record);
    }
    for group in grouped.values_mut() {
        group.sort_by_key(|record| record.date);
        group.dedup_by_key(|record| record.date);
    }
    grouped
}

/// Merge freshly ingested records into an existing per-symbol table.
/// Existing rows win on duplicate dates.
pub fn merge_records(existing: Vec<BarRecord>, incoming: Vec<BarRecord>) -> Vec<BarRecord> {
    let mut merged = existing;
    merged.extend(incoming);
    merged.sort_by_key(|record| record.date);
    merged.dedup_by_key(|record| record.date);
    merged
}

/// Build a validated series from one symbol's normalized records.
pub fn into_series(symbol: Symbol, records: Vec<BarRecord>) -> Result<BarSeries, CoreError> {
    let mut bars = Vec::with_capacity(records.len());
    for record in records {
        bars.push(record.into_bar()?);
    }
    BarSeries::from_bars(symbol, bars).map_err(CoreError::from)
}

/// Read a normalized per-symbol CSV.
pub fn read_bars_csv<R: Read>(reader: R) -> Result<Vec<BarRecord>, CoreError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for result in csv_reader.deserialize() {
        records.push(result?);
    }
    Ok(records)
}

/// Write a normalized per-symbol CSV.
pub fn write_bars_csv<W: Write>(writer: W, records: &[BarRecord]) -> Result<(), CoreError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Read a per-symbol feature table CSV.
pub fn read_features_csv<R: Read>(reader: R) -> Result<Vec<FeatureRow>, CoreError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for result in csv_reader.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

/// Write a per-symbol feature table CSV.
pub fn write_features_csv<W: Write>(writer: W, rows: &[FeatureRow]) -> Result<(), CoreError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
