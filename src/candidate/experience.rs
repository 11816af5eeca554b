//! Work experience derived from employment history
//!
//! Experience is counted in whole calendar months per job:
//!
//! ```text
//! months = (end.year - start.year) * 12 + (end.month - start.month)
//! ```
//!
//! Days are ignored, so 2020-01-31 → 2020-02-01 counts as one month. The sum over
//! all jobs is divided by 12 and shown with one decimal.
//!
//! Dates are expected to be well-formed. Anything that does not parse is
//! reported as [`MalformedDate`] instead of turning into a non-numeric value
//! that would poison the Experience row.

use super::record::EmploymentInterval;
use crate::format;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;

/// Which end of an employment interval failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateField {
    StartDate,
    EndDate,
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateField::StartDate => write!(f, "start_date"),
            DateField::EndDate => write!(f, "end_date"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field} {} is not a calendar date", display_value(.value))]
pub struct MalformedDate {
    pub field: DateField,
    pub value: Option<String>,
}

fn display_value(value: &Option<String>) -> String {
    match value {
        Some(v) => format!("{:?}", v),
        None => "(missing)".to_string(),
    }
}

/// Year and 1-based month of a date string.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (the date as written, offset
/// ignored), naive `YYYY-MM-DDTHH:MM:SS[.fff]`, and bare `YYYY-MM`.
pub fn parse_year_month(raw: &str) -> Option<(i32, u32)> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some((date.year(), date.month()));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        let local = dt.naive_local();
        return Some((local.year(), local.month()));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some((dt.year(), dt.month()));
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d") {
        return Some((date.year(), date.month()));
    }

    None
}

fn parse_field(value: &Option<String>, field: DateField) -> Result<(i32, u32), MalformedDate> {
    value
        .as_deref()
        .and_then(parse_year_month)
        .ok_or_else(|| MalformedDate {
            field,
            value: value.clone(),
        })
}

impl EmploymentInterval {
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: Some(start_date.into()),
            end_date: Some(end_date.into()),
        }
    }

    /// Whole months between start and end. Negative when end precedes start.
    pub fn months(&self) -> Result<i64, MalformedDate> {
        let (start_year, start_month) = parse_field(&self.start_date, DateField::StartDate)?;
        let (end_year, end_month) = parse_field(&self.end_date, DateField::EndDate)?;

        Ok((end_year as i64 - start_year as i64) * 12 + (end_month as i64 - start_month as i64))
    }
}

/// Sum of months over every interval. An empty history is zero months.
pub fn total_months(history: &[EmploymentInterval]) -> Result<i64, MalformedDate> {
    history.iter().map(EmploymentInterval::months).sum()
}

/// Experience in years, one decimal, as shown in the Experience row.
pub fn experience_years(history: &[EmploymentInterval]) -> Result<String, MalformedDate> {
    let months = total_months(history)?;
    Ok(format::fixed(months as f64 / 12.0, 1))
}
