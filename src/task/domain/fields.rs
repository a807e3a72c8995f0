//! Validated scalar fields carried by task records.

use super::TaskDomainError;
use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// External timestamp layout: UTC date and time to the minute, `Z`-suffixed.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%MZ";

/// Maximum title length in characters, matching the `VARCHAR(255)` column.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Maximum category length in characters, matching the `VARCHAR(100)` column.
pub const MAX_CATEGORY_LENGTH: usize = 100;

/// Maximum color tag length in characters, matching the `VARCHAR(20)` column.
pub const MAX_COLOR_LENGTH: usize = 20;

/// Non-empty task title of at most [`MAX_TITLE_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when nothing remains after
    /// trimming and [`TaskDomainError::FieldTooLong`] when the trimmed title
    /// exceeds [`MAX_TITLE_LENGTH`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, TaskDomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        check_length("title", trimmed, MAX_TITLE_LENGTH)?;
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validates an optional category label against [`MAX_CATEGORY_LENGTH`].
///
/// # Errors
///
/// Returns [`TaskDomainError::FieldTooLong`] for an over-long label.
pub fn check_category(value: &str) -> Result<(), TaskDomainError> {
    check_length("category", value, MAX_CATEGORY_LENGTH)
}

/// Validates a color tag against [`MAX_COLOR_LENGTH`].
///
/// # Errors
///
/// Returns [`TaskDomainError::FieldTooLong`] for an over-long tag.
pub fn check_color(value: &str) -> Result<(), TaskDomainError> {
    check_length("color", value, MAX_COLOR_LENGTH)
}

fn check_length(field: &'static str, value: &str, max: usize) -> Result<(), TaskDomainError> {
    let length = value.chars().count();
    if length > max {
        return Err(TaskDomainError::FieldTooLong { field, max, length });
    }
    Ok(())
}

/// Task deadline held at minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DueDate(DateTime<Utc>);

impl DueDate {
    /// Parses a `YYYY-MM-DDTHH:MMZ` string.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTimestamp`] when the value does not
    /// follow [`TIMESTAMP_FORMAT`].
    pub fn parse(value: &str) -> Result<Self, TaskDomainError> {
        parse_timestamp(value).map(Self)
    }

    /// Wraps a timestamp, dropping seconds and sub-second precision.
    #[must_use]
    pub fn from_datetime(value: DateTime<Utc>) -> Self {
        Self(truncate_to_minute(value))
    }

    /// Returns the deadline as a UTC timestamp.
    #[must_use]
    pub const fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_timestamp(self.0))
    }
}

/// Parses an external timestamp in [`TIMESTAMP_FORMAT`].
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidTimestamp`] carrying the rejected input.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, TaskDomainError> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| TaskDomainError::InvalidTimestamp(value.to_owned()))
}

/// Renders a timestamp in [`TIMESTAMP_FORMAT`], truncating to the minute.
#[must_use]
pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

fn truncate_to_minute(value: DateTime<Utc>) -> DateTime<Utc> {
    value
        .with_second(0)
        .and_then(|truncated| truncated.with_nanosecond(0))
        .unwrap_or(value)
}
