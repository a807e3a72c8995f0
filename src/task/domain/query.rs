//! Filter composition and pagination over the task collection.
//!
//! A [`TaskQuery`] holds the optional search parameters exactly as a caller
//! supplied them. [`TaskQuery::compose`] turns it into an immutable
//! [`TaskFilter`] (a conjunction of [`TaskPredicate`]s, always restricted to
//! active records) and a [`PageWindow`]. Storage adapters translate the filter
//! into their own query language; the in-memory adapter evaluates
//! [`TaskFilter::matches`] directly.

use super::{Task, TaskDomainError, TaskStatus};
use chrono::{DateTime, TimeDelta, Utc};

/// Page number used when none, or a non-positive one, is requested.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when none, or a non-positive one, is requested.
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

/// Optional search and pagination parameters for listing tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    /// Case-insensitive substring matched against the title.
    pub keywords: Option<String>,
    /// Exact category label.
    pub category: Option<String>,
    /// Exact status.
    pub status: Option<TaskStatus>,
    /// Exact color tag.
    pub color: Option<String>,
    /// Deadline horizon in days from now, inclusive.
    pub remaining_days: Option<i64>,
    /// One-based page number.
    pub page: Option<i64>,
    /// Page size.
    pub limit: Option<i64>,
}

/// A single conjunct of a task filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskPredicate {
    /// Title contains the text, ignoring case.
    TitleContains(String),
    /// Category equals the label.
    CategoryEquals(String),
    /// Status equals the value.
    StatusEquals(TaskStatus),
    /// Color equals the tag.
    ColorEquals(String),
    /// Due date is at or before the instant.
    DueOnOrBefore(DateTime<Utc>),
}

impl TaskPredicate {
    /// Evaluates the predicate against a record.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::TitleContains(needle) => task
                .title()
                .as_str()
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            Self::CategoryEquals(category) => task.category() == Some(category.as_str()),
            Self::StatusEquals(status) => task.status() == *status,
            Self::ColorEquals(color) => task.color() == Some(color.as_str()),
            Self::DueOnOrBefore(cutoff) => task.due_date().as_datetime() <= *cutoff,
        }
    }
}

/// Conjunction of predicates over active (not soft-deleted) tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    predicates: Vec<TaskPredicate>,
}

impl TaskFilter {
    /// Builds a filter from an ordered predicate list.
    #[must_use]
    pub const fn new(predicates: Vec<TaskPredicate>) -> Self {
        Self { predicates }
    }

    /// Returns the predicates in composition order.
    #[must_use]
    pub fn predicates(&self) -> &[TaskPredicate] {
        &self.predicates
    }

    /// Returns `true` when `task` is active and satisfies every predicate.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        task.is_active() && self.predicates.iter().all(|predicate| predicate.matches(task))
    }
}

/// One-based pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    page: u32,
    limit: u32,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl PageWindow {
    /// Normalizes raw page parameters, substituting defaults for absent or
    /// non-positive values.
    #[must_use]
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: positive_or(page, DEFAULT_PAGE),
            limit: positive_or(limit, DEFAULT_PAGE_LIMIT),
        }
    }

    /// Returns the one-based page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// Returns the number of rows skipped before this page, capped at
    /// `i64::MAX` so it always fits a SQL `OFFSET`.
    #[must_use]
    pub fn offset(self) -> u64 {
        (u64::from(self.page.saturating_sub(1)) * u64::from(self.limit))
            .min(i64::MAX.unsigned_abs())
    }

    /// Returns how many pages `total` rows span at this page size.
    #[must_use]
    pub fn total_pages(self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.limit))
    }
}

fn positive_or(value: Option<i64>, default: u32) -> u32 {
    match value {
        Some(raw) if raw > 0 => u32::try_from(raw).unwrap_or(u32::MAX),
        _ => default,
    }
}

/// Filter and window produced from a [`TaskQuery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedQuery {
    /// Predicate set over active tasks.
    pub filter: TaskFilter,
    /// Pagination window.
    pub window: PageWindow,
}

impl TaskQuery {
    /// Composes the filter and pagination window.
    ///
    /// `now` anchors the `remaining_days` horizon.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NegativeRemainingDays`] when the horizon is
    /// negative.
    pub fn compose(&self, now: DateTime<Utc>) -> Result<ComposedQuery, TaskDomainError> {
        let predicates = [
            non_blank(self.keywords.as_deref()).map(TaskPredicate::TitleContains),
            non_blank(self.category.as_deref()).map(TaskPredicate::CategoryEquals),
            self.status.map(TaskPredicate::StatusEquals),
            non_blank(self.color.as_deref()).map(TaskPredicate::ColorEquals),
            deadline_predicate(self.remaining_days, now)?,
        ]
        .into_iter()
        .flatten()
        .collect();

        Ok(ComposedQuery {
            filter: TaskFilter::new(predicates),
            window: PageWindow::new(self.page, self.limit),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_owned)
}

fn deadline_predicate(
    remaining_days: Option<i64>,
    now: DateTime<Utc>,
) -> Result<Option<TaskPredicate>, TaskDomainError> {
    let Some(days) = remaining_days else {
        return Ok(None);
    };
    if days < 0 {
        return Err(TaskDomainError::NegativeRemainingDays(days));
    }
    let cutoff = TimeDelta::try_days(days)
        .and_then(|horizon| now.checked_add_signed(horizon))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    Ok(Some(TaskPredicate::DueOnOrBefore(cutoff)))
}

/// One page of tasks together with the unpaginated match count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPage {
    /// Tasks on this page in ascending identifier order.
    pub tasks: Vec<Task>,
    /// Number of matching tasks before pagination.
    pub total: u64,
    /// Window the page was read with.
    pub window: PageWindow,
}

impl TaskPage {
    /// Returns how many pages the full result spans.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.window.total_pages(self.total)
    }
}
