//! Identifier types for the task domain.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Storage-assigned identifier for a task record.
///
/// Identifiers are allocated by the storage layer on insert and never change
/// afterwards. Ordering follows allocation order, which is also the default
/// listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Creates a validated task identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTaskId`] when the value is zero or
    /// negative.
    pub const fn new(value: i64) -> Result<Self, TaskDomainError> {
        if value <= 0 {
            return Err(TaskDomainError::InvalidTaskId(value));
        }
        Ok(Self(value))
    }

    /// Wraps an identifier read back from storage.
    #[must_use]
    pub const fn from_persisted(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty, de-duplicated set of task identifiers for batch operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskIdSet(BTreeSet<TaskId>);

impl TaskIdSet {
    /// Builds an identifier set from raw values.
    ///
    /// Duplicate values collapse into a single entry.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyIdSet`] when no identifiers are given
    /// and [`TaskDomainError::InvalidTaskId`] for the first non-positive
    /// value.
    pub fn new(values: impl IntoIterator<Item = i64>) -> Result<Self, TaskDomainError> {
        let ids = values
            .into_iter()
            .map(TaskId::new)
            .collect::<Result<BTreeSet<_>, _>>()?;
        if ids.is_empty() {
            return Err(TaskDomainError::EmptyIdSet);
        }
        Ok(Self(ids))
    }

    /// Returns the number of distinct identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the set holds no identifiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates identifiers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.0.iter().copied()
    }

    /// Returns the raw values in ascending order.
    #[must_use]
    pub fn values(&self) -> Vec<i64> {
        self.iter().map(TaskId::value).collect()
    }
}

impl fmt::Display for TaskIdSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, id) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{id}")?;
        }
        f.write_str("]")
    }
}
