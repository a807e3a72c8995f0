//! Domain model for task lifecycle management.
//!
//! The task domain holds the record type, its validated fields, the
//! precondition-gated transitions, and the filter/pagination composer while
//! keeping all infrastructure concerns outside of the domain boundary.

mod error;
mod fields;
mod ids;
mod patch;
mod query;
mod task;
mod transition;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use fields::{
    DueDate, MAX_CATEGORY_LENGTH, MAX_COLOR_LENGTH, MAX_TITLE_LENGTH, TIMESTAMP_FORMAT, TaskTitle,
    check_category, check_color, format_timestamp, parse_timestamp,
};
pub use ids::{TaskId, TaskIdSet};
pub use patch::TaskPatch;
pub use query::{
    ComposedQuery, DEFAULT_PAGE, DEFAULT_PAGE_LIMIT, PageWindow, TaskFilter, TaskPage,
    TaskPredicate, TaskQuery,
};
pub use task::{NewTask, PersistedTaskData, Task, TaskStatus};
pub use transition::TaskTransition;
