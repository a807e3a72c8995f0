//! Application services for task lifecycle orchestration.

mod batch;
mod error;
mod lifecycle;
mod query;

pub use batch::BatchOutcome;
pub use error::{TaskErrorKind, TaskLifecycleError, TaskLifecycleResult, TaskOperation};
pub use lifecycle::{CreateTaskRequest, TaskLifecycleService, UpdateTaskRequest};
