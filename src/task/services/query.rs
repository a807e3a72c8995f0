//! Filtered, paginated listing.

use super::{TaskLifecycleResult, TaskLifecycleService, TaskOperation};
use crate::task::{
    domain::{TaskPage, TaskQuery},
    ports::TaskRepository,
};
use mockable::Clock;

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Lists active tasks matching every supplied filter.
    ///
    /// Results are ordered by ascending identifier. The `remaining_days`
    /// horizon is measured from the service clock.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskLifecycleError::Validation`] for a negative
    /// `remaining_days`, or [`super::TaskLifecycleError::Storage`].
    pub async fn list(&self, query: &TaskQuery) -> TaskLifecycleResult<TaskPage> {
        let composed = query.compose(self.clock.utc())?;
        tracing::debug!(
            predicates = composed.filter.predicates().len(),
            page = composed.window.page(),
            limit = composed.window.limit(),
            "listing tasks"
        );
        let window = composed.window;
        self.repository
            .query(&composed.filter, window)
            .await
            .map_err(super::TaskLifecycleError::storage(
                TaskOperation::List,
                format!("page {}", window.page()),
            ))
    }
}
