//! Shared state handed to every handler.

use crate::task::{ports::TaskRepository, services::TaskLifecycleService};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;

/// Application state holding the task service.
pub struct AppState<R, C = DefaultClock>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    service: Arc<TaskLifecycleService<R, C>>,
}

impl<R, C> AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates state around an existing service.
    #[must_use]
    pub fn new(service: TaskLifecycleService<R, C>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Builds the service from a repository and clock.
    #[must_use]
    pub fn from_parts(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self::new(TaskLifecycleService::new(repository, clock))
    }

    /// Returns the task service.
    #[must_use]
    pub fn service(&self) -> &TaskLifecycleService<R, C> {
        &self.service
    }
}

impl<R, C> Clone for AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}
