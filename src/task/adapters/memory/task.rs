//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{
        NewTask, PageWindow, Task, TaskFilter, TaskId, TaskIdSet, TaskPage, TaskPatch,
        TaskTransition,
    },
    ports::{DeletionScope, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Identifiers are allocated from a monotonically increasing counter and
/// records are kept ordered by identifier, mirroring a `BIGSERIAL` primary
/// key. Each operation holds the lock for its whole duration, which gives the
/// same atomicity as a single conditional SQL statement.
pub struct InMemoryTaskRepository<C = DefaultClock> {
    state: Arc<RwLock<InMemoryTaskState>>,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    last_id: i64,
}

impl InMemoryTaskRepository<DefaultClock> {
    /// Creates an empty in-memory repository stamping records with the
    /// system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryTaskRepository<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryTaskRepository<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty repository stamping insert timestamps with `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryTaskState::default())),
            clock,
        }
    }

    /// Returns the number of stored records, soft-deleted ones included.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the lock is poisoned.
    pub fn len(&self) -> TaskRepositoryResult<usize> {
        Ok(self.read()?.tasks.len())
    }

    /// Returns `true` when no records are stored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the lock is poisoned.
    pub fn is_empty(&self) -> TaskRepositoryResult<bool> {
        Ok(self.read()?.tasks.is_empty())
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

impl<C> Clone for InMemoryTaskRepository<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> fmt::Debug for InMemoryTaskRepository<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryTaskRepository")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Applies a transition to one stored record if its precondition holds.
fn transition_one(
    state: &mut InMemoryTaskState,
    id: TaskId,
    transition: TaskTransition,
    timestamp: DateTime<Utc>,
) -> Option<Task> {
    let task = state
        .tasks
        .get_mut(&id)
        .filter(|task| transition.is_permitted(task))?;
    transition.apply(task, timestamp);
    Some(task.clone())
}

#[async_trait]
impl<C> TaskRepository for InMemoryTaskRepository<C>
where
    C: Clock + Send + Sync,
{
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;
        let next_id = state.last_id.checked_add(1).ok_or_else(|| {
            TaskRepositoryError::persistence(std::io::Error::other("task id sequence exhausted"))
        })?;
        let stored = task
            .clone()
            .into_persisted(TaskId::from_persisted(next_id), self.clock.utc());
        state.last_id = next_id;
        state.tasks.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn find_by_id(
        &self,
        id: TaskId,
        scope: DeletionScope,
    ) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        let task = state.tasks.get(&id).filter(|task| match scope {
            DeletionScope::ActiveOnly => task.is_active(),
            DeletionScope::IncludeDeleted => true,
        });
        Ok(task.cloned())
    }

    async fn update_active(
        &self,
        id: TaskId,
        patch: &TaskPatch,
        timestamp: DateTime<Utc>,
    ) -> TaskRepositoryResult<Option<Task>> {
        let mut state = self.write()?;
        let Some(task) = state.tasks.get_mut(&id).filter(|task| task.is_active()) else {
            return Ok(None);
        };
        patch.apply_to(task, timestamp);
        Ok(Some(task.clone()))
    }

    async fn query(
        &self,
        filter: &TaskFilter,
        window: PageWindow,
    ) -> TaskRepositoryResult<TaskPage> {
        let state = self.read()?;
        let matching: Vec<&Task> = state
            .tasks
            .values()
            .filter(|task| filter.matches(task))
            .collect();
        let total = u64::try_from(matching.len()).map_err(TaskRepositoryError::persistence)?;
        let offset = usize::try_from(window.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(window.limit()).unwrap_or(usize::MAX);
        let tasks = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok(TaskPage {
            tasks,
            total,
            window,
        })
    }

    async fn transition(
        &self,
        id: TaskId,
        transition: TaskTransition,
        timestamp: DateTime<Utc>,
    ) -> TaskRepositoryResult<Option<Task>> {
        let mut state = self.write()?;
        Ok(transition_one(&mut state, id, transition, timestamp))
    }

    async fn batch_transition(
        &self,
        ids: &TaskIdSet,
        transition: TaskTransition,
        timestamp: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<TaskId>> {
        let mut state = self.write()?;
        let affected = ids
            .iter()
            .filter(|id| transition_one(&mut state, *id, transition, timestamp).is_some())
            .collect();
        Ok(affected)
    }

    async fn hard_delete(&self, id: TaskId) -> TaskRepositoryResult<u64> {
        let mut state = self.write()?;
        Ok(u64::from(state.tasks.remove(&id).is_some()))
    }

    async fn batch_hard_delete(&self, ids: &TaskIdSet) -> TaskRepositoryResult<Vec<TaskId>> {
        let mut state = self.write()?;
        let removed = ids
            .iter()
            .filter(|id| state.tasks.remove(id).is_some())
            .collect();
        Ok(removed)
    }
}
