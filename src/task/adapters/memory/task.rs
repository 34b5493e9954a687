//! In-memory task gateway for store tests and offline demos.

use async_trait::async_trait;
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{
    gateway::{GatewayError, GatewayResult, next_identifier},
    identity::UserId,
    task::{
        domain::{Task, TaskData, TaskDraft, TaskId, TaskListing, TaskQuery, TaskStatus},
        ports::TaskGateway,
    },
};

/// Thread-safe stand-in for the task backend.
///
/// Requests are served on behalf of one acting user; [`Self::as_user`]
/// returns a handle sharing the same backing state for another user.
#[derive(Debug)]
pub struct InMemoryTaskGateway<C>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<InMemoryTaskState>>,
    acting_user: UserId,
    clock: Arc<C>,
}

impl<C> Clone for InMemoryTaskGateway<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            acting_user: self.acting_user,
            clock: Arc::clone(&self.clock),
        }
    }
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    last_id: u64,
    pending_failure: Option<GatewayError>,
}

impl InMemoryTaskGateway<mockable::DefaultClock> {
    /// Creates an empty gateway on the system clock.
    #[must_use]
    pub fn new(acting_user: UserId) -> Self {
        Self::with_clock(acting_user, Arc::new(mockable::DefaultClock))
    }
}

impl<C> InMemoryTaskGateway<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty gateway stamping timestamps from `clock`.
    #[must_use]
    pub fn with_clock(acting_user: UserId, clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryTaskState::default())),
            acting_user,
            clock,
        }
    }

    /// Returns a handle acting as `user` over the same backing state.
    #[must_use]
    pub fn as_user(&self, user: UserId) -> Self {
        Self {
            acting_user: user,
            ..self.clone()
        }
    }

    /// Returns the user requests are served for.
    #[must_use]
    pub const fn acting_user(&self) -> UserId {
        self.acting_user
    }

    /// Stores a task as-is, bypassing lifecycle rules.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the backing lock is poisoned.
    pub fn seed(&self, task: Task) -> GatewayResult<()> {
        let mut state = self.write()?;
        state.last_id = state.last_id.max(task.id().value());
        state.tasks.insert(task.id(), task);
        Ok(())
    }

    /// Makes the next request fail with `error` instead of being served.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the backing lock is poisoned.
    pub fn fail_next(&self, error: GatewayError) -> GatewayResult<()> {
        self.write()?.pending_failure = Some(error);
        Ok(())
    }

    /// Returns the stored task, if any.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the backing lock is poisoned.
    pub fn stored(&self, id: TaskId) -> GatewayResult<Option<Task>> {
        Ok(self.read()?.tasks.get(&id).cloned())
    }

    fn read(&self) -> GatewayResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state
            .read()
            .map_err(|err| GatewayError::Transport(err.to_string()))
    }

    fn write(&self) -> GatewayResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state
            .write()
            .map_err(|err| GatewayError::Transport(err.to_string()))
    }

    /// Takes the write lock, consuming any injected failure first.
    fn serve(&self) -> GatewayResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        let mut state = self.write()?;
        if let Some(error) = state.pending_failure.take() {
            return Err(error);
        }
        Ok(state)
    }

    /// Applies `change` to a stored task and re-validates the result.
    fn modify(
        &self,
        id: TaskId,
        change: impl FnOnce(&mut TaskData, UserId) -> GatewayResult<()>,
    ) -> GatewayResult<Task> {
        let mut state = self.serve()?;
        let current = state.tasks.get(&id).cloned().ok_or_else(not_found)?;
        let mut data = TaskData::from(current.clone());
        change(&mut data, self.acting_user)?;
        data.updated_at = self.clock.utc();

        let updated = Task::from(data);
        current
            .check_successor(&updated)
            .map_err(|err| GatewayError::rejected(400, err.to_string()))?;
        state.tasks.insert(id, updated.clone());
        Ok(updated)
    }
}

fn not_found() -> GatewayError {
    GatewayError::rejected(404, "task not found")
}

fn require_owner(data: &TaskData, user: UserId) -> GatewayResult<()> {
    if data.customer == user {
        Ok(())
    } else {
        Err(GatewayError::rejected(403, "only the task owner may do this"))
    }
}

fn matches_query(task: &Task, query: &TaskQuery) -> bool {
    let status_matches = query.status().is_none_or(|status| task.status() == status);
    let search_matches = query.search().is_none_or(|term| {
        let term = term.to_lowercase();
        task.title().to_lowercase().contains(&term)
            || task.description().to_lowercase().contains(&term)
    });
    status_matches && search_matches
}

fn apply_draft(data: &mut TaskData, draft: &TaskDraft) {
    if let Some(title) = draft.title() {
        title.clone_into(&mut data.title);
    }
    if let Some(description) = draft.description() {
        description.clone_into(&mut data.description);
    }
    if let Some(budget) = draft.budget() {
        data.budget = budget;
    }
    if let Some(deadline) = draft.deadline() {
        data.deadline = Some(deadline);
    }
    if let Some(status) = draft.status() {
        data.status = status;
    }
    if let Some(executor) = draft.executor() {
        data.executor = Some(executor);
    }
    if let Some(template) = draft.template() {
        data.template = Some(template);
    }
    if let Some(category) = draft.category() {
        data.category = Some(category.to_owned());
    }
}

#[async_trait]
impl<C> TaskGateway for InMemoryTaskGateway<C>
where
    C: Clock + Send + Sync,
{
    async fn list_tasks(&self, query: &TaskQuery) -> GatewayResult<TaskListing> {
        let state = self.serve()?;
        let mut results: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| matches_query(task, query))
            .cloned()
            .collect();
        results.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        let count = u64::try_from(results.len()).unwrap_or(u64::MAX);
        Ok(TaskListing::Envelope {
            results,
            count: Some(count),
        })
    }

    async fn get_task(&self, id: TaskId) -> GatewayResult<Task> {
        let state = self.serve()?;
        state.tasks.get(&id).cloned().ok_or_else(not_found)
    }

    async fn create_task(&self, draft: &TaskDraft) -> GatewayResult<Task> {
        let title = draft
            .title()
            .filter(|title| !title.trim().is_empty())
            .ok_or_else(|| GatewayError::rejected(400, "title is required"))?;

        let mut state = self.serve()?;
        let id = TaskId::new(next_identifier(state.last_id)?);
        let mut data = TaskData::new(id, title, self.acting_user, self.clock.utc());
        apply_draft(&mut data, draft);
        data.status = TaskStatus::Draft;
        data.executor = None;

        let task = Task::from(data);
        task.check_invariants()
            .map_err(|err| GatewayError::rejected(400, err.to_string()))?;
        state.last_id = id.value();
        state.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: TaskId, draft: &TaskDraft) -> GatewayResult<Task> {
        self.modify(id, |data, user| {
            require_owner(data, user)?;
            apply_draft(data, draft);
            Ok(())
        })
    }

    async fn publish_task(&self, id: TaskId) -> GatewayResult<Task> {
        self.modify(id, |data, user| {
            require_owner(data, user)?;
            if data.status != TaskStatus::Draft || data.title.trim().is_empty() {
                return Err(GatewayError::rejected(400, "task cannot be published"));
            }
            data.status = TaskStatus::Published;
            Ok(())
        })
    }

    async fn assign_task(&self, id: TaskId) -> GatewayResult<Task> {
        self.modify(id, |data, user| {
            if data.status != TaskStatus::Published {
                return Err(GatewayError::rejected(400, "only published tasks can be claimed"));
            }
            if data.executor.is_some() {
                return Err(GatewayError::rejected(400, "task is already assigned"));
            }
            data.executor = Some(user);
            data.status = TaskStatus::InProgress;
            Ok(())
        })
    }

    async fn complete_task(&self, id: TaskId) -> GatewayResult<Task> {
        self.modify(id, |data, user| {
            if data.executor != Some(user) {
                return Err(GatewayError::rejected(
                    403,
                    "only the assigned executor can complete the task",
                ));
            }
            if data.status != TaskStatus::InProgress {
                return Err(GatewayError::rejected(400, "only tasks in progress can be completed"));
            }
            data.status = TaskStatus::Completed;
            Ok(())
        })
    }

    async fn delete_task(&self, id: TaskId) -> GatewayResult<()> {
        let mut state = self.serve()?;
        let task = state.tasks.get(&id).ok_or_else(not_found)?;
        if task.customer() != self.acting_user {
            return Err(GatewayError::rejected(403, "only the task owner may do this"));
        }
        state.tasks.remove(&id);
        Ok(())
    }
}
