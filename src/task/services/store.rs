//! Client-side task store.

use crate::{
    collection::{find_by_key, prepend_unique, remove_by_key, replace_by_key},
    config::{ClientConfig, FailureMessages},
    task::{
        domain::{Task, TaskDraft, TaskId, TaskListing, TaskQuery},
        ports::TaskGateway,
    },
    tracker::{OperationPhase, OperationToken, Settlement, StoreStatus, TrackedState},
};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct TaskCollection {
    tasks: Vec<Task>,
    current: Option<Task>,
    total_count: u64,
}

impl TaskCollection {
    fn replace_all(&mut self, listing: TaskListing) {
        let (tasks, total_count) = listing.into_parts();
        self.tasks = tasks;
        self.total_count = total_count;
    }

    fn insert_created(&mut self, task: Task) {
        if let Err(err) = task.check_invariants() {
            warn!(task_id = %task.id(), error = %err, "created task violates invariants");
        }
        if prepend_unique(&mut self.tasks, task.clone()) {
            debug!(task_id = %task.id(), "created task displaced a cached entry");
        }
        self.current = Some(task);
    }

    /// Shared merge for update, publish, assign and complete.
    fn apply_update(&mut self, task: Task) {
        let predecessor = find_by_key(&self.tasks, task.id())
            .or(self.current.as_ref().filter(|current| current.id() == task.id()));
        let verdict = predecessor.map_or_else(
            || task.check_invariants(),
            |previous| previous.check_successor(&task),
        );
        if let Err(err) = verdict {
            warn!(task_id = %task.id(), error = %err, "server projection violates task lifecycle");
        }

        replace_by_key(&mut self.tasks, task.clone());
        self.current = Some(task);
    }

    fn remove(&mut self, id: TaskId) {
        remove_by_key(&mut self.tasks, id);
        if self.current.as_ref().is_some_and(|current| current.id() == id) {
            self.current = None;
        }
    }
}

/// Cached task collection kept in step with the remote backend.
///
/// Every operation dispatches under a fresh [`OperationToken`], awaits the
/// gateway and settles atomically. Operations never return errors: failures
/// land in the error slot and in the returned [`Settlement`]. The store is a
/// cheap handle; clones share state.
pub struct TaskStore<G>
where
    G: TaskGateway,
{
    gateway: Arc<G>,
    state: TrackedState<TaskCollection>,
    messages: Arc<FailureMessages>,
}

impl<G> Clone for TaskStore<G>
where
    G: TaskGateway,
{
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            state: self.state.clone(),
            messages: Arc::clone(&self.messages),
        }
    }
}

impl<G> TaskStore<G>
where
    G: TaskGateway,
{
    /// Creates an empty store with default configuration.
    #[must_use]
    pub fn new(gateway: Arc<G>) -> Self {
        Self::with_config(gateway, &ClientConfig::default())
    }

    /// Creates an empty store using `config` for messages and history.
    #[must_use]
    pub fn with_config(gateway: Arc<G>, config: &ClientConfig) -> Self {
        Self {
            gateway,
            state: TrackedState::new(config.operation_history()),
            messages: Arc::new(config.messages().clone()),
        }
    }

    /// Lists tasks and replaces the whole collection with the result.
    pub async fn list(&self, query: TaskQuery) -> Settlement {
        self.state
            .run(
                "list_tasks",
                &self.messages.load_tasks,
                self.gateway.list_tasks(&query),
                TaskCollection::replace_all,
            )
            .await
    }

    /// Fetches one task into the current-task slot without touching the
    /// collection.
    pub async fn get(&self, id: TaskId) -> Settlement {
        self.state
            .run(
                "get_task",
                &self.messages.load_task,
                self.gateway.get_task(id),
                |collection, task| collection.current = Some(task),
            )
            .await
    }

    /// Creates a task, prepends it and makes it current.
    pub async fn create(&self, draft: TaskDraft) -> Settlement {
        self.state
            .run(
                "create_task",
                &self.messages.create_task,
                self.gateway.create_task(&draft),
                TaskCollection::insert_created,
            )
            .await
    }

    /// Applies a partial update; the matching entry is replaced in place and
    /// the result becomes current.
    pub async fn update(&self, id: TaskId, draft: TaskDraft) -> Settlement {
        self.state
            .run(
                "update_task",
                &self.messages.update_task,
                self.gateway.update_task(id, &draft),
                TaskCollection::apply_update,
            )
            .await
    }

    /// Publishes a draft task. Merges like [`Self::update`].
    pub async fn publish(&self, id: TaskId) -> Settlement {
        self.state
            .run(
                "publish_task",
                &self.messages.publish_task,
                self.gateway.publish_task(id),
                TaskCollection::apply_update,
            )
            .await
    }

    /// Claims a published task for the session user. Merges like
    /// [`Self::update`].
    pub async fn assign(&self, id: TaskId) -> Settlement {
        self.state
            .run(
                "assign_task",
                &self.messages.assign_task,
                self.gateway.assign_task(id),
                TaskCollection::apply_update,
            )
            .await
    }

    /// Completes a claimed task. Merges like [`Self::update`].
    pub async fn complete(&self, id: TaskId) -> Settlement {
        self.state
            .run(
                "complete_task",
                &self.messages.complete_task,
                self.gateway.complete_task(id),
                TaskCollection::apply_update,
            )
            .await
    }

    /// Deletes a task, dropping it from the collection and clearing the
    /// current-task slot when it holds the same task.
    pub async fn delete(&self, id: TaskId) -> Settlement {
        self.state
            .run(
                "delete_task",
                &self.messages.delete_task,
                self.gateway.delete_task(id),
                move |collection, ()| collection.remove(id),
            )
            .await
    }

    /// Returns a snapshot of the cached collection.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.state.read(|collection| collection.tasks.clone())
    }

    /// Looks up a cached task; `None` when the reference is stale.
    #[must_use]
    pub fn find(&self, id: TaskId) -> Option<Task> {
        self.state
            .read(|collection| find_by_key(&collection.tasks, id).cloned())
    }

    /// Returns the current-task slot.
    #[must_use]
    pub fn current_task(&self) -> Option<Task> {
        self.state.read(|collection| collection.current.clone())
    }

    /// Empties the current-task slot.
    pub fn clear_current_task(&self) {
        self.state.update(|collection| collection.current = None);
    }

    /// Returns the total reported by the latest list.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.state.read(|collection| collection.total_count)
    }

    /// Returns the aggregate operation status.
    #[must_use]
    pub fn status(&self) -> StoreStatus {
        self.state.status()
    }

    /// Returns the error slot.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.error()
    }

    /// Empties the error slot without dispatching anything.
    pub fn clear_error(&self) {
        self.state.clear_error();
    }

    /// Returns the phase of one operation, if still remembered.
    #[must_use]
    pub fn phase(&self, token: OperationToken) -> Option<OperationPhase> {
        self.state.phase(token)
    }

    /// Number of operations still in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.state.in_flight()
    }
}
