//! Gateway port for remote task operations.

use crate::gateway::{GatewayResult, RequestMethod, Route};
use crate::task::domain::{Task, TaskDraft, TaskId, TaskListing, TaskQuery};
use async_trait::async_trait;

/// Remote task operations.
///
/// Implementations perform the request and decode the payload; they never
/// touch client state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// Lists tasks, forwarding the query's status and search unmodified.
    async fn list_tasks(&self, query: &TaskQuery) -> GatewayResult<TaskListing>;

    /// Fetches a single task.
    async fn get_task(&self, id: TaskId) -> GatewayResult<Task>;

    /// Creates a task; the server fills identifier, timestamps and status.
    async fn create_task(&self, draft: &TaskDraft) -> GatewayResult<Task>;

    /// Applies a partial update.
    async fn update_task(&self, id: TaskId, draft: &TaskDraft) -> GatewayResult<Task>;

    /// Moves a draft task to published.
    async fn publish_task(&self, id: TaskId) -> GatewayResult<Task>;

    /// Claims a published task for the session user.
    async fn assign_task(&self, id: TaskId) -> GatewayResult<Task>;

    /// Marks a claimed task as completed.
    async fn complete_task(&self, id: TaskId) -> GatewayResult<Task>;

    /// Deletes a task.
    async fn delete_task(&self, id: TaskId) -> GatewayResult<()>;
}

/// Backend routes of the task endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskRoute {
    /// `GET /tasks`
    List,
    /// `GET /tasks/{id}`
    Get(TaskId),
    /// `POST /tasks`
    Create,
    /// `PUT /tasks/{id}`
    Update(TaskId),
    /// `POST /tasks/{id}/publish`
    Publish(TaskId),
    /// `POST /tasks/{id}/assign`
    Assign(TaskId),
    /// `POST /tasks/{id}/complete`
    Complete(TaskId),
    /// `DELETE /tasks/{id}`
    Delete(TaskId),
}

impl TaskRoute {
    /// Resolves the method and path.
    #[must_use]
    pub fn route(self) -> Route {
        match self {
            Self::List => Route::new(RequestMethod::Get, "/tasks"),
            Self::Get(id) => Route::new(RequestMethod::Get, format!("/tasks/{id}")),
            Self::Create => Route::new(RequestMethod::Post, "/tasks"),
            Self::Update(id) => Route::new(RequestMethod::Put, format!("/tasks/{id}")),
            Self::Publish(id) => Route::new(RequestMethod::Post, format!("/tasks/{id}/publish")),
            Self::Assign(id) => Route::new(RequestMethod::Post, format!("/tasks/{id}/assign")),
            Self::Complete(id) => Route::new(RequestMethod::Post, format!("/tasks/{id}/complete")),
            Self::Delete(id) => Route::new(RequestMethod::Delete, format!("/tasks/{id}")),
        }
    }
}
