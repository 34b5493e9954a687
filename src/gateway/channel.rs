//! Gateway that forwards every call over a channel to an external server.
//!
//! The receiving side pops [`GatewayRequest`] values, performs the request
//! however it likes and answers through the embedded [`Responder`]. Tests use
//! the same receiver to control exactly when each call completes.

use super::{GatewayError, GatewayResult, Route};
use crate::payment::{
    domain::{NewTransaction, Transaction},
    ports::{PaymentGateway, PaymentRoute},
};
use crate::review::{
    domain::{Review, ReviewDraft, ReviewQuery},
    ports::{ReviewGateway, ReviewRoute},
};
use crate::task::{
    domain::{Task, TaskDraft, TaskId, TaskListing, TaskQuery},
    ports::{TaskGateway, TaskRoute},
};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

/// One-shot reply slot for a forwarded request.
#[derive(Debug)]
pub struct Responder<T>(oneshot::Sender<GatewayResult<T>>);

impl<T> Responder<T> {
    /// Delivers `result` to the waiting caller, if it is still waiting.
    pub fn respond(self, result: GatewayResult<T>) {
        if self.0.send(result).is_err() {
            debug!("gateway caller went away before the reply");
        }
    }
}

/// A gateway call awaiting an answer.
#[derive(Debug)]
pub enum GatewayRequest {
    /// `GET /tasks`
    ListTasks {
        /// Filters to forward.
        query: TaskQuery,
        /// Reply slot.
        respond: Responder<TaskListing>,
    },
    /// `GET /tasks/{id}`
    GetTask {
        /// Requested task.
        id: TaskId,
        /// Reply slot.
        respond: Responder<Task>,
    },
    /// `POST /tasks`
    CreateTask {
        /// Submitted fields.
        draft: TaskDraft,
        /// Reply slot.
        respond: Responder<Task>,
    },
    /// `PUT /tasks/{id}`
    UpdateTask {
        /// Target task.
        id: TaskId,
        /// Changed fields.
        draft: TaskDraft,
        /// Reply slot.
        respond: Responder<Task>,
    },
    /// `POST /tasks/{id}/publish`
    PublishTask {
        /// Target task.
        id: TaskId,
        /// Reply slot.
        respond: Responder<Task>,
    },
    /// `POST /tasks/{id}/assign`
    AssignTask {
        /// Target task.
        id: TaskId,
        /// Reply slot.
        respond: Responder<Task>,
    },
    /// `POST /tasks/{id}/complete`
    CompleteTask {
        /// Target task.
        id: TaskId,
        /// Reply slot.
        respond: Responder<Task>,
    },
    /// `DELETE /tasks/{id}`
    DeleteTask {
        /// Target task.
        id: TaskId,
        /// Reply slot.
        respond: Responder<()>,
    },
    /// `GET /transactions`
    ListTransactions {
        /// Reply slot.
        respond: Responder<Vec<Transaction>>,
    },
    /// `POST /transactions`
    CreateTransaction {
        /// Deposit or payout body.
        transaction: NewTransaction,
        /// Reply slot.
        respond: Responder<Transaction>,
    },
    /// `GET /reviews`
    ListReviews {
        /// Filters to forward.
        query: ReviewQuery,
        /// Reply slot.
        respond: Responder<Vec<Review>>,
    },
    /// `POST /reviews`
    CreateReview {
        /// Submitted review.
        draft: ReviewDraft,
        /// Reply slot.
        respond: Responder<Review>,
    },
}

impl GatewayRequest {
    /// Returns the backend route this request maps to.
    #[must_use]
    pub fn route(&self) -> Route {
        match self {
            Self::ListTasks { .. } => TaskRoute::List.route(),
            Self::GetTask { id, .. } => TaskRoute::Get(*id).route(),
            Self::CreateTask { .. } => TaskRoute::Create.route(),
            Self::UpdateTask { id, .. } => TaskRoute::Update(*id).route(),
            Self::PublishTask { id, .. } => TaskRoute::Publish(*id).route(),
            Self::AssignTask { id, .. } => TaskRoute::Assign(*id).route(),
            Self::CompleteTask { id, .. } => TaskRoute::Complete(*id).route(),
            Self::DeleteTask { id, .. } => TaskRoute::Delete(*id).route(),
            Self::ListTransactions { .. } => PaymentRoute::List.route(),
            Self::CreateTransaction { .. } => PaymentRoute::Create.route(),
            Self::ListReviews { .. } => ReviewRoute::List.route(),
            Self::CreateReview { .. } => ReviewRoute::Create.route(),
        }
    }

    /// Answers the request with a failure, whatever its payload type.
    pub fn fail(self, error: GatewayError) {
        match self {
            Self::ListTasks { respond, .. } => respond.respond(Err(error)),
            Self::GetTask { respond, .. }
            | Self::CreateTask { respond, .. }
            | Self::UpdateTask { respond, .. }
            | Self::PublishTask { respond, .. }
            | Self::AssignTask { respond, .. }
            | Self::CompleteTask { respond, .. } => respond.respond(Err(error)),
            Self::DeleteTask { respond, .. } => respond.respond(Err(error)),
            Self::ListTransactions { respond } => respond.respond(Err(error)),
            Self::CreateTransaction { respond, .. } => respond.respond(Err(error)),
            Self::ListReviews { respond, .. } => respond.respond(Err(error)),
            Self::CreateReview { respond, .. } => respond.respond(Err(error)),
        }
    }
}

/// Gateway implementing every port by forwarding calls over a channel.
#[derive(Debug, Clone)]
pub struct ChannelGateway {
    sender: mpsc::UnboundedSender<GatewayRequest>,
}

/// Creates a connected gateway and the receiver an external server drains.
#[must_use]
pub fn channel() -> (ChannelGateway, mpsc::UnboundedReceiver<GatewayRequest>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (ChannelGateway { sender }, receiver)
}

impl ChannelGateway {
    async fn call<T>(
        &self,
        build: impl FnOnce(Responder<T>) -> GatewayRequest,
    ) -> GatewayResult<T> {
        let (reply, answer) = oneshot::channel();
        self.sender
            .send(build(Responder(reply)))
            .map_err(|_| GatewayError::Transport("gateway channel closed".to_owned()))?;
        answer
            .await
            .map_err(|_| GatewayError::Transport("gateway dropped the request".to_owned()))?
    }
}

#[async_trait]
impl TaskGateway for ChannelGateway {
    async fn list_tasks(&self, query: &TaskQuery) -> GatewayResult<TaskListing> {
        let forwarded = query.clone();
        self.call(|respond| GatewayRequest::ListTasks {
            query: forwarded,
            respond,
        })
        .await
    }

    async fn get_task(&self, id: TaskId) -> GatewayResult<Task> {
        self.call(|respond| GatewayRequest::GetTask { id, respond })
            .await
    }

    async fn create_task(&self, draft: &TaskDraft) -> GatewayResult<Task> {
        let submitted = draft.clone();
        self.call(|respond| GatewayRequest::CreateTask {
            draft: submitted,
            respond,
        })
        .await
    }

    async fn update_task(&self, id: TaskId, draft: &TaskDraft) -> GatewayResult<Task> {
        let submitted = draft.clone();
        self.call(|respond| GatewayRequest::UpdateTask {
            id,
            draft: submitted,
            respond,
        })
        .await
    }

    async fn publish_task(&self, id: TaskId) -> GatewayResult<Task> {
        self.call(|respond| GatewayRequest::PublishTask { id, respond })
            .await
    }

    async fn assign_task(&self, id: TaskId) -> GatewayResult<Task> {
        self.call(|respond| GatewayRequest::AssignTask { id, respond })
            .await
    }

    async fn complete_task(&self, id: TaskId) -> GatewayResult<Task> {
        self.call(|respond| GatewayRequest::CompleteTask { id, respond })
            .await
    }

    async fn delete_task(&self, id: TaskId) -> GatewayResult<()> {
        self.call(|respond| GatewayRequest::DeleteTask { id, respond })
            .await
    }
}

#[async_trait]
impl PaymentGateway for ChannelGateway {
    async fn list_transactions(&self) -> GatewayResult<Vec<Transaction>> {
        self.call(|respond| GatewayRequest::ListTransactions { respond })
            .await
    }

    async fn create_transaction(&self, request: &NewTransaction) -> GatewayResult<Transaction> {
        let transaction = *request;
        self.call(|respond| GatewayRequest::CreateTransaction {
            transaction,
            respond,
        })
        .await
    }
}

#[async_trait]
impl ReviewGateway for ChannelGateway {
    async fn list_reviews(&self, query: &ReviewQuery) -> GatewayResult<Vec<Review>> {
        let forwarded = *query;
        self.call(|respond| GatewayRequest::ListReviews {
            query: forwarded,
            respond,
        })
        .await
    }

    async fn create_review(&self, draft: &ReviewDraft) -> GatewayResult<Review> {
        let submitted = draft.clone();
        self.call(|respond| GatewayRequest::CreateReview {
            draft: submitted,
            respond,
        })
        .await
    }
}
