//! The backend contract, as seen by the dashboard

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::models::{Expense, ExpenseId, ExpensePayload};

/// Why a backend call failed
///
/// The dashboard treats every variant the same way; the split only serves the log.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("{0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Shared handle to an API implementation
pub type ApiRef = Arc<dyn ExpenseApi>;

/// Authenticated access to the expenses resource
#[async_trait]
pub trait ExpenseApi: Send + Sync {
    /// `GET /expenses`
    async fn list(&self, token: &str) -> Result<Vec<Expense>, ApiError>;

    /// `POST /expenses`
    async fn create(&self, token: &str, payload: &ExpensePayload) -> Result<(), ApiError>;

    /// `PUT /expenses/{id}`
    async fn update(&self, token: &str, id: ExpenseId, payload: &ExpensePayload) -> Result<(), ApiError>;

    /// `DELETE /expenses/{id}`
    async fn delete(&self, token: &str, id: ExpenseId) -> Result<(), ApiError>;
}
