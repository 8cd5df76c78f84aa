//! HTTP implementation of [`ExpenseApi`] on top of reqwest

use async_trait::async_trait;
use reqwest::Method;
use std::time::Duration;

use crate::models::{Expense, ExpenseId, ExpensePayload};
use crate::network::api::{ApiError, ExpenseApi};

/// Talks to the real backend
pub struct HttpExpenseApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpExpenseApi {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        let base_url: String = base_url.into();
        HttpExpenseApi {
            client: create_client(timeout),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build an authenticated request
    fn request(&self, method: Method, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header("Authorization", format!("Bearer {}", token))
    }

    fn expense_path(id: ExpenseId) -> String {
        format!("/expenses/{}", id)
    }
}

/// Send a request and fail on anything but a 2xx status
async fn send(req_builder: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
    let resp = req_builder.send().await.map_err(transport_error)?;
    let status = resp.status();
    if !status.is_success() {
        return Err(ApiError::Status(status.as_u16()));
    }
    Ok(resp)
}

fn transport_error(e: reqwest::Error) -> ApiError {
    let msg = if e.is_timeout() {
        "Request timed out".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        format!("Request failed: {}", e)
    };
    ApiError::Transport(msg)
}

#[async_trait]
impl ExpenseApi for HttpExpenseApi {
    async fn list(&self, token: &str) -> Result<Vec<Expense>, ApiError> {
        let resp = send(self.request(Method::GET, "/expenses", token)).await?;
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("Error reading body: {}", e)))?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn create(&self, token: &str, payload: &ExpensePayload) -> Result<(), ApiError> {
        send(self.request(Method::POST, "/expenses", token).json(payload)).await?;
        Ok(())
    }

    async fn update(&self, token: &str, id: ExpenseId, payload: &ExpensePayload) -> Result<(), ApiError> {
        send(self.request(Method::PUT, &Self::expense_path(id), token).json(payload)).await?;
        Ok(())
    }

    async fn delete(&self, token: &str, id: ExpenseId) -> Result<(), ApiError> {
        send(self.request(Method::DELETE, &Self::expense_path(id), token)).await?;
        Ok(())
    }
}

/// Create an HTTP client; no timeout unless one is given
pub fn create_client(timeout: Option<Duration>) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_else(|_| reqwest::Client::new())
}
