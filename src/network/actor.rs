//! Network actor - runs backend calls in the Tokio async runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::network::Operation;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::api::{ApiError, ApiRef, ExpenseApi};

/// Network actor that executes expense commands against an [`ExpenseApi`]
pub struct NetworkActor {
    api: ApiRef,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(api: ApiRef, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            api,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    ///
    /// Every command runs in its own task, so requests overlap freely. Dropping the
    /// join set on exit aborts whatever is still in flight.
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Shutdown) | None => {
                            let pending = self.active_requests.len();
                            if pending > 0 {
                                tracing::info!(pending, "Aborting in-flight requests");
                            }
                            break;
                        }
                        Some(cmd) => {
                            let api = self.api.clone();
                            let response_tx = self.response_tx.clone();
                            self.active_requests.spawn(async move {
                                if let Some(response) = execute(api.as_ref(), cmd).await {
                                    tracing::info!(id = response.id(), ok = response.is_success(), "Request completed");
                                    let _ = response_tx.send(response);
                                }
                            });
                        }
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}

/// Execute a single command and turn its outcome into a response
///
/// Returns `None` for [`NetworkCommand::Shutdown`], which has nothing to execute.
pub async fn execute(api: &dyn ExpenseApi, cmd: NetworkCommand) -> Option<NetworkResponse> {
    let response = match cmd {
        NetworkCommand::FetchExpenses { id, token } => {
            tracing::info!(id, "GET /expenses");
            match api.list(&token).await {
                Ok(expenses) => NetworkResponse::ExpensesLoaded { id, expenses },
                Err(e) => failed(id, Operation::Fetch, e),
            }
        }
        NetworkCommand::CreateExpense { id, token, payload } => {
            tracing::info!(id, title = %payload.title, "POST /expenses");
            match api.create(&token, &payload).await {
                Ok(()) => NetworkResponse::ExpenseSaved { id },
                Err(e) => failed(id, Operation::Save, e),
            }
        }
        NetworkCommand::UpdateExpense { id, token, expense_id, payload } => {
            tracing::info!(id, "PUT /expenses/{}", expense_id);
            match api.update(&token, expense_id, &payload).await {
                Ok(()) => NetworkResponse::ExpenseSaved { id },
                Err(e) => failed(id, Operation::Save, e),
            }
        }
        NetworkCommand::DeleteExpense { id, token, expense_id } => {
            tracing::info!(id, "DELETE /expenses/{}", expense_id);
            match api.delete(&token, expense_id).await {
                Ok(()) => NetworkResponse::ExpenseDeleted { id, expense_id },
                Err(e) => failed(id, Operation::Delete, e),
            }
        }
        NetworkCommand::Shutdown => return None,
    };
    Some(response)
}

fn failed(id: u64, operation: Operation, error: ApiError) -> NetworkResponse {
    NetworkResponse::Failed {
        id,
        operation,
        message: error.to_string(),
    }
}
