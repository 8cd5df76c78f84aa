//! Network messages - communication between App and Network layers

use crate::models::{Expense, ExpenseId, ExpensePayload};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Load the full expense list
    FetchExpenses {
        id: u64,
        token: String,
    },
    /// Create a new expense
    CreateExpense {
        id: u64,
        token: String,
        payload: ExpensePayload,
    },
    /// Overwrite an existing expense
    UpdateExpense {
        id: u64,
        token: String,
        expense_id: ExpenseId,
        payload: ExpensePayload,
    },
    /// Remove an expense
    DeleteExpense {
        id: u64,
        token: String,
        expense_id: ExpenseId,
    },

    /// Shutdown the network actor
    Shutdown,
}

/// Operation a failed response belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Save,
    Delete,
}

impl Operation {
    /// Diagnostic logged when the operation fails
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Fetch => "Failed to fetch expenses",
            Operation::Save => "Failed to save expense",
            Operation::Delete => "Failed to delete expense",
        }
    }
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// Fresh expense list
    ExpensesLoaded {
        id: u64,
        expenses: Vec<Expense>,
    },
    /// Create or update accepted
    ExpenseSaved {
        id: u64,
    },
    /// Delete accepted
    ExpenseDeleted {
        id: u64,
        expense_id: ExpenseId,
    },
    /// Any failure: bad status, transport or decode error
    Failed {
        id: u64,
        operation: Operation,
        message: String,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::ExpensesLoaded { id, .. } => *id,
            NetworkResponse::ExpenseSaved { id } => *id,
            NetworkResponse::ExpenseDeleted { id, .. } => *id,
            NetworkResponse::Failed { id, .. } => *id,
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, NetworkResponse::Failed { .. })
    }
}
