//! Recording in-memory backend used by the tests

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

use crate::models::{Expense, ExpenseId, ExpensePayload};
use crate::network::api::{ApiError, ExpenseApi};

/// A call the fake received
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    List { token: String },
    Create { token: String, payload: ExpensePayload },
    Update { token: String, id: ExpenseId, payload: ExpensePayload },
    Delete { token: String, id: ExpenseId },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    List,
    Create,
    Update,
    Delete,
}

#[derive(Default)]
pub struct FakeExpenseApi {
    expenses: Mutex<Vec<Expense>>,
    calls: Mutex<Vec<Call>>,
    failing: Mutex<HashSet<Endpoint>>,
    next_id: Mutex<i64>,
}

impl FakeExpenseApi {
    pub fn with_expenses(expenses: Vec<Expense>) -> Self {
        let next_id = expenses.iter().map(|e| e.id.0).max().unwrap_or(0) + 1;
        FakeExpenseApi {
            expenses: Mutex::new(expenses),
            next_id: Mutex::new(next_id),
            ..Default::default()
        }
    }

    /// Make every call to `endpoint` answer 500
    pub fn fail(&self, endpoint: Endpoint) {
        self.failing.lock().unwrap().insert(endpoint);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn expenses(&self) -> Vec<Expense> {
        self.expenses.lock().unwrap().clone()
    }

    fn record(&self, call: Call, endpoint: Endpoint) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        if self.failing.lock().unwrap().contains(&endpoint) {
            return Err(ApiError::Status(500));
        }
        Ok(())
    }
}

#[async_trait]
impl ExpenseApi for FakeExpenseApi {
    async fn list(&self, token: &str) -> Result<Vec<Expense>, ApiError> {
        self.record(Call::List { token: token.to_string() }, Endpoint::List)?;
        Ok(self.expenses())
    }

    async fn create(&self, token: &str, payload: &ExpensePayload) -> Result<(), ApiError> {
        self.record(
            Call::Create { token: token.to_string(), payload: payload.clone() },
            Endpoint::Create,
        )?;
        let mut next_id = self.next_id.lock().unwrap();
        self.expenses
            .lock()
            .unwrap()
            .push(Expense::new(*next_id, payload.title.clone(), payload.amount));
        *next_id += 1;
        Ok(())
    }

    async fn update(&self, token: &str, id: ExpenseId, payload: &ExpensePayload) -> Result<(), ApiError> {
        self.record(
            Call::Update { token: token.to_string(), id, payload: payload.clone() },
            Endpoint::Update,
        )?;
        if let Some(expense) = self.expenses.lock().unwrap().iter_mut().find(|e| e.id == id) {
            expense.title = payload.title.clone();
            expense.amount = payload.amount;
        }
        Ok(())
    }

    async fn delete(&self, token: &str, id: ExpenseId) -> Result<(), ApiError> {
        self.record(Call::Delete { token: token.to_string(), id }, Endpoint::Delete)?;
        self.expenses.lock().unwrap().retain(|e| e.id != id);
        Ok(())
    }
}
