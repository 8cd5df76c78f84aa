//! Network layer - backend API access
//!
//! The Network actor receives expense commands, runs them against an
//! [`ExpenseApi`] and sends back responses.

pub mod actor;
pub mod api;
pub mod client;
#[cfg(test)]
pub mod fake;

pub use actor::NetworkActor;
pub use api::{ApiError, ApiRef, ExpenseApi};
pub use client::HttpExpenseApi;
