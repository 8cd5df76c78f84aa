//! # Expense TUI
//!
//! A terminal dashboard for a personal expenses REST API.
//!
//! ## Features
//! - Session guard: reads the bearer token from the local session store
//! - Expense list with a running total
//! - Add, edit and delete expenses
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod config;
pub mod constants;
pub mod models;
pub mod session;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use config::Config;
pub use models::{Expense, ExpenseId, ExpensePayload, FormMode};
pub use session::{FileSession, MemorySession, SessionProvider};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::{ApiError, ExpenseApi, HttpExpenseApi, NetworkActor};
