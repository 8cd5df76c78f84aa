//! App state - pure data structure with no I/O logic

use chrono::{DateTime, Local};

use crate::constants::DEFAULT_CURRENCY;
use crate::messages::ui_events::{Focus, InputMode, Screen};
use crate::messages::RenderState;
use crate::models::{format_total, Expense, FormMode};

/// Main application state - pure data, no I/O
pub struct AppState {
    pub screen: Screen,
    /// Bearer token read at mount; `None` until then or when logged out
    pub token: Option<String>,
    pub session_location: String,

    // Last successfully fetched snapshot, in backend order
    pub expenses: Vec<Expense>,
    pub selected: usize,
    pub last_synced: Option<DateTime<Local>>,

    // Draft
    pub title: String,
    pub amount: String,
    pub mode: FormMode,

    // UI state
    pub focus: Focus,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub currency: String,

    // Requests
    pub next_request_id: u64,
    pub in_flight: usize,

    // Popups
    pub alert: Option<String>,
    pub show_help: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            screen: Screen::Dashboard,
            token: None,
            session_location: String::new(),
            expenses: Vec::new(),
            selected: 0,
            last_synced: None,
            title: String::new(),
            amount: String::new(),
            mode: FormMode::Creating,
            focus: Focus::Title,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            currency: String::from(DEFAULT_CURRENCY),
            next_request_id: 1,
            in_flight: 0,
            alert: None,
            show_help: false,
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Get the current input field content
    pub fn current_input(&self) -> &str {
        match self.focus {
            Focus::Title => &self.title,
            Focus::Amount => &self.amount,
            Focus::List => "",
        }
    }

    /// Get mutable reference to current input field
    pub fn current_input_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Title => Some(&mut self.title),
            Focus::Amount => Some(&mut self.amount),
            Focus::List => None,
        }
    }

    pub fn selected_expense(&self) -> Option<&Expense> {
        self.expenses.get(self.selected)
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            screen: self.screen,
            session_location: self.session_location.clone(),
            expenses: self.expenses.clone(),
            selected: self.selected,
            total: format_total(&self.expenses),
            currency: self.currency.clone(),
            title: self.title.clone(),
            amount: self.amount.clone(),
            mode: self.mode,
            focus: self.focus,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            is_loading: self.in_flight > 0,
            last_synced: self.last_synced,
            alert: self.alert.clone(),
            show_help: self.show_help,
        }
    }
}
