//! Command handlers - business logic for processing UI events and backend responses

use chrono::Local;

use crate::app::AppState;
use crate::constants::MISSING_FIELDS_ALERT;
use crate::messages::ui_events::{InputMode, Screen};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{format_amount, ExpenseId, ExpensePayload, FormMode};
use crate::session::SessionProvider;

impl AppState {
    // ========================
    // Session guard
    // ========================

    /// Read the session and load the list, or send the user to the login screen
    pub fn mount(&mut self, session: &dyn SessionProvider) -> Option<NetworkCommand> {
        self.session_location = session.location();
        match session.token().filter(|t| !t.trim().is_empty()) {
            Some(token) => {
                self.token = Some(token);
                self.screen = Screen::Dashboard;
                self.fetch_expenses()
            }
            None => {
                tracing::info!(location = %self.session_location, "No session token, showing login");
                self.token = None;
                self.screen = Screen::Login;
                None
            }
        }
    }

    // ========================
    // Data loader
    // ========================

    pub fn fetch_expenses(&mut self) -> Option<NetworkCommand> {
        let token = self.token.clone()?;
        let id = self.begin_request();
        Some(NetworkCommand::FetchExpenses { id, token })
    }

    // ========================
    // Form controller
    // ========================

    /// Create or update from the draft; raises an alert instead when it is incomplete
    pub fn submit(&mut self) -> Option<NetworkCommand> {
        if self.title.is_empty() || self.amount.is_empty() {
            self.alert = Some(MISSING_FIELDS_ALERT.to_string());
            return None;
        }
        let token = self.token.clone()?;

        let payload = ExpensePayload::from_draft(&self.title, &self.amount);
        if payload.amount.is_nan() {
            tracing::warn!(amount = %self.amount, "Amount is not a number, sending it anyway");
        }

        let id = self.begin_request();
        let cmd = match self.mode {
            FormMode::Editing(expense_id) => NetworkCommand::UpdateExpense {
                id,
                token,
                expense_id,
                payload,
            },
            FormMode::Creating => NetworkCommand::CreateExpense { id, token, payload },
        };
        Some(cmd)
    }

    /// Load an expense from the current list into the form
    pub fn edit_expense(&mut self, expense_id: ExpenseId) -> bool {
        let Some(expense) = self.expenses.iter().find(|e| e.id == expense_id) else {
            return false;
        };
        self.title = expense.title.clone();
        self.amount = format_amount(expense.amount);
        self.mode = FormMode::Editing(expense_id);
        self.input_mode = InputMode::Normal;
        self.cursor_position = self.current_input().len();
        true
    }

    pub fn edit_selected(&mut self) {
        if let Some(expense_id) = self.selected_expense().map(|e| e.id) {
            self.edit_expense(expense_id);
        }
    }

    pub fn cancel_edit(&mut self) {
        self.reset_form();
    }

    fn reset_form(&mut self) {
        self.title.clear();
        self.amount.clear();
        self.mode = FormMode::Creating;
        self.cursor_position = 0;
    }

    pub fn delete_expense(&mut self, expense_id: ExpenseId) -> Option<NetworkCommand> {
        let token = self.token.clone()?;
        let id = self.begin_request();
        Some(NetworkCommand::DeleteExpense { id, token, expense_id })
    }

    pub fn delete_selected(&mut self) -> Option<NetworkCommand> {
        let expense_id = self.selected_expense()?.id;
        self.delete_expense(expense_id)
    }

    fn begin_request(&mut self) -> u64 {
        self.in_flight += 1;
        self.next_id()
    }

    // ========================
    // Backend responses
    // ========================

    /// Apply a backend response, returning the follow-up request if one is due
    pub fn handle_response(&mut self, response: NetworkResponse) -> Option<NetworkCommand> {
        self.in_flight = self.in_flight.saturating_sub(1);

        match response {
            NetworkResponse::ExpensesLoaded { id, expenses } => {
                tracing::debug!(id, count = expenses.len(), "Expenses loaded");
                self.expenses = expenses;
                self.last_synced = Some(Local::now());
                self.clamp_selection();
                self.drop_stale_edit();
                None
            }
            NetworkResponse::ExpenseSaved { .. } => {
                self.reset_form();
                self.fetch_expenses()
            }
            NetworkResponse::ExpenseDeleted { .. } => self.fetch_expenses(),
            NetworkResponse::Failed { id, operation, message } => {
                tracing::error!(id, error = %message, "{}", operation.failure_message());
                None
            }
        }
    }

    /// Leave edit mode when the edited expense is gone from the fresh list
    fn drop_stale_edit(&mut self) {
        if let FormMode::Editing(expense_id) = self.mode {
            if !self.expenses.iter().any(|e| e.id == expense_id) {
                tracing::info!(%expense_id, "Edited expense no longer exists, back to create mode");
                self.mode = FormMode::Creating;
            }
        }
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.expenses.len() {
            self.selected = self.expenses.len().saturating_sub(1);
        }
    }

    // ========================
    // Navigation
    // ========================

    pub fn next_field(&mut self) {
        self.input_mode = InputMode::Normal;
        self.focus = self.focus.next();
        self.cursor_position = self.current_input().len();
    }

    pub fn prev_field(&mut self) {
        self.input_mode = InputMode::Normal;
        self.focus = self.focus.prev();
        self.cursor_position = self.current_input().len();
    }

    pub fn select_next(&mut self) {
        if !self.expenses.is_empty() {
            self.selected = (self.selected + 1) % self.expenses.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.expenses.is_empty() {
            self.selected = self.selected
                .checked_sub(1)
                .unwrap_or(self.expenses.len() - 1);
        }
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        if self.focus.is_input() {
            self.input_mode = InputMode::Editing;
            self.cursor_position = self.current_input().len();
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor_pos = self.cursor_position;
        if let Some(input) = self.current_input_mut() {
            if cursor_pos <= input.len() {
                input.insert(cursor_pos, c);
                self.cursor_position = cursor_pos + c.len_utf8();
            }
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let cursor_pos = self.cursor_position;
        if let Some(input) = self.current_input_mut() {
            let prev_pos = input[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    // ========================
    // Popups
    // ========================

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}
