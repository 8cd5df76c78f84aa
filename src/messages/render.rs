//! Render state - data structure sent from App layer to UI for rendering

use chrono::{DateTime, Local};

use crate::constants::DEFAULT_CURRENCY;
use crate::messages::ui_events::{Focus, InputMode, KeyContext, Screen};
use crate::models::{Expense, FormMode};

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub screen: Screen,
    /// Where the missing token was looked for (login screen)
    pub session_location: String,

    // Expenses
    pub expenses: Vec<Expense>,
    pub selected: usize,
    /// Sum of all amounts, two decimals
    pub total: String,
    pub currency: String,

    // Form
    pub title: String,
    pub amount: String,
    pub mode: FormMode,

    // UI state
    pub focus: Focus,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub is_loading: bool,
    pub last_synced: Option<DateTime<Local>>,

    // Popups
    pub alert: Option<String>,
    pub show_help: bool,
}

impl RenderState {
    pub fn key_context(&self) -> KeyContext {
        KeyContext {
            screen: self.screen,
            focus: self.focus,
            input_mode: self.input_mode,
            show_help: self.show_help,
            has_alert: self.alert.is_some(),
            is_editing_expense: self.mode.is_editing(),
        }
    }
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            screen: Screen::Dashboard,
            session_location: String::new(),
            expenses: Vec::new(),
            selected: 0,
            total: String::from("0.00"),
            currency: String::from(DEFAULT_CURRENCY),
            title: String::new(),
            amount: String::new(),
            mode: FormMode::Creating,
            focus: Focus::Title,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            is_loading: false,
            last_synced: None,
            alert: None,
            show_help: false,
        }
    }
}
