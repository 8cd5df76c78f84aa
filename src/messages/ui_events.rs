//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Which view is on screen
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum Screen {
    #[default]
    Dashboard,
    /// No session token; nothing but quitting is possible
    Login,
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Focus navigation
    NextField,
    PrevField,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Expense list
    SelectNext,
    SelectPrev,
    EditSelected,
    DeleteSelected,
    Refresh,

    // Form
    Submit,
    CancelEdit,

    // Popups
    DismissAlert,
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Focused element of the dashboard
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Focus {
    Title,
    Amount,
    List,
}

impl Focus {
    pub fn next(&self) -> Focus {
        match self {
            Focus::Title => Focus::Amount,
            Focus::Amount => Focus::List,
            Focus::List => Focus::Title,
        }
    }

    pub fn prev(&self) -> Focus {
        match self {
            Focus::Title => Focus::List,
            Focus::Amount => Focus::Title,
            Focus::List => Focus::Amount,
        }
    }

    pub fn is_input(&self) -> bool {
        matches!(self, Focus::Title | Focus::Amount)
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum InputMode {
    Normal,
    Editing,
}

/// What the key mapping needs to know about the current screen
#[derive(Clone, Copy, Debug)]
pub struct KeyContext {
    pub screen: Screen,
    pub focus: Focus,
    pub input_mode: InputMode,
    pub show_help: bool,
    pub has_alert: bool,
    pub is_editing_expense: bool,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, ctx: KeyContext) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    // A blocking alert swallows the next key
    if ctx.has_alert {
        return Some(UiEvent::DismissAlert);
    }

    if ctx.show_help {
        return Some(UiEvent::CloseHelp);
    }

    match ctx.screen {
        Screen::Login => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(UiEvent::Quit),
            _ => None,
        },
        Screen::Dashboard => match ctx.input_mode {
            InputMode::Normal => handle_normal_keys(key, ctx),
            InputMode::Editing => handle_editing_keys(key),
        },
    }
}

fn handle_normal_keys(key: KeyEvent, ctx: KeyContext) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Tab => Some(UiEvent::NextField),
        KeyCode::BackTab => Some(UiEvent::PrevField),
        KeyCode::Char('s') => Some(UiEvent::Submit),
        KeyCode::Char('r') => Some(UiEvent::Refresh),
        KeyCode::Char('x') | KeyCode::Esc if ctx.is_editing_expense => Some(UiEvent::CancelEdit),
        KeyCode::Char('e') | KeyCode::Enter => {
            if ctx.focus.is_input() {
                Some(UiEvent::StartEditing)
            } else {
                Some(UiEvent::EditSelected)
            }
        }
        KeyCode::Char('d') if ctx.focus == Focus::List => Some(UiEvent::DeleteSelected),
        KeyCode::Up if ctx.focus == Focus::List => Some(UiEvent::SelectPrev),
        KeyCode::Down if ctx.focus == Focus::List => Some(UiEvent::SelectNext),
        _ => None,
    }
}

fn handle_editing_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::StopEditing),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Tab => Some(UiEvent::NextField),
        KeyCode::BackTab => Some(UiEvent::PrevField),
        KeyCode::Enter => Some(UiEvent::Submit),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}
