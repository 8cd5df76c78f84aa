//! Expense TUI - Actor-based expense dashboard
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async HTTP execution

use std::io;
use std::sync::Arc;
use std::time::Duration;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;

use expense_tui::app::{AppActor, AppState};
use expense_tui::config::{config_dir, Config};
use expense_tui::constants::{APP_NAME, APP_VERSION};
use expense_tui::messages::ui_events::{key_to_ui_event, Focus, InputMode, Screen};
use expense_tui::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use expense_tui::network::{ApiRef, HttpExpenseApi, NetworkActor};
use expense_tui::session::{FileSession, SessionProvider};
use expense_tui::ui::{amount_color, centered_rect, expense_line, form_actions, render_input};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    // Initialize logging to file
    let log_dir = config
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| ".".into());
    let log_name = config
        .log_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "expense-tui.log".into());
    let file_appender = tracing_appender::rolling::never(log_dir, log_name);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!(api_url = %config.api_url, "Starting {} v{}", APP_NAME, APP_VERSION);

    let session: Arc<dyn SessionProvider> = Arc::new(FileSession::in_dir(&config_dir()));
    let api: ApiRef = Arc::new(HttpExpenseApi::new(config.api_url.clone(), config.request_timeout()));

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _terminal_guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(api, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let state = AppState::new().with_currency(config.currency.clone());
    let app_actor = AppActor::new(state, session, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Shutting down");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(key, current_state.key_context()) {
                    if matches!(event, UiEvent::Quit) {
                        let _ = ui_tx.send(event);
                        break;
                    }
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    if state.screen == Screen::Login {
        draw_login(f, state, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Title bar
            Constraint::Length(3),  // Title + Amount inputs
            Constraint::Length(1),  // Form actions
            Constraint::Length(1),  // Total
            Constraint::Min(3),     // Expense list
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    draw_title_bar(f, state, chunks[0]);
    draw_form(f, state, chunks[1]);
    f.render_widget(Paragraph::new(form_actions(state.mode)), chunks[2]);
    draw_total(f, state, chunks[3]);
    draw_expense_list(f, state, chunks[4]);
    draw_status_bar(f, state, chunks[5]);

    if state.show_help {
        draw_help_popup(f, area);
    }

    if let Some(alert) = &state.alert {
        draw_alert_popup(f, alert, area);
    }
}

fn draw_title_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let mode = if state.mode.is_editing() { " [editing]" } else { "" };
    let line = Line::from(vec![
        Span::styled(format!(" {} ", APP_NAME), Style::default().fg(Color::Black).bg(Color::Cyan).bold()),
        Span::styled(format!(" v{}", APP_VERSION), Style::default().fg(Color::DarkGray)),
        Span::styled(mode, Style::default().fg(Color::Yellow)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_form(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let editing = state.input_mode == InputMode::Editing;
    let title = render_input(&state.title, " Title ", state.focus == Focus::Title, editing);
    let amount = render_input(&state.amount, " Amount ", state.focus == Focus::Amount, editing);
    f.render_widget(title, chunks[0]);
    f.render_widget(amount, chunks[1]);

    // Cursor
    if editing {
        let field = if state.focus == Focus::Title { chunks[0] } else { chunks[1] };
        let max_x = field.x + field.width.saturating_sub(2);
        let cursor_x = (field.x + state.cursor_position as u16 + 1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, field.y + 1));
    }
}

fn draw_total(f: &mut Frame, state: &RenderState, area: Rect) {
    let total = Line::from(vec![
        Span::raw(" Total: "),
        Span::styled(format!("{}{}", state.currency, state.total), Style::default().fg(Color::Green).bold()),
    ]);
    f.render_widget(Paragraph::new(total), area);
}

fn draw_expense_list(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.focus == Focus::List;
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" Expenses ({}) - e:edit d:delete ", state.expenses.len()));

    if state.expenses.is_empty() {
        let empty = Paragraph::new("No expenses yet. Fill in the form and press 's'.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = state.expenses.iter()
        .map(|e| {
            ListItem::new(expense_line(e, &state.currency))
                .style(Style::default().fg(amount_color(e.amount)))
        })
        .collect();

    let highlight_style = if is_focused {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style)
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.is_loading {
        String::from(" Syncing... ")
    } else if state.input_mode == InputMode::Editing {
        String::from(" ESC:stop editing | Enter:submit | Tab:next field ")
    } else {
        let synced = state
            .last_synced
            .map(|t| format!(" | synced {}", t.format("%H:%M:%S")))
            .unwrap_or_default();
        format!(" Tab:focus | e:edit | s:submit | r:reload | ?:help | q:quit{} ", synced)
    };

    let bar = Paragraph::new(status)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_login(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(70, 40, area);

    let text = format!(
        "\n No session token found.\n\n Log in to the expenses backend and store the token\n under the key 'token' in:\n\n   {}\n\n Press q to quit.",
        state.session_location
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Login required ");

    let login = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(login, popup_area);
}

fn draw_alert_popup(f: &mut Frame, alert: &str, area: Rect) {
    let popup_area = centered_rect(40, 20, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Alert (any key to close) ")
        .style(Style::default().bg(Color::Black));

    let message = Paragraph::new(format!("\n {}", alert))
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(message, popup_area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 EXPENSE TRACKER - Keyboard Shortcuts

 NAVIGATION
   Tab / Shift+Tab    Switch between Title, Amount and list
   ↑ / ↓              Select expense

 FORM
   e / Enter          Edit focused field
   s                  Add expense / save update
   x / Esc            Cancel edit

 LIST
   e / Enter          Load selected expense into the form
   d                  Delete selected expense
   r                  Reload from the server

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}
