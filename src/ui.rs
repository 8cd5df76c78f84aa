use ratatui::{prelude::*, widgets::*};

use crate::models::{format_amount, Expense, FormMode};

/// Renders a text input field, highlighted by focus and editing state
pub fn render_input<'a>(content: &'a str, title: &'a str, is_focused: bool, is_editing: bool) -> Paragraph<'a> {
    let style = if is_focused && is_editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title);

    Paragraph::new(content).block(block)
}

/// One list row: `"{title}: {currency}{amount}"`
pub fn expense_line(expense: &Expense, currency: &str) -> String {
    format!("{}: {}{}", expense.title, currency, format_amount(expense.amount))
}

/// Form action hints; Cancel only exists while editing
pub fn form_actions(mode: FormMode) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            format!(" [s] {} ", mode.submit_label()),
            Style::default().fg(Color::Black).bg(Color::Green).bold(),
        ),
    ];
    if mode.is_editing() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            " [x] Cancel ",
            Style::default().fg(Color::Black).bg(Color::Gray),
        ));
    }
    Line::from(spans)
}

/// Amount color: zero is dim, NaN is red
pub fn amount_color(amount: f64) -> Color {
    if amount == 0.0 {
        Color::DarkGray
    } else if amount.is_nan() {
        Color::Red
    } else {
        Color::White
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
