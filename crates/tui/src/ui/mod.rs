pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use pfm_engine::View;

use crate::app::AppState;
use components::hints::{self, common};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

const SIDEBAR_WIDTH: u16 = 24;

pub fn render(frame: &mut Frame<'_>, view: View<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        area,
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(area);

    render_sidebar(frame, columns[0], view, &theme);

    // Main layout: info bar, table, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Min(0),    // Table
            Constraint::Length(1), // Bottom bar
        ])
        .split(columns[1]);

    render_info_bar(frame, layout[0], view, state, &theme);
    screens::transactions::render(frame, layout[1], view, state, &theme);
    render_bottom_bar(frame, layout[2], view, &theme);

    screens::dialog::render(frame, area, view, &state.form, &theme);
    components::toast::render(frame, area, state.toast.as_ref(), &theme);
}

fn render_sidebar(frame: &mut Frame<'_>, area: Rect, view: View<'_>, theme: &Theme) {
    let mut lines = vec![
        Line::from(Span::styled(
            "PFM Dashboard",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Categories", Style::default().fg(theme.dim))),
    ];
    lines.extend(
        view.categories
            .iter()
            .map(|category| Line::from(format!("  {category}"))),
    );

    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(
        Paragraph::new(lines)
            .style(Style::default().fg(theme.text))
            .block(block),
        area,
    );
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, view: View<'_>, state: &AppState, theme: &Theme) {
    let last_change = state
        .last_change
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());

    let line = Line::from(vec![
        Span::styled(" Records", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", view.transactions.len())),
        Span::styled("Categories", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}  ", view.categories.len())),
        Span::styled("Last change", Style::default().fg(theme.dim)),
        Span::raw(format!(": {last_change}")),
    ]);

    frame.render_widget(Paragraph::new(line).style(Style::default().fg(theme.text)), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, view: View<'_>, theme: &Theme) {
    let dialog_open = view.draft().is_some();
    let context = if dialog_open {
        common::form_editing()
    } else {
        common::list_actions()
    };

    let mut parts = vec![Span::raw(" ")];
    parts.extend(hints::hints_to_spans(&context, theme));
    parts.push(hints::hint_separator(theme));
    parts.extend(hints::hints_to_spans(&[common::quit(dialog_open)], theme));

    frame.render_widget(
        Paragraph::new(Line::from(parts)).style(Style::default().fg(theme.text)),
        area,
    );
}
