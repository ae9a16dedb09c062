use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState},
};

use pfm_engine::{Transaction, TransactionKind, View};

use crate::{app::AppState, ui::theme::Theme};

const EMPTY: &str = "-";

pub fn render(frame: &mut Frame<'_>, area: Rect, view: View<'_>, state: &AppState, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title("Transactions");

    if view.transactions.is_empty() {
        let empty = Paragraph::new(Line::from(vec![
            Span::styled("No transactions. Press ", Style::default().fg(theme.dim)),
            Span::styled("a", Style::default().fg(theme.accent)),
            Span::styled(" to add one.", Style::default().fg(theme.dim)),
        ]))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(["Date", "Amount", "Type", "Category"].map(|title| {
        Cell::from(Span::styled(
            title,
            Style::default().fg(theme.dim).add_modifier(Modifier::BOLD),
        ))
    }))
    .bottom_margin(1);

    let rows = view.transactions.iter().map(|tx| row(tx, theme));
    let widths = [
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Length(9),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(2)
        .row_highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    let mut table_state = TableState::default();
    table_state.select(Some(state.selected));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn row(tx: &Transaction, theme: &Theme) -> Row<'static> {
    let kind_style = match tx.kind() {
        Some(TransactionKind::Income) => Style::default().fg(theme.positive),
        Some(TransactionKind::Expense) => Style::default().fg(theme.negative),
        None => Style::default().fg(theme.dim),
    };
    let amount = tx
        .amount()
        .map(|amount| amount.to_string())
        .unwrap_or_else(|| EMPTY.to_string());

    Row::new([
        Cell::from(tx.date().unwrap_or(EMPTY).to_string()),
        Cell::from(Line::from(amount).alignment(Alignment::Right)),
        Cell::from(Span::styled(
            tx.kind().map_or(EMPTY, TransactionKind::as_str),
            kind_style,
        )),
        Cell::from(tx.category().unwrap_or(EMPTY).to_string()),
    ])
    .style(Style::default().fg(theme.text))
}
