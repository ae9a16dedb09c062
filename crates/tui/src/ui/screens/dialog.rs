use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use pfm_engine::{FormState, TransactionField, TransactionFields, View};

use crate::{
    app::FormInput,
    ui::{
        components::{
            centered_rect,
            hints::{self, common},
        },
        theme::Theme,
    },
};

const LABEL_WIDTH: usize = 11;

/// Draws the add/edit dialog over `area`. Nothing is drawn while closed.
pub fn render(frame: &mut Frame<'_>, area: Rect, view: View<'_>, input: &FormInput, theme: &Theme) {
    let (title, draft) = match view.form {
        FormState::Closed => return,
        FormState::Create { draft } => ("Add Transaction", draft),
        FormState::Edit { draft, .. } => ("Edit Transaction", draft),
    };

    let popup = centered_rect(56, 12, area);
    let mut lines = vec![Line::from("")];
    for field in TransactionField::ALL {
        lines.push(field_line(field, draft, input, theme));
    }
    lines.push(Line::from(""));
    lines.push(status_line(draft, input, theme));
    lines.push(Line::from(hints::hints_to_spans(&common::form_editing(), theme)));

    let block = Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent))
        .style(Style::default().bg(theme.panel));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn field_line(
    field: TransactionField,
    draft: &TransactionFields,
    input: &FormInput,
    theme: &Theme,
) -> Line<'static> {
    let focused = input.focus == field;
    let missing = !draft.has(field);

    let label_style = if focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim)
    };
    let marker_style = if missing {
        Style::default().fg(theme.error)
    } else {
        Style::default().fg(theme.dim)
    };
    let cursor = if focused { "▏" } else { "" };

    let value = match field {
        TransactionField::Date => format!("{}{cursor}", draft.date.as_deref().unwrap_or("")),
        TransactionField::Amount => format!("{}{cursor}", input.amount_text),
        TransactionField::Kind => select_value(draft.kind.map(|kind| kind.as_str()), focused),
        TransactionField::Category => select_value(draft.category.as_deref(), focused),
    };

    Line::from(vec![
        Span::styled(if focused { " › " } else { "   " }, label_style),
        Span::styled(format!("{:<width$}", field.label(), width = LABEL_WIDTH - 2), label_style),
        Span::styled("* ", marker_style),
        Span::styled(value, Style::default().fg(theme.text)),
    ])
}

fn select_value(value: Option<&str>, focused: bool) -> String {
    let value = value.unwrap_or("choose…");
    if focused {
        format!("‹ {value} ›")
    } else {
        value.to_string()
    }
}

/// Points at the first thing worth fixing. Saving is never blocked.
fn status_line(draft: &TransactionFields, input: &FormInput, theme: &Theme) -> Line<'static> {
    if input.amount_invalid() {
        return Line::from(Span::styled(
            "   Amount is not a number",
            Style::default().fg(theme.error),
        ));
    }

    let missing = draft.missing_fields();
    if missing.is_empty() {
        return Line::from(Span::styled("   Ready to save", Style::default().fg(theme.positive)));
    }

    let names: Vec<&str> = missing.iter().map(|field| field.label()).collect();
    Line::from(Span::styled(
        format!("   Required: {}", names.join(", ")),
        Style::default().fg(theme.error),
    ))
}
