use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use super::{render_empty, titled_block};
use crate::ui::app::{App, InputMode};
use crate::ui::form::{FormField, FormMode};
use crate::ui::util::{format_money, truncate, CURRENCY};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(44), Constraint::Min(30)])
        .split(area);

    render_form(f, chunks[0], app);
    render_list(f, chunks[1], app);
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let form = &app.form;
    let active = app.input_mode == InputMode::Form;

    let title = match form.mode {
        FormMode::Create => "New Transaction".to_string(),
        FormMode::Edit(id) => format!("Edit Transaction {}", &id.simple().to_string()[..8]),
    };

    let mut lines = vec![Line::from("")];
    let mut cursor = None;
    for field in FormField::ALL {
        let focused = active && form.focus == field;
        let value = form.value(field);
        let shown = if value.is_empty() {
            Span::styled(placeholder(field), p.dim_style())
        } else {
            Span::styled(value.clone(), p.normal_style())
        };
        let label_style = if focused {
            Style::default().fg(p.accent).add_modifier(Modifier::BOLD)
        } else {
            p.dim_style()
        };
        let marker = if focused { "> " } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{:<12}", field.label()), label_style),
            shown,
        ]));
        lines.push(Line::from(""));

        if focused && field.is_text() {
            let x = area.x + 1 + 14 + value.chars().count() as u16;
            let y = area.y + lines.len() as u16 - 1;
            cursor = Some((x, y));
        }
    }

    let hint = if active {
        "Enter save | Esc cancel"
    } else {
        "a new | e edit selected"
    };
    lines.push(Line::from(Span::styled(hint, p.dim_style())));

    f.render_widget(Paragraph::new(lines).block(titled_block(p, title)), area);

    if let Some(position) = cursor {
        if position.0 < area.right() && position.1 < area.bottom() {
            f.set_cursor_position(position);
        }
    }
}

fn placeholder(field: FormField) -> &'static str {
    match field {
        FormField::Kind => "",
        FormField::Amount => "0.00",
        FormField::Category => "<Space to choose>",
        FormField::Description => "(optional)",
        FormField::Date => "YYYY-MM-DD",
    }
}

fn render_list(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let title = format!("Transactions ({})", app.transactions.len());
    if app.transactions.is_empty() {
        render_empty(f, area, p, &title, "Press a to add one");
        return;
    }

    let header_cells = ["Date", "Type", "Category", "Description", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(p.header_style()));
    let header = Row::new(header_cells).height(1);

    let editing = match app.form.mode {
        FormMode::Edit(id) => Some(id),
        FormMode::Create => None,
    };

    let rows: Vec<Row> = app
        .listed()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let amount_style = if txn.is_income() {
                p.income_style()
            } else {
                p.expense_style()
            };
            let style = if i == app.transaction_index {
                p.selected_style()
            } else if editing == Some(txn.id) {
                Style::default().fg(p.yellow)
            } else if i % 2 == 1 {
                p.alt_row_style()
            } else {
                p.normal_style()
            };

            Row::new(vec![
                Cell::from(txn.date_string()),
                Cell::from(txn.kind.as_str()),
                Cell::from(format!("{} {}", txn.category.icon(), txn.category)),
                Cell::from(truncate(&txn.description, 30)),
                Cell::from(Span::styled(format_money(txn.amount, CURRENCY), amount_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(11),
        Constraint::Length(8),
        Constraint::Length(17),
        Constraint::Min(12),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(titled_block(p, title));
    f.render_widget(table, area);
}
