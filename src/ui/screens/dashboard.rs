use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Cell, Row, Table},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;

use super::{balance_color, bar_value, render_card, render_empty, titled_block};
use crate::summary;
use crate::ui::app::App;
use crate::ui::util::{format_money, truncate, CURRENCY};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary cards
            Constraint::Min(8),    // Recent + chart
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_recent(f, body[0], app);
    render_category_chart(f, body[1], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let balance = app.summary.balance();
    render_card(f, cards[0], p, "Balance", balance, balance_color(p, balance));
    render_card(f, cards[1], p, "Income", app.summary.total_income, p.green);
    render_card(f, cards[2], p, "Expense", app.summary.total_expense, p.red);
}

fn render_recent(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let title = format!("Recent Transactions ({})", app.recent_limit);
    if app.transactions.is_empty() {
        render_empty(f, area, p, &title, "Press a to add your first transaction");
        return;
    }

    let rows: Vec<Row> = summary::recent(&app.transactions, app.recent_limit)
        .enumerate()
        .map(|(i, txn)| {
            let (sign, amount_style) = if txn.is_income() {
                ("+", p.income_style())
            } else {
                ("-", p.expense_style())
            };
            let style = if i % 2 == 1 {
                p.alt_row_style()
            } else {
                p.normal_style()
            };
            Row::new(vec![
                Cell::from(txn.category.icon()),
                Cell::from(txn.category.as_str()),
                Cell::from(truncate(&txn.description, 24)),
                Cell::from(txn.date_string()),
                Cell::from(Span::styled(
                    format!("{sign}{}", format_money(txn.amount, CURRENCY)),
                    amount_style,
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Length(14),
        Constraint::Min(10),
        Constraint::Length(11),
        Constraint::Length(14),
    ];
    let table = Table::new(rows, widths).block(titled_block(p, title));
    f.render_widget(table, area);
}

fn render_category_chart(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let title = "Spending by Category";
    let breakdown = &app.summary.by_category;
    if breakdown.is_empty() {
        render_empty(f, area, p, title, "Expenses show up here by category");
        return;
    }

    let bars: Vec<Bar> = breakdown
        .iter()
        .map(|(category, amount)| {
            Bar::default()
                .value(bar_value(amount))
                .text_value(format_money(amount, ""))
                .label(Line::from(truncate(category.as_str(), 9)))
                .style(Style::default().fg(p.accent))
                .value_style(
                    Style::default()
                        .fg(p.background)
                        .bg(p.accent)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let axis_max = app.summary.suggested_max().ceil().to_u64().unwrap_or(10);

    let chart = BarChart::default()
        .block(titled_block(p, title))
        .data(BarGroup::default().bars(&bars))
        .max(axis_max)
        .bar_width(9)
        .bar_gap(1)
        .bar_style(Style::default().fg(p.accent))
        .value_style(Style::default().fg(p.text));

    f.render_widget(chart, area);
}
