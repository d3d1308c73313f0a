use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::{balance_color, bar_value, render_card, render_empty, titled_block};
use crate::ui::app::App;
use crate::ui::util::{format_money, truncate, CURRENCY};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),  // Month totals
            Constraint::Length(10), // Charts
            Constraint::Min(6),     // Table
        ])
        .split(area);

    render_totals(f, chunks[0], app);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);
    render_category_share(f, charts[0], app);
    render_income_vs_expense(f, charts[1], app);

    render_table(f, chunks[2], app);
}

fn render_totals(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let summary = &app.report.summary;
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(16),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let month = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            app.report.month.clone(),
            Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(titled_block(p, "Month"));
    f.render_widget(month, cards[0]);

    render_card(f, cards[1], p, "Total Income", summary.total_income, p.green);
    render_card(f, cards[2], p, "Total Expense", summary.total_expense, p.red);
    let balance = summary.balance();
    render_card(f, cards[3], p, "Balance", balance, balance_color(p, balance));
}

/// Percentage of `part` in `whole`, one decimal place.
pub(crate) fn share_percent(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    let pct = match part.checked_mul(Decimal::ONE_HUNDRED) {
        Some(scaled) => scaled.checked_div(whole),
        None => part
            .checked_div(whole)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED)),
    };
    pct.unwrap_or(Decimal::ZERO).round_dp(1)
}

fn render_category_share(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let title = "Expense Share by Category";
    let breakdown = &app.report.summary.by_category;
    if breakdown.is_empty() {
        render_empty(f, area, p, title, "No expenses this month");
        return;
    }

    let total = breakdown.total();
    let bar_room = usize::from(area.width.saturating_sub(32)).max(1);
    let lines: Vec<Line> = breakdown
        .nonzero()
        .map(|(category, amount)| {
            let pct = share_percent(amount, total);
            let filled = (pct * Decimal::from(bar_room) / Decimal::ONE_HUNDRED)
                .round()
                .to_usize()
                .unwrap_or(0)
                .max(1);
            Line::from(vec![
                Span::styled(
                    format!(" {} {:<14}", category.icon(), category.as_str()),
                    p.normal_style(),
                ),
                Span::styled("█".repeat(filled), Style::default().fg(p.accent)),
                Span::styled(format!(" {pct}%"), p.dim_style()),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(titled_block(p, title)), area);
}

fn render_income_vs_expense(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let title = "Income vs Expense";
    let summary = &app.report.summary;
    if summary.is_empty() {
        render_empty(f, area, p, title, "Nothing recorded this month");
        return;
    }

    let bars = [
        Bar::default()
            .value(bar_value(summary.total_income))
            .text_value(format_money(summary.total_income, ""))
            .label(Line::from("Income"))
            .style(Style::default().fg(p.green)),
        Bar::default()
            .value(bar_value(summary.total_expense))
            .text_value(format_money(summary.total_expense, ""))
            .label(Line::from("Expense"))
            .style(Style::default().fg(p.red)),
    ];

    let chart = BarChart::default()
        .block(titled_block(p, title))
        .data(BarGroup::default().bars(&bars))
        .bar_width(12)
        .bar_gap(2)
        .value_style(
            Style::default()
                .fg(p.background)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(chart, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    if app.report.is_empty() {
        let title = format!("Transactions for {}", app.report.month);
        render_empty(f, area, p, &title, "H/L or :month to pick another month");
        return;
    }
    let title = format!(
        "Transactions for {} ({}/{})",
        app.report.month,
        app.report_index + 1,
        app.report.rows.len()
    );

    let header_cells = ["#", "Date", "Category", "Description", "Type", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(p.header_style()));
    let header = Row::new(header_cells).height(1);

    let page = usize::from(area.height.saturating_sub(3)).max(1);
    let offset = if app.report_index >= app.report_scroll + page {
        app.report_index + 1 - page
    } else {
        app.report_scroll.min(app.report_index)
    };

    let rows: Vec<Row> = app
        .report
        .rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(page)
        .map(|(i, row)| {
            let style = if i == app.report_index {
                p.selected_style()
            } else if row.highlighted {
                p.highlight_row_style()
            } else if row.number % 2 == 0 {
                p.alt_row_style()
            } else {
                p.normal_style()
            };
            Row::new(vec![
                Cell::from(row.number.to_string()),
                Cell::from(row.date.clone()),
                Cell::from(row.category.as_str()),
                Cell::from(truncate(&row.description, 30)),
                Cell::from(row.kind.as_str()),
                Cell::from(format_money(row.amount, CURRENCY)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(11),
        Constraint::Length(14),
        Constraint::Min(12),
        Constraint::Length(8),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(titled_block(p, title));
    f.render_widget(table, area);
}
