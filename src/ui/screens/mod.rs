pub(crate) mod dashboard;
pub(crate) mod reports;
pub(crate) mod transaction;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ui::theme::Palette;
use crate::ui::util::{format_money, CURRENCY};

/// Shown in place of a chart or list when there is nothing to draw.
pub(crate) const EMPTY_STATE: &str = "No transactions";

fn titled_block<'a>(p: &Palette, title: impl Into<String>) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(p.border_style())
        .title(Span::styled(format!(" {} ", title.into()), p.title_style()))
}

fn render_card(f: &mut Frame, area: Rect, p: &Palette, title: &str, amount: Decimal, color: Color) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_money(amount, CURRENCY),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(titled_block(p, title));

    f.render_widget(text, area);
}

fn render_empty(f: &mut Frame, area: Rect, p: &Palette, title: &str, hint: &str) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(EMPTY_STATE, p.dim_style())),
        Line::from(""),
        Line::from(Span::styled(hint.to_string(), p.dim_style())),
    ])
    .centered()
    .block(titled_block(p, title));
    f.render_widget(msg, area);
}

/// Bar heights are whole currency units.
fn bar_value(amount: Decimal) -> u64 {
    amount.round().to_u64().unwrap_or(0)
}

fn balance_color(p: &Palette, balance: Decimal) -> Color {
    if balance >= Decimal::ZERO {
        p.green
    } else {
        p.red
    }
}
