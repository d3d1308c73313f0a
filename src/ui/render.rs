use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::theme::Palette;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let p = app.palette();
    f.render_widget(Block::default().style(p.base_style()), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], app);
    render_screen(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
    render_command_bar(f, chunks[3], app);

    if app.show_help {
        render_help_overlay(f, f.area(), p);
    } else if let Some(alert) = &app.alert {
        render_modal(f, f.area(), p, " Notice ", alert, p.accent);
    } else if let Some(quote) = &app.quote {
        render_modal(f, f.area(), p, " Quote of the moment ", quote, p.yellow);
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let num = format!("{}", i + 1);
            if *s == app.screen {
                Line::from(vec![
                    Span::styled(format!("{num}:"), Style::default().fg(p.text_dim)),
                    Span::styled(
                        format!("{s}"),
                        Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(Span::styled(
                    format!("{num}:{s}"),
                    Style::default().fg(p.text_dim),
                ))
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(p.overlay)))
        .style(Style::default().bg(p.header_bg));

    f.render_widget(tabs, area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App) {
    match app.screen {
        Screen::Dashboard => super::screens::dashboard::render(f, area, app),
        Screen::Transaction => super::screens::transaction::render(f, area, app),
        Screen::Reports => super::screens::reports::render(f, area, app),
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let mode_label = format!(" {} ", app.input_mode);
    let mode_bg = match app.input_mode {
        InputMode::Normal => p.accent,
        InputMode::Command | InputMode::Form => p.green,
        InputMode::Confirm => p.red,
    };
    let mode_style = Style::default()
        .fg(p.background)
        .bg(mode_bg)
        .add_modifier(Modifier::BOLD);

    let fetching = if app.quote_pending() { "| fetching quote " } else { "" };
    let info = format!(
        " {} | {} | {} txns | {} {fetching}",
        app.screen,
        app.report_month,
        app.transactions.len(),
        app.theme
    );

    let right = match (app.screen, app.input_mode) {
        (_, InputMode::Form) => " Tab field | Space cycle | Enter save | Esc cancel ",
        (Screen::Dashboard, _) => " t theme | w quote | ? help ",
        (Screen::Transaction, _) => " a add | e edit | j/k move | ? help ",
        (Screen::Reports, _) => " H/L month | j/k move | x pdf | c csv | ? help ",
    };

    let available = area.width as usize;
    let used = mode_label.chars().count() + info.chars().count() + right.chars().count();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, p.status_bar_style()),
        Span::styled(" ".repeat(pad), p.status_bar_style()),
        Span::styled(right, p.status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let p = app.palette();
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(p.accent)),
                Span::styled(&app.command_input, p.command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(&app.confirm_message, Style::default().fg(p.yellow)),
                Span::styled(" [y/N] ", Style::default().fg(p.red)),
            ]),
            None,
        ),
        InputMode::Normal | InputMode::Form => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, ? for help",
                    p.dim_style(),
                ))
            } else {
                Line::from(Span::styled(&app.status_message, p.command_bar_style()))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(p.command_bg));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

/// Centered rectangle of at most `width` x `height`, clamped to `area`.
pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

fn render_modal(
    f: &mut Frame,
    area: Rect,
    p: &Palette,
    title: &str,
    message: &str,
    border: ratatui::style::Color,
) {
    let width = 60;
    let inner_width = usize::from(width - 4);
    let text_lines = message.chars().count().div_ceil(inner_width).max(1) as u16;
    let popup_area = centered_rect(area, width, text_lines + 5);

    f.render_widget(Clear, popup_area);
    let modal = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message, p.normal_style())),
        Line::from(""),
        Line::from(Span::styled(" Press any key to close ", p.dim_style())),
    ])
    .wrap(Wrap { trim: true })
    .centered()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(title, p.title_style()))
            .style(Style::default().bg(p.header_bg)),
    );
    f.render_widget(modal, popup_area);
}

fn render_help_overlay(f: &mut Frame, area: Rect, p: &Palette) {
    let mut help_text = vec![
        Line::from(Span::styled(
            " ExpenseTUI Help ",
            Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", p.section_style())),
        Line::from(Span::styled(
            "  1/2/3            Switch views          Tab/Shift-Tab  Cycle views",
            p.normal_style(),
        )),
        Line::from(Span::styled(
            "  j/k or Up/Down   Move cursor           g/G        Top/Bottom",
            p.normal_style(),
        )),
        Line::from(Span::styled(
            "  H/L (Reports)    Prev/Next month       Ctrl-q     Quit",
            p.normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Actions", p.section_style())),
        Line::from(Span::styled(
            "  a                New transaction       e/Enter    Edit selected",
            p.normal_style(),
        )),
        Line::from(Span::styled(
            "  t                Toggle theme          w          Fetch quote",
            p.normal_style(),
        )),
        Line::from(Span::styled(
            "  x/c (Reports)    Export PDF/CSV        R          Reset all data",
            p.normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Commands", p.section_style())),
    ];

    // Build command list dynamically from COMMANDS registry
    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = Vec::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        if name.len() <= 2 {
            continue;
        }
        if seen.insert(cmd.description) {
            cmd_lines.push((name, cmd.description));
        }
    }
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<22} {desc}"),
            p.normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        p.dim_style(),
    )));

    let popup_area = centered_rect(area, 72, help_text.len() as u16 + 2);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.accent))
            .style(Style::default().bg(p.header_bg)),
    );
    f.render_widget(help, popup_area);
}
