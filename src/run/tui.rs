use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use crate::config::Config;
use crate::store::Store;
use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

/// How long the loop waits for a key before checking background work.
const TICK: Duration = Duration::from_millis(200);

pub(crate) fn as_tui(store: &Store, config: &Config) -> Result<()> {
    let mut app = App::new(config);
    app.refresh_all(store)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    tracing::info!("tui started");

    let result = run_app(&mut terminal, &mut app, store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %format!("{e:#}"), "tui exited with an error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &Store,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        app.poll_quote();
        if !event::poll(TICK)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            if app.alert.take().is_some() || app.quote.take().is_some() {
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, store)?,
                InputMode::Command => handle_command_input(key, app, store)?,
                InputMode::Form => handle_form_input(key, app, store)?,
                InputMode::Confirm => handle_confirm_input(key, app, store)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: KeyEvent, app: &mut App, store: &Store) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('1') => app.switch_screen(store, Screen::Dashboard)?,
        KeyCode::Char('2') => app.switch_screen(store, Screen::Transaction)?,
        KeyCode::Char('3') => app.switch_screen(store, Screen::Reports)?,
        KeyCode::Tab => app.switch_screen(store, app.screen.next())?,
        KeyCode::BackTab => app.switch_screen(store, app.screen.prev())?,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('t') => app.toggle_theme(store)?,
        KeyCode::Char('w') => app.request_quote(),
        KeyCode::Char('R') => app.ask_reset(),
        KeyCode::Char('a') => {
            app.switch_screen(store, Screen::Transaction)?;
            app.start_create();
        }
        KeyCode::Char('e') | KeyCode::Enter if app.screen == Screen::Transaction => {
            app.start_edit();
        }
        KeyCode::Char('j') | KeyCode::Down if app.screen == Screen::Transaction => {
            let page = app.visible_rows.max(1);
            scroll_down(
                &mut app.transaction_index,
                &mut app.transaction_scroll,
                app.transactions.len(),
                page,
            );
        }
        KeyCode::Char('k') | KeyCode::Up if app.screen == Screen::Transaction => {
            scroll_up(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        KeyCode::Char('g') if app.screen == Screen::Transaction => {
            scroll_to_top(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        KeyCode::Char('G') if app.screen == Screen::Transaction => {
            let page = app.visible_rows.max(1);
            scroll_to_bottom(
                &mut app.transaction_index,
                &mut app.transaction_scroll,
                app.transactions.len(),
                page,
            );
        }
        KeyCode::Char('j') | KeyCode::Down if app.screen == Screen::Reports => {
            let page = app.report_page();
            scroll_down(
                &mut app.report_index,
                &mut app.report_scroll,
                app.report.rows.len(),
                page,
            );
        }
        KeyCode::Char('k') | KeyCode::Up if app.screen == Screen::Reports => {
            scroll_up(&mut app.report_index, &mut app.report_scroll);
        }
        KeyCode::Char('g') if app.screen == Screen::Reports => {
            scroll_to_top(&mut app.report_index, &mut app.report_scroll);
        }
        KeyCode::Char('G') if app.screen == Screen::Reports => {
            let page = app.report_page();
            scroll_to_bottom(
                &mut app.report_index,
                &mut app.report_scroll,
                app.report.rows.len(),
                page,
            );
        }
        KeyCode::Char('H') => commands::handle_command("prev-month", app, store)?,
        KeyCode::Char('L') => commands::handle_command("next-month", app, store)?,
        KeyCode::Char('x') if app.screen == Screen::Reports => {
            commands::handle_command("pdf", app, store)?;
        }
        KeyCode::Char('c') if app.screen == Screen::Reports => {
            commands::handle_command("csv", app, store)?;
        }
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: KeyEvent, app: &mut App, store: &Store) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, store)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_form_input(key: KeyEvent, app: &mut App, store: &Store) -> Result<()> {
    match key.code {
        KeyCode::Enter => app.submit_form(store)?,
        KeyCode::Esc => {
            let was_editing = app.form.is_editing();
            app.form.clear();
            app.input_mode = InputMode::Normal;
            app.set_status(if was_editing {
                "Edit cancelled"
            } else {
                "Entry cancelled"
            });
        }
        KeyCode::Tab | KeyCode::Down => app.form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.form.focus_prev(),
        KeyCode::Left => app.form.cycle(false),
        KeyCode::Right => app.form.cycle(true),
        KeyCode::Backspace => app.form.backspace(),
        KeyCode::Char(c) => app.form.input_char(c),
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: KeyEvent, app: &mut App, store: &Store) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                match action {
                    PendingAction::Reset => app.reset(store)?,
                }
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        _ => {
            // Any other key = cancel
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
    }
    Ok(())
}
