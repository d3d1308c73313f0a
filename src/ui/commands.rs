use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, Screen};
use super::util::{normalize_month, shift_month};
use crate::models::ThemePreference;
use crate::report;
use crate::store::Store;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &Store) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transaction", cmd_transaction, r);
    register_command!("transaction", "Go to Transaction", cmd_transaction, r);
    register_command!("r", "Go to Reports", cmd_reports, r);
    register_command!("reports", "Go to Reports", cmd_reports, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("month", "Set report month (e.g. :month 2024-01)", cmd_month, r);
    register_command!("m", "Set report month (e.g. :m 2024-01)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!("add", "New transaction", cmd_add, r);
    register_command!("edit", "Edit selected transaction", cmd_edit, r);
    register_command!("theme", "Toggle or set theme (e.g. :theme dark)", cmd_theme, r);
    register_command!("quote", "Fetch a motivational quote", cmd_quote, r);
    register_command!("pdf", "Export report month as PDF", cmd_pdf, r);
    register_command!("csv", "Export report month as CSV", cmd_csv, r);
    register_command!(
        "import",
        "Import transactions from JSON (e.g. :import ~/backup.json)",
        cmd_import,
        r
    );
    register_command!("reset", "Clear all data and settings", cmd_reset, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, store: &Store) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, store)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, store: &Store) -> anyhow::Result<()> {
    app.switch_screen(store, Screen::Dashboard)
}

fn cmd_transaction(_args: &str, app: &mut App, store: &Store) -> anyhow::Result<()> {
    app.switch_screen(store, Screen::Transaction)
}

fn cmd_reports(_args: &str, app: &mut App, store: &Store) -> anyhow::Result<()> {
    app.switch_screen(store, Screen::Reports)
}

fn cmd_help(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_month(args: &str, app: &mut App, store: &Store) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status(format!("Month: {}", app.report_month));
        return Ok(());
    }
    let year = chrono::Local::now().format("%Y").to_string();
    match normalize_month(args, &year) {
        Some(month) => {
            app.switch_screen(store, Screen::Reports)?;
            app.set_report_month(month.clone());
            app.set_status(format!("Month: {month}"));
        }
        None => app.set_status(format!("Invalid month: {args}. Use YYYY-MM")),
    }
    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    advance_month(app, true);
    Ok(())
}

fn cmd_prev_month(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    advance_month(app, false);
    Ok(())
}

fn advance_month(app: &mut App, forward: bool) {
    if let Some(month) = shift_month(&app.report_month, forward) {
        app.set_status(format!("Month: {month}"));
        app.set_report_month(month);
    }
}

fn cmd_add(_args: &str, app: &mut App, store: &Store) -> anyhow::Result<()> {
    app.switch_screen(store, Screen::Transaction)?;
    app.start_create();
    Ok(())
}

fn cmd_edit(_args: &str, app: &mut App, store: &Store) -> anyhow::Result<()> {
    app.switch_screen(store, Screen::Transaction)?;
    app.start_edit();
    Ok(())
}

fn cmd_theme(args: &str, app: &mut App, store: &Store) -> anyhow::Result<()> {
    if args.is_empty() {
        return app.toggle_theme(store);
    }
    match ThemePreference::parse(args) {
        Some(theme) if theme == app.theme => {
            app.set_status(format!("Theme: {theme}"));
            Ok(())
        }
        Some(_) => app.toggle_theme(store),
        None => {
            app.set_status(format!("Unknown theme: {args}. Use light or dark"));
            Ok(())
        }
    }
}

fn cmd_quote(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    app.request_quote();
    Ok(())
}

fn cmd_pdf(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    match report::export_pdf(&app.report, &app.export_dir) {
        Ok(path) => app.set_status(format!("Saved {}", path.display())),
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "PDF export failed");
            app.set_status(format!("PDF export failed: {e:#}"));
        }
    }
    Ok(())
}

fn cmd_csv(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    match report::export_csv(&app.report, &app.export_dir) {
        Ok(path) => app.set_status(format!("Saved {}", path.display())),
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "CSV export failed");
            app.set_status(format!("CSV export failed: {e:#}"));
        }
    }
    Ok(())
}

fn cmd_import(args: &str, app: &mut App, store: &Store) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :import <file.json>");
        return Ok(());
    }
    let path = crate::run::shellexpand(args);
    let outcome = std::fs::read_to_string(&path)
        .map_err(anyhow::Error::from)
        .and_then(|raw| store.import_payload(&raw));
    match outcome {
        Ok(added) => {
            app.refresh_transactions(store)?;
            app.set_status(format!("Imported {added} transactions from {path}"));
        }
        Err(e) => app.set_status(format!("Import failed: {e:#}")),
    }
    Ok(())
}

fn cmd_reset(_args: &str, app: &mut App, _store: &Store) -> anyhow::Result<()> {
    app.ask_reset();
    Ok(())
}
