use anyhow::Result;
use chrono::Local;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;

use crate::config::Config;
use crate::models::{ThemePreference, Transaction};
use crate::quote::{self, HttpQuoteSource, QuoteSource};
use crate::report::MonthlyReport;
use crate::store::Store;
use crate::summary::Summary;
use crate::ui::form::TransactionForm;
use crate::ui::theme::{self, Palette};

/// Reports layout above and around the table: totals, charts, borders, header.
const REPORT_CHROME: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transaction,
    Reports,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Transaction, Self::Reports]
    }

    pub(crate) fn next(self) -> Self {
        let screens = Self::all();
        let idx = screens.iter().position(|s| *s == self).unwrap_or(0);
        screens[(idx + 1) % screens.len()]
    }

    pub(crate) fn prev(self) -> Self {
        let screens = Self::all();
        let idx = screens.iter().position(|s| *s == self).unwrap_or(0);
        screens[(idx + screens.len() - 1) % screens.len()]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transaction => write!(f, "Transaction"),
            Self::Reports => write!(f, "Reports"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Form,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Form => write!(f, "FORM"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PendingAction {
    Reset,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) theme: ThemePreference,

    /// Blocking message; any key dismisses it.
    pub(crate) alert: Option<String>,
    pub(crate) quote: Option<String>,
    quote_rx: Option<Receiver<Option<String>>>,
    quote_url: String,

    // Store snapshot, re-read whenever a view is mounted
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) summary: Summary,

    // Reports
    pub(crate) report_month: String,
    pub(crate) report: MonthlyReport,
    pub(crate) report_index: usize,
    pub(crate) report_scroll: usize,

    // Transaction list (newest first)
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,
    pub(crate) form: TransactionForm,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    pub(crate) recent_limit: usize,
    pub(crate) export_dir: PathBuf,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(config: &Config) -> Self {
        let report_month = Local::now().format("%Y-%m").to_string();
        let report = MonthlyReport::build(&[], &report_month);

        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            theme: ThemePreference::default(),

            alert: None,
            quote: None,
            quote_rx: None,
            quote_url: config.quote_url.clone(),

            transactions: Vec::new(),
            summary: Summary::default(),

            report_month,
            report,
            report_index: 0,
            report_scroll: 0,

            transaction_index: 0,
            transaction_scroll: 0,
            form: TransactionForm::default(),

            pending_action: None,
            confirm_message: String::new(),

            recent_limit: config.recent_limit,
            export_dir: config.export_dir.clone(),

            visible_rows: 20,
        }
    }

    pub(crate) fn palette(&self) -> &'static Palette {
        theme::palette(self.theme)
    }

    pub(crate) fn refresh_transactions(&mut self, store: &Store) -> Result<()> {
        self.transactions = store.load_transactions()?;
        self.summary = Summary::of(&self.transactions);
        if self.transaction_index >= self.transactions.len() {
            self.transaction_index = self.transactions.len().saturating_sub(1);
        }
        if self.transaction_scroll > self.transaction_index {
            self.transaction_scroll = self.transaction_index;
        }
        self.rebuild_report();
        Ok(())
    }

    pub(crate) fn refresh_all(&mut self, store: &Store) -> Result<()> {
        self.theme = store.load_theme()?;
        self.refresh_transactions(store)
    }

    pub(crate) fn rebuild_report(&mut self) {
        self.report = MonthlyReport::build(&self.transactions, &self.report_month);
        if self.report_index >= self.report.rows.len() {
            self.report_index = self.report.rows.len().saturating_sub(1);
        }
        if self.report_scroll > self.report_index {
            self.report_scroll = self.report_index;
        }
    }

    pub(crate) fn set_report_month(&mut self, month: String) {
        self.report_month = month;
        self.report_index = 0;
        self.report_scroll = 0;
        self.rebuild_report();
    }

    /// Rows that fit in the report table below the totals and charts.
    pub(crate) fn report_page(&self) -> usize {
        self.visible_rows.saturating_sub(REPORT_CHROME).max(1)
    }

    /// Mount a view; every mount re-reads the store.
    pub(crate) fn switch_screen(&mut self, store: &Store, screen: Screen) -> Result<()> {
        self.screen = screen;
        self.refresh_transactions(store)?;
        tracing::debug!(%screen, "screen mounted");
        Ok(())
    }

    /// Transactions in display order, newest first.
    pub(crate) fn listed(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().rev()
    }

    pub(crate) fn selected_transaction(&self) -> Option<&Transaction> {
        self.listed().nth(self.transaction_index)
    }

    /// Open the form for a new record.
    pub(crate) fn start_create(&mut self) {
        self.screen = Screen::Transaction;
        self.form.clear();
        self.input_mode = InputMode::Form;
    }

    /// Open the form bound to the selected record.
    pub(crate) fn start_edit(&mut self) -> bool {
        let Some(txn) = self.selected_transaction().cloned() else {
            self.set_status("No transaction selected");
            return false;
        };
        self.screen = Screen::Transaction;
        self.form.load(&txn);
        self.input_mode = InputMode::Form;
        self.set_status(format!("Editing {}", txn.short_id()));
        true
    }

    /// Validate and persist the form. Validation and save failures raise the
    /// alert and leave the form open with its input.
    pub(crate) fn submit_form(&mut self, store: &Store) -> Result<()> {
        match self.form.submit(store) {
            Ok(Ok(ack)) => {
                self.refresh_transactions(store)?;
                self.input_mode = InputMode::Normal;
                self.alert = Some(ack);
            }
            Ok(Err(e)) => {
                tracing::debug!(error = %e, "form rejected");
                self.alert = Some(capitalize(&e.to_string()));
            }
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), "saving transaction failed");
                self.alert = Some(format!("Could not save: {e:#}"));
            }
        }
        Ok(())
    }

    pub(crate) fn toggle_theme(&mut self, store: &Store) -> Result<()> {
        self.theme = self.theme.toggled();
        store.save_theme(self.theme)?;
        tracing::info!(theme = %self.theme, "theme changed");
        self.set_status(format!("Theme: {}", self.theme));
        Ok(())
    }

    pub(crate) fn ask_reset(&mut self) {
        self.confirm_message = "Clear all transactions and settings?".into();
        self.pending_action = Some(PendingAction::Reset);
        self.input_mode = InputMode::Confirm;
    }

    /// Wipe persisted state and return to a fresh Dashboard.
    pub(crate) fn reset(&mut self, store: &Store) -> Result<()> {
        store.reset()?;
        self.form.clear();
        self.transaction_index = 0;
        self.transaction_scroll = 0;
        self.refresh_all(store)?;
        self.screen = Screen::Dashboard;
        self.set_status("All data cleared");
        Ok(())
    }

    pub(crate) fn request_quote(&mut self) {
        let source: Arc<dyn QuoteSource> = Arc::new(HttpQuoteSource::new(self.quote_url.clone()));
        self.start_quote_fetch(source);
    }

    pub(crate) fn start_quote_fetch(&mut self, source: Arc<dyn QuoteSource>) {
        if self.quote_rx.is_some() {
            return;
        }
        self.quote_rx = Some(quote::spawn_fetch(source));
        self.set_status("Fetching quote...");
    }

    pub(crate) fn quote_pending(&self) -> bool {
        self.quote_rx.is_some()
    }

    /// Pick up a finished quote fetch, if any. A failed fetch shows nothing.
    pub(crate) fn poll_quote(&mut self) {
        let Some(rx) = &self.quote_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(Some(quote)) => {
                self.quote = Some(quote);
                self.quote_rx = None;
                self.status_message.clear();
            }
            Ok(None) | Err(TryRecvError::Disconnected) => {
                self.quote_rx = None;
                self.status_message.clear();
            }
            Err(TryRecvError::Empty) => {}
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
