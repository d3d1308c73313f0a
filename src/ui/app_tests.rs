#![allow(clippy::unwrap_used)]

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::app::{App, InputMode, PendingAction, Screen};
use crate::config::Config;
use crate::models::{Category, ThemePreference};
use crate::quote::QuoteSource;
use crate::store::Store;

fn setup() -> (App, Store) {
    let config = Config::from_lookup(Path::new("/tmp"), Path::new("/tmp"), |_| None).unwrap();
    let store = Store::open_in_memory().unwrap();
    let mut app = App::new(&config);
    app.refresh_all(&store).unwrap();
    (app, store)
}

fn add_expense(app: &mut App, store: &Store, amount: &str, date: &str) {
    app.start_create();
    app.form.draft.amount = amount.into();
    app.form.draft.category = Some(Category::Dining);
    app.form.draft.date = date.into();
    app.submit_form(store).unwrap();
    app.alert = None;
}

struct Fixed;

impl QuoteSource for Fixed {
    fn fetch(&self) -> anyhow::Result<String> {
        Ok("Small steps every day.".into())
    }
}

struct Broken;

impl QuoteSource for Broken {
    fn fetch(&self) -> anyhow::Result<String> {
        anyhow::bail!("offline")
    }
}

fn wait_for_quote(app: &mut App) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while app.quote_pending() && Instant::now() < deadline {
        app.poll_quote();
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn test_screen_cycle() {
    assert_eq!(Screen::Dashboard.next(), Screen::Transaction);
    assert_eq!(Screen::Reports.next(), Screen::Dashboard);
    assert_eq!(Screen::Dashboard.prev(), Screen::Reports);
}

#[test]
fn test_mount_rereads_store() {
    let (mut app, store) = setup();
    assert!(app.transactions.is_empty());
    let mut writer_form = crate::ui::form::TransactionForm::default();
    writer_form.draft.amount = "9".into();
    writer_form.draft.category = Some(Category::Others);
    writer_form.draft.date = "2024-03-01".into();
    writer_form.submit(&store).unwrap().unwrap();

    app.switch_screen(&store, Screen::Dashboard).unwrap();
    assert_eq!(app.transactions.len(), 1);
}

#[test]
fn test_submit_success_shows_ack_and_refreshes() {
    let (mut app, store) = setup();
    app.start_create();
    app.form.draft.amount = "120".into();
    app.form.draft.category = Some(Category::Transport);
    app.form.draft.date = "2024-03-10".into();
    app.submit_form(&store).unwrap();

    assert_eq!(app.alert.as_deref(), Some("Expense added successfully!"));
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.transactions.len(), 1);
    assert_eq!(app.summary.total_expense, rust_decimal_macros::dec!(120));
}

#[test]
fn test_submit_failure_keeps_form_open() {
    let (mut app, store) = setup();
    app.start_create();
    app.submit_form(&store).unwrap();
    assert_eq!(app.input_mode, InputMode::Form);
    assert!(app.alert.as_deref().unwrap().starts_with("Please fill all the fields"));
    assert!(store.load_transactions().unwrap().is_empty());
}

#[test]
fn test_edit_selected_newest_first() {
    let (mut app, store) = setup();
    add_expense(&mut app, &store, "10", "2024-03-01");
    add_expense(&mut app, &store, "20", "2024-03-02");

    app.transaction_index = 0;
    assert!(app.start_edit());
    assert_eq!(app.form.draft.amount, "20");

    app.form.draft.amount = "25".into();
    app.submit_form(&store).unwrap();
    assert_eq!(app.alert.as_deref(), Some("Expense updated successfully"));

    let stored = store.load_transactions().unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[1].amount, rust_decimal_macros::dec!(25));
}

#[test]
fn test_toggle_theme_persists() {
    let (mut app, store) = setup();
    assert_eq!(app.theme, ThemePreference::Light);
    app.toggle_theme(&store).unwrap();
    assert_eq!(app.theme, ThemePreference::Dark);
    assert_eq!(store.load_theme().unwrap(), ThemePreference::Dark);
}

#[test]
fn test_reset_clears_everything() {
    let (mut app, store) = setup();
    add_expense(&mut app, &store, "10", "2024-03-01");
    app.toggle_theme(&store).unwrap();
    app.screen = Screen::Reports;

    app.ask_reset();
    assert_eq!(app.pending_action, Some(PendingAction::Reset));
    app.reset(&store).unwrap();

    assert!(app.transactions.is_empty());
    assert_eq!(app.theme, ThemePreference::Light);
    assert_eq!(app.screen, Screen::Dashboard);
    assert!(store.load_transactions().unwrap().is_empty());
}

#[test]
fn test_quote_arrives_in_modal() {
    let (mut app, _store) = setup();
    app.start_quote_fetch(Arc::new(Fixed));
    wait_for_quote(&mut app);
    assert_eq!(app.quote.as_deref(), Some("Small steps every day."));
}

#[test]
fn test_failed_quote_shows_nothing() {
    let (mut app, _store) = setup();
    app.start_quote_fetch(Arc::new(Broken));
    wait_for_quote(&mut app);
    assert!(!app.quote_pending());
    assert!(app.quote.is_none());
}

#[test]
fn test_edit_of_vanished_record_keeps_form_open() {
    let (mut app, store) = setup();
    add_expense(&mut app, &store, "10", "2024-03-01");
    assert!(app.start_edit());
    app.form.draft.amount = "15".into();

    store.reset().unwrap();
    app.submit_form(&store).unwrap();

    assert!(app.running);
    assert_eq!(app.input_mode, InputMode::Form);
    assert!(app.form.is_editing());
    assert_eq!(app.form.draft.amount, "15");
    let alert = app.alert.as_deref().unwrap();
    assert!(alert.starts_with("Could not save"), "{alert}");
    assert!(alert.contains("no transaction with id"), "{alert}");
}

#[test]
fn test_report_cursor_reaches_every_row() {
    let (mut app, store) = setup();
    for day in 1..=28 {
        add_expense(&mut app, &store, "5", &format!("2024-03-{day:02}"));
    }
    app.set_report_month("2024-03".into());
    app.visible_rows = 24;
    let page = app.report_page();
    assert!(page < app.report.rows.len());

    for _ in 0..40 {
        crate::ui::util::scroll_down(
            &mut app.report_index,
            &mut app.report_scroll,
            app.report.rows.len(),
            page,
        );
    }
    assert_eq!(app.report_index, 27);
    assert_eq!(app.report_scroll, 27 + 1 - page);

    app.set_report_month("2024-04".into());
    assert_eq!((app.report_index, app.report_scroll), (0, 0));
}

#[test]
fn test_report_cursor_clamped_when_rows_shrink() {
    let (mut app, store) = setup();
    add_expense(&mut app, &store, "5", "2024-03-01");
    add_expense(&mut app, &store, "6", "2024-03-02");
    app.set_report_month("2024-03".into());
    app.report_index = 1;
    app.report_scroll = 1;

    store.save_transactions(&app.transactions[..1]).unwrap();
    app.refresh_transactions(&store).unwrap();
    assert_eq!((app.report_index, app.report_scroll), (0, 0));
}
