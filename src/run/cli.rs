use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::Config;
use crate::models::{Category, ThemePreference, Transaction, TransactionDraft, TransactionType};
use crate::quote::{self, HttpQuoteSource};
use crate::report::{self, MonthlyReport};
use crate::store::{Store, StoreError};
use crate::summary::{self, Summary};
use crate::ui::util::{format_money, normalize_month, truncate, CURRENCY};

pub(crate) fn as_cli(args: &[String], store: &Store, config: &Config) -> Result<()> {
    match args[1].as_str() {
        "add" => cli_add(&args[2..], store),
        "edit" => cli_edit(&args[2..], store),
        "list" | "ls" => cli_list(&args[2..], store),
        "summary" | "s" => cli_summary(&args[2..], store),
        "report" | "pdf" => cli_export(&args[2..], store, config, ExportKind::Pdf),
        "csv" => cli_export(&args[2..], store, config, ExportKind::Csv),
        "quote" => cli_quote(config),
        "theme" => cli_theme(&args[2..], store),
        "reset" => cli_reset(&args[2..], store),
        "import" => cli_import(&args[2..], store),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("expensetui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("ExpenseTUI - local-only personal expense tracker");
    println!();
    println!("Usage: expensetui [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  add                           Record a transaction");
    println!("    --type <income|expense>     Transaction type (default: expense)");
    println!("    --amount <n>                Positive amount");
    println!("    --category <name>           Salary, Groceries, Dining, Transport, Entertainment, Others");
    println!("    --date <YYYY-MM-DD>         Date (default: today)");
    println!("    --description <text>        Optional note");
    println!("  edit <id> [flags]             Change a transaction (same flags as add)");
    println!("  list [YYYY-MM]                List transactions, optionally for one month");
    println!("  summary [YYYY-MM]             Totals and category breakdown");
    println!("  report [YYYY-MM] [dir]        Export a monthly PDF report");
    println!("  csv [YYYY-MM] [dir]           Export a monthly CSV report");
    println!("  quote                         Print a motivational quote");
    println!("  theme [light|dark]            Show or set the theme");
    println!("  reset --yes                   Delete all transactions and settings");
    println!("  import <file.json>            Import transactions from a JSON export");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

/// Positional arguments, skipping `--flag value` pairs.
fn positional(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            iter.next();
        } else {
            out.push(arg.as_str());
        }
    }
    out
}

fn current_month() -> String {
    chrono::Local::now().format("%Y-%m").to_string()
}

fn month_arg(raw: Option<&str>) -> Result<String> {
    match raw {
        None => Ok(current_month()),
        Some(raw) => {
            let year = chrono::Local::now().format("%Y").to_string();
            normalize_month(raw, &year)
                .with_context(|| format!("Invalid month '{raw}', use YYYY-MM"))
        }
    }
}

/// Overlay any flags given on top of `draft`.
fn apply_flags(args: &[String], draft: &mut TransactionDraft) -> Result<()> {
    if let Some(kind) = flag(args, "--type") {
        draft.kind = TransactionType::parse(kind)
            .with_context(|| format!("Unknown type '{kind}', use income or expense"))?;
    }
    if let Some(amount) = flag(args, "--amount") {
        draft.amount = amount.to_string();
    }
    if let Some(category) = flag(args, "--category") {
        let names: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        draft.category = Some(Category::parse(category).with_context(|| {
            format!("Unknown category '{category}'. Use one of: {}", names.join(", "))
        })?);
    }
    if let Some(date) = flag(args, "--date") {
        draft.date = date.to_string();
    }
    if let Some(description) = flag(args, "--description") {
        draft.description = description.to_string();
    }
    Ok(())
}

fn cli_add(args: &[String], store: &Store) -> Result<()> {
    let mut draft = TransactionDraft {
        date: chrono::Local::now().format("%Y-%m-%d").to_string(),
        ..TransactionDraft::default()
    };
    apply_flags(args, &mut draft)?;
    let txn = draft.into_transaction(uuid::Uuid::new_v4())?;
    let (kind, id) = (txn.kind, txn.short_id());
    store.append_transaction(txn)?;
    println!("{kind} added successfully! ({id})");
    Ok(())
}

/// Resolve a full id or a unique prefix of one.
fn find_by_prefix<'a>(txns: &'a [Transaction], prefix: &str) -> Result<&'a Transaction> {
    let needle = prefix.trim().to_lowercase().replace('-', "");
    if needle.is_empty() {
        anyhow::bail!("Usage: expensetui edit <id> [--amount ..] [--category ..] ...");
    }
    let matches: Vec<&Transaction> = txns
        .iter()
        .filter(|t| t.id.simple().to_string().starts_with(&needle))
        .collect();
    match matches.as_slice() {
        [one] => Ok(*one),
        [] => anyhow::bail!("No transaction with id starting '{prefix}'"),
        _ => anyhow::bail!("Id prefix '{prefix}' matches {} transactions", matches.len()),
    }
}

fn cli_edit(args: &[String], store: &Store) -> Result<()> {
    let prefix = positional(args).first().copied().unwrap_or("");
    let txns = store.load_transactions()?;
    let target = find_by_prefix(&txns, prefix)?;

    let mut draft = TransactionDraft::from_transaction(target);
    apply_flags(args, &mut draft)?;
    let updated = draft.into_transaction(target.id)?;
    let kind = updated.kind;
    store.replace_transaction(target.id, updated)?;
    println!("{kind} updated successfully");
    Ok(())
}

fn cli_list(args: &[String], store: &Store) -> Result<()> {
    let txns = store.load_transactions()?;
    let listed: Vec<&Transaction> = match positional(args).first() {
        Some(raw) => summary::filter_month(&txns, &month_arg(Some(*raw))?),
        None => txns.iter().collect(),
    };
    if listed.is_empty() {
        println!("No transactions");
        return Ok(());
    }

    println!(
        "{:<10} {:<10} {:<8} {:<14} {:<28} {:>14}",
        "ID", "Date", "Type", "Category", "Description", "Amount"
    );
    println!("{}", "─".repeat(89));
    for txn in listed {
        println!(
            "{:<10} {:<10} {:<8} {:<14} {:<28} {:>14}",
            txn.short_id(),
            txn.date_string(),
            txn.kind.as_str(),
            txn.category.as_str(),
            truncate(&txn.description, 28),
            format_money(txn.amount, CURRENCY),
        );
    }
    Ok(())
}

fn cli_summary(args: &[String], store: &Store) -> Result<()> {
    let txns = store.load_transactions()?;
    let month = positional(args).first().map(|m| month_arg(Some(*m))).transpose()?;
    let scoped: Vec<&Transaction> = match &month {
        Some(month) => summary::filter_month(&txns, month),
        None => txns.iter().collect(),
    };
    let totals = Summary::of(scoped.iter().copied());

    println!("ExpenseTUI - {}", month.as_deref().unwrap_or("all time"));
    println!("{}", "─".repeat(40));
    println!("  Income:     {}", format_money(totals.total_income, CURRENCY));
    println!("  Expense:    {}", format_money(totals.total_expense, CURRENCY));
    println!("  Balance:    {}", format_money(totals.balance(), CURRENCY));
    println!("  Total Txns: {}", scoped.len());

    if !totals.by_category.is_empty() {
        println!();
        println!("Spending by Category:");
        for (category, amount) in totals.by_category.nonzero() {
            println!(
                "  {} {:<16} {}",
                category.icon(),
                category.as_str(),
                format_money(amount, CURRENCY)
            );
        }
    }
    Ok(())
}

enum ExportKind {
    Pdf,
    Csv,
}

fn cli_export(args: &[String], store: &Store, config: &Config, kind: ExportKind) -> Result<()> {
    let pos = positional(args);
    let month = month_arg(pos.first().copied())?;
    let dir = pos
        .get(1)
        .map(|d| PathBuf::from(super::shellexpand(d)))
        .unwrap_or_else(|| config.export_dir.clone());

    let txns = store.load_transactions()?;
    let built = MonthlyReport::build(&txns, &month);
    let path = match kind {
        ExportKind::Pdf => report::export_pdf(&built, &dir)?,
        ExportKind::Csv => report::export_csv(&built, &dir)?,
    };
    if built.is_empty() {
        println!("No transactions for {month}; wrote an empty report");
    }
    println!("Saved {}", path.display());
    Ok(())
}

fn cli_quote(config: &Config) -> Result<()> {
    let source = HttpQuoteSource::new(config.quote_url.clone());
    if let Some(quote) = quote::fetch_quietly(&source) {
        println!("\"{quote}\"");
    }
    Ok(())
}

fn cli_theme(args: &[String], store: &Store) -> Result<()> {
    match args.first() {
        None => println!("{}", store.load_theme()?),
        Some(raw) => {
            let theme = ThemePreference::parse(raw)
                .with_context(|| format!("Unknown theme '{raw}', use light or dark"))?;
            store.save_theme(theme)?;
            println!("Theme: {theme}");
        }
    }
    Ok(())
}

fn cli_reset(args: &[String], store: &Store) -> Result<()> {
    if !args.iter().any(|a| a == "--yes" || a == "-y") {
        anyhow::bail!("This deletes every transaction and setting. Re-run with --yes to confirm");
    }
    store.reset()?;
    println!("All data cleared");
    Ok(())
}

fn cli_import(args: &[String], store: &Store) -> Result<()> {
    let Some(file) = args.first() else {
        anyhow::bail!("Usage: expensetui import <file.json>");
    };
    let path = super::shellexpand(file);
    let raw = std::fs::read_to_string(&path).with_context(|| format!("File not found: {path}"))?;
    let added = store.import_payload(&raw).map_err(|e| match e.downcast::<StoreError>() {
        Ok(store_err) => anyhow::anyhow!("{path} is not a valid export: {store_err}"),
        Err(other) => other,
    })?;
    println!("Imported {added} new transactions");
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use rust_decimal_macros::dec;
    use std::path::Path;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn config_in(dir: &Path) -> Config {
        Config::from_lookup(dir, dir, |_| None).unwrap()
    }

    #[test]
    fn test_positional_skips_flags() {
        let a = args(&["abc", "--amount", "5", "2024-03"]);
        assert_eq!(positional(&a), vec!["abc", "2024-03"]);
        assert_eq!(flag(&a, "--amount"), Some("5"));
        assert_eq!(flag(&a, "--date"), None);
    }

    #[test]
    fn test_add_then_edit_by_prefix() {
        let store = Store::open_in_memory().unwrap();
        let add = args(&[
            "--type", "income", "--amount", "5000", "--category", "salary", "--date", "2024-03-01",
        ]);
        cli_add(&add, &store).unwrap();

        let txns = store.load_transactions().unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].kind, TransactionType::Income);
        assert_eq!(txns[0].category, Category::Salary);

        let prefix = txns[0].short_id();
        cli_edit(&args(&[prefix.as_str(), "--amount", "5200.50"]), &store).unwrap();
        let after = store.load_transactions().unwrap();
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].id, txns[0].id);
        assert_eq!(after[0].amount, dec!(5200.50));
        assert_eq!(after[0].category, Category::Salary);
    }

    #[test]
    fn test_add_rejects_invalid_input() {
        let store = Store::open_in_memory().unwrap();
        assert!(cli_add(&args(&["--amount", "10"]), &store).is_err());
        assert!(cli_add(&args(&["--amount", "x", "--category", "dining"]), &store).is_err());
        assert!(cli_add(&args(&["--amount", "1", "--category", "rent"]), &store).is_err());
        assert!(store.load_transactions().unwrap().is_empty());
    }

    #[test]
    fn test_edit_unknown_prefix() {
        let store = Store::open_in_memory().unwrap();
        assert!(cli_edit(&args(&["deadbeef", "--amount", "3"]), &store).is_err());
    }

    #[test]
    fn test_reset_requires_confirmation() {
        let store = Store::open_in_memory().unwrap();
        store.save_theme(ThemePreference::Dark).unwrap();
        assert!(cli_reset(&[], &store).is_err());
        assert_eq!(store.load_theme().unwrap(), ThemePreference::Dark);
        cli_reset(&args(&["--yes"]), &store).unwrap();
        assert_eq!(store.load_theme().unwrap(), ThemePreference::Light);
    }

    #[test]
    fn test_theme_set() {
        let store = Store::open_in_memory().unwrap();
        cli_theme(&args(&["dark"]), &store).unwrap();
        assert_eq!(store.load_theme().unwrap(), ThemePreference::Dark);
        assert!(cli_theme(&args(&["sepia"]), &store).is_err());
    }

    #[test]
    fn test_export_writes_into_given_dir() {
        let store = Store::open_in_memory().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let out = dir.path().join("out");
        let out_str = out.display().to_string();

        cli_export(&args(&["2024-03", out_str.as_str()]), &store, &config, ExportKind::Csv).unwrap();
        assert!(out.join("Expense_Report_2024-03.csv").exists());

        cli_export(&args(&["2024-03"]), &store, &config, ExportKind::Pdf).unwrap();
        assert!(dir.path().join("Expense_Report_2024-03.pdf").exists());

        assert!(cli_export(&args(&["2024-13"]), &store, &config, ExportKind::Pdf).is_err());
    }

    #[test]
    fn test_import_reports_bad_payload() {
        let store = Store::open_in_memory().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("bad.json");
        std::fs::write(&file, "{\"version\": 9}").unwrap();
        let file_str = file.display().to_string();
        let err = cli_import(&args(&[file_str.as_str()]), &store).unwrap_err();
        assert!(err.to_string().contains("is not a valid export"));
    }

    #[test]
    fn test_shellexpand() {
        assert_eq!(shellexpand("/abs/path"), "/abs/path");
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        assert_eq!(shellexpand("~/x.json"), format!("{home}/x.json"));
    }
}
