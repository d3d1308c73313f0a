mod schema;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Category, ThemePreference, Transaction, TransactionType, MAX_AMOUNT};

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("stored transactions are not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("stored transactions have an unexpected shape (expected an object or an array)")]
    UnexpectedShape,

    #[error("stored transactions use unsupported payload version {0}")]
    UnsupportedVersion(u64),

    #[error("stored transaction #{index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("no transaction with id {0}")]
    NotFound(Uuid),
}

#[derive(Serialize)]
struct Envelope<'a> {
    version: u32,
    transactions: &'a [Transaction],
}

/// Record layout written by the browser version: no id, numeric amount.
#[derive(Deserialize)]
struct LegacyTransaction {
    #[serde(rename = "type")]
    kind: TransactionType,
    amount: Decimal,
    category: Category,
    #[serde(default)]
    description: Option<String>,
    date: NaiveDate,
}

impl From<LegacyTransaction> for Transaction {
    fn from(legacy: LegacyTransaction) -> Self {
        Transaction {
            id: Uuid::new_v4(),
            kind: legacy.kind,
            amount: legacy.amount,
            category: legacy.category,
            description: legacy.description.unwrap_or_default(),
            date: legacy.date,
        }
    }
}

pub(crate) fn encode_transactions(txns: &[Transaction]) -> Result<String, StoreError> {
    Ok(serde_json::to_string(&Envelope {
        version: schema::PAYLOAD_VERSION,
        transactions: txns,
    })?)
}

/// Decode a stored payload: the versioned envelope, or a bare array from the
/// browser layout (version 0) which is migrated by assigning fresh ids.
pub(crate) fn decode_transactions(raw: &str) -> Result<Vec<Transaction>, StoreError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let txns: Vec<Transaction> = match value {
        serde_json::Value::Array(items) => {
            let legacy: Vec<LegacyTransaction> =
                serde_json::from_value(serde_json::Value::Array(items))?;
            tracing::info!(count = legacy.len(), "migrating unversioned transaction payload");
            legacy.into_iter().map(Transaction::from).collect()
        }
        serde_json::Value::Object(mut map) => {
            let version = map
                .get("version")
                .and_then(serde_json::Value::as_u64)
                .unwrap_or(0);
            if version != u64::from(schema::PAYLOAD_VERSION) {
                return Err(StoreError::UnsupportedVersion(version));
            }
            let list = map
                .remove("transactions")
                .unwrap_or(serde_json::Value::Array(Vec::new()));
            serde_json::from_value::<Vec<Transaction>>(list)?
        }
        _ => return Err(StoreError::UnexpectedShape),
    };

    for (index, txn) in txns.iter().enumerate() {
        if txn.amount <= Decimal::ZERO {
            return Err(StoreError::InvalidRecord {
                index,
                reason: format!("amount {} is not positive", txn.amount),
            });
        }
        if txn.amount > MAX_AMOUNT {
            return Err(StoreError::InvalidRecord {
                index,
                reason: format!("amount {} exceeds {MAX_AMOUNT}", txn.amount),
            });
        }
    }
    Ok(txns)
}

pub(crate) struct Store {
    conn: Connection,
}

impl Store {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open store: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set store pragmas")?;
        let mut store = Self { conn };
        store.migrate().context("Store migration failed")?;
        tracing::debug!(path = %path.display(), "store opened");
        Ok(store)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Raw key-value access ──────────────────────────────────

    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }

    // ── Transactions ──────────────────────────────────────────

    pub(crate) fn load_transactions(&self) -> Result<Vec<Transaction>> {
        match self.get(schema::TRANSACTIONS_KEY)? {
            Some(raw) => Ok(decode_transactions(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    pub(crate) fn save_transactions(&self, txns: &[Transaction]) -> Result<()> {
        let raw = encode_transactions(txns)?;
        self.set(schema::TRANSACTIONS_KEY, &raw)?;
        tracing::debug!(count = txns.len(), "transactions saved");
        Ok(())
    }

    pub(crate) fn append_transaction(&self, txn: Transaction) -> Result<()> {
        let mut txns = self.load_transactions()?;
        tracing::info!(id = %txn.id, kind = %txn.kind, "adding transaction");
        txns.push(txn);
        self.save_transactions(&txns)
    }

    /// Overwrite the record with `id` in place. Position and length are kept.
    pub(crate) fn replace_transaction(&self, id: Uuid, txn: Transaction) -> Result<()> {
        let mut txns = self.load_transactions()?;
        let slot = txns
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        tracing::info!(%id, kind = %txn.kind, "updating transaction");
        *slot = Transaction { id, ..txn };
        self.save_transactions(&txns)
    }

    /// Append every record from an exported payload, skipping ids that are
    /// already stored. Returns how many were added.
    pub(crate) fn import_payload(&self, raw: &str) -> Result<usize> {
        let incoming = decode_transactions(raw)?;
        let mut txns = self.load_transactions()?;
        let known: HashSet<Uuid> = txns.iter().map(|t| t.id).collect();
        let before = txns.len();
        txns.extend(incoming.into_iter().filter(|t| !known.contains(&t.id)));
        let added = txns.len() - before;
        self.save_transactions(&txns)?;
        tracing::info!(added, "imported transactions");
        Ok(added)
    }

    // ── Theme ─────────────────────────────────────────────────

    pub(crate) fn load_theme(&self) -> Result<ThemePreference> {
        let stored = self.get(schema::THEME_KEY)?;
        Ok(match stored.as_deref().map(ThemePreference::parse) {
            Some(Some(theme)) => theme,
            Some(None) => {
                tracing::warn!(value = ?stored, "ignoring unknown theme value");
                ThemePreference::default()
            }
            None => ThemePreference::default(),
        })
    }

    pub(crate) fn save_theme(&self, theme: ThemePreference) -> Result<()> {
        self.set(schema::THEME_KEY, theme.as_str())
    }

    // ── Reset ─────────────────────────────────────────────────

    /// Clear all persisted application state, theme included.
    pub(crate) fn reset(&self) -> Result<()> {
        let removed = self.conn.execute("DELETE FROM kv", [])?;
        tracing::info!(removed, "store reset");
        Ok(())
    }
}
