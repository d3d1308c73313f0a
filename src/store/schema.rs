pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS kv (
    key   TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];

/// Key holding the JSON envelope of all transactions.
pub(crate) const TRANSACTIONS_KEY: &str = "transactions";

/// Key holding the theme preference, `"light"` or `"dark"`.
pub(crate) const THEME_KEY: &str = "theme";

/// Version written inside the transactions envelope. A bare JSON array is
/// treated as version 0.
pub(crate) const PAYLOAD_VERSION: u32 = 1;
