use anyhow::{Context, Result};
use std::collections::HashMap;

const PREFIX: &str = "DBCONNECT";

/// Local values that take precedence over the parameter store.
///
/// Keys are env-style names. For database `orders` and field `s3-staging`
/// the lookup order is:
///
/// 1. `DBCONNECT_ORDERS_S3_STAGING`
/// 2. `DBCONNECT_S3_STAGING`
///
/// A JSON file can add database-scoped entries on top:
/// ```json
/// {
///   "orders": { "endpoint": "localhost", "port": "15432" }
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    entries: HashMap<String, String>,
}

impl Overrides {
    /// No overrides; every attribute comes from the store.
    pub fn none() -> Self {
        Self::default()
    }

    /// Snapshots every `DBCONNECT_*` variable in the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Builds from arbitrary `(name, value)` pairs, keeping only `DBCONNECT_*` names.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, v)| k.starts_with(PREFIX) && !v.is_empty())
            .collect();
        Self { entries }
    }

    /// Layers database-scoped entries from a JSON file at `path` on top of
    /// the current ones.
    pub fn load(mut self, path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read override file '{path}'"))?;
        let file: HashMap<String, HashMap<String, String>> = serde_json::from_str(&content)
            .with_context(|| format!("override file '{path}' is not a database -> field map"))?;

        for (database, fields) in file {
            for (field, value) in fields {
                if !value.is_empty() {
                    self.entries.insert(scoped_key(&database, &field), value);
                }
            }
        }
        Ok(self)
    }

    /// Returns the override for `field` of `database`, if one is set.
    pub fn get(&self, database: &str, field: &str) -> Option<&str> {
        self.entries
            .get(&scoped_key(database, field))
            .or_else(|| self.entries.get(&global_key(field)))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize(part: &str) -> String {
    part.chars()
        .map(|c| match c {
            '-' | '.' | ' ' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

fn global_key(field: &str) -> String {
    format!("{PREFIX}_{}", normalize(field))
}

fn scoped_key(database: &str, field: &str) -> String {
    format!("{PREFIX}_{}_{}", normalize(database), normalize(field))
}
