//! Output rendering for lists and single records.

use crate::api::AppError;
use serde::Serialize;
use std::{fmt, str::FromStr};
use tabled::{settings::Style, Table, Tabled};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(AppError::Config(format!(
                "Unsupported output format: {other} (expected table or json)"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => f.write_str("table"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Renders rows as a rounded table, or `empty` when there are none.
#[must_use]
pub fn table<T: Tabled>(rows: &[T], empty: &str) -> String {
    if rows.is_empty() {
        empty.to_string()
    } else {
        Table::new(rows).with(Style::rounded()).to_string()
    }
}

/// Renders `(label, value)` pairs as a two-column table.
#[must_use]
pub fn details(pairs: &[(&str, String)]) -> String {
    let mut builder = tabled::builder::Builder::default();
    for (label, value) in pairs {
        builder.push_record([(*label).to_string(), value.clone()]);
    }
    builder.build().with(Style::rounded()).to_string()
}

/// Pretty JSON for `--output json`.
///
/// # Errors
/// Returns `AppError::Serialization` if the value cannot be encoded.
pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|err| AppError::Serialization(format!("Failed to encode output: {err}")))
}
