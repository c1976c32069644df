//! TOML config-file driver.
//!
//! `[section] key = value` maps onto the dotted descriptor names. Every
//! value goes through the registry's full text pipeline: out-of-range
//! numbers clamp silently, unparseable or unknown-token values fall back
//! to the row's default and are reported, unknown keys are reported and
//! ignored. A config file can therefore never abort a startup; only a
//! syntactically broken document is an error.
//!
//! Company rows are applied against the pool's defaults block: the
//! config file describes what a newly founded company starts with.

use magnate_settings::descriptor::SettingDesc;
use magnate_settings::kind::SettingKind;
use magnate_settings::value::SettingValue;

use crate::state::{CompanyPool, EngineState};
use crate::tables::GameTables;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// What a config load skipped or corrected. Informational only; the
/// load itself always completes.
#[derive(Debug, Default)]
pub struct ConfigReport {
    /// Keys that match no descriptor.
    pub unknown_keys: Vec<String>,
    /// Keys whose value was unusable, with the reason; the row kept its
    /// default.
    pub fallbacks: Vec<(String, String)>,
}

/// Apply a TOML document to the live state.
pub fn apply_config(
    text: &str,
    tables: &GameTables,
    state: &mut EngineState,
    companies: &mut CompanyPool,
) -> Result<ConfigReport, ConfigError> {
    let doc: toml::Table = text.parse()?;
    let mut report = ConfigReport::default();
    let mut entries = Vec::new();
    flatten("", &doc, &mut entries, &mut report);

    for (key, raw) in entries {
        if let Some(row) = tables.game.lookup(&key).filter(|r| r.in_config()) {
            apply_row(row, state, None, &key, &raw, &mut report);
        } else if let Some(row) = tables.client.lookup(&key).filter(|r| r.in_config()) {
            apply_row(row, state, None, &key, &raw, &mut report);
        } else if let Some(row) = tables.company.lookup(&key).filter(|r| r.in_config()) {
            apply_row(row, state, Some(&mut companies.defaults), &key, &raw, &mut report);
        } else {
            report.unknown_keys.push(key);
        }
    }
    Ok(report)
}

/// Render the current state as a TOML document, grouped by section.
pub fn collect_config(tables: &GameTables, state: &EngineState, companies: &CompanyPool) -> String {
    let mut root = toml::Table::new();
    for row in tables.game.config_rows() {
        insert(&mut root, row.name, config_value(row, state, None));
    }
    for row in tables.client.config_rows() {
        insert(&mut root, row.name, config_value(row, state, None));
    }
    for row in tables.company.config_rows() {
        insert(&mut root, row.name, config_value(row, state, Some(&companies.defaults)));
    }
    root.to_string()
}

fn apply_row<S>(
    row: &SettingDesc<EngineState, S>,
    state: &mut EngineState,
    mut base: Option<&mut S>,
    key: &str,
    raw: &str,
    report: &mut ConfigReport,
) {
    if let Err(err) = row.set_from_text(state, base.as_deref_mut(), raw) {
        row.reset(state, base);
        report.fallbacks.push((key.to_string(), err.to_string()));
    }
}

/// Flatten nested tables into dotted keys; scalar values become the raw
/// text the registry codec expects.
fn flatten(
    prefix: &str,
    table: &toml::Table,
    out: &mut Vec<(String, String)>,
    report: &mut ConfigReport,
) {
    for (key, value) in table.iter() {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            toml::Value::Table(inner) => flatten(&full, inner, out, report),
            other => match raw_text(other) {
                Some(text) => out.push((full, text)),
                None => report
                    .fallbacks
                    .push((full, "unsupported TOML value type".to_string())),
            },
        }
    }
}

fn raw_text(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Array(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    toml::Value::Integer(i) => parts.push(i.to_string()),
                    _ => return None,
                }
            }
            Some(parts.join(","))
        }
        _ => None,
    }
}

/// Plain integers and booleans keep their TOML type; token values,
/// strings, and lists are written in registry text form.
fn config_value<S>(
    row: &SettingDesc<EngineState, S>,
    state: &EngineState,
    base: Option<&S>,
) -> toml::Value {
    let value = row.get(state, base);
    match &value {
        SettingValue::Bool(b) => toml::Value::Boolean(*b),
        SettingValue::Int(v)
            if matches!(row.ty.kind, SettingKind::Signed | SettingKind::Unsigned) =>
        {
            toml::Value::Integer(*v)
        }
        _ => toml::Value::String(row.encode_text(&value)),
    }
}

fn insert(root: &mut toml::Table, name: &str, value: toml::Value) {
    match name.split_once('.') {
        Some((section, key)) => {
            let entry = root
                .entry(section.to_string())
                .or_insert_with(|| toml::Value::Table(toml::Table::new()));
            if let toml::Value::Table(section_table) = entry {
                section_table.insert(key.to_string(), value);
            }
        }
        None => {
            root.insert(name.to_string(), value);
        }
    }
}
