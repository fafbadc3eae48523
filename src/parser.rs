//! Configuration table parsing: raw spreadsheet-shaped rows in,
//! normalized `PricingConfig` out.
//!
//! The engine never fetches anything itself; callers deserialize whatever
//! source they have (CSV export, sheet API, JSON) into `ConfigRow`s and
//! hand them over. Rows missing a Phase or Item are blank separators and
//! are dropped silently; every other malformed cell degrades to a default
//! with a warning.

use crate::models::{OptionSpec, PricingConfig, PricingItem, QuestionType};
use crate::ranges::parse_ranges;
use crate::warnings::ParseWarnings;
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

/// One raw row of the configuration table, with the column names the
/// spreadsheet export uses (including the legacy aliases)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigRow {
    #[serde(rename = "Phase", default)]
    pub phase: String,
    #[serde(rename = "Item", default)]
    pub item: String,
    #[serde(rename = "Unit Cost (£)", alias = "Unit Cost", default)]
    pub unit_cost: String,
    #[serde(rename = "Essential", default)]
    pub essential: String,
    #[serde(rename = "Refresh", default)]
    pub refresh: String,
    #[serde(rename = "Transformation", default)]
    pub transformation: String,
    #[serde(rename = "Ranges", default)]
    pub ranges: String,
    #[serde(rename = "Question Type", alias = "Type", default)]
    pub question_type: String,
    #[serde(rename = "Options", alias = "Option Labels", default)]
    pub options: String,
    #[serde(rename = "Min", default)]
    pub min: String,
    #[serde(rename = "Max", default)]
    pub max: String,
    #[serde(rename = "Required", alias = "Is Required", default)]
    pub required: String,
    #[serde(rename = "Validation", default)]
    pub validation: String,
    #[serde(rename = "Shared Variable", alias = "SharedVariable", default)]
    pub shared_variable: String,
    #[serde(
        rename = "Description",
        alias = "Description Text",
        alias = "Info Text",
        default
    )]
    pub description: String,
}

static OPTION_PRICE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn option_price_pattern() -> &'static Regex {
    // "Basic:£100", "Pro: 200", "Custom:$99.50"
    OPTION_PRICE_PATTERN.get_or_init(|| Regex::new(r"^(.+?):\s*[£$€]?(\d+(?:\.\d+)?)$").unwrap())
}

/// Parse typed rows into a normalized configuration
///
/// Infallible: the worst a row can do is be dropped or degrade a cell to
/// its default, both reported through the returned warnings.
pub fn parse_rows(rows: Vec<ConfigRow>) -> (PricingConfig, ParseWarnings) {
    let mut warnings = ParseWarnings::new();
    let mut items = Vec::new();

    for row in rows {
        let phase = row.phase.trim();
        let item = row.item.trim();
        // Blank separator rows in spreadsheets
        if phase.is_empty() || item.is_empty() {
            continue;
        }

        let mut unit_cost = parse_money_cell(item, "Unit Cost", &row.unit_cost, &mut warnings);
        if unit_cost < 0.0 {
            warnings.add_warning(format!(
                "Negative unit cost {} for item '{}', clamping to 0",
                unit_cost, item
            ));
            unit_cost = 0.0;
        }

        let question_type = parse_type_cell(item, &row.question_type, &mut warnings);
        let ranges = parse_ranges(item, &row.ranges, &mut warnings);

        items.push(PricingItem {
            phase: phase.to_string(),
            item: item.to_string(),
            unit_cost,
            ranges,
            essential: parse_number_cell(item, "Essential", &row.essential, &mut warnings),
            refresh: parse_number_cell(item, "Refresh", &row.refresh, &mut warnings),
            transformation: parse_number_cell(
                item,
                "Transformation",
                &row.transformation,
                &mut warnings,
            ),
            description: non_empty(&row.description),
            question_type,
            options: parse_options(&row.options),
            min: parse_optional_number(item, "Min", &row.min, &mut warnings),
            max: parse_optional_number(item, "Max", &row.max, &mut warnings),
            required: parse_bool_cell(&row.required),
            validation: non_empty(&row.validation),
            shared_variable: non_empty(&row.shared_variable),
        });
    }

    tracing::debug!(items = items.len(), warnings = warnings.len(), "parsed pricing config");
    (PricingConfig::new(items), warnings)
}

/// Parse untyped records (e.g. straight out of a JSON sheet export)
///
/// This is the boundary where a structurally invalid source is rejected:
/// every record must at least be an object. Anything row-shaped then goes
/// through the same lenient path as `parse_rows`.
pub fn parse_records(records: &[serde_json::Value]) -> anyhow::Result<(PricingConfig, ParseWarnings)> {
    let mut rows = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        if !record.is_object() {
            anyhow::bail!("Record {} is not row-shaped (expected an object)", index);
        }
        // Unknown columns are ignored, missing ones default to empty cells
        let row: ConfigRow = serde_json::from_value(coerce_cells(record.clone()))?;
        rows.push(row);
    }

    Ok(parse_rows(rows))
}

/// Sheet exports are inconsistent about cell types; numbers and booleans
/// arrive as JSON scalars just as often as strings. Flatten everything to
/// strings before deserializing.
fn coerce_cells(record: serde_json::Value) -> serde_json::Value {
    match record {
        serde_json::Value::Object(map) => {
            let coerced = map
                .into_iter()
                .map(|(key, value)| {
                    let cell = match value {
                        serde_json::Value::String(s) => s,
                        serde_json::Value::Null => String::new(),
                        other => other.to_string(),
                    };
                    (key, serde_json::Value::String(cell))
                })
                .collect();
            serde_json::Value::Object(coerced)
        }
        other => other,
    }
}

/// Strip currency symbols and thousands separators, then parse
fn parse_money_cell(item: &str, column: &str, cell: &str, warnings: &mut ParseWarnings) -> f64 {
    let cleaned: String = cell
        .trim()
        .chars()
        .filter(|c| !matches!(c, '£' | '$' | '€' | ','))
        .collect();
    if cleaned.is_empty() {
        return 0.0;
    }
    match cleaned.parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(item, column, cell, "unparseable money cell, using 0");
            warnings.add_bad_number(item, column, cell);
            0.0
        }
    }
}

fn parse_number_cell(item: &str, column: &str, cell: &str, warnings: &mut ParseWarnings) -> f64 {
    let cell = cell.trim();
    if cell.is_empty() {
        return 0.0;
    }
    match cell.parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(item, column, cell, "unparseable number cell, using 0");
            warnings.add_bad_number(item, column, cell);
            0.0
        }
    }
}

fn parse_optional_number(
    item: &str,
    column: &str,
    cell: &str,
    warnings: &mut ParseWarnings,
) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    match cell.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warnings.add_bad_number(item, column, cell);
            None
        }
    }
}

/// Case-insensitive true/1/yes/y; anything else is false
fn parse_bool_cell(cell: &str) -> bool {
    matches!(cell.trim().to_lowercase().as_str(), "true" | "1" | "yes" | "y")
}

/// Unrecognized type names fall back to inference rather than failing the row
fn parse_type_cell(item: &str, cell: &str, warnings: &mut ParseWarnings) -> Option<QuestionType> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    match cell.parse() {
        Ok(question_type) => Some(question_type),
        Err(()) => {
            warnings.add_warning(format!(
                "Unknown question type '{}' for item '{}', inferring instead",
                cell, item
            ));
            None
        }
    }
}

/// Split the Options column, picking up optional per-option price suffixes
fn parse_options(cell: &str) -> Vec<OptionSpec> {
    cell.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            if let Some(caps) = option_price_pattern().captures(token) {
                OptionSpec {
                    label: caps[1].trim().to_string(),
                    price: caps[2].parse().ok(),
                }
            } else {
                OptionSpec {
                    label: token.to_string(),
                    price: None,
                }
            }
        })
        .collect()
}

fn non_empty(cell: &str) -> Option<String> {
    let cell = cell.trim();
    if cell.is_empty() {
        None
    } else {
        Some(cell.to_string())
    }
}
