use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One quantity bracket of a range-priced item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lowest quantity this bracket applies to (inclusive)
    pub min: f64,
    /// Highest quantity this bracket applies to (inclusive); None means unbounded ("7+")
    pub max: Option<f64>,
    /// Per-unit price inside this bracket
    pub price: f64,
}

impl PriceRange {
    /// Whether a quantity falls inside this bracket
    pub fn contains(&self, quantity: f64) -> bool {
        quantity >= self.min && self.max.map_or(true, |max| quantity <= max)
    }
}

/// A select option parsed from the Options column
///
/// Supports both plain labels ("Basic, Pro") and per-option prices
/// ("Basic:£100, Pro:£200").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Display label
    pub label: String,
    /// Explicit price for choosing this option, if the table supplied one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// One row of the pricing configuration table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingItem {
    /// Phase this item belongs to (grouping key, order-preserving)
    pub phase: String,
    /// Item label; also the question lookup key
    pub item: String,
    /// Per-unit cost when no ranges apply
    pub unit_cost: f64,
    /// Quantity brackets, sorted ascending by min; empty when unit-priced
    pub ranges: Vec<PriceRange>,
    /// Essential tier default magnitude (0/1 for binary items)
    pub essential: f64,
    /// Refresh tier default magnitude
    pub refresh: f64,
    /// Transformation tier default magnitude
    pub transformation: f64,
    /// Help text shown with the derived question
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Explicit question type override; None means infer from the row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_type: Option<super::question::QuestionType>,
    /// Select options from the Options column
    pub options: Vec<OptionSpec>,
    /// Minimum value for number/range questions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Maximum value for number/range questions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Whether the derived question is required
    pub required: bool,
    /// Extra validation rule text (e.g. "integer", "positive")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<String>,
    /// Raw Shared Variable cell: a bare name defines a variable,
    /// a `{name}` reference reads one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_variable: Option<String>,
}

impl PricingItem {
    /// Whether this item carries range-based pricing
    pub fn has_ranges(&self) -> bool {
        !self.ranges.is_empty()
    }
}

/// The normalized pricing configuration: the single source of truth
/// for both the question schema and calculated prices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// All parsed rows, in table order
    pub items: Vec<PricingItem>,
    /// When this snapshot was parsed
    pub last_updated: DateTime<Utc>,
}

impl PricingConfig {
    pub fn new(items: Vec<PricingItem>) -> Self {
        Self {
            items,
            last_updated: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
