use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of project being quoted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    WebDev,
    Brand,
    Campaign,
}

/// One priced line in a quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedLineItem {
    pub question_id: String,
    pub label: String,
    pub quantity: f64,
    /// Displayed per-unit rate; for range-priced items this is the averaged
    /// effective rate (total / quantity)
    pub unit_price: f64,
    pub total: f64,
    pub is_add_on: bool,
    /// Phase the item was lifted from; set on add-ons pulled out of a phase
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase_id: Option<String>,
}

/// Priced breakdown of one phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhasePricing {
    pub phase_id: String,
    pub phase_name: String,
    pub items: Vec<PricedLineItem>,
    pub subtotal: f64,
}

impl PhasePricing {
    /// Recompute the subtotal from the current item list
    pub fn recompute_subtotal(&mut self) {
        self.subtotal = self.items.iter().map(|item| item.total).sum();
    }
}

/// A named recurring cost line (hosting or maintenance package)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageCost {
    pub package: String,
    pub monthly: f64,
    pub annual: f64,
}

/// An unnamed recurring cost line (staging environment)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringCost {
    pub monthly: f64,
    pub annual: f64,
}

/// Recurring-cost schedule for a tier; excluded from the quote total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OngoingCosts {
    pub hosting: PackageCost,
    pub maintenance: PackageCost,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staging: Option<RecurringCost>,
    pub total_monthly: f64,
    pub total_annual: f64,
}

/// A complete assembled quote; a fresh immutable value on every build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub project_type: ProjectType,
    pub phases: Vec<PhasePricing>,
    /// Items flagged as add-ons, lifted out of their phases
    pub add_ons: Vec<PricedLineItem>,
    pub ongoing_costs: OngoingCosts,
    /// Tier the recurring schedule and timeline were derived from
    pub tier: super::question::PricingTier,
    /// Phase subtotals plus add-ons; recurring costs excluded
    pub total: f64,
    pub timeline: String,
    pub created_at: DateTime<Utc>,
}
