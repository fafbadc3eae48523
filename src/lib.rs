pub mod calculator;
pub mod lookup;
pub mod models;
pub mod parser;
pub mod quote;
pub mod ranges;
pub mod schema;
pub mod shared;
pub mod store;
pub mod tier;
pub mod warnings;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub use calculator::calculate_pricing;
pub use lookup::find_pricing_item;
pub use models::{
    Answer, AnswerValue, OngoingCosts, Phase, PhasePricing, PricedLineItem, PricingConfig,
    PricingItem, PricingTier, ProjectType, Question, QuestionType, Quote, SharedVariableRole,
};
pub use parser::{parse_records, parse_rows, ConfigRow};
pub use quote::build_quote;
pub use schema::build_phases;
pub use store::{prune_answers, ConfigStore};
pub use tier::determine_tier;
pub use warnings::ParseWarnings;

/// Initialize tracing/logging
///
/// Note: This function can only be called once. Embedding applications
/// that install their own subscriber should skip it.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}
