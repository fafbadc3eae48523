//! Data model for the quoting engine
//!
//! Three families of types:
//! - `config`: the normalized pricing table (source of truth for schema and prices)
//! - `question`: the derived questionnaire schema and user answers
//! - `quote`: the priced output documents

pub mod config;
pub mod question;
pub mod quote;

pub use config::{OptionSpec, PriceRange, PricingConfig, PricingItem};
pub use question::{
    Answer, AnswerValue, Phase, PricingTier, Question, QuestionOption, QuestionType,
    SharedVariableRole, TierValues,
};
pub use quote::{
    OngoingCosts, PackageCost, PhasePricing, PricedLineItem, ProjectType, Quote, RecurringCost,
};
