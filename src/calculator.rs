//! Phase pricing: walks the selected phases' answered questions and turns
//! them into priced line items.
//!
//! The configuration table is the source of truth: with a live config, a
//! question that no longer matches any row is skipped outright, so stale
//! questions disappear from quotes the moment the table is edited. With no
//! config loaded at all, pricing degrades to fixed per-type estimates so
//! the caller keeps working before the first load completes.

use crate::lookup::find_pricing_item;
use crate::models::{
    Answer, AnswerValue, Phase, PhasePricing, PricedLineItem, PricingConfig, PricingTier,
    Question, QuestionType,
};
use crate::ranges::total_for;
use crate::tier::determine_tier;
use std::collections::HashMap;

/// Ballpark project sizes per tier, used only when no config is loaded
const ESSENTIAL_BASE_PRICE: f64 = 8_000.0;
const REFRESH_BASE_PRICE: f64 = 20_000.0;
const TRANSFORMATION_BASE_PRICE: f64 = 60_000.0;

/// Estimate constants for the no-config fallback path
const FALLBACK_SELECT_PRICE: f64 = 200.0;
const FALLBACK_UNIT_PRICE: f64 = 100.0;

fn tier_base_price(tier: PricingTier) -> f64 {
    match tier {
        PricingTier::Essential => ESSENTIAL_BASE_PRICE,
        PricingTier::Refresh => REFRESH_BASE_PRICE,
        PricingTier::Transformation => TRANSFORMATION_BASE_PRICE,
    }
}

/// Price every selected phase from the current answers
///
/// `answers` is expected to be the resolved set (shared variables already
/// substituted, see `shared::resolve`). Output order follows phase order,
/// so identical inputs produce identical output.
pub fn calculate_pricing(
    config: Option<&PricingConfig>,
    answers: &HashMap<String, Answer>,
    phases: &[Phase],
    selected_phase_ids: &[String],
) -> Vec<PhasePricing> {
    // Tier only influences the no-config estimates
    let tier = determine_tier(answers, phases);
    let mut pricing = Vec::new();

    for phase in phases {
        if !selected_phase_ids.iter().any(|id| id == &phase.id) {
            continue;
        }

        let mut items = Vec::new();

        for question in &phase.questions {
            let Some(answer) = answers.get(&question.id) else {
                continue;
            };
            if !has_usable_value(question, answer) {
                continue;
            }

            let quantity = quantity_for(question, answer);

            let (unit_price, total) = match config {
                Some(config) => {
                    // Source-of-truth rule: unmatched questions are skipped
                    let Some(item) = find_pricing_item(config, &phase.name, &question.label)
                    else {
                        tracing::debug!(
                            question = question.id.as_str(),
                            phase = phase.name.as_str(),
                            "no config row for question, skipping"
                        );
                        continue;
                    };

                    if item.has_ranges() {
                        let total = total_for(item, quantity);
                        // Averaged effective rate; range pricing is not linear
                        let unit_price = if quantity > 0.0 { total / quantity } else { 0.0 };
                        (unit_price, total)
                    } else {
                        let unit_price = configured_unit_price(question, answer, item.unit_cost);
                        (unit_price, unit_price * quantity)
                    }
                }
                None => {
                    let unit_price = fallback_unit_price(question, answer, tier);
                    (unit_price, unit_price * quantity)
                }
            };

            // Zero-total rows add noise, not information
            if total <= 0.0 {
                continue;
            }

            items.push(PricedLineItem {
                question_id: question.id.clone(),
                label: question.label.clone(),
                quantity,
                unit_price,
                total,
                is_add_on: question.is_add_on,
                phase_id: None,
            });
        }

        let subtotal = items.iter().map(|item| item.total).sum();
        pricing.push(PhasePricing {
            phase_id: phase.id.clone(),
            phase_name: phase.name.clone(),
            items,
            subtotal,
        });
    }

    pricing
}

/// Empty and declined answers contribute nothing
fn has_usable_value(question: &Question, answer: &Answer) -> bool {
    if question.question_type == QuestionType::Binary && !answer.value.is_truthy() {
        return false;
    }
    match &answer.value {
        AnswerValue::Text(s) => !s.trim().is_empty(),
        _ => true,
    }
}

/// Numeric answers are their own quantity; everything else counts once
fn quantity_for(question: &Question, answer: &Answer) -> f64 {
    if question.question_type.is_numeric() {
        answer.value.as_quantity().unwrap_or(0.0)
    } else {
        1.0
    }
}

/// Per-unit price for a config-matched item without ranges
///
/// A select choice with an explicit per-option price wins over the row's
/// unit cost.
fn configured_unit_price(question: &Question, answer: &Answer, unit_cost: f64) -> f64 {
    if question.question_type == QuestionType::Select {
        if let Some(price) = question.selected_option(&answer.value).and_then(|opt| opt.price) {
            return price;
        }
    }
    unit_cost
}

/// Legacy per-type estimates for when no configuration is loaded
fn fallback_unit_price(question: &Question, answer: &Answer, tier: PricingTier) -> f64 {
    // Explicit option pricing wins regardless of type
    if let Some(option) = question.selected_option(&answer.value) {
        if let Some(price) = option.price {
            return price;
        }
        if let Some(option_tier) = option.tier {
            return tier_base_price(option_tier) / 150.0;
        }
    }

    match question.question_type {
        QuestionType::Binary => tier_base_price(tier) / 200.0,
        QuestionType::Select => FALLBACK_SELECT_PRICE,
        QuestionType::Number | QuestionType::Range => FALLBACK_UNIT_PRICE,
        QuestionType::Text => 0.0,
    }
}
