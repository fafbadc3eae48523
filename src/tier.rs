//! Tier inference and tier-based pre-population.
//!
//! Only explicit select choices carry tier signals; binary and numeric
//! answers pre-populate *from* tiers but never vote on one.

use crate::models::{Answer, AnswerValue, Phase, PricingTier, QuestionType};
use std::collections::HashMap;

/// Infer the tier a set of answers points at
///
/// Counts tier-tagged select choices. Transformation wins only when it
/// strictly beats both others; refresh when it strictly beats essential;
/// essential is the floor when nothing tier-bearing was answered or
/// counts tie downward.
pub fn determine_tier(answers: &HashMap<String, Answer>, phases: &[Phase]) -> PricingTier {
    let mut essential = 0u32;
    let mut refresh = 0u32;
    let mut transformation = 0u32;

    for phase in phases {
        for question in &phase.questions {
            if question.question_type != QuestionType::Select {
                continue;
            }
            let Some(answer) = answers.get(&question.id) else {
                continue;
            };
            let Some(option) = question.selected_option(&answer.value) else {
                continue;
            };
            match option.tier {
                Some(PricingTier::Essential) => essential += 1,
                Some(PricingTier::Refresh) => refresh += 1,
                Some(PricingTier::Transformation) => transformation += 1,
                None => {}
            }
        }
    }

    if transformation > refresh && transformation > essential {
        return PricingTier::Transformation;
    }
    if refresh > essential {
        return PricingTier::Refresh;
    }
    PricingTier::Essential
}

/// Pre-populate an answer set from a tier's default magnitudes
///
/// Used when the user picks a tier up front instead of answering question
/// by question: every question gets the answer its config row prescribes
/// for that tier.
pub fn populate_answers(phases: &[Phase], tier: PricingTier) -> HashMap<String, Answer> {
    let mut answers = HashMap::new();

    for phase in phases {
        for question in &phase.questions {
            let value = match question.question_type {
                QuestionType::Binary => question
                    .tier_values
                    .map(|tiers| AnswerValue::Bool(tiers.for_tier(tier) > 0.0)),
                QuestionType::Number | QuestionType::Range => question
                    .tier_values
                    .map(|tiers| AnswerValue::Number(tiers.for_tier(tier))),
                QuestionType::Select => question
                    .options
                    .iter()
                    .find(|opt| opt.tier == Some(tier))
                    .map(|opt| AnswerValue::Text(opt.value.clone()))
                    .or_else(|| question.default_value.clone()),
                QuestionType::Text => question.default_value.clone(),
            };

            if let Some(value) = value {
                answers.insert(question.id.clone(), Answer::new(question.id.clone(), value));
            }
        }
    }

    answers
}
