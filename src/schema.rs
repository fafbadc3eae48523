//! Question schema derivation: the configuration table is the single
//! source of truth for the questionnaire. Every pricing item becomes one
//! typed question; phases come from the first occurrence of each phase
//! name in the table.

use crate::models::{
    AnswerValue, Phase, PricingConfig, PricingItem, PricingTier, Question, QuestionOption,
    QuestionType, SharedVariableRole, TierValues,
};

/// Build the ordered phase/question schema from a parsed configuration
pub fn build_phases(config: &PricingConfig) -> Vec<Phase> {
    // Preserve table order: first occurrence of a phase name fixes its position
    let mut phase_names: Vec<String> = Vec::new();
    for item in &config.items {
        let name = item.phase.trim().to_string();
        if !phase_names.contains(&name) {
            phase_names.push(name);
        }
    }

    phase_names
        .into_iter()
        .enumerate()
        .map(|(index, name)| {
            let order = index as u32 + 1;
            let phase_id = format!("phase-{}", order);
            let questions = config
                .items
                .iter()
                .filter(|item| item.phase.trim() == name)
                .map(|item| build_question(item, &phase_id))
                .collect();

            Phase {
                id: phase_id,
                name,
                order,
                // The opening phase is always part of the engagement
                is_required: order == 1,
                questions,
            }
        })
        .collect()
}

/// Derive one typed question from a pricing item
pub fn build_question(item: &PricingItem, phase_id: &str) -> Question {
    let question_type = resolve_question_type(item);
    let options = build_options(item, question_type);

    let default_value = match question_type {
        QuestionType::Binary => Some(AnswerValue::Bool(item.essential > 0.0)),
        QuestionType::Select => options
            .first()
            .map(|opt| AnswerValue::Text(opt.value.clone())),
        QuestionType::Number | QuestionType::Range => Some(AnswerValue::Number(default_magnitude(item))),
        QuestionType::Text => Some(AnswerValue::Text(String::new())),
    };

    let mut min = item.min;
    let mut max = item.max;
    if question_type.is_numeric() {
        if min.is_none() {
            min = Some(0.0);
        }
        // The top bracket caps the question when it is bounded
        if let Some(top) = item.ranges.last() {
            if let Some(top_max) = top.max {
                max = Some(top_max);
            }
        }
    }

    Question {
        id: format!("{}-{}", phase_id, slug(&item.item)),
        label: item.item.clone(),
        question_type,
        phase_id: phase_id.to_string(),
        options,
        default_value,
        min,
        max,
        step: None,
        help_text: item.description.clone(),
        required: item.required,
        is_add_on: item.item.to_lowercase().contains("add-on"),
        tier_values: Some(TierValues {
            essential: item.essential,
            refresh: item.refresh,
            transformation: item.transformation,
        }),
        shared_variable: item
            .shared_variable
            .as_deref()
            .map(SharedVariableRole::from_cell)
            .unwrap_or_default(),
    }
}

/// Explicit override wins; otherwise infer from the row's shape
pub fn resolve_question_type(item: &PricingItem) -> QuestionType {
    item.question_type.unwrap_or_else(|| infer_question_type(item))
}

/// Infer a question type from the row alone
///
/// Precedence: options imply select, ranges imply range, explicit bounds
/// imply number; otherwise the tier magnitudes decide between binary and
/// number.
pub fn infer_question_type(item: &PricingItem) -> QuestionType {
    if !item.options.is_empty() {
        return QuestionType::Select;
    }
    if item.has_ranges() {
        return QuestionType::Range;
    }
    if item.min.is_some() || item.max.is_some() {
        return QuestionType::Number;
    }

    let tiers = [item.essential, item.refresh, item.transformation];
    if tiers.iter().all(|v| *v == 0.0 || *v == 1.0) {
        return QuestionType::Binary;
    }
    if tiers.iter().any(|v| *v > 1.0) {
        return QuestionType::Number;
    }

    QuestionType::Binary
}

/// First non-zero tier magnitude in essential/refresh/transformation order
fn default_magnitude(item: &PricingItem) -> f64 {
    [item.essential, item.refresh, item.transformation]
        .into_iter()
        .find(|v| *v > 0.0)
        .unwrap_or(0.0)
}

fn build_options(item: &PricingItem, question_type: QuestionType) -> Vec<QuestionOption> {
    if question_type != QuestionType::Select {
        return Vec::new();
    }

    if !item.options.is_empty() {
        return item
            .options
            .iter()
            .enumerate()
            .map(|(index, spec)| QuestionOption {
                value: format!("option-{}", index + 1),
                label: spec.label.clone(),
                tier: None,
                price: spec.price,
            })
            .collect();
    }

    // No Options column: offer one choice per tier with a non-zero magnitude
    let tiers = [
        (PricingTier::Essential, item.essential, "Essential"),
        (PricingTier::Refresh, item.refresh, "Refresh"),
        (PricingTier::Transformation, item.transformation, "Transformation"),
    ];
    tiers
        .into_iter()
        .filter(|(_, magnitude, _)| *magnitude > 0.0)
        .map(|(tier, _, label)| QuestionOption {
            value: tier.as_str().to_string(),
            label: label.to_string(),
            tier: Some(tier),
            price: Some(item.unit_cost),
        })
        .collect()
}

/// Deterministic id fragment: lowercase, non-alphanumeric runs collapsed to '-'
fn slug(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut last_dash = false;
    for c in label.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            last_dash = false;
        } else if !last_dash && !out.is_empty() {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OptionSpec, PriceRange};

    fn base_item(phase: &str, label: &str) -> PricingItem {
        PricingItem {
            phase: phase.to_string(),
            item: label.to_string(),
            unit_cost: 1000.0,
            ranges: Vec::new(),
            essential: 1.0,
            refresh: 1.0,
            transformation: 1.0,
            description: None,
            question_type: None,
            options: Vec::new(),
            min: None,
            max: None,
            required: false,
            validation: None,
            shared_variable: None,
        }
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Stakeholder workshop"), "stakeholder-workshop");
        assert_eq!(slug("User interviews (remote)"), "user-interviews-remote");
        assert_eq!(slug("SEO & analytics?"), "seo-analytics");
    }

    #[test]
    fn test_phase_order_follows_first_occurrence() {
        let config = PricingConfig::new(vec![
            base_item("Discovery", "Workshop"),
            base_item("Build", "Templates"),
            base_item("Discovery", "Interviews"),
            base_item("Launch", "Deployment"),
        ]);
        let phases = build_phases(&config);

        assert_eq!(phases.len(), 3);
        assert_eq!(phases[0].name, "Discovery");
        assert_eq!(phases[0].order, 1);
        assert!(phases[0].is_required);
        assert_eq!(phases[0].questions.len(), 2);
        assert_eq!(phases[1].name, "Build");
        assert!(!phases[1].is_required);
        assert_eq!(phases[2].name, "Launch");
    }

    #[test]
    fn test_question_ids_are_deterministic() {
        let config = PricingConfig::new(vec![base_item("Discovery", "Stakeholder workshop")]);
        let phases = build_phases(&config);
        assert_eq!(phases[0].questions[0].id, "phase-1-stakeholder-workshop");
    }

    #[test]
    fn test_explicit_type_overrides_inference() {
        let mut item = base_item("Build", "Notes");
        item.question_type = Some(QuestionType::Text);
        assert_eq!(resolve_question_type(&item), QuestionType::Text);
    }

    #[test]
    fn test_inference_precedence() {
        let mut with_options = base_item("Build", "CMS");
        with_options.options = vec![OptionSpec { label: "Basic".to_string(), price: None }];
        assert_eq!(infer_question_type(&with_options), QuestionType::Select);

        let mut with_ranges = base_item("Build", "Templates");
        with_ranges.ranges = vec![PriceRange { min: 1.0, max: Some(3.0), price: 500.0 }];
        // Options beat ranges
        with_options.ranges = with_ranges.ranges.clone();
        assert_eq!(infer_question_type(&with_options), QuestionType::Select);
        assert_eq!(infer_question_type(&with_ranges), QuestionType::Range);

        let mut with_bounds = base_item("Build", "Seats");
        with_bounds.min = Some(1.0);
        assert_eq!(infer_question_type(&with_bounds), QuestionType::Number);

        let binary = base_item("Build", "SSL");
        assert_eq!(infer_question_type(&binary), QuestionType::Binary);

        let mut magnitudes = base_item("Build", "Pages");
        magnitudes.refresh = 6.0;
        assert_eq!(infer_question_type(&magnitudes), QuestionType::Number);
    }

    #[test]
    fn test_binary_default_follows_essential() {
        let item = base_item("Discovery", "Workshop");
        let question = build_question(&item, "phase-1");
        assert_eq!(question.default_value, Some(AnswerValue::Bool(true)));

        let mut off = base_item("Discovery", "Audit");
        off.essential = 0.0;
        off.refresh = 0.0;
        off.transformation = 1.0;
        let question = build_question(&off, "phase-1");
        assert_eq!(question.default_value, Some(AnswerValue::Bool(false)));
    }

    #[test]
    fn test_numeric_default_prefers_essential_then_refresh() {
        let mut item = base_item("Build", "Pages");
        item.essential = 0.0;
        item.refresh = 6.0;
        item.transformation = 10.0;
        let question = build_question(&item, "phase-2");
        assert_eq!(question.question_type, QuestionType::Number);
        assert_eq!(question.default_value, Some(AnswerValue::Number(6.0)));
    }

    #[test]
    fn test_numeric_bounds_from_ranges() {
        let mut item = base_item("Build", "Templates");
        item.ranges = vec![
            PriceRange { min: 1.0, max: Some(3.0), price: 500.0 },
            PriceRange { min: 4.0, max: Some(6.0), price: 600.0 },
        ];
        let question = build_question(&item, "phase-2");
        assert_eq!(question.min, Some(0.0));
        assert_eq!(question.max, Some(6.0));

        // An unbounded top bracket leaves max open
        item.ranges.push(PriceRange { min: 7.0, max: None, price: 700.0 });
        let question = build_question(&item, "phase-2");
        assert_eq!(question.max, None);
    }

    #[test]
    fn test_select_options_from_column() {
        let mut item = base_item("Build", "CMS");
        item.options = vec![
            OptionSpec { label: "Basic".to_string(), price: Some(100.0) },
            OptionSpec { label: "Pro".to_string(), price: None },
        ];
        let question = build_question(&item, "phase-2");

        assert_eq!(question.question_type, QuestionType::Select);
        assert_eq!(question.options.len(), 2);
        assert_eq!(question.options[0].value, "option-1");
        assert_eq!(question.options[0].price, Some(100.0));
        assert_eq!(question.options[1].value, "option-2");
        assert_eq!(
            question.default_value,
            Some(AnswerValue::Text("option-1".to_string()))
        );
    }

    #[test]
    fn test_select_options_synthesized_from_tiers() {
        let mut item = base_item("Build", "Design depth");
        item.question_type = Some(QuestionType::Select);
        item.essential = 0.0; // essential tier not offered
        let question = build_question(&item, "phase-2");

        assert_eq!(question.options.len(), 2);
        assert_eq!(question.options[0].value, "refresh");
        assert_eq!(question.options[0].tier, Some(PricingTier::Refresh));
        assert_eq!(question.options[0].price, Some(1000.0));
        assert_eq!(question.options[1].value, "transformation");
    }

    #[test]
    fn test_add_on_detection() {
        let item = base_item("Launch", "Analytics dashboard (Add-on)");
        let question = build_question(&item, "phase-3");
        assert!(question.is_add_on);
    }

    #[test]
    fn test_shared_variable_roles() {
        let mut defines = base_item("Discovery", "Component count");
        defines.shared_variable = Some("components".to_string());
        let question = build_question(&defines, "phase-1");
        assert_eq!(question.shared_variable.defines(), Some("components"));

        let mut references = base_item("Build", "Component builds");
        references.shared_variable = Some("{components}".to_string());
        let question = build_question(&references, "phase-2");
        assert_eq!(question.shared_variable.references(), Some("components"));
    }
}
