//! Shared-variable resolution: one question defines a named value, any
//! number of questions across any phases read it. There is exactly one
//! source of truth per name, enforced by lookup at resolution time rather
//! than by copying values around.

use crate::models::{Answer, AnswerValue, Phase, SharedVariableRole};
use std::collections::HashMap;

/// Current values of all defined shared variables, by name
pub type SharedVariables = HashMap<String, AnswerValue>;

/// Harvest variable values from the answers of defining questions
///
/// Phase order determines precedence if the same name is defined twice;
/// the first defining question wins.
pub fn collect(phases: &[Phase], answers: &HashMap<String, Answer>) -> SharedVariables {
    let mut variables = SharedVariables::new();

    for phase in phases {
        for question in &phase.questions {
            if let SharedVariableRole::Defines(name) = &question.shared_variable {
                if variables.contains_key(name) {
                    tracing::warn!(
                        variable = name.as_str(),
                        question = question.id.as_str(),
                        "shared variable defined more than once, keeping first definition"
                    );
                    continue;
                }
                if let Some(answer) = answers.get(&question.id) {
                    variables.insert(name.clone(), answer.value.clone());
                }
            }
        }
    }

    variables
}

/// Explicit-editor path: overwrite one variable's value directly
pub fn set(variables: &mut SharedVariables, name: &str, value: AnswerValue) {
    variables.insert(name.to_string(), value);
}

/// Whether a question should appear at all
///
/// A referencing question stays hidden until its variable has a value;
/// everything else is always presented.
pub fn is_presented(role: &SharedVariableRole, variables: &SharedVariables) -> bool {
    match role {
        SharedVariableRole::References(name) => variables.contains_key(name),
        _ => true,
    }
}

/// Whether a question takes direct input
///
/// Referencing questions never do: they are informational once their
/// variable is set, hidden before that.
pub fn takes_input(role: &SharedVariableRole) -> bool {
    !matches!(role, SharedVariableRole::References(_))
}

/// Normalize an answer set against a variable map
///
/// - referencing questions get the variable's value substituted (absent
///   while the variable is unset)
/// - defining questions prefer the variable map, so an explicit edit
///   propagates without touching the stored answer
/// - everything else passes through unchanged
pub fn resolve_with(
    phases: &[Phase],
    answers: &HashMap<String, Answer>,
    variables: &SharedVariables,
) -> HashMap<String, Answer> {
    let mut resolved = HashMap::new();

    for phase in phases {
        for question in &phase.questions {
            let value = match &question.shared_variable {
                SharedVariableRole::References(name) => variables.get(name).cloned(),
                SharedVariableRole::Defines(name) => variables
                    .get(name)
                    .cloned()
                    .or_else(|| answers.get(&question.id).map(|a| a.value.clone())),
                SharedVariableRole::None => answers.get(&question.id).map(|a| a.value.clone()),
            };

            if let Some(value) = value {
                resolved.insert(question.id.clone(), Answer::new(question.id.clone(), value));
            }
        }
    }

    resolved
}

/// Normalize an answer set, harvesting variables from the answers themselves
pub fn resolve(phases: &[Phase], answers: &HashMap<String, Answer>) -> HashMap<String, Answer> {
    let variables = collect(phases, answers);
    resolve_with(phases, answers, &variables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PricingConfig, PricingItem};
    use crate::schema::build_phases;

    fn item(phase: &str, label: &str, shared: Option<&str>) -> PricingItem {
        PricingItem {
            phase: phase.to_string(),
            item: label.to_string(),
            unit_cost: 100.0,
            ranges: Vec::new(),
            essential: 2.0,
            refresh: 4.0,
            transformation: 8.0,
            description: None,
            question_type: None,
            options: Vec::new(),
            min: Some(0.0),
            max: None,
            required: false,
            validation: None,
            shared_variable: shared.map(str::to_string),
        }
    }

    fn linked_phases() -> Vec<Phase> {
        let config = PricingConfig::new(vec![
            item("Discovery", "Seat count", Some("seats")),
            item("Build", "Seat licences", Some("{seats}")),
            item("Build", "Training", None),
        ]);
        build_phases(&config)
    }

    fn answer(id: &str, value: AnswerValue) -> (String, Answer) {
        (id.to_string(), Answer::new(id, value))
    }

    #[test]
    fn test_collect_harvests_defining_answers() {
        let phases = linked_phases();
        let answers: HashMap<_, _> =
            [answer("phase-1-seat-count", AnswerValue::Number(5.0))].into();

        let variables = collect(&phases, &answers);
        assert_eq!(variables.get("seats"), Some(&AnswerValue::Number(5.0)));
    }

    #[test]
    fn test_reference_resolves_to_defined_value() {
        let phases = linked_phases();
        let answers: HashMap<_, _> =
            [answer("phase-1-seat-count", AnswerValue::Number(5.0))].into();

        let resolved = resolve(&phases, &answers);
        // The referencing question has no answer of its own, yet resolves
        assert_eq!(
            resolved.get("phase-2-seat-licences").map(|a| &a.value),
            Some(&AnswerValue::Number(5.0))
        );
    }

    #[test]
    fn test_unset_variable_suppresses_reference() {
        let phases = linked_phases();
        let answers: HashMap<_, _> =
            [answer("phase-2-training", AnswerValue::Bool(true))].into();

        let resolved = resolve(&phases, &answers);
        assert!(!resolved.contains_key("phase-2-seat-licences"));

        let variables = collect(&phases, &answers);
        let reference = &phases[1].questions[0].shared_variable;
        assert!(!is_presented(reference, &variables));
    }

    #[test]
    fn test_explicit_edit_propagates_everywhere() {
        let phases = linked_phases();
        let answers: HashMap<_, _> =
            [answer("phase-1-seat-count", AnswerValue::Number(5.0))].into();

        let mut variables = collect(&phases, &answers);
        set(&mut variables, "seats", AnswerValue::Number(9.0));

        let resolved = resolve_with(&phases, &answers, &variables);
        // Both the defining and the referencing question see the edit
        assert_eq!(
            resolved.get("phase-1-seat-count").map(|a| &a.value),
            Some(&AnswerValue::Number(9.0))
        );
        assert_eq!(
            resolved.get("phase-2-seat-licences").map(|a| &a.value),
            Some(&AnswerValue::Number(9.0))
        );
    }

    #[test]
    fn test_referencing_questions_take_no_input() {
        let phases = linked_phases();
        assert!(takes_input(&phases[0].questions[0].shared_variable));
        assert!(!takes_input(&phases[1].questions[0].shared_variable));
    }

    #[test]
    fn test_ordinary_answers_pass_through() {
        let phases = linked_phases();
        let answers: HashMap<_, _> =
            [answer("phase-2-training", AnswerValue::Number(3.0))].into();

        let resolved = resolve(&phases, &answers);
        assert_eq!(
            resolved.get("phase-2-training").map(|a| &a.value),
            Some(&AnswerValue::Number(3.0))
        );
    }
}
