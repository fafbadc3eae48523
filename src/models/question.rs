use serde::{Deserialize, Serialize};

/// Input types a derived question can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Binary,
    Select,
    Number,
    Range,
    Text,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Binary => "binary",
            QuestionType::Select => "select",
            QuestionType::Number => "number",
            QuestionType::Range => "range",
            QuestionType::Text => "text",
        }
    }

    /// Whether answers to this type carry a quantity
    pub fn is_numeric(&self) -> bool {
        matches!(self, QuestionType::Number | QuestionType::Range)
    }
}

impl std::str::FromStr for QuestionType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "binary" => Ok(QuestionType::Binary),
            "select" => Ok(QuestionType::Select),
            "number" => Ok(QuestionType::Number),
            "range" => Ok(QuestionType::Range),
            "text" => Ok(QuestionType::Text),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Service tiers; derived from answers, never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingTier {
    Essential,
    Refresh,
    Transformation,
}

impl PricingTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingTier::Essential => "essential",
            PricingTier::Refresh => "refresh",
            PricingTier::Transformation => "transformation",
        }
    }
}

impl std::fmt::Display for PricingTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a question participates in shared-variable linking
///
/// Exactly one variant holds per question: it defines a named variable,
/// reads one, or is an ordinary question.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "role", content = "name")]
pub enum SharedVariableRole {
    #[default]
    None,
    /// This question's answer is the single source of truth for the variable
    Defines(String),
    /// This question displays the variable's value and takes no answer of its own
    References(String),
}

impl SharedVariableRole {
    /// Parse a Shared Variable cell: `{name}` reads a variable, a bare name defines one
    pub fn from_cell(cell: &str) -> Self {
        let cell = cell.trim();
        if cell.is_empty() {
            return SharedVariableRole::None;
        }
        if let Some(inner) = cell.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            let inner = inner.trim();
            if inner.is_empty() {
                return SharedVariableRole::None;
            }
            return SharedVariableRole::References(inner.to_string());
        }
        SharedVariableRole::Defines(cell.to_string())
    }

    pub fn defines(&self) -> Option<&str> {
        match self {
            SharedVariableRole::Defines(name) => Some(name),
            _ => None,
        }
    }

    pub fn references(&self) -> Option<&str> {
        match self {
            SharedVariableRole::References(name) => Some(name),
            _ => None,
        }
    }
}

/// A value a user can answer with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl AnswerValue {
    /// Truthiness used for binary contributions: false/0/"" contribute nothing
    pub fn is_truthy(&self) -> bool {
        match self {
            AnswerValue::Bool(b) => *b,
            AnswerValue::Number(n) => *n != 0.0,
            AnswerValue::Text(s) => !s.trim().is_empty(),
        }
    }

    /// Numeric reading of the value; text parses leniently, bools map to 0/1
    pub fn as_quantity(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(n) => Some(*n),
            AnswerValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            AnswerValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// A user's response to one question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    pub value: AnswerValue,
}

impl Answer {
    pub fn new(question_id: impl Into<String>, value: AnswerValue) -> Self {
        Self {
            question_id: question_id.into(),
            value,
        }
    }
}

/// One choice of a select question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    /// Stable answer value ("option-1", or a tier name for synthesized options)
    pub value: String,
    /// Display label
    pub label: String,
    /// Tier this option aligns with, when synthesized from tier columns
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<PricingTier>,
    /// Explicit price for choosing this option
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// Per-tier default magnitudes carried over from the config row,
/// used to pre-populate answers when a tier is chosen up front
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierValues {
    pub essential: f64,
    pub refresh: f64,
    pub transformation: f64,
}

impl TierValues {
    pub fn for_tier(&self, tier: PricingTier) -> f64 {
        match tier {
            PricingTier::Essential => self.essential,
            PricingTier::Refresh => self.refresh,
            PricingTier::Transformation => self.transformation,
        }
    }
}

/// A typed question derived from one pricing item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Deterministic id: phase order + slug of the label
    pub id: String,
    /// Item label from the config table
    pub label: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub phase_id: String,
    /// Choices, present for select questions only
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub options: Vec<QuestionOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<AnswerValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    pub required: bool,
    /// Reported separately from the phase subtotal when priced
    pub is_add_on: bool,
    /// Tier magnitudes for pre-population
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier_values: Option<TierValues>,
    /// Shared-variable participation
    #[serde(default, skip_serializing_if = "is_role_none")]
    pub shared_variable: SharedVariableRole,
}

fn is_role_none(role: &SharedVariableRole) -> bool {
    *role == SharedVariableRole::None
}

impl Question {
    /// The option a given answer value selects, if any
    pub fn selected_option(&self, value: &AnswerValue) -> Option<&QuestionOption> {
        let text = value.as_text()?;
        self.options.iter().find(|opt| opt.value == text)
    }
}

/// An ordered group of questions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub id: String,
    pub name: String,
    /// 1-based position; the first phase is always required
    pub order: u32,
    pub is_required: bool,
    pub questions: Vec<Question>,
}
