use serde::{Deserialize, Serialize};

/// Warning collected while parsing the configuration table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warning {
    /// Warning level ("warning" or "info")
    pub level: String,
    /// Message describing what was skipped or adjusted
    pub message: String,
}

/// Collection of non-fatal parse warnings
///
/// Malformed cells never abort a load; they are skipped, logged, and
/// reported here so a config editor can surface them.
#[derive(Debug, Clone, Default)]
pub struct ParseWarnings {
    warnings: Vec<Warning>,
}

impl ParseWarnings {
    /// Create a new empty warnings collection
    pub fn new() -> Self {
        Self {
            warnings: Vec::new(),
        }
    }

    /// Add a warning about a range token that did not match the grammar
    pub fn add_bad_range_token(&mut self, item: &str, token: &str) {
        self.warnings.push(Warning {
            level: "warning".to_string(),
            message: format!("Could not parse range token '{}' for item '{}', skipping", token, item),
        });
    }

    /// Add a warning about a cell that did not parse as a number
    pub fn add_bad_number(&mut self, item: &str, column: &str, value: &str) {
        self.warnings.push(Warning {
            level: "warning".to_string(),
            message: format!(
                "Value '{}' in column '{}' for item '{}' is not a number, using default",
                value, column, item
            ),
        });
    }

    /// Add a custom warning
    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(Warning {
            level: "warning".to_string(),
            message,
        });
    }

    /// Add an informational message
    pub fn add_info(&mut self, message: String) {
        self.warnings.push(Warning {
            level: "info".to_string(),
            message,
        });
    }

    /// Check if there are any warnings
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Get the number of warnings
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// Get all warnings
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Merge another set of warnings into this one
    pub fn merge(&mut self, other: ParseWarnings) {
        self.warnings.extend(other.warnings);
    }
}
