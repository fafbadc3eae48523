//! Current-configuration handle and answer garbage collection.
//!
//! The configuration is refreshed from outside (file, HTTP, sheet export)
//! on whatever cadence the caller chooses. A swap replaces the whole
//! immutable snapshot, so an in-flight calculation sees either the old
//! table or the new one, never a half-updated item list.

use crate::models::{Answer, Phase, PricingConfig};
use arc_swap::ArcSwapOption;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Shared handle to the current pricing configuration
///
/// Starts empty; pricing falls back to estimates until the first swap.
#[derive(Debug, Default)]
pub struct ConfigStore {
    current: ArcSwapOption<PricingConfig>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self {
            current: ArcSwapOption::empty(),
        }
    }

    /// Atomically replace the current snapshot
    pub fn swap(&self, config: PricingConfig) {
        tracing::info!(items = config.len(), "pricing config swapped");
        self.current.store(Some(Arc::new(config)));
    }

    /// The current snapshot, if one has been loaded
    pub fn load(&self) -> Option<Arc<PricingConfig>> {
        self.current.load_full()
    }

    /// Drop the current snapshot (forces the estimate fallback)
    pub fn clear(&self) {
        self.current.store(None);
    }

    pub fn is_loaded(&self) -> bool {
        self.current.load().is_some()
    }
}

/// The set of question ids a schema currently defines
pub fn valid_question_ids(phases: &[Phase]) -> HashSet<String> {
    phases
        .iter()
        .flat_map(|phase| phase.questions.iter().map(|q| q.id.clone()))
        .collect()
}

/// Remove answers whose question no longer exists in the schema
///
/// Run after every config reload so ghost answers cannot resurface as
/// priced items. Returns how many answers were removed.
pub fn prune_answers(answers: &mut HashMap<String, Answer>, phases: &[Phase]) -> usize {
    let valid = valid_question_ids(phases);
    let before = answers.len();
    answers.retain(|id, _| valid.contains(id));
    let removed = before - answers.len();
    if removed > 0 {
        tracing::info!(removed, "pruned answers for questions no longer in config");
    }
    removed
}
