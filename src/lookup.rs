//! Fuzzy lookup from a question back to its config-table row.
//!
//! Question labels are derived from the same table the lookup targets, but
//! the table is edited live, so matching has to tolerate case/whitespace
//! drift and punctuation changes. Three stages, strictest first:
//! exact -> substring -> punctuation-normalized.

use crate::models::{PricingConfig, PricingItem};

/// Find the pricing item backing a question, by phase name and item label
///
/// Returns None when no stage matches; the caller decides between skipping
/// the question and falling back to an estimate.
pub fn find_pricing_item<'a>(
    config: &'a PricingConfig,
    phase: &str,
    label: &str,
) -> Option<&'a PricingItem> {
    let phase_key = normalize(phase);
    let label_key = normalize(label);

    // Stage 1: exact match on normalized phase + label
    if let Some(found) = config
        .items
        .iter()
        .find(|item| normalize(&item.phase) == phase_key && normalize(&item.item) == label_key)
    {
        return Some(found);
    }

    // Stage 2: substring match in either direction
    if let Some(found) = config.items.iter().find(|item| {
        let item_key = normalize(&item.item);
        normalize(&item.phase) == phase_key
            && (item_key.contains(&label_key) || label_key.contains(&item_key))
    }) {
        return Some(found);
    }

    // Stage 3: strip punctuation, collapse whitespace, then substring again
    let label_fuzzy = strip_punctuation(&label_key);
    config.items.iter().find(|item| {
        let item_fuzzy = strip_punctuation(&normalize(&item.item));
        normalize(&item.phase) == phase_key
            && (item_fuzzy == label_fuzzy
                || item_fuzzy.contains(&label_fuzzy)
                || label_fuzzy.contains(&item_fuzzy))
    })
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

fn strip_punctuation(s: &str) -> String {
    let stripped: String = s
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
