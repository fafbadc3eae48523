//! Quote assembly: phase pricing plus add-on segregation, the recurring
//! cost schedule for the resolved tier, and a timeline estimate.
//!
//! The recurring-cost and timeline tables are design constants, not part
//! of the configuration table.

use crate::calculator::calculate_pricing;
use crate::models::{
    Answer, OngoingCosts, PackageCost, Phase, PricedLineItem, PricingConfig, PricingTier,
    ProjectType, Quote, RecurringCost,
};
use crate::shared;
use crate::tier::determine_tier;
use chrono::Utc;
use std::collections::HashMap;

/// Recurring hosting/maintenance schedule for a tier
pub fn ongoing_costs(tier: PricingTier) -> OngoingCosts {
    match tier {
        PricingTier::Essential => OngoingCosts {
            hosting: PackageCost {
                package: "Bronze".to_string(),
                monthly: 120.0,
                annual: 1440.0,
            },
            maintenance: PackageCost {
                package: "Essential".to_string(),
                monthly: 280.0,
                annual: 3360.0,
            },
            staging: None,
            total_monthly: 400.0,
            total_annual: 4800.0,
        },
        PricingTier::Refresh => OngoingCosts {
            hosting: PackageCost {
                package: "Silver".to_string(),
                monthly: 180.0,
                annual: 2160.0,
            },
            maintenance: PackageCost {
                package: "Advanced".to_string(),
                monthly: 395.0,
                annual: 4740.0,
            },
            staging: Some(RecurringCost {
                monthly: 30.0,
                annual: 360.0,
            }),
            total_monthly: 605.0,
            total_annual: 7260.0,
        },
        PricingTier::Transformation => OngoingCosts {
            hosting: PackageCost {
                package: "Gold".to_string(),
                monthly: 240.0,
                annual: 2880.0,
            },
            maintenance: PackageCost {
                package: "Premium".to_string(),
                monthly: 510.0,
                annual: 6120.0,
            },
            staging: Some(RecurringCost {
                monthly: 30.0,
                annual: 360.0,
            }),
            total_monthly: 780.0,
            total_annual: 9360.0,
        },
    }
}

/// Delivery estimate for a tier
pub fn timeline(tier: PricingTier) -> &'static str {
    match tier {
        PricingTier::Essential => "4-6 weeks",
        PricingTier::Refresh => "8-10 weeks",
        PricingTier::Transformation => "14-18 weeks",
    }
}

/// Assemble a complete quote from the current answers
///
/// Shared variables are resolved first, then the selected phases are
/// priced, add-ons are lifted out of their phases, and the recurring
/// schedule is attached. The result is a fresh value; no input is mutated.
pub fn build_quote(
    config: Option<&PricingConfig>,
    project_type: ProjectType,
    answers: &HashMap<String, Answer>,
    phases: &[Phase],
    selected_phase_ids: &[String],
) -> Quote {
    let resolved = shared::resolve(phases, answers);
    let tier = determine_tier(&resolved, phases);
    let mut phase_pricing = calculate_pricing(config, &resolved, phases, selected_phase_ids);

    // Lift add-ons out of their phases, keeping a pointer back
    let mut add_ons: Vec<PricedLineItem> = Vec::new();
    for phase in &mut phase_pricing {
        let (lifted, kept): (Vec<_>, Vec<_>) =
            phase.items.drain(..).partition(|item| item.is_add_on);
        phase.items = kept;
        phase.recompute_subtotal();
        add_ons.extend(lifted.into_iter().map(|mut item| {
            item.phase_id = Some(phase.phase_id.clone());
            item
        }));
    }

    let total = phase_pricing.iter().map(|p| p.subtotal).sum::<f64>()
        + add_ons.iter().map(|item| item.total).sum::<f64>();

    tracing::debug!(tier = tier.as_str(), total, "built quote");

    Quote {
        project_type,
        phases: phase_pricing,
        add_ons,
        ongoing_costs: ongoing_costs(tier),
        tier,
        total,
        timeline: timeline(tier).to_string(),
        created_at: Utc::now(),
    }
}
