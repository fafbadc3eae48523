//! Range-based pricing: parsing the bracket grammar and resolving a
//! quantity to its per-unit price.
//!
//! Grammar (comma-separated tokens): `1-3:500`, `4-6:600`, `7+:700`,
//! `1:500` (exact single quantity). Tokens parse independently; a bad
//! token is skipped with a warning and the rest of the cell still loads.

use crate::models::{PriceRange, PricingItem};
use crate::warnings::ParseWarnings;
use regex::Regex;
use std::sync::OnceLock;

static UNBOUNDED_PATTERN: OnceLock<Regex> = OnceLock::new();
static BOUNDED_PATTERN: OnceLock<Regex> = OnceLock::new();

fn unbounded_pattern() -> &'static Regex {
    // "7+:700" or "6+ : 200"
    UNBOUNDED_PATTERN.get_or_init(|| Regex::new(r"^(\d+)\+\s*:\s*(\d+(?:\.\d+)?)$").unwrap())
}

fn bounded_pattern() -> &'static Regex {
    // "1-3:500" or "1:500" (single quantity)
    BOUNDED_PATTERN.get_or_init(|| Regex::new(r"^(\d+)(?:-(\d+))?\s*:\s*(\d+(?:\.\d+)?)$").unwrap())
}

/// Parse a Ranges cell into sorted price brackets
///
/// Returns an empty vec for a blank cell. Unparseable tokens are skipped
/// and reported through `warnings`.
pub fn parse_ranges(item: &str, cell: &str, warnings: &mut ParseWarnings) -> Vec<PriceRange> {
    if cell.trim().is_empty() {
        return Vec::new();
    }

    let mut ranges = Vec::new();

    for token in cell.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        // Unbounded form must be tried first: "7+:700"
        if let Some(caps) = unbounded_pattern().captures(token) {
            let min: f64 = caps[1].parse().unwrap_or(0.0);
            let price: f64 = caps[2].parse().unwrap_or(0.0);
            ranges.push(PriceRange {
                min,
                max: None,
                price,
            });
            continue;
        }

        if let Some(caps) = bounded_pattern().captures(token) {
            let min: f64 = caps[1].parse().unwrap_or(0.0);
            // A single number ("1:500") means exactly that quantity
            let max = caps
                .get(2)
                .map(|m| m.as_str().parse().unwrap_or(min))
                .unwrap_or(min);
            let price: f64 = caps[3].parse().unwrap_or(0.0);
            ranges.push(PriceRange {
                min,
                max: Some(max),
                price,
            });
            continue;
        }

        tracing::warn!(item, token, "could not parse range token, skipping");
        warnings.add_bad_range_token(item, token);
    }

    ranges.sort_by(|a, b| a.min.partial_cmp(&b.min).unwrap_or(std::cmp::Ordering::Equal));
    ranges
}

/// Per-unit price of an item at a given quantity
///
/// Without ranges this is the flat unit cost. With ranges the brackets act
/// as a monotonic ladder: a quantity below the lowest bracket clamps to the
/// lowest price, a quantity above every bracket degrades to the highest.
pub fn unit_price_for(item: &PricingItem, quantity: f64) -> f64 {
    if item.ranges.is_empty() {
        return item.unit_cost;
    }

    for range in &item.ranges {
        if range.contains(quantity) {
            return range.price;
        }
    }

    // Ranges are sorted ascending, so first = bottom of the ladder
    if let Some(first) = item.ranges.first() {
        if quantity < first.min {
            return first.price;
        }
    }

    // Quantity exceeds every defined bracket
    item.ranges[item.ranges.len() - 1].price
}

/// Total price for a quantity: unit price at that quantity times the quantity
pub fn total_for(item: &PricingItem, quantity: f64) -> f64 {
    unit_price_for(item, quantity) * quantity
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_with_ranges(ranges: Vec<PriceRange>) -> PricingItem {
        PricingItem {
            phase: "Build".to_string(),
            item: "Page templates".to_string(),
            unit_cost: 450.0,
            ranges,
            essential: 3.0,
            refresh: 6.0,
            transformation: 10.0,
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

    fn ladder() -> Vec<PriceRange> {
        let mut warnings = ParseWarnings::new();
        let ranges = parse_ranges("Page templates", "1-3:500, 4-6:600, 7+:700", &mut warnings);
        assert!(warnings.is_empty());
        ranges
    }

    #[test]
    fn test_parse_ranges_full_grammar() {
        let ranges = ladder();
        assert_eq!(ranges.len(), 3);
        assert_eq!(ranges[0], PriceRange { min: 1.0, max: Some(3.0), price: 500.0 });
        assert_eq!(ranges[1], PriceRange { min: 4.0, max: Some(6.0), price: 600.0 });
        assert_eq!(ranges[2], PriceRange { min: 7.0, max: None, price: 700.0 });
    }

    #[test]
    fn test_parse_single_quantity_token() {
        let mut warnings = ParseWarnings::new();
        let ranges = parse_ranges("Launch", "1:500", &mut warnings);
        assert_eq!(ranges, vec![PriceRange { min: 1.0, max: Some(1.0), price: 500.0 }]);
    }

    #[test]
    fn test_parse_ranges_sorts_by_min() {
        let mut warnings = ParseWarnings::new();
        let ranges = parse_ranges("Launch", "7+:700, 1-3:500", &mut warnings);
        assert_eq!(ranges[0].min, 1.0);
        assert_eq!(ranges[1].min, 7.0);
    }

    #[test]
    fn test_parse_ranges_skips_bad_token() {
        let mut warnings = ParseWarnings::new();
        let ranges = parse_ranges("Launch", "1-3:500, nonsense, 7+:700", &mut warnings);
        assert_eq!(ranges.len(), 2);
        assert_eq!(warnings.len(), 1);
        assert!(warnings.warnings()[0].message.contains("nonsense"));
    }

    #[test]
    fn test_parse_ranges_blank_cell() {
        let mut warnings = ParseWarnings::new();
        assert!(parse_ranges("Launch", "   ", &mut warnings).is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_unit_price_ladder() {
        let item = item_with_ranges(ladder());
        assert_eq!(unit_price_for(&item, 2.0), 500.0);
        assert_eq!(unit_price_for(&item, 5.0), 600.0);
        assert_eq!(unit_price_for(&item, 10.0), 700.0);
    }

    #[test]
    fn test_unit_price_clamps_below_lowest_bracket() {
        let item = item_with_ranges(ladder());
        assert_eq!(unit_price_for(&item, 0.0), 500.0);
        // Zero quantity still totals zero
        assert_eq!(total_for(&item, 0.0), 0.0);
    }

    #[test]
    fn test_unit_price_without_ranges() {
        let item = item_with_ranges(Vec::new());
        assert_eq!(unit_price_for(&item, 5.0), 450.0);
        assert_eq!(total_for(&item, 5.0), 2250.0);
    }

    #[test]
    fn test_total_above_top_bracket_uses_top_price() {
        let item = item_with_ranges(vec![
            PriceRange { min: 1.0, max: Some(3.0), price: 500.0 },
            PriceRange { min: 4.0, max: Some(6.0), price: 600.0 },
        ]);
        // 8 exceeds every bracket, degrades to the top price
        assert_eq!(unit_price_for(&item, 8.0), 600.0);
        assert_eq!(total_for(&item, 8.0), 4800.0);
    }
}
