//! Pure markup resolution logic.
//!
//! No IO in this module: callers load the candidate rules and the
//! product, then ask for a quote. Keeping the arithmetic pure makes the
//! pricing matrix testable without a database.

use rust_decimal::Decimal;

use crate::models::{MarkupRule, PriceQuote, Product, RuleScope};

/// Whether a rule applies to the given product.
///
/// Inactive rules never match. Non-global rules match only when their
/// `target_id` equals the product's corresponding id.
pub fn rule_matches(rule: &MarkupRule, product: &Product) -> bool {
    if !rule.is_active {
        return false;
    }

    match rule.scope {
        RuleScope::Global => true,
        RuleScope::Brand => rule.target_id.is_some() && rule.target_id == product.brand_id,
        RuleScope::Manufacturer => {
            rule.target_id.is_some() && rule.target_id == product.manufacturer_id
        }
        RuleScope::Category => rule.target_id.is_some() && rule.target_id == product.category_id,
    }
}

/// Pick the winning rule: highest priority first, oldest rule on ties.
///
/// The tie-break is part of the pricing contract so that two rules with
/// equal priority resolve the same way on every node and every run.
pub fn select_rule<'a>(rules: &'a [MarkupRule], product: &Product) -> Option<&'a MarkupRule> {
    rules
        .iter()
        .filter(|r| rule_matches(r, product))
        .min_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| a.created_at.cmp(&b.created_at))
        })
}

/// Clamp a price into the optional [min, max] window.
///
/// Min is applied first, then max: when the bounds are misconfigured
/// (min > max) the max bound wins.
fn clamp(price: Decimal, min: Option<Decimal>, max: Option<Decimal>) -> Decimal {
    let mut price = price;
    if let Some(min) = min {
        if price < min {
            price = min;
        }
    }
    if let Some(max) = max {
        if price > max {
            price = max;
        }
    }
    price
}

fn markup(cost: Decimal, percent: Decimal) -> Decimal {
    use rust_decimal::RoundingStrategy;

    let factor = Decimal::ONE + percent / Decimal::ONE_HUNDRED;
    (cost * factor).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Resolve the B2B and retail price for a product.
///
/// - No cost or no matching rule yields zero computed prices.
/// - Computed price is `cost * (1 + percent/100)`, clamped per channel.
/// - A manual price on the product replaces the computed price
///   unconditionally, including the zero cases.
pub fn compute_price(product: &Product, rules: &[MarkupRule]) -> PriceQuote {
    let rule = select_rule(rules, product);

    let (mut b2b_price, mut retail_price) = match (product.cost, rule) {
        (Some(cost), Some(rule)) => {
            let b2b = clamp(
                markup(cost, rule.b2b_markup_percent),
                rule.min_b2b_price,
                rule.max_b2b_price,
            );
            let retail = clamp(
                markup(cost, rule.retail_markup_percent),
                rule.min_retail_price,
                rule.max_retail_price,
            );
            (b2b, retail)
        }
        _ => (Decimal::ZERO, Decimal::ZERO),
    };

    if let Some(manual) = product.manual_b2b_price {
        b2b_price = manual;
    }
    if let Some(manual) = product.manual_retail_price {
        retail_price = manual;
    }

    PriceQuote {
        b2b_price,
        retail_price,
        rule_id: rule.map(|r| r.id),
    }
}
