//! Pure equipment totals aggregation.
//!
//! Order-independent Decimal reduction over the line items; no IO.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{EquipmentLineItem, EquipmentTotals, LineItemKind};

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Aggregate an equipment list into per-category subtotals, margins and
/// the grand total.
///
/// Per line: `subtotal = quantity * unit_price`, `margin = subtotal *
/// margin_percent / 100`, rounded to cents. Addition commutes, so the
/// result does not depend on the order of the items.
pub fn compute_totals(items: &[EquipmentLineItem]) -> EquipmentTotals {
    let mut totals = EquipmentTotals::default();

    for item in items {
        let subtotal = Decimal::from(item.quantity) * item.unit_price;
        let margin = round_money(subtotal * item.margin_percent / Decimal::ONE_HUNDRED);

        match item.kind {
            LineItemKind::Product => {
                totals.products_subtotal += subtotal;
                totals.products_margin += margin;
            }
            LineItemKind::Service => {
                totals.services_subtotal += subtotal;
                totals.services_margin += margin;
            }
        }
    }

    totals.products_subtotal = round_money(totals.products_subtotal);
    totals.services_subtotal = round_money(totals.services_subtotal);
    totals.products_total = totals.products_subtotal + totals.products_margin;
    totals.services_total = totals.services_subtotal + totals.services_margin;
    totals.grand_total = totals.products_total + totals.services_total;

    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn item(kind: LineItemKind, quantity: u32, unit_price: &str, margin: &str) -> EquipmentLineItem {
        EquipmentLineItem {
            kind,
            description: "line".to_string(),
            quantity,
            unit_price: dec(unit_price),
            margin_percent: dec(margin),
        }
    }

    #[test]
    fn empty_list_is_all_zero() {
        let totals = compute_totals(&[]);

        assert_eq!(totals, EquipmentTotals::default());
        assert_eq!(totals.grand_total, Decimal::ZERO);
    }

    #[test]
    fn products_and_services_aggregate_separately() {
        // Product: 1 x 100 with 10% margin = 110; service: 1 x 100 flat = 100
        let items = vec![
            item(LineItemKind::Product, 1, "100", "10"),
            item(LineItemKind::Service, 1, "100", "0"),
        ];

        let totals = compute_totals(&items);

        assert_eq!(totals.products_subtotal, dec("100.00"));
        assert_eq!(totals.products_margin, dec("10.00"));
        assert_eq!(totals.products_total, dec("110.00"));
        assert_eq!(totals.services_total, dec("100.00"));
        assert_eq!(totals.grand_total, dec("210.00"));
    }

    #[test]
    fn quantity_multiplies_unit_price() {
        let items = vec![item(LineItemKind::Product, 4, "25.50", "0")];

        let totals = compute_totals(&items);

        assert_eq!(totals.products_subtotal, dec("102.00"));
        assert_eq!(totals.grand_total, dec("102.00"));
    }

    #[test]
    fn totals_are_order_independent() {
        let mut items = vec![
            item(LineItemKind::Product, 3, "19.99", "12"),
            item(LineItemKind::Service, 2, "85.00", "0"),
            item(LineItemKind::Product, 1, "1249.00", "8"),
            item(LineItemKind::Service, 10, "7.25", "25"),
        ];

        let forward = compute_totals(&items);
        items.reverse();
        let reversed = compute_totals(&items);

        assert_eq!(forward, reversed);
    }

    #[test]
    fn margin_rounds_to_cents() {
        // 3 x 19.99 = 59.97, 12% = 7.1964 -> 7.20
        let items = vec![item(LineItemKind::Product, 3, "19.99", "12")];

        let totals = compute_totals(&items);

        assert_eq!(totals.products_margin, dec("7.20"));
        assert_eq!(totals.products_total, dec("67.17"));
    }

    #[test]
    fn fractional_margin_percent() {
        let items = vec![item(LineItemKind::Service, 1, "200", "7.5")];

        let totals = compute_totals(&items);

        assert_eq!(totals.services_margin, dec("15.00"));
        assert_eq!(totals.services_total, dec("215.00"));
    }
}
