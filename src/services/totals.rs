//! Line-item totals with a fixed order of operations.
//!
//! Per line: subtotal = qty * unit_price; discount = subtotal * pct / 100;
//! tax is charged on the discounted amount. Nothing is rounded here; callers
//! round at presentation time only.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// One (quantity, unit price, discount %, tax %) tuple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineInput {
    pub quantity: Decimal,
    pub unit_price: Decimal,
    #[serde(default)]
    pub discount_pct: Decimal,
    #[serde(default)]
    pub tax_pct: Decimal,
}

/// Monetary breakdown for a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineTotals {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Aggregate monetary fields for a document header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DocumentTotals {
    pub subtotal: Decimal,
    pub discount_total: Decimal,
    pub tax_total: Decimal,
    pub grand_total: Decimal,
}

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

fn validate_line(index: usize, line: &LineInput) -> Result<(), ServiceError> {
    if line.quantity < Decimal::ZERO {
        return Err(ServiceError::ValidationError(format!(
            "line {index}: quantity must not be negative"
        )));
    }
    if line.unit_price < Decimal::ZERO {
        return Err(ServiceError::ValidationError(format!(
            "line {index}: unit_price must not be negative"
        )));
    }
    for (field, value) in [
        ("discount_pct", line.discount_pct),
        ("tax_pct", line.tax_pct),
    ] {
        if value < Decimal::ZERO || value > HUNDRED {
            return Err(ServiceError::ValidationError(format!(
                "line {index}: {field} must be between 0 and 100"
            )));
        }
    }
    Ok(())
}

/// Computes one line's breakdown. The caller is responsible for validation.
fn line_totals(line: &LineInput) -> LineTotals {
    let subtotal = line.quantity * line.unit_price;
    let discount = subtotal * line.discount_pct / HUNDRED;
    let taxable = subtotal - discount;
    let tax = taxable * line.tax_pct / HUNDRED;
    LineTotals {
        subtotal,
        discount,
        tax,
        total: taxable + tax,
    }
}

/// Computes the full breakdown per line plus the header aggregate.
///
/// Deterministic: the same lines always produce the same totals, and
/// `grand_total = subtotal - discount_total + tax_total` holds exactly.
pub fn compute(lines: &[LineInput]) -> Result<(Vec<LineTotals>, DocumentTotals), ServiceError> {
    let mut per_line = Vec::with_capacity(lines.len());
    let mut agg = DocumentTotals::default();

    for (index, line) in lines.iter().enumerate() {
        validate_line(index, line)?;
        let totals = line_totals(line);
        agg.subtotal += totals.subtotal;
        agg.discount_total += totals.discount;
        agg.tax_total += totals.tax;
        agg.grand_total += totals.total;
        per_line.push(totals);
    }

    Ok((per_line, agg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rust_decimal_macros::dec;

    fn line(qty: Decimal, price: Decimal, discount: Decimal, tax: Decimal) -> LineInput {
        LineInput {
            quantity: qty,
            unit_price: price,
            discount_pct: discount,
            tax_pct: tax,
        }
    }

    #[test]
    fn purchase_order_scenario() {
        // 3 x 100 @ 10% tax plus 1 x 50 @ 10% discount
        let lines = vec![
            line(dec!(3), dec!(100), dec!(0), dec!(10)),
            line(dec!(1), dec!(50), dec!(10), dec!(0)),
        ];

        let (_, totals) = compute(&lines).unwrap();
        assert_eq!(totals.subtotal, dec!(350));
        assert_eq!(totals.discount_total, dec!(5));
        assert_eq!(totals.tax_total, dec!(30));
        assert_eq!(totals.grand_total, dec!(375));
    }

    #[test]
    fn grand_total_identity_holds() {
        let lines = vec![
            line(dec!(7), dec!(19.99), dec!(12.5), dec!(8.25)),
            line(dec!(2.5), dec!(3.333), dec!(0), dec!(21)),
            line(dec!(1), dec!(0.01), dec!(100), dec!(100)),
        ];

        let (_, totals) = compute(&lines).unwrap();
        assert_eq!(
            totals.grand_total,
            totals.subtotal - totals.discount_total + totals.tax_total
        );
    }

    #[test]
    fn recomputation_is_deterministic() {
        let lines = vec![
            line(dec!(4), dec!(12.75), dec!(5), dec!(7)),
            line(dec!(9), dec!(1.10), dec!(0), dec!(19)),
        ];
        let first = compute(&lines).unwrap().1;
        let second = compute(&lines).unwrap().1;
        assert_eq!(first, second);
    }

    #[test]
    fn discount_applies_before_tax() {
        // 100 - 10% = 90, then 10% tax on 90 = 9
        let (per_line, totals) = compute(&[line(dec!(1), dec!(100), dec!(10), dec!(10))]).unwrap();
        assert_eq!(per_line[0].discount, dec!(10));
        assert_eq!(per_line[0].tax, dec!(9.0));
        assert_eq!(totals.grand_total, dec!(99.0));
    }

    #[test]
    fn empty_line_set_is_zero() {
        let (per_line, totals) = compute(&[]).unwrap();
        assert!(per_line.is_empty());
        assert_eq!(totals.grand_total, Decimal::ZERO);
    }

    #[test]
    fn out_of_range_percentages_are_rejected() {
        let err = compute(&[line(dec!(1), dec!(10), dec!(101), dec!(0))]).unwrap_err();
        assert_matches!(err, ServiceError::ValidationError(msg) => {
            assert!(msg.contains("discount_pct"));
        });

        let err = compute(&[line(dec!(1), dec!(10), dec!(0), dec!(-1))]).unwrap_err();
        assert_matches!(err, ServiceError::ValidationError(msg) => {
            assert!(msg.contains("tax_pct"));
        });
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let err = compute(&[line(dec!(-1), dec!(10), dec!(0), dec!(0))]).unwrap_err();
        assert_matches!(err, ServiceError::ValidationError(_));
    }
}
