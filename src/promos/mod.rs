//! Promo Codes
//!
//! User-entered code strings mapped to discount rules. A code is either a
//! percentage off the subtotal or a fixed amount off, and may carry a
//! minimum-subtotal gate that voids the discount until the order grows past
//! the threshold.

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::Currency};

pub mod registry;
pub mod state;

/// Discount rule attached to a promo code.
#[derive(Debug, Copy, Clone)]
pub enum PromoKind<'a> {
    /// Fraction of the subtotal (e.g. 0.10 for "10% off").
    Percent(Percentage),

    /// Fixed amount off, capped at the subtotal (e.g. "$5 off").
    AmountOff(Money<'a, Currency>),
}

/// A single registry entry: the code a customer types plus its discount rule.
#[derive(Debug, Clone)]
pub struct PromoCode<'a> {
    code: String,
    label: String,
    kind: PromoKind<'a>,
    min_subtotal: Option<Money<'a, Currency>>,
}

impl<'a> PromoCode<'a> {
    /// Create a percentage promo code. The code is stored normalized.
    pub fn percent(code: &str, label: &str, rate: Percentage) -> Self {
        Self {
            code: normalize_code(code).unwrap_or_default(),
            label: label.to_string(),
            kind: PromoKind::Percent(rate),
            min_subtotal: None,
        }
    }

    /// Create a fixed amount-off promo code. The code is stored normalized.
    pub fn amount_off(code: &str, label: &str, amount: Money<'a, Currency>) -> Self {
        Self {
            code: normalize_code(code).unwrap_or_default(),
            label: label.to_string(),
            kind: PromoKind::AmountOff(amount),
            min_subtotal: None,
        }
    }

    /// Attach a minimum-subtotal gate. The discount is void while the
    /// subtotal is at or below this amount.
    #[must_use]
    pub fn gated(mut self, min_subtotal: Money<'a, Currency>) -> Self {
        self.min_subtotal = Some(min_subtotal);
        self
    }

    /// Return the normalized code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Return the human-readable label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Return the discount rule.
    pub const fn kind(&self) -> &PromoKind<'a> {
        &self.kind
    }

    /// Return the optional minimum-subtotal gate.
    pub const fn min_subtotal(&self) -> Option<&Money<'a, Currency>> {
        self.min_subtotal.as_ref()
    }
}

/// Normalize user input for registry lookup: trim whitespace and uppercase.
///
/// Returns `None` for input that is blank after trimming, which callers treat
/// as a no-op submit rather than an error.
pub fn normalize_code(input: &str) -> Option<String> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;

    use super::*;

    #[test]
    fn percent_constructor_normalizes_code() {
        let promo = PromoCode::percent("  save10 ", "Save 10%", Percentage::from(0.10));

        assert_eq!(promo.code(), "SAVE10");
        assert_eq!(promo.label(), "Save 10%");
        assert!(matches!(promo.kind(), PromoKind::Percent(_)));
        assert!(promo.min_subtotal().is_none());
    }

    #[test]
    fn amount_off_constructor_stores_amount() {
        let promo = PromoCode::amount_off("WELCOME5", "$5 off", Money::from_minor(5_00, USD));

        assert_eq!(promo.code(), "WELCOME5");
        assert!(matches!(
            promo.kind(),
            PromoKind::AmountOff(amount) if amount.to_minor_units() == 500
        ));
    }

    #[test]
    fn gated_attaches_minimum_subtotal() {
        let promo = PromoCode::percent("SAVE20", "Save 20% (orders > $100)", Percentage::from(0.20))
            .gated(Money::from_minor(100_00, USD));

        assert_eq!(
            promo.min_subtotal().map(Money::to_minor_units),
            Some(10000)
        );
    }

    #[test]
    fn normalize_code_uppercases_and_trims() {
        assert_eq!(normalize_code(" save10 "), Some("SAVE10".to_string()));
        assert_eq!(normalize_code("Save10"), Some("SAVE10".to_string()));
    }

    #[test]
    fn normalize_code_treats_blank_input_as_none() {
        assert_eq!(normalize_code(""), None);
        assert_eq!(normalize_code("   "), None);
        assert_eq!(normalize_code("\t\n"), None);
    }
}
