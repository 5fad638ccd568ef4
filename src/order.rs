//! Order Lines
//!
//! The ephemeral per-checkout state: one product, a clamped quantity and the
//! promo-application state. The UI layer owns this value, dispatches user
//! intents at it and renders the breakdown it derives; nothing here is
//! persisted across sessions.

use rusty_money::{Money, iso::Currency};

use crate::{
    pricing::{PriceBreakdown, PricingError},
    products::ProductKey,
    promos::{PromoCode, registry::PromoRegistry, state::PromoState},
    quantity::Quantity,
};

/// Order line for an open checkout view.
///
/// Created when the view opens (quantity 1, no code applied) and discarded
/// when it closes. All state transitions run to completion inside a single
/// event handler; the breakdown is recomputed from scratch on every change.
#[derive(Debug, Clone)]
pub struct OrderLine<'a> {
    product: ProductKey,
    unit_price: Money<'a, Currency>,
    quantity: Quantity,
    promo: PromoState,
}

impl<'a> OrderLine<'a> {
    /// Open a new order line for a product: quantity 1, no promo.
    #[must_use]
    pub fn new(product: ProductKey, unit_price: Money<'a, Currency>) -> Self {
        Self {
            product,
            unit_price,
            quantity: Quantity::default(),
            promo: PromoState::default(),
        }
    }

    /// The product being bought.
    #[must_use]
    pub fn product(&self) -> ProductKey {
        self.product
    }

    /// The unit price.
    #[must_use]
    pub fn unit_price(&self) -> Money<'a, Currency> {
        self.unit_price
    }

    /// The selected quantity.
    #[must_use]
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// The current promo-application state.
    pub fn promo(&self) -> &PromoState {
        &self.promo
    }

    /// Raise the quantity by one, staying at the upper bound once reached.
    pub fn increment_quantity(&mut self) {
        self.quantity = self.quantity.increment();
    }

    /// Lower the quantity by one, staying at the lower bound once reached.
    pub fn decrement_quantity(&mut self) {
        self.quantity = self.quantity.decrement();
    }

    /// Replace the quantity outright. Promo state is untouched; a gated
    /// discount may flip between active and inactive when the breakdown is
    /// next derived.
    pub fn set_quantity(&mut self, quantity: Quantity) {
        self.quantity = quantity;
    }

    /// Submit promo-code input against the registry (see [`PromoState::submit`]).
    pub fn submit_code(&mut self, registry: &PromoRegistry<'a>, input: &str) {
        self.promo.submit(registry, input);
    }

    /// Remove the applied code and clear any error display.
    pub fn remove_code(&mut self) {
        self.promo.remove();
    }

    /// Resolve the applied code, if any, against the given registry.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::UnknownCode`] if the applied code is missing
    /// from the registry (possible only when the line is re-priced against a
    /// different registry than it was applied through).
    pub fn applied_promo<'r>(
        &self,
        registry: &'r PromoRegistry<'a>,
    ) -> Result<Option<&'r PromoCode<'a>>, PricingError> {
        match self.promo.applied_code() {
            None => Ok(None),
            Some(code) => registry
                .get(code)
                .map(Some)
                .ok_or_else(|| PricingError::UnknownCode(code.to_string())),
        }
    }

    /// Derive the current price breakdown against the given registry.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the applied code cannot be resolved or
    /// any pricing calculation fails.
    pub fn breakdown(&self, registry: &PromoRegistry<'a>) -> Result<PriceBreakdown<'a>, PricingError> {
        let promo = self.applied_promo(registry)?;

        PriceBreakdown::compute(self.unit_price, self.quantity, promo)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;

    fn open_line(unit_minor: i64) -> OrderLine<'static> {
        OrderLine::new(ProductKey::default(), Money::from_minor(unit_minor, USD))
    }

    #[test]
    fn new_line_defaults_to_quantity_one_and_no_promo() {
        let line = open_line(25_00);

        assert_eq!(line.quantity(), Quantity::MIN);
        assert_eq!(line.promo(), &PromoState::NoPromo);
        assert_eq!(line.unit_price(), Money::from_minor(25_00, USD));
    }

    #[test]
    fn quantity_transitions_clamp_at_the_bounds() {
        let mut line = open_line(25_00);

        line.decrement_quantity();
        assert_eq!(line.quantity(), Quantity::MIN);

        line.set_quantity(Quantity::MAX);
        line.increment_quantity();
        assert_eq!(line.quantity(), Quantity::MAX);
    }

    #[test]
    fn breakdown_without_promo_matches_subtotal() -> TestResult {
        let registry = PromoRegistry::storefront();
        let mut line = open_line(25_00);

        line.set_quantity(Quantity::new(4));

        let breakdown = line.breakdown(&registry)?;

        assert_eq!(breakdown.subtotal(), Money::from_minor(100_00, USD));
        assert_eq!(breakdown.discount(), Money::from_minor(0, USD));
        assert_eq!(breakdown.total(), Money::from_minor(100_00, USD));

        Ok(())
    }

    #[test]
    fn breakdown_reflects_the_applied_code() -> TestResult {
        let registry = PromoRegistry::storefront();
        let mut line = open_line(25_00);

        line.set_quantity(Quantity::new(4));
        line.submit_code(&registry, "welcome5");

        let breakdown = line.breakdown(&registry)?;

        assert_eq!(breakdown.discount(), Money::from_minor(5_00, USD));
        assert_eq!(breakdown.total(), Money::from_minor(95_00, USD));

        Ok(())
    }

    #[test]
    fn quantity_change_flips_a_gated_discount_without_touching_promo_state() -> TestResult {
        let registry = PromoRegistry::storefront();
        let mut line = open_line(50_00);

        line.submit_code(&registry, "SAVE20");

        // One unit: $50.00 subtotal sits below the $100.00 gate.
        let below = line.breakdown(&registry)?;
        assert_eq!(below.discount(), Money::from_minor(0, USD));
        assert_eq!(line.promo().applied_code(), Some("SAVE20"));

        // Three units: $150.00 subtotal clears the gate with no promo action.
        line.increment_quantity();
        line.increment_quantity();

        let above = line.breakdown(&registry)?;
        assert_eq!(above.discount(), Money::from_minor(30_00, USD));
        assert_eq!(line.promo().applied_code(), Some("SAVE20"));

        Ok(())
    }

    #[test]
    fn invalid_code_revokes_the_discount_but_not_the_session() -> TestResult {
        let registry = PromoRegistry::storefront();
        let mut line = open_line(25_00);

        line.submit_code(&registry, "SAVE10");
        line.submit_code(&registry, "BOGUS");

        assert_eq!(line.promo().rejected_input(), Some("BOGUS"));

        let breakdown = line.breakdown(&registry)?;
        assert_eq!(breakdown.discount(), Money::from_minor(0, USD));

        Ok(())
    }

    #[test]
    fn remove_code_restores_the_undiscounted_total() -> TestResult {
        let registry = PromoRegistry::storefront();
        let mut line = open_line(25_00);

        line.submit_code(&registry, "SAVE10");
        line.remove_code();

        assert_eq!(line.promo(), &PromoState::NoPromo);

        let breakdown = line.breakdown(&registry)?;
        assert_eq!(breakdown.total(), breakdown.subtotal());

        Ok(())
    }

    #[test]
    fn breakdown_against_a_registry_missing_the_code_errors() {
        let registry = PromoRegistry::storefront();
        let mut line = open_line(25_00);

        line.submit_code(&registry, "SAVE10");

        let empty = PromoRegistry::new();
        let result = line.breakdown(&empty);

        assert!(matches!(
            result,
            Err(PricingError::UnknownCode(code)) if code == "SAVE10"
        ));
    }
}
