//! Pricing
//!
//! Pure price-breakdown calculations for a single order line. Everything here
//! is deterministic over its inputs: no I/O, no clock, no shared state.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    promos::{PromoCode, PromoKind},
    quantity::Quantity,
};

/// Errors that can occur while deriving a price breakdown.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Unit price times quantity left the representable minor-unit range.
    #[error("subtotal exceeds the representable money range")]
    SubtotalOverflow,

    /// A promo amount or gate is in a different currency than the order.
    #[error("promo currency {promo} does not match order currency {order}")]
    CurrencyMismatch {
        /// Currency of the order line.
        order: &'static str,
        /// Currency configured on the promo.
        promo: &'static str,
    },

    /// An applied code is missing from the registry used for the breakdown.
    #[error("promo code {0} is not present in the registry")]
    UnknownCode(String),

    /// Wrapped money arithmetic error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates the subtotal of an order line: unit price times quantity.
///
/// Quantity clamping is not performed here; [`Quantity`] already guarantees
/// the `1..=99` range by construction.
///
/// # Errors
///
/// - [`PricingError::SubtotalOverflow`]: the multiplication left the minor-unit range.
pub fn line_subtotal<'a>(
    unit_price: Money<'a, Currency>,
    quantity: Quantity,
) -> Result<Money<'a, Currency>, PricingError> {
    let subtotal_minor = unit_price
        .to_minor_units()
        .checked_mul(i64::from(quantity.get()))
        .ok_or(PricingError::SubtotalOverflow)?;

    Ok(Money::from_minor(subtotal_minor, unit_price.currency()))
}

/// Calculates the monetary discount a promo contributes at a given subtotal.
///
/// With no promo the discount is zero. A gated promo contributes zero while
/// the subtotal is at or below its gate; the promo still counts as "applied"
/// from a display perspective, which is deliberate. Percent discounts are
/// rounded to the nearest minor unit, amount-off discounts never exceed the
/// subtotal, and the result is always in `0..=subtotal`.
///
/// # Errors
///
/// - [`PricingError::PercentConversion`]: percentage math overflowed.
/// - [`PricingError::CurrencyMismatch`]: the promo's amount or gate is in a
///   different currency than the subtotal.
pub fn promo_discount<'a>(
    subtotal: Money<'a, Currency>,
    promo: Option<&PromoCode<'a>>,
) -> Result<Money<'a, Currency>, PricingError> {
    let currency = subtotal.currency();

    let Some(promo) = promo else {
        return Ok(Money::from_minor(0, currency));
    };

    let subtotal_minor = subtotal.to_minor_units();

    if let Some(gate) = promo.min_subtotal() {
        ensure_same_currency(&subtotal, gate)?;

        if subtotal_minor <= gate.to_minor_units() {
            return Ok(Money::from_minor(0, currency));
        }
    }

    let discount_minor = match promo.kind() {
        PromoKind::Percent(rate) => percent_of_minor(rate, subtotal_minor)?,
        PromoKind::AmountOff(amount) => {
            ensure_same_currency(&subtotal, amount)?;
            amount.to_minor_units()
        }
    };

    // The cap keeps the invariant 0 <= discount <= subtotal even for
    // misconfigured promos (negative amounts, rates past 100%).
    let cap = subtotal_minor.max(0);

    Ok(Money::from_minor(discount_minor.clamp(0, cap), currency))
}

/// Calculates the order total: subtotal minus discount, never below zero.
///
/// # Errors
///
/// - [`PricingError::Money`]: the subtraction failed (currency mismatch).
pub fn order_total<'a>(
    subtotal: Money<'a, Currency>,
    discount: Money<'a, Currency>,
) -> Result<Money<'a, Currency>, PricingError> {
    let total = subtotal.sub(discount)?;

    Ok(Money::from_minor(
        0.max(total.to_minor_units()),
        subtotal.currency(),
    ))
}

/// Derived price breakdown for one order line.
///
/// Recomputed on every input change and never stored across changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBreakdown<'a> {
    subtotal: Money<'a, Currency>,
    discount: Money<'a, Currency>,
    total: Money<'a, Currency>,
}

impl<'a> PriceBreakdown<'a> {
    /// Derive the breakdown for a unit price, quantity and optional promo.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if any of the underlying calculations fail.
    pub fn compute(
        unit_price: Money<'a, Currency>,
        quantity: Quantity,
        promo: Option<&PromoCode<'a>>,
    ) -> Result<Self, PricingError> {
        let subtotal = line_subtotal(unit_price, quantity)?;
        let discount = promo_discount(subtotal, promo)?;
        let total = order_total(subtotal, discount)?;

        Ok(Self {
            subtotal,
            discount,
            total,
        })
    }

    /// Unit price times quantity, before any discount.
    #[must_use]
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Monetary discount contributed by the applied promo, if any.
    #[must_use]
    pub fn discount(&self) -> Money<'a, Currency> {
        self.discount
    }

    /// Amount payable: subtotal minus discount, never negative.
    #[must_use]
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Whether the discount line carries a non-zero amount.
    ///
    /// A gated promo can be applied yet inactive; this is how the two are
    /// told apart.
    #[must_use]
    pub fn discount_is_active(&self) -> bool {
        self.discount.to_minor_units() > 0
    }
}

/// Calculate a percentage of an amount in minor units, rounded to the
/// nearest minor unit (midpoint away from zero).
///
/// # Errors
///
/// Returns [`PricingError::PercentConversion`] if the calculation overflows
/// or cannot be safely represented.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, PricingError> {
    let minor = Decimal::from_i64(minor).ok_or(PricingError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // decimal_percentage doesn't expose the underlying Decimal
        .checked_mul(minor)
        .ok_or(PricingError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::PercentConversion)
}

/// Surface a currency mismatch between the order and a promo amount.
fn ensure_same_currency(
    subtotal: &Money<'_, Currency>,
    promo_amount: &Money<'_, Currency>,
) -> Result<(), PricingError> {
    if subtotal.currency() == promo_amount.currency() {
        Ok(())
    } else {
        Err(PricingError::CurrencyMismatch {
            order: subtotal.currency().iso_alpha_code,
            promo: promo_amount.currency().iso_alpha_code,
        })
    }
}
