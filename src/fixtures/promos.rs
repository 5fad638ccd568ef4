//! Promo Fixtures

use decimal_percentage::Percentage;
use rustc_hash::FxHashMap;
use rusty_money::Money;
use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, products::parse_price},
    promos::PromoCode,
};

/// Wrapper for promo codes in YAML
#[derive(Debug, Deserialize)]
pub struct PromosFixture {
    /// Map of fixture key -> promo fixture
    pub promos: FxHashMap<String, PromoFixture>,
}

/// Promo fixture from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromoFixture {
    /// Percentage discount on the subtotal
    Percent {
        /// Code the customer types
        code: String,

        /// Human-readable description
        label: String,

        /// Rate (e.g., "10%" or "0.10")
        rate: String,

        /// Optional minimum-subtotal gate (e.g., "100.00 USD")
        min_subtotal: Option<String>,
    },

    /// Fixed amount off the subtotal
    AmountOff {
        /// Code the customer types
        code: String,

        /// Human-readable description
        label: String,

        /// Amount off (e.g., "5.00 USD")
        amount: String,

        /// Optional minimum-subtotal gate (e.g., "100.00 USD")
        min_subtotal: Option<String>,
    },
}

impl PromoFixture {
    /// Convert to a [`PromoCode`]
    ///
    /// # Errors
    ///
    /// Returns an error if the rate, amount or gate cannot be parsed.
    pub fn try_into_code(self) -> Result<PromoCode<'static>, FixtureError> {
        match self {
            PromoFixture::Percent {
                code,
                label,
                rate,
                min_subtotal,
            } => {
                let rate = parse_percentage(&rate)?;
                let promo = PromoCode::percent(&code, &label, rate);

                attach_gate(promo, min_subtotal.as_deref())
            }
            PromoFixture::AmountOff {
                code,
                label,
                amount,
                min_subtotal,
            } => {
                let (minor, currency) = parse_price(&amount)?;
                let promo = PromoCode::amount_off(
                    &code,
                    &label,
                    Money::from_minor(minor, currency),
                );

                attach_gate(promo, min_subtotal.as_deref())
            }
        }
    }
}

/// Attach an optional parsed gate to a promo code.
fn attach_gate(
    promo: PromoCode<'static>,
    min_subtotal: Option<&str>,
) -> Result<PromoCode<'static>, FixtureError> {
    match min_subtotal {
        None => Ok(promo),
        Some(gate) => {
            let (minor, currency) = parse_price(gate)?;

            Ok(promo.gated(Money::from_minor(minor, currency)))
        }
    }
}

/// Parse percentage string (e.g., "15%" or "0.15") into a `Percentage`
///
/// Accepts two formats:
/// - Percentage format: "15%" for 15%
/// - Decimal format: "0.15" for 15%
///
/// Rates outside `0..=1` (after conversion) are rejected.
///
/// # Errors
///
/// Returns an error if the string cannot be parsed or the rate is out of range.
pub fn parse_percentage(s: &str) -> Result<Percentage, FixtureError> {
    let trimmed = s.trim();

    let value = if let Some(percent_str) = trimmed.strip_suffix('%') {
        // Parse as percentage (e.g., "15%" -> 0.15)
        percent_str
            .trim()
            .parse::<f64>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?
            / 100.0
    } else {
        // Parse as decimal (e.g., "0.15" -> 0.15)
        trimmed
            .parse::<f64>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?
    };

    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(FixtureError::InvalidPercentage(s.to_string()));
    }

    Ok(Percentage::from(value))
}
