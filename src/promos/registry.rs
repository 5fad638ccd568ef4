//! Promo Registry
//!
//! An immutable lookup table from normalized code to [`PromoCode`]. The
//! registry is injected wherever codes are resolved, so tests and demos can
//! swap in fixture registries without touching global state.

use decimal_percentage::Percentage;
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso};

use crate::promos::{PromoCode, normalize_code};

/// Result of resolving raw user input against the registry.
#[derive(Debug)]
pub enum Lookup<'r, 'a> {
    /// Input was blank after trimming; nothing was looked up.
    Blank,

    /// No promo is registered under the normalized code.
    Unknown(String),

    /// The normalized code matched a registry entry.
    Found(&'r PromoCode<'a>),
}

/// Immutable promo-code lookup table.
#[derive(Debug, Clone, Default)]
pub struct PromoRegistry<'a> {
    codes: FxHashMap<String, PromoCode<'a>>,
}

impl<'a> PromoRegistry<'a> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            codes: FxHashMap::default(),
        }
    }

    /// Create a registry from the given promo codes, keyed by normalized code.
    ///
    /// Later entries with the same code replace earlier ones.
    pub fn with_codes(codes: impl IntoIterator<Item = PromoCode<'a>>) -> Self {
        let codes = codes
            .into_iter()
            .map(|promo| (promo.code().to_string(), promo))
            .collect();

        Self { codes }
    }

    /// The storefront's built-in code set: `SAVE10`, `SAVE20` (orders over
    /// $100) and `WELCOME5`.
    #[must_use]
    pub fn storefront() -> PromoRegistry<'static> {
        PromoRegistry::with_codes([
            PromoCode::percent("SAVE10", "Save 10%", Percentage::from(0.10)),
            PromoCode::percent("SAVE20", "Save 20% (orders > $100)", Percentage::from(0.20))
                .gated(Money::from_minor(100_00, iso::USD)),
            PromoCode::amount_off("WELCOME5", "$5 off", Money::from_minor(5_00, iso::USD)),
        ])
    }

    /// Resolve raw user input: normalize it, then look it up.
    ///
    /// Blank input short-circuits to [`Lookup::Blank`] without touching the
    /// table, so an empty submit is a no-op rather than an error.
    pub fn resolve(&self, input: &str) -> Lookup<'_, 'a> {
        let Some(code) = normalize_code(input) else {
            return Lookup::Blank;
        };

        match self.codes.get(&code) {
            Some(promo) => Lookup::Found(promo),
            None => Lookup::Unknown(code),
        }
    }

    /// Look up an already-normalized code.
    pub fn get(&self, code: &str) -> Option<&PromoCode<'a>> {
        self.codes.get(code)
    }

    /// Iterate over the registered promo codes in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &PromoCode<'a>> {
        self.codes.values()
    }

    /// Number of registered codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Check whether the registry has no codes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
