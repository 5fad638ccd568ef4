//! Promo Application State
//!
//! The per-checkout promo state machine. Submitting input moves between
//! three states; none of them is fatal, and `Invalid` is display-only.

use crate::promos::registry::{Lookup, PromoRegistry};

/// Promo-application state for one checkout session.
///
/// A failed attempt revokes any previously applied code rather than leaving
/// it silently active; a blank submit changes nothing at all.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PromoState {
    /// No code applied.
    #[default]
    NoPromo,

    /// A recognised code is applied (stored normalized). A gated code stays
    /// in this state even while its discount is void.
    Applied(String),

    /// The last submitted input matched nothing; holds the normalized
    /// attempt for display.
    Invalid(String),
}

impl PromoState {
    /// Submit raw user input against the registry.
    ///
    /// Blank input leaves the current state (and any error display)
    /// untouched. A match moves to [`PromoState::Applied`]; a miss moves to
    /// [`PromoState::Invalid`] and drops any previously applied code.
    pub fn submit(&mut self, registry: &PromoRegistry<'_>, input: &str) {
        match registry.resolve(input) {
            Lookup::Blank => {}
            Lookup::Found(promo) => *self = PromoState::Applied(promo.code().to_string()),
            Lookup::Unknown(attempted) => *self = PromoState::Invalid(attempted),
        }
    }

    /// Explicit "remove" action: back to [`PromoState::NoPromo`], clearing
    /// any error display.
    pub fn remove(&mut self) {
        *self = PromoState::NoPromo;
    }

    /// The currently applied code, if any.
    pub fn applied_code(&self) -> Option<&str> {
        match self {
            PromoState::Applied(code) => Some(code),
            PromoState::NoPromo | PromoState::Invalid(_) => None,
        }
    }

    /// The rejected input held by an [`PromoState::Invalid`] state, if any.
    pub fn rejected_input(&self) -> Option<&str> {
        match self {
            PromoState::Invalid(attempted) => Some(attempted),
            PromoState::NoPromo | PromoState::Applied(_) => None,
        }
    }
}
