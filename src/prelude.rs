//! Till prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    fixtures::{Fixture, FixtureError},
    order::OrderLine,
    pricing::{PriceBreakdown, PricingError, line_subtotal, order_total, promo_discount},
    products::{Product, ProductKey},
    promos::{
        PromoCode, PromoKind, normalize_code,
        registry::{Lookup, PromoRegistry},
        state::PromoState,
    },
    quantity::Quantity,
    receipt::{Receipt, ReceiptError},
};
