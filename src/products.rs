//! Products
//!
//! The catalog shape supplied by the surrounding storefront. Only the fields
//! the pricing engine consumes are modelled here; display-only metadata stays
//! with the UI layer.

use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Product
#[derive(Debug, Clone)]
pub struct Product<'a> {
    /// Product name
    pub name: String,

    /// Unit price
    pub price: Money<'a, Currency>,
}
