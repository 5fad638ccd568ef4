//! Receipt
//!
//! Renders an order summary for one checkout line: an item table followed by
//! the Subtotal / Discount / Total lines and the promo badge. The badge is
//! shown whenever a code is applied, including a gated code whose discount
//! is currently void; the discount line alone tells those cases apart.

use std::io;

use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::{SmallVec, smallvec};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    order::OrderLine,
    pricing::{PriceBreakdown, PricingError},
    products::Product,
    promos::registry::PromoRegistry,
    quantity::Quantity,
};

/// Errors that can occur when building or writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Promo display line derived from the order's promo state.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PromoLine {
    /// No code applied and no error to show.
    None,

    /// A code is applied; rendered even when its discount is void.
    Applied {
        /// Normalized code.
        code: String,
        /// Registry label.
        label: String,
    },

    /// The last submitted input was rejected.
    Rejected {
        /// Normalized rejected input.
        input: String,
    },
}

/// Order summary for a single checkout line.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    product_name: String,
    unit_price: Money<'a, Currency>,
    quantity: Quantity,
    breakdown: PriceBreakdown<'a>,
    promo: PromoLine,
}

impl<'a> Receipt<'a> {
    /// Build a receipt from a product, its order line and the registry the
    /// line is priced against.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the breakdown cannot be derived.
    pub fn from_order(
        product: &Product<'a>,
        order: &OrderLine<'a>,
        registry: &PromoRegistry<'a>,
    ) -> Result<Self, PricingError> {
        let breakdown = order.breakdown(registry)?;

        let promo = if let Some(promo) = order.applied_promo(registry)? {
            PromoLine::Applied {
                code: promo.code().to_string(),
                label: promo.label().to_string(),
            }
        } else if let Some(input) = order.promo().rejected_input() {
            PromoLine::Rejected {
                input: input.to_string(),
            }
        } else {
            PromoLine::None
        };

        Ok(Self {
            product_name: product.name.clone(),
            unit_price: order.unit_price(),
            quantity: order.quantity(),
            breakdown,
            promo,
        })
    }

    /// The derived price breakdown.
    #[must_use]
    pub fn breakdown(&self) -> &PriceBreakdown<'a> {
        &self.breakdown
    }

    /// Write the full summary to the given output.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if the summary cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Unit Price", "Qty", "Subtotal"]);
        builder.push_record([
            self.product_name.clone(),
            format!("{}", self.unit_price),
            format!("{}", self.quantity),
            format!("{}", self.breakdown.subtotal()),
        ]);

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(1..4), Alignment::right());

        writeln!(out, "\n{table}").map_err(|_err| ReceiptError::IO)?;

        self.write_summary(&mut out)?;
        self.write_promo_line(&mut out)
    }

    /// Write the aligned Subtotal / Discount / Total lines.
    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let discount_value = if self.breakdown.discount_is_active() {
            format!("- {}", self.breakdown.discount())
        } else {
            "\u{2014}".to_string()
        };

        let rows: SmallVec<[(&str, String); 4]> = smallvec![
            ("Subtotal:", format!("{}", self.breakdown.subtotal())),
            ("Discount:", discount_value),
            ("Total:", format!("{}", self.breakdown.total())),
        ];

        let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

        for (label, value) in &rows {
            writeln!(out, " {label:>label_width$}  {value:>value_width$}")
                .map_err(|_err| ReceiptError::IO)?;
        }

        Ok(())
    }

    /// Write the promo badge or rejection message, if there is one.
    fn write_promo_line(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        match &self.promo {
            PromoLine::None => Ok(()),
            PromoLine::Applied { code, label } => {
                writeln!(out, "\n Applied: {code} \u{2014} {label}").map_err(|_err| ReceiptError::IO)
            }
            PromoLine::Rejected { input } => {
                writeln!(out, "\n Invalid promo code: {input}").map_err(|_err| ReceiptError::IO)
            }
        }
    }
}
