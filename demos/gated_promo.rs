//! Gated Promo Example
//!
//! Demonstrates the minimum-subtotal gate on SAVE20: the code stays applied
//! while the quantity steps the subtotal across the $100 threshold, and the
//! discount line flips between void and active without any promo action.
//!
//! Run with: `cargo run --example gated_promo`

use anyhow::Result;

use till::prelude::*;

/// Gated Promo Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let fixture = Fixture::from_set("storefront")?;
    let registry = fixture.registry();

    let product = fixture.product("jacket")?;
    let mut line = fixture.order_line("jacket")?;

    line.submit_code(&registry, "save20");

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    for step in 0..3 {
        if step > 0 {
            line.increment_quantity();
        }

        let breakdown = line.breakdown(&registry)?;

        println!(
            "\n== {} x {} \u{2014} subtotal {}, gate {}",
            line.quantity(),
            product.name,
            breakdown.subtotal(),
            if breakdown.discount_is_active() {
                "cleared"
            } else {
                "not met"
            }
        );

        Receipt::from_order(product, &line, &registry)?.write_to(&mut handle)?;
    }

    Ok(())
}
