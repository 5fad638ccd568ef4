//! Checkout Example
//!
//! Walks one checkout session against the storefront fixture set: pick a
//! product, choose a quantity and submit promo codes in order, then print
//! the resulting order summary.
//!
//! Run with: `cargo run --example checkout -- --product backpack --quantity 2 --code save20`

use anyhow::Result;
use clap::Parser;

use till::prelude::*;

/// Checkout walk-through against the storefront fixture set.
#[derive(Debug, Parser)]
struct Args {
    /// Product key in the storefront fixture set (e.g. backpack, tshirt, jacket, bracelet)
    #[arg(long, default_value = "backpack")]
    product: String,

    /// Quantity to buy (clamped to 1..=99)
    #[arg(long, default_value_t = 1)]
    quantity: u8,

    /// Promo codes to submit, in order; a later invalid code revokes an
    /// earlier applied one, exactly as in the storefront UI
    #[arg(long = "code")]
    codes: Vec<String>,
}

/// Checkout Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = Args::parse();

    let fixture = Fixture::from_set("storefront")?;
    let registry = fixture.registry();

    let mut line = fixture.order_line(&args.product)?;

    line.set_quantity(Quantity::new(args.quantity));

    for code in &args.codes {
        line.submit_code(&registry, code);
    }

    let product = fixture.product(&args.product)?;
    let receipt = Receipt::from_order(product, &line, &registry)?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    receipt.write_to(&mut handle)?;

    println!(
        "\nOrder placed for {} x {} \u{2014} Total {}",
        line.quantity(),
        product.name,
        receipt.breakdown().total()
    );

    Ok(())
}
