//! Fixtures
//!
//! YAML-backed fixture sets for demos and tests: a product catalog and a
//! promo registry loaded from `./fixtures/{products,promos}/<name>.yml`.
//! Loading a set keeps every amount in one currency, so a fixture can never
//! mix a USD catalog with GBP promo amounts.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::SlotMap;
use thiserror::Error;

use crate::{
    fixtures::{products::ProductsFixture, promos::PromosFixture},
    order::OrderLine,
    products::{Product, ProductKey},
    promos::{PromoCode, PromoKind, registry::PromoRegistry},
};

pub mod products;
pub mod promos;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Currency mismatch within the fixture set
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products or promos loaded yet
    #[error("Nothing loaded yet; currency unknown")]
    NoCurrency,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Catalog products with generated keys
    product_meta: SlotMap<ProductKey, Product<'static>>,

    /// String key -> `SlotMap` key mapping for lookups
    product_keys: FxHashMap<String, ProductKey>,

    /// Loaded promo codes, turned into a registry on demand
    promo_codes: Vec<PromoCode<'static>>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            product_meta: SlotMap::with_key(),
            product_keys: FxHashMap::default(),
            promo_codes: Vec::new(),
            currency: None,
        }
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there is a
    /// currency mismatch with previously loaded fixtures.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        for (key, product_fixture) in fixture.products {
            let product: Product<'static> = product_fixture.try_into()?;

            self.check_currency(product.price.currency())?;

            let product_key = self.product_meta.insert(product);

            self.product_keys.insert(key, product_key);
        }

        Ok(self)
    }

    /// Load promo codes from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if a promo
    /// amount is in a different currency than previously loaded fixtures.
    pub fn load_promos(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("promos").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: PromosFixture = serde_norway::from_str(&contents)?;

        for (_key, promo_fixture) in fixture.promos {
            let promo = promo_fixture.try_into_code()?;

            for currency in promo_currencies(&promo) {
                self.check_currency(currency)?;
            }

            self.promo_codes.push(promo);
        }

        Ok(self)
    }

    /// Load a complete fixture set (products and promos with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if either fixture file cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_products(name)?.load_promos(name)?;

        Ok(fixture)
    }

    /// Get a product by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, key: &str) -> Result<&Product<'static>, FixtureError> {
        let product_key = self.product_key(key)?;

        self.product_meta
            .get(product_key)
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Get a product key by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product_key(&self, key: &str) -> Result<ProductKey, FixtureError> {
        self.product_keys
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Open an order line for a product in this fixture set
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn order_line(&self, key: &str) -> Result<OrderLine<'static>, FixtureError> {
        let product_key = self.product_key(key)?;
        let product = self.product(key)?;

        Ok(OrderLine::new(product_key, product.price))
    }

    /// Build a registry from the loaded promo codes
    #[must_use]
    pub fn registry(&self) -> PromoRegistry<'static> {
        PromoRegistry::with_codes(self.promo_codes.iter().cloned())
    }

    /// Get the currency of the fixture set
    ///
    /// # Errors
    ///
    /// Returns an error if nothing has been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    /// Get the product metadata `SlotMap`
    pub fn product_meta_map(&self) -> &SlotMap<ProductKey, Product<'static>> {
        &self.product_meta
    }

    /// Record the set currency, or fail on a mismatch with the one recorded.
    fn check_currency(&mut self, currency: &'static Currency) -> Result<(), FixtureError> {
        match self.currency {
            None => {
                self.currency = Some(currency);
                Ok(())
            }
            Some(existing) if existing == currency => Ok(()),
            Some(existing) => Err(FixtureError::CurrencyMismatch(
                existing.iso_alpha_code.to_string(),
                currency.iso_alpha_code.to_string(),
            )),
        }
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Currencies configured on a promo (amount-off value and gate).
fn promo_currencies(promo: &PromoCode<'static>) -> Vec<&'static Currency> {
    let mut currencies = Vec::new();

    if let PromoKind::AmountOff(amount) = promo.kind() {
        currencies.push(amount.currency());
    }

    if let Some(gate) = promo.min_subtotal() {
        currencies.push(gate.currency());
    }

    currencies
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use rusty_money::iso::USD;
    use tempfile::TempDir;
    use testresult::TestResult;

    use crate::promos::registry::Lookup;

    use super::*;

    fn write_fixture(base: &Path, category: &str, name: &str, contents: &str) -> TestResult {
        let dir = base.join(category);

        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{name}.yml")), contents)?;

        Ok(())
    }

    #[test]
    fn fixture_loads_storefront_products_and_promos() -> TestResult {
        let fixture = Fixture::from_set("storefront")?;

        assert_eq!(fixture.product_keys.len(), 4);
        assert_eq!(fixture.promo_codes.len(), 3);
        assert_eq!(fixture.currency()?, USD);

        let jacket = fixture.product("jacket")?;

        assert_eq!(jacket.name, "Mens Cotton Jacket");
        assert_eq!(jacket.price.to_minor_units(), 5599);

        Ok(())
    }

    #[test]
    fn storefront_registry_resolves_all_three_codes() -> TestResult {
        let fixture = Fixture::from_set("storefront")?;
        let registry = fixture.registry();

        assert_eq!(registry.len(), 3);

        for code in ["SAVE10", "SAVE20", "WELCOME5"] {
            assert!(
                matches!(registry.resolve(code), Lookup::Found(_)),
                "expected {code} to resolve"
            );
        }

        Ok(())
    }

    #[test]
    fn fixture_order_line_opens_with_the_product_price() -> TestResult {
        let fixture = Fixture::from_set("storefront")?;
        let line = fixture.order_line("jacket")?;

        assert_eq!(line.unit_price().to_minor_units(), 5599);
        assert_eq!(line.product(), fixture.product_key("jacket")?);

        Ok(())
    }

    #[test]
    fn fixture_product_not_found_returns_error() {
        let fixture = Fixture::new();
        let result = fixture.product("nonexistent");

        assert!(matches!(result, Err(FixtureError::ProductNotFound(_))));
    }

    #[test]
    fn fixture_no_currency_returns_error() {
        let fixture = Fixture::new();
        let result = fixture.currency();

        assert!(matches!(result, Err(FixtureError::NoCurrency)));
    }

    #[test]
    fn fixture_rejects_currency_mismatch_between_files() -> TestResult {
        let dir = TempDir::new()?;

        write_fixture(
            dir.path(),
            "products",
            "mixed",
            "products:\n  apple:\n    name: Apple\n    price: 1.00 USD\n",
        )?;

        write_fixture(
            dir.path(),
            "promos",
            "mixed",
            "promos:\n  gbp5:\n    type: amount_off\n    code: GBP5\n    label: £5 off\n    amount: 5.00 GBP\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());

        fixture.load_products("mixed")?;

        let result = fixture.load_promos("mixed");

        assert!(matches!(result, Err(FixtureError::CurrencyMismatch(_, _))));

        Ok(())
    }

    #[test]
    fn fixture_rejects_gate_currency_mismatch() -> TestResult {
        let dir = TempDir::new()?;

        write_fixture(
            dir.path(),
            "promos",
            "gated",
            concat!(
                "promos:\n",
                "  usd10:\n",
                "    type: percent\n",
                "    code: USD10\n",
                "    label: Save 10%\n",
                "    rate: 10%\n",
                "    min_subtotal: 100.00 EUR\n",
                "  usd5:\n",
                "    type: amount_off\n",
                "    code: USD5\n",
                "    label: $5 off\n",
                "    amount: 5.00 USD\n",
            ),
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        let result = fixture.load_promos("gated");

        assert!(matches!(result, Err(FixtureError::CurrencyMismatch(_, _))));

        Ok(())
    }

    #[test]
    fn fixture_missing_file_returns_io_error() {
        let mut fixture = Fixture::new();
        let result = fixture.load_products("no_such_set");

        assert!(matches!(result, Err(FixtureError::Io(_))));
    }

    #[test]
    fn fixture_default_matches_new() {
        let fixture = Fixture::default();

        assert_eq!(fixture.base_path, PathBuf::from("./fixtures"));
        assert!(fixture.product_keys.is_empty());
        assert!(fixture.promo_codes.is_empty());
    }
}
