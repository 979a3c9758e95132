//! An ordered, in-memory collection of products.
//!
//! The [`Inventory`] is filesystem agnostic. It enforces case-insensitive
//! name uniqueness but never persists itself; see
//! [`Store`](crate::storage::Store) for that.

use crate::domain::product::{InvalidProduct, Product, ProductUpdate};

/// Quantity at or below which a product is considered low on stock, unless
/// configured otherwise.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;

/// An ordered set of products, unique by case-insensitive name.
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory {
    products: Vec<Product>,
    low_stock_threshold: u32,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_threshold(DEFAULT_LOW_STOCK_THRESHOLD)
    }
}

impl Inventory {
    /// Creates an empty inventory with the default low-stock threshold.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty inventory with the given low-stock threshold.
    #[must_use]
    pub const fn with_threshold(low_stock_threshold: u32) -> Self {
        Self {
            products: Vec::new(),
            low_stock_threshold,
        }
    }

    /// Builds an inventory from previously stored products, keeping their
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateName`] if two products share a name, ignoring
    /// case.
    pub fn from_products(
        products: impl IntoIterator<Item = Product>,
        low_stock_threshold: u32,
    ) -> Result<Self, Error> {
        let products = products.into_iter();
        let mut inventory = Self {
            products: Vec::with_capacity(products.size_hint().0),
            low_stock_threshold,
        };
        for product in products {
            inventory.add(product)?;
        }
        Ok(inventory)
    }

    /// Appends a product.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateName`] if a product with the same name
    /// (ignoring case) already exists. The inventory is unchanged.
    pub fn add(&mut self, product: Product) -> Result<(), Error> {
        if self.position(product.name().as_str()).is_some() {
            return Err(Error::DuplicateName(product.name().to_string()));
        }
        tracing::debug!("adding product '{}'", product.name());
        self.products.push(product);
        Ok(())
    }

    /// Changes the supplied attributes of the named product.
    ///
    /// Returns the product as it is after the update.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if no product has that name (ignoring case)
    /// - [`Error::InvalidProduct`] if the new price is invalid
    ///
    /// The inventory is unchanged on error.
    pub fn update(&mut self, name: &str, update: ProductUpdate) -> Result<&Product, Error> {
        let index = self
            .position(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        let product = &mut self.products[index];
        product.apply(update)?;
        tracing::debug!("updated product '{}'", product.name());
        Ok(&*product)
    }

    /// Removes the named product and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no product has that name (ignoring
    /// case).
    pub fn delete(&mut self, name: &str) -> Result<Product, Error> {
        let index = self
            .position(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        let product = self.products.remove(index);
        tracing::debug!("deleted product '{}'", product.name());
        Ok(product)
    }

    /// Products whose name or category contains `keyword`, ignoring case and
    /// surrounding whitespace, in inventory order.
    ///
    /// An empty keyword matches every product.
    #[must_use]
    pub fn search(&self, keyword: &str) -> Vec<&Product> {
        let keyword = keyword.trim().to_lowercase();
        self.products
            .iter()
            .filter(|product| {
                product.name().as_str().to_lowercase().contains(&keyword)
                    || product.category().to_lowercase().contains(&keyword)
            })
            .collect()
    }

    /// Products whose quantity is at or below the low-stock threshold, in
    /// inventory order.
    #[must_use]
    pub fn low_stock_items(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.quantity() <= self.low_stock_threshold)
            .collect()
    }

    /// Looks up a product by name, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Product> {
        self.position(name).map(|index| &self.products[index])
    }

    /// All products in insertion order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Consumes the inventory, returning its products in order.
    #[must_use]
    pub fn into_products(self) -> Vec<Product> {
        self.products
    }

    /// The number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns `true` if the inventory holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// The quantity at or below which a product is low on stock.
    #[must_use]
    pub const fn low_stock_threshold(&self) -> u32 {
        self.low_stock_threshold
    }

    /// Sets the low-stock threshold.
    pub const fn set_low_stock_threshold(&mut self, threshold: u32) {
        self.low_stock_threshold = threshold;
    }

    /// Total units across all products.
    #[must_use]
    pub fn total_units(&self) -> u64 {
        self.products
            .iter()
            .map(|product| u64::from(product.quantity()))
            .sum()
    }

    /// Sum of price times quantity across all products.
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.products.iter().map(Product::stock_value).sum()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.products
            .iter()
            .position(|product| product.name().matches(name))
    }
}

/// Errors returned by [`Inventory`] operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A product with this name already exists.
    #[error("product '{0}' already exists")]
    DuplicateName(String),

    /// No product has this name.
    #[error("product '{0}' not found")]
    NotFound(String),

    /// The product's attributes are invalid.
    #[error(transparent)]
    InvalidProduct(#[from] InvalidProduct),
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn product(name: &str, quantity: u32, category: &str) -> Product {
        Product::new(name, 1.5, quantity, category).unwrap()
    }

    fn names(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.name().to_string()).collect()
    }

    fn sample() -> Inventory {
        let mut inventory = Inventory::new();
        inventory.add(product("Widget", 10, "Tools")).unwrap();
        inventory.add(product("Gadget", 2, "Electronics")).unwrap();
        inventory.add(product("Hammer", 5, "Tools")).unwrap();
        inventory
    }

    #[test]
    fn add_then_search_exact_name() {
        let mut inventory = Inventory::new();
        let widget = product("Widget", 10, "Tools");
        inventory.add(widget.clone()).unwrap();

        assert_eq!(inventory.search("Widget"), vec![&widget]);
    }

    #[test]
    fn add_preserves_insertion_order() {
        let inventory = sample();
        let all: Vec<_> = inventory.products().iter().collect();
        assert_eq!(names(&all), ["Widget", "Gadget", "Hammer"]);
    }

    #[test]
    fn add_duplicate_name_ignoring_case_fails() {
        let mut inventory = Inventory::new();
        inventory.add(product("Widget", 10, "Tools")).unwrap();

        let error = inventory.add(product("widget", 3, "Other")).unwrap_err();

        assert_eq!(error, Error::DuplicateName("widget".to_string()));
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.products()[0].category(), "Tools");
    }

    #[test]
    fn update_missing_name_fails_and_leaves_list_unmodified() {
        let mut inventory = sample();
        let before = inventory.clone();

        let error = inventory
            .update(
                "Sprocket",
                ProductUpdate {
                    quantity: Some(1),
                    ..ProductUpdate::default()
                },
            )
            .unwrap_err();

        assert_eq!(error, Error::NotFound("Sprocket".to_string()));
        assert_eq!(inventory, before);
    }

    #[test]
    fn update_applies_only_supplied_fields() {
        let mut inventory = sample();

        let updated = inventory
            .update(
                "GADGET",
                ProductUpdate {
                    price: Some(9.99),
                    category: Some("Gizmos".to_string()),
                    ..ProductUpdate::default()
                },
            )
            .unwrap()
            .clone();

        assert_eq!(updated, Product::new("Gadget", 9.99, 2, "Gizmos").unwrap());
        assert_eq!(inventory.get("gadget"), Some(&updated));
    }

    #[test]
    fn update_with_invalid_price_fails_and_leaves_list_unmodified() {
        let mut inventory = sample();
        let before = inventory.clone();

        let error = inventory
            .update(
                "Widget",
                ProductUpdate {
                    price: Some(-3.0),
                    quantity: Some(0),
                    category: None,
                },
            )
            .unwrap_err();

        assert!(matches!(error, Error::InvalidProduct(_)));
        assert_eq!(inventory, before);
    }

    #[test]
    fn delete_only_product_then_again() {
        let mut inventory = Inventory::new();
        inventory.add(product("X", 1, "Misc")).unwrap();

        let removed = inventory.delete("X").unwrap();
        assert_eq!(removed.name().as_str(), "X");
        assert!(inventory.is_empty());

        assert_eq!(
            inventory.delete("X").unwrap_err(),
            Error::NotFound("X".to_string())
        );
    }

    #[test]
    fn delete_ignores_case_and_keeps_order() {
        let mut inventory = sample();
        inventory.delete("wIdGeT").unwrap();

        let all: Vec<_> = inventory.products().iter().collect();
        assert_eq!(names(&all), ["Gadget", "Hammer"]);
    }

    #[test_case("tools", &["Widget", "Hammer"]; "category")]
    #[test_case("GET", &["Widget", "Gadget"]; "name substring")]
    #[test_case("  hammer ", &["Hammer"]; "surrounding whitespace")]
    #[test_case("", &["Widget", "Gadget", "Hammer"]; "empty keyword")]
    #[test_case("sprocket", &[]; "no match")]
    fn search(keyword: &str, expected: &[&str]) {
        let inventory = sample();
        assert_eq!(names(&inventory.search(keyword)), expected);
    }

    #[test]
    fn low_stock_threshold_is_inclusive() {
        let mut inventory = Inventory::with_threshold(5);
        inventory.add(product("Five", 5, "Misc")).unwrap();
        inventory.add(product("Six", 6, "Misc")).unwrap();
        inventory.add(product("Zero", 0, "Misc")).unwrap();

        assert_eq!(names(&inventory.low_stock_items()), ["Five", "Zero"]);
    }

    #[test]
    fn threshold_can_be_changed() {
        let mut inventory = sample();
        assert_eq!(inventory.low_stock_threshold(), DEFAULT_LOW_STOCK_THRESHOLD);

        inventory.set_low_stock_threshold(1);
        assert!(inventory.low_stock_items().is_empty());

        inventory.set_low_stock_threshold(10);
        assert_eq!(inventory.low_stock_items().len(), 3);
    }

    #[test]
    fn from_products_rejects_duplicates() {
        let error = Inventory::from_products(
            [product("Widget", 1, "Tools"), product("WIDGET", 2, "Tools")],
            5,
        )
        .unwrap_err();

        assert_eq!(error, Error::DuplicateName("WIDGET".to_string()));
    }

    #[test]
    fn from_products_keeps_order_and_threshold() {
        let products = sample().into_products();
        let inventory = Inventory::from_products(products.clone(), 2).unwrap();

        assert_eq!(inventory.products(), products.as_slice());
        assert_eq!(inventory.low_stock_threshold(), 2);
    }

    #[test]
    fn totals() {
        let inventory = sample();
        assert_eq!(inventory.total_units(), 17);
        assert!((inventory.total_value() - 25.5).abs() < 1e-9);
    }
}
