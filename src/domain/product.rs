use std::fmt;

use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};

/// The name of a product.
///
/// Names are the identity key of an inventory. Two names refer to the same
/// product if they are equal after lowercasing, see [`ProductName::matches`].
/// The derived equality compares names exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductName(NonEmptyString);

impl ProductName {
    /// Creates a new `ProductName`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidProduct::EmptyName`] if the name is empty or consists
    /// only of whitespace.
    pub fn new(name: String) -> Result<Self, InvalidProduct> {
        if name.trim().is_empty() {
            return Err(InvalidProduct::EmptyName);
        }
        NonEmptyString::new(name)
            .map(Self)
            .map_err(|_| InvalidProduct::EmptyName)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether `other` names the same product, ignoring case.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.as_str().to_lowercase() == other.to_lowercase()
    }
}

impl TryFrom<String> for ProductName {
    type Error = InvalidProduct;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ProductName {
    type Error = InvalidProduct;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl From<ProductName> for String {
    fn from(name: ProductName) -> Self {
        name.as_str().to_string()
    }
}

impl AsRef<str> for ProductName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single product held in an [`Inventory`](crate::Inventory).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    name: ProductName,
    price: f64,
    quantity: u32,
    category: String,
}

impl Product {
    /// Creates a new product.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank, or if the price is negative or
    /// not finite.
    pub fn new(
        name: impl Into<String>,
        price: f64,
        quantity: u32,
        category: impl Into<String>,
    ) -> Result<Self, InvalidProduct> {
        Ok(Self {
            name: ProductName::new(name.into())?,
            price: validate_price(price)?,
            quantity,
            category: category.into(),
        })
    }

    /// The product's name.
    #[must_use]
    pub const fn name(&self) -> &ProductName {
        &self.name
    }

    /// Unit price in USD.
    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }

    /// Units in stock.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// The product's category.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Price multiplied by quantity.
    #[must_use]
    pub fn stock_value(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    /// Applies the supplied fields of `update`, leaving the rest unchanged.
    ///
    /// Nothing is modified if the update is invalid.
    pub(crate) fn apply(&mut self, update: ProductUpdate) -> Result<(), InvalidProduct> {
        let price = update.price.map(validate_price).transpose()?;

        if let Some(price) = price {
            self.price = price;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        Ok(())
    }
}

/// A partial change to a product's attributes.
///
/// Fields left as `None` are not modified.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    /// New unit price.
    pub price: Option<f64>,
    /// New quantity in stock.
    pub quantity: Option<u32>,
    /// New category.
    pub category: Option<String>,
}

impl ProductUpdate {
    /// Returns `true` if no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.price.is_none() && self.quantity.is_none() && self.category.is_none()
    }
}

/// Error returned when product attributes fail validation.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum InvalidProduct {
    /// The name was empty or whitespace.
    #[error("product name must not be empty")]
    EmptyName,

    /// The price was negative, NaN, or infinite.
    #[error("invalid price {0}: must be a non-negative number")]
    InvalidPrice(f64),
}

fn validate_price(price: f64) -> Result<f64, InvalidProduct> {
    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(InvalidProduct::InvalidPrice(price))
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("Widget", "widget"; "lowercase")]
    #[test_case("widget", "WIDGET"; "uppercase")]
    #[test_case("Straße", "STRAßE"; "unicode")]
    fn names_match_ignoring_case(name: &str, other: &str) {
        let name = ProductName::try_from(name).unwrap();
        assert!(name.matches(other));
    }

    #[test]
    fn names_do_not_match_substrings() {
        let name = ProductName::try_from("Widget").unwrap();
        assert!(!name.matches("Widgets"));
        assert!(!name.matches("Widg"));
    }

    #[test_case(""; "empty")]
    #[test_case("   "; "spaces")]
    #[test_case("\t\n"; "other whitespace")]
    fn blank_names_are_rejected(name: &str) {
        assert_eq!(
            ProductName::try_from(name).unwrap_err(),
            InvalidProduct::EmptyName
        );
    }

    #[test_case(-0.01; "negative")]
    #[test_case(f64::NAN; "nan")]
    #[test_case(f64::INFINITY; "infinite")]
    fn invalid_prices_are_rejected(price: f64) {
        let error = Product::new("Widget", price, 1, "Tools").unwrap_err();
        assert!(matches!(error, InvalidProduct::InvalidPrice(_)));
    }

    #[test]
    fn zero_price_is_allowed() {
        let product = Product::new("Sample", 0.0, 3, "Freebies").unwrap();
        assert!(product.price().abs() < f64::EPSILON);
    }

    #[test]
    fn apply_changes_only_supplied_fields() {
        let mut product = Product::new("Widget", 2.5, 10, "Tools").unwrap();

        product
            .apply(ProductUpdate {
                quantity: Some(4),
                ..ProductUpdate::default()
            })
            .unwrap();

        assert_eq!(product, Product::new("Widget", 2.5, 4, "Tools").unwrap());
    }

    #[test]
    fn invalid_update_leaves_product_unchanged() {
        let mut product = Product::new("Widget", 2.5, 10, "Tools").unwrap();
        let before = product.clone();

        let error = product
            .apply(ProductUpdate {
                price: Some(-1.0),
                quantity: Some(0),
                category: Some("Scrap".to_string()),
            })
            .unwrap_err();

        assert_eq!(error, InvalidProduct::InvalidPrice(-1.0));
        assert_eq!(product, before);
    }

    #[test]
    fn stock_value_multiplies_price_by_quantity() {
        let product = Product::new("Widget", 2.5, 4, "Tools").unwrap();
        assert!((product.stock_value() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_update() {
        assert!(ProductUpdate::default().is_empty());
        assert!(
            !ProductUpdate {
                category: Some(String::new()),
                ..ProductUpdate::default()
            }
            .is_empty()
        );
    }
}
