use std::path::Path;

use invman::Product;
use tracing::instrument;

use super::{open_store, parse_price, parse_quantity, render, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Add {
    /// The product name (must be unique, ignoring case)
    name: String,

    /// Unit price in USD
    #[arg(long, short, value_parser = parse_price, allow_negative_numbers = true)]
    price: f64,

    /// Units in stock
    #[arg(long, short, value_parser = parse_quantity)]
    quantity: u32,

    /// The product category
    #[arg(long, short)]
    category: String,
}

impl Add {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let name = self.name.trim();
        let category = self.category.trim();
        if category.is_empty() {
            anyhow::bail!("All fields must be filled: category is empty");
        }

        let mut store = open_store(root)?;
        let product = Product::new(name, self.price, self.quantity, category)?;
        store.inventory_mut().add(product)?;
        store.save()?;

        println!("{}", format!("✅ {name} added to inventory.").success());
        render::print_low_stock_banner(store.inventory());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use invman::Store;
    use tempfile::tempdir;

    use super::*;

    fn add(name: &str, quantity: u32, category: &str) -> Add {
        Add {
            name: name.to_string(),
            price: 1.25,
            quantity,
            category: category.to_string(),
        }
    }

    #[test]
    fn run_appends_trimmed_product_and_saves() {
        let tmp = tempdir().unwrap();

        add("  Widget ", 3, " Tools").run(tmp.path()).unwrap();
        add("Gadget", 8, "Electronics").run(tmp.path()).unwrap();

        let store = Store::open(tmp.path().to_path_buf()).unwrap();
        assert_eq!(
            store.inventory().products(),
            &[
                Product::new("Widget", 1.25, 3, "Tools").unwrap(),
                Product::new("Gadget", 1.25, 8, "Electronics").unwrap(),
            ]
        );
    }

    #[test]
    fn blank_fields_are_rejected() {
        let tmp = tempdir().unwrap();

        assert!(add("Widget", 3, "  ").run(tmp.path()).is_err());
        assert!(add("   ", 3, "Tools").run(tmp.path()).is_err());
        assert!(!tmp.path().join("inventory.csv").exists());
    }
}
