use std::path::Path;

use clap::ArgGroup;
use invman::ProductUpdate;
use tracing::instrument;

use super::{open_store, parse_price, parse_quantity, render, terminal::Colorize};

#[derive(Debug, clap::Parser)]
#[command(group(
    ArgGroup::new("changes")
        .required(true)
        .multiple(true)
        .args(["price", "quantity", "category"])
))]
pub struct Update {
    /// The name of the product to update (case-insensitive)
    name: String,

    /// New unit price in USD
    #[arg(long, short, value_parser = parse_price, allow_negative_numbers = true)]
    price: Option<f64>,

    /// New number of units in stock
    #[arg(long, short, value_parser = parse_quantity)]
    quantity: Option<u32>,

    /// New category (blank leaves the category unchanged)
    #[arg(long, short)]
    category: Option<String>,
}

impl Update {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let name = self.name.trim();
        let changes = ProductUpdate {
            price: self.price,
            quantity: self.quantity,
            category: self
                .category
                .map(|category| category.trim().to_string())
                .filter(|category| !category.is_empty()),
        };
        if changes.is_empty() {
            anyhow::bail!("Nothing to update for {name}");
        }

        let mut store = open_store(root)?;
        let updated = store.inventory_mut().update(name, changes)?.clone();
        store.save()?;

        println!("{}", format!("✅ {} updated.", updated.name()).success());
        render::print_low_stock_banner(store.inventory());
        Ok(())
    }
}
