use std::path::Path;

use clap::Parser;
use tracing::instrument;

use super::{
    open_store,
    render::{self, OutputFormat},
    terminal::Colorize,
};

/// Command arguments for `inv list`.
#[derive(Debug, Parser, Default)]
pub struct List {
    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl List {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let store = open_store(root)?;
        let inventory = store.inventory();

        if inventory.is_empty() && self.output == OutputFormat::Table {
            println!("No products yet. Add one with 'inv add'.");
            return Ok(());
        }

        let products: Vec<_> = inventory.products().iter().collect();
        render::render_products(&products, self.output)?;

        if self.output == OutputFormat::Table {
            render::print_low_stock_banner(inventory);
        }
        Ok(())
    }
}

/// Command arguments for `inv low-stock`.
#[derive(Debug, Parser, Default)]
pub struct LowStock {
    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl LowStock {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let store = open_store(root)?;
        let inventory = store.inventory();
        let low = inventory.low_stock_items();

        if low.is_empty() && self.output == OutputFormat::Table {
            println!(
                "{}",
                format!(
                    "✅ No products at or below the low-stock threshold (≤ {}).",
                    inventory.low_stock_threshold()
                )
                .success()
            );
            return Ok(());
        }

        render::render_products(&low, self.output)
    }
}
