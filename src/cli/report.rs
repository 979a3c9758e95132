use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Local};
use invman::Inventory;
use serde::Serialize;
use tracing::instrument;

use super::{
    open_store,
    render::{self, OutputFormat},
    terminal::Colorize,
};

/// Command arguments for `inv report`.
#[derive(Debug, clap::Parser, Default)]
#[command(about = "Save the inventory and show a stock summary")]
pub struct Report {
    /// Output format (table, json)
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

#[derive(Debug, Serialize)]
struct Summary {
    file: PathBuf,
    products: usize,
    units: u64,
    value: f64,
    low_stock_threshold: u32,
    low_stock: Vec<String>,
    generated_at: DateTime<Local>,
}

impl Summary {
    fn new(file: PathBuf, inventory: &Inventory, generated_at: DateTime<Local>) -> Self {
        Self {
            file,
            products: inventory.len(),
            units: inventory.total_units(),
            value: inventory.total_value(),
            low_stock_threshold: inventory.low_stock_threshold(),
            low_stock: inventory
                .low_stock_items()
                .iter()
                .map(|product| product.name().to_string())
                .collect(),
            generated_at,
        }
    }
}

impl Report {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let store = open_store(root)?;
        store.save()?;

        let summary = Summary::new(store.data_path(), store.inventory(), Local::now());

        match self.output {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(std::io::stdout(), &summary)
                    .context("failed to render json output")?;
                println!();
            }
            OutputFormat::Table => {
                Self::output_table(&summary);
                render::print_low_stock_banner(store.inventory());
            }
        }
        Ok(())
    }

    fn output_table(summary: &Summary) {
        println!(
            "{}",
            format!(
                "✅ Inventory report saved as {}",
                summary.file.display()
            )
            .success()
        );
        println!(
            "{}",
            format!(
                "Generated at: {}",
                summary.generated_at.format("%Y-%m-%d %H:%M:%S")
            )
            .dim()
        );
        println!();
        println!("  Products:     {}", summary.products);
        println!("  Total units:  {}", summary.units);
        println!("  Total value:  {:.2} USD", summary.value);
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use invman::{Product, Store, storage::csv_file};
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn summary_totals_inventory() {
        let inventory = Inventory::from_products(
            [
                Product::new("Widget", 2.5, 10, "Tools").unwrap(),
                Product::new("Gadget", 4.0, 1, "Electronics").unwrap(),
            ],
            5,
        )
        .unwrap();
        let generated_at = Local.with_ymd_and_hms(2025, 7, 14, 7, 15, 0).unwrap();

        let summary = Summary::new(PathBuf::from("inventory.csv"), &inventory, generated_at);

        assert_eq!(summary.products, 2);
        assert_eq!(summary.units, 11);
        assert!((summary.value - 29.0).abs() < 1e-9);
        assert_eq!(summary.low_stock, ["Gadget"]);
    }

    #[test]
    fn run_writes_data_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("inventory.csv");

        // A missing data file is an empty inventory; reporting writes it.
        Report::default().run(tmp.path()).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Name,Price,Quantity,Category\n"
        );
    }

    #[test]
    fn run_preserves_products() {
        let tmp = tempdir().unwrap();
        let products = [Product::new("Widget", 2.5, 10, "Tools").unwrap()];
        csv_file::save(&tmp.path().join("inventory.csv"), &products).unwrap();

        Report {
            output: OutputFormat::Json,
        }
        .run(tmp.path())
        .unwrap();

        let store = Store::open(tmp.path().to_path_buf()).unwrap();
        assert_eq!(store.inventory().products(), &products);
    }
}
