//! Rendering of product listings and the low-stock banner.

use std::fmt;

use anyhow::Context;
use invman::{Inventory, Product};

use super::terminal::{Colorize, is_narrow};

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::Json => "json",
        })
    }
}

/// Available table columns.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Column {
    Name,
    Price,
    Quantity,
    Category,
}

impl Column {
    const ALL: [Self; 4] = [Self::Name, Self::Price, Self::Quantity, Self::Category];
    const NARROW: [Self; 2] = [Self::Name, Self::Quantity];

    const fn header(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Price => "Price (USD)",
            Self::Quantity => "Quantity",
            Self::Category => "Category",
        }
    }

    fn value(self, product: &Product) -> String {
        match self {
            Self::Name => product.name().to_string(),
            Self::Price => format!("{:.2}", product.price()),
            Self::Quantity => product.quantity().to_string(),
            Self::Category => product.category().to_string(),
        }
    }
}

/// Prints products in the requested format.
pub fn render_products(products: &[&Product], output: OutputFormat) -> anyhow::Result<()> {
    match output {
        OutputFormat::Table => {
            print!("{}", format_table(products, is_narrow()));
            Ok(())
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(std::io::stdout(), products)
                .context("failed to render json output")?;
            println!();
            Ok(())
        }
    }
}

/// Formats products as an aligned table with a header row.
///
/// Narrow tables only show the name and quantity.
pub fn format_table(products: &[&Product], narrow: bool) -> String {
    let columns: &[Column] = if narrow { &Column::NARROW } else { &Column::ALL };

    let data: Vec<Vec<String>> = products
        .iter()
        .map(|product| columns.iter().map(|column| column.value(product)).collect())
        .collect();

    // Determine column widths for alignment.
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            data.iter()
                .map(|row| row[idx].chars().count())
                .max()
                .unwrap_or(0)
                .max(column.header().len())
        })
        .collect();

    let mut lines = Vec::with_capacity(data.len() + 2);
    lines.push(format_row(columns.iter().map(|c| c.header()), &widths));
    lines.push(format_row(widths.iter().map(|w| "-".repeat(*w)), &widths));
    for row in &data {
        lines.push(format_row(row.iter(), &widths));
    }

    let mut table = lines.join("\n");
    table.push('\n');
    table
}

fn format_row<I>(values: I, widths: &[usize]) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    values
        .into_iter()
        .zip(widths)
        .map(|(value, &width)| format!("{:<width$}", value.as_ref()))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// The low-stock warning for an inventory, if any product is low.
pub fn low_stock_banner(inventory: &Inventory) -> Option<String> {
    let low = inventory.low_stock_items();
    if low.is_empty() {
        return None;
    }
    let names = low
        .iter()
        .map(|product| product.name().as_str())
        .collect::<Vec<_>>()
        .join(", ");
    Some(format!("Low stock: {names} (≤ {})", inventory.low_stock_threshold()))
}

/// Prints the low-stock banner, if there is one.
pub fn print_low_stock_banner(inventory: &Inventory) {
    if let Some(banner) = low_stock_banner(inventory) {
        println!("\n{}", format!("⚠️  {banner}").warning());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products() -> Vec<Product> {
        vec![
            Product::new("Widget", 2.5, 10, "Tools").unwrap(),
            Product::new("Gadget", 19.999, 2, "Electronics").unwrap(),
        ]
    }

    #[test]
    fn table_aligns_columns_and_formats_prices() {
        let products = products();
        let refs: Vec<_> = products.iter().collect();

        let expected = "\
Name    Price (USD)  Quantity  Category
------  -----------  --------  -----------
Widget  2.50         10        Tools
Gadget  20.00        2         Electronics
";
        assert_eq!(format_table(&refs, false), expected);
    }

    #[test]
    fn narrow_table_shows_name_and_quantity() {
        let products = products();
        let refs: Vec<_> = products.iter().collect();

        let expected = "\
Name    Quantity
------  --------
Widget  10
Gadget  2
";
        assert_eq!(format_table(&refs, true), expected);
    }

    #[test]
    fn empty_table_has_headers() {
        assert_eq!(format_table(&[], true), "Name  Quantity\n----  --------\n");
    }

    #[test]
    fn banner_lists_low_stock_names() {
        let inventory = Inventory::from_products(products(), 5).unwrap();
        assert_eq!(
            low_stock_banner(&inventory).as_deref(),
            Some("Low stock: Gadget (≤ 5)")
        );
    }

    #[test]
    fn no_banner_when_stock_is_healthy() {
        let inventory = Inventory::from_products(products(), 1).unwrap();
        assert_eq!(low_stock_banner(&inventory), None);
    }
}
