use std::path::Path;

use invman::{Inventory, Product};
use tracing::instrument;

use super::{
    open_store,
    render::{self, OutputFormat},
    terminal::Colorize,
};

#[derive(Debug, clap::Parser)]
pub struct Search {
    /// Case-insensitive text to look for in product names and categories.
    ///
    /// A blank keyword shows every product.
    keyword: String,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Search {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let store = open_store(root)?;
        let inventory = store.inventory();

        let results = matching(inventory, &self.keyword);
        tracing::debug!("{} products match '{}'", results.len(), self.keyword);

        if results.is_empty() && self.output == OutputFormat::Table && !is_blank(&self.keyword) {
            println!("{}", "No products found matching your search.".dim());
            return Ok(());
        }

        render::render_products(&results, self.output)
    }
}

fn is_blank(keyword: &str) -> bool {
    keyword.trim().is_empty()
}

/// The products to show for `keyword`. A blank keyword selects every product.
fn matching<'a>(inventory: &'a Inventory, keyword: &str) -> Vec<&'a Product> {
    if is_blank(keyword) {
        inventory.products().iter().collect()
    } else {
        inventory.search(keyword)
    }
}
