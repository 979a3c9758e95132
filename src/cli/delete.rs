use std::path::Path;

use tracing::instrument;

use super::{open_store, render, terminal::Colorize};

#[derive(Debug, clap::Parser)]
pub struct Delete {
    /// The name of the product to delete (case-insensitive)
    name: String,
}

impl Delete {
    #[instrument]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let mut store = open_store(root)?;
        let removed = store.inventory_mut().delete(self.name.trim())?;
        store.save()?;

        println!(
            "{}",
            format!("✅ {} removed from inventory.", removed.name()).success()
        );
        render::print_low_stock_banner(store.inventory());
        Ok(())
    }
}
