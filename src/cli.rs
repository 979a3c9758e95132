use std::path::{Path, PathBuf};

mod add;
mod config;
mod delete;
mod list;
mod render;
mod report;
mod search;
mod terminal;
mod update;

use add::Add;
use anyhow::Context;
use clap::ArgAction;
use delete::Delete;
use invman::{Store, storage::store::CONFIG_FILE};
use list::{List, LowStock};
use report::Report;
use search::Search;
use tracing::instrument;
use update::Update;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the root of the inventory directory
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::List(List::default()))
            .run(&self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Initialize a new inventory
    Init,

    /// Add a new product
    Add(Add),

    /// Change the price, quantity or category of a product
    Update(Update),

    /// Delete a product
    Delete(Delete),

    /// Search products by name or category
    Search(Search),

    /// List all products (default)
    List(List),

    /// List products at or below the low-stock threshold
    LowStock(LowStock),

    /// Save the inventory and summarise its contents
    Report(Report),

    /// Show or modify configuration settings
    Config(config::Command),
}

impl Command {
    fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::Init => Init::run(root)?,
            Self::Add(command) => command.run(root)?,
            Self::Update(command) => command.run(root)?,
            Self::Delete(command) => command.run(root)?,
            Self::Search(command) => command.run(root)?,
            Self::List(command) => command.run(root)?,
            Self::LowStock(command) => command.run(root)?,
            Self::Report(command) => command.run(root)?,
            Self::Config(command) => command.run(root)?,
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Init {}

impl Init {
    #[instrument]
    fn run(root: &Path) -> anyhow::Result<()> {
        let store = Store::init(root.to_path_buf())?;

        println!("Initialized inventory in {}", root.display());
        println!("  Created: {CONFIG_FILE}");
        println!("  Data file: {}", store.config().data_file().display());
        println!();
        println!("Next steps:");
        println!("  inv add \"Your First Product\" --price 9.99 --quantity 10 --category General");

        Ok(())
    }
}

/// Opens the inventory at `root`.
fn open_store(root: &Path) -> anyhow::Result<Store> {
    Store::open(root.to_path_buf())
        .with_context(|| format!("failed to open inventory in {}", root.display()))
}

/// Parse a price at the CLI boundary.
///
/// Range checks are left to the domain so that they are applied uniformly.
fn parse_price(s: &str) -> Result<f64, String> {
    s.trim()
        .parse()
        .map_err(|_| "Price must be a valid number.".to_string())
}

/// Parse a quantity at the CLI boundary.
fn parse_quantity(s: &str) -> Result<u32, String> {
    s.trim()
        .parse()
        .map_err(|_| "Quantity must be a non-negative whole number.".to_string())
}
