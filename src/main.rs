//! sslayout - render Special Stage layouts to PNG.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use sslayout::{
    AtlasSources, Config, LayoutGrid, LayoutRenderer, SpriteCatalog, TileSelection,
};

/// Columns in the catalog preview sheet.
const CATALOG_COLUMNS: usize = 16;

#[derive(Parser)]
#[command(name = "sslayout")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding the palette, sprite, font and start marker files
    #[arg(short, long, global = true, default_value = ".")]
    assets: PathBuf,

    /// JSON settings file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a 4096-byte layout file
    Render {
        /// Layout file
        layout: PathBuf,

        /// 4-byte start position file
        #[arg(short, long)]
        start: Option<PathBuf>,

        /// Draw walls without their numbers
        #[arg(long)]
        no_labels: bool,

        /// Output PNG
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Render every catalog tag in a 16-column sheet (tag = row * 16 + column)
    Catalog {
        /// Draw walls without their numbers
        #[arg(long)]
        no_labels: bool,

        /// Output PNG
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let sources = AtlasSources::load_dir(&cli.assets, &config.assets)?;
    let catalog = SpriteCatalog::build(&sources)?;
    let renderer = LayoutRenderer::with_config(&catalog, config.render.clone());

    match cli.command {
        Commands::Render { layout, start, no_labels, output } => {
            let grid = read_layout(&layout, start.as_deref())?;
            let image = renderer.render_rgba(&grid, !no_labels);
            image.save(&output)?;
            info!("wrote {}", output.display());
        }
        Commands::Catalog { no_labels, output } => {
            let rows = catalog.tags().map(|t| t as usize).max().unwrap_or(0) / CATALOG_COLUMNS + 1;
            let mut sheet = TileSelection::new(CATALOG_COLUMNS, rows);
            for tag in catalog.tags() {
                let t = tag as usize;
                sheet.set(t % CATALOG_COLUMNS, t / CATALOG_COLUMNS, Some(tag));
            }
            let image = renderer.render_rgba(&sheet, !no_labels);
            image.save(&output)?;
            info!("wrote {} ({} tags)", output.display(), catalog.tags().count());
        }
    }

    Ok(())
}

fn read_layout(layout: &Path, start: Option<&Path>) -> Result<LayoutGrid, Box<dyn std::error::Error>> {
    let layout_bytes = fs::read(layout)?;
    let grid = match start {
        Some(path) => {
            let start_bytes = fs::read(path)?;
            LayoutGrid::parse_with_start(Some(layout_bytes.as_slice()), Some(start_bytes.as_slice()))?
        }
        None => LayoutGrid::from_bytes(&layout_bytes)?,
    };
    Ok(grid)
}
