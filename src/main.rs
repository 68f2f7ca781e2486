use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use tf_idf_recommender::{Config, IndexStore, JsonCatalog};

/// Content-based song recommender
#[derive(Parser, Debug)]
#[command(name = "tf-idf-recommender")]
#[command(about = "Recommend similar songs from a catalog", long_about = None)]
struct Args {
    /// JSON config file; command line flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for cached artifacts
    #[arg(long)]
    store_dir: Option<PathBuf>,

    /// Catalog JSON exported by the ingestion job
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the index and persist it
    Build {
        /// Ignore cached artifacts
        #[arg(long)]
        force: bool,
    },
    /// Print songs similar to the named one
    Recommend {
        /// Song name, matched case-insensitively
        name: String,
        #[arg(short = 'n', long)]
        top_n: Option<usize>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List every song in the indexed catalog
    Songs {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &args.config {
        Some(path) => Config::from_file(path).with_context(|| format!("loading config {:?}", path))?,
        None => Config::default(),
    };
    if let Some(dir) = args.store_dir {
        config.store_dir = dir;
    }
    if let Some(path) = args.catalog {
        config.catalog_path = Some(path);
    }
    if let Command::Build { force: true } = args.command {
        config.force_rebuild = true;
    }
    if let Command::Recommend { top_n: Some(n), .. } = args.command {
        config.top_n = n;
    }
    config.validate()?;

    info!("Starting tf-idf-recommender v{}", env!("CARGO_PKG_VERSION"));
    info!("Store directory: {:?}", config.store_dir);

    let store = IndexStore::open(&config.store_dir)?;
    let source = JsonCatalog::new(config.require_catalog()?);

    let index = if config.force_rebuild {
        store.rebuild(&source)?
    } else {
        store.load_or_build(&source)?
    };

    match args.command {
        Command::Build { .. } => {
            info!(
                "Index ready: {} items, {} terms",
                index.len(),
                index.vocabulary().len()
            );
        }
        Command::Recommend { name, json, .. } => {
            let hits = index.recommend(&name, config.top_n)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                print!("{}", hits);
            }
        }
        Command::Songs { json: true } => {
            println!("{}", serde_json::to_string_pretty(index.items())?);
        }
        Command::Songs { json: false } => {
            for item in index.items() {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    item.name,
                    item.artists.join(", "),
                    item.album,
                    item.genres.join(", "),
                    item.release_date.as_deref().unwrap_or("-"),
                    item.popularity.map_or_else(|| "-".to_string(), |p| p.to_string()),
                    item.external_url.as_deref().unwrap_or("-")
                );
            }
        }
    }
    Ok(())
}
