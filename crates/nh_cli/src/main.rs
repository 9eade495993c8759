use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use clap::Parser;
use nh_api::ApiClient;
use nh_core::Result;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the NewsHub backend
    #[arg(long, default_value = "http://localhost:8000")]
    api_url: String,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Read the feed in the terminal (the default)
    Read {
        /// Write log output to this file instead of dropping it
        #[arg(long)]
        log_file: Option<PathBuf>,
    },
    /// Print the article feed
    List {
        /// Only articles in this category
        #[arg(long)]
        category: Option<String>,
        /// At most this many articles
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Ask the backend to fetch and curate fresh articles
    Sync {
        /// How many curated articles to request
        #[arg(long, default_value_t = 10)]
        count: u32,
    },
    /// Check that the backend is reachable
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = Arc::new(ApiClient::new(&cli.api_url)?);

    // Tracing goes up per command: the TUI owns the terminal, so its logs can
    // only go to a file.
    match cli.command.unwrap_or(Commands::Read { log_file: None }) {
        Commands::Read { log_file } => {
            if let Some(path) = log_file.as_deref() {
                init_file_tracing(path)?;
            }
            info!("📰 Connecting to {}", cli.api_url);
            nh_tui::run(client).await?;
        }

        Commands::List { category, limit } => {
            tracing_subscriber::fmt::init();
            let articles = client.list_articles_filtered(category.as_deref(), limit).await?;
            if articles.is_empty() {
                println!("No articles yet.");
                return Ok(());
            }
            for a in &articles {
                println!(
                    "{:<12} {:<16} {:<14} {}",
                    a.category,
                    a.publisher_name,
                    a.published_ago(),
                    a.title
                );
            }
        }

        Commands::Sync { count } => {
            tracing_subscriber::fmt::init();
            info!("🔄 Asking the backend for {} curated articles...", count);
            let report = client.sync(count).await?;
            println!("{}", report.message);
            println!(
                "fetched {} · selected {} · new {}",
                report.fetched_from_api, report.ai_selected, report.new_in_db
            );
        }

        Commands::Health => {
            tracing_subscriber::fmt::init();
            let status = client.health().await?;
            println!("backend: {}", status);
        }
    }

    Ok(())
}

fn init_file_tracing(path: &Path) -> Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}
