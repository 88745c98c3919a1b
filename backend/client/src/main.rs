use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client::{
    api::ApiClient,
    app::{self, App},
    cache::{FileStorage, SystemClock, TimedCache},
    loader::CategoryLoader,
};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(name = "interviewer", author, version, about)]
struct Cli {
    /// Base URL of the interviewer server
    #[arg(long, env = "INTERVIEWER_URL", default_value = "http://localhost:1111")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List practice categories
    Categories,

    /// Practice the questions of one category
    Practice { slug: String },

    /// Chat with the interview assistant
    Chat,

    /// Normalize a local CSV file and print its categories
    Check { path: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cache = match FileStorage::user_cache() {
        Some(storage) => TimedCache::new(storage, SystemClock),
        None => {
            warn!("No user cache directory, categories will not persist");
            TimedCache::in_memory()
        }
    };
    let app = App::new(ApiClient::new(&cli.server), CategoryLoader::new(cache));
    let mut input = app::stdin_lines();

    match cli.command {
        Commands::Categories => app.categories().await?,
        Commands::Practice { slug } => app.practice(&slug, &mut input).await?,
        Commands::Chat => app.chat(&mut input).await?,
        Commands::Check { path } => app::check(&path),
    }

    Ok(())
}
