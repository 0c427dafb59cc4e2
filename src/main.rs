use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinematch::{
    api::{create_router, AppState},
    config::Config,
    db::{write_dataset, Catalog},
    services::{build_catalog, TmdbProvider},
};

#[derive(Parser, Debug)]
#[command(version, about = "Movie and series recommendations by description", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch popular titles from TMDB and overwrite the dataset file
    Fetch {
        /// Pages fetched per media type
        #[clap(short, long)]
        pages: Option<u32>,

        /// Dataset file to write
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
    /// Serve the recommendation API over the dataset file
    Serve {
        /// Dataset file to load
        #[clap(short, long)]
        dataset: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinematch=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    match args.command {
        Command::Fetch { pages, output } => fetch(&config, pages, output).await,
        Command::Serve { dataset } => serve(&config, dataset).await,
    }
}

async fn fetch(config: &Config, pages: Option<u32>, output: Option<PathBuf>) -> anyhow::Result<()> {
    let provider = TmdbProvider::new(
        config.require_api_key()?.to_string(),
        config.tmdb_api_url.clone(),
    )?;
    let page_limit = pages.unwrap_or(config.page_limit);
    let output = output.unwrap_or_else(|| PathBuf::from(&config.dataset_path));

    tracing::info!(page_limit, output = %output.display(), "Fetching catalog");

    let report = build_catalog(&provider, page_limit, &config.tmdb_image_url).await;
    write_dataset(&output, &report.entries)?;

    tracing::info!(rows = report.entries.len(), "Data fetched, cleaned, and saved");
    Ok(())
}

async fn serve(config: &Config, dataset: Option<PathBuf>) -> anyhow::Result<()> {
    let dataset = dataset.unwrap_or_else(|| PathBuf::from(&config.dataset_path));
    let catalog = Catalog::load(&dataset)?;

    let state = AppState::new(catalog);
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
