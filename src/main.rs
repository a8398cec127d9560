//! Loads the home listings once, prints the rendered screen and optionally runs
//! a city search against the configured API.

use clap::Parser;
use estate_views::collaborators::Route;
use estate_views::components::Screen;
use estate_views::config::AppConfig;
use estate_views::lifecycle::{setup_tracing, EstateApp};
use estate_views::model::TransactionMode;
use estate_views::view::Activation;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn, Instrument};

#[derive(Parser, Debug)]
#[command(name = "estate-views")]
#[command(about = "Browse property listings from the command line", long_about = None)]
struct Args {
    /// Configuration file path (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Transaction mode to list
    #[arg(short, long, default_value = "buy")]
    mode: TransactionMode,

    /// City to search for after listing
    #[arg(short, long)]
    search: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();
    let args = Args::parse();

    let config = AppConfig::load(args.config.as_deref())?;
    info!(base_url = %config.api.base_url, "Config loaded");

    let (app, mut routes) = EstateApp::new(&config)?;
    let wait = Duration::from_secs(config.api.timeout_secs + 1);

    let span = tracing::info_span!("home", mode = %args.mode);
    async {
        match app.home.load_home(args.mode).await? {
            Activation::Skipped => warn!("API unreachable"),
            _ => {
                let snapshot = app
                    .home
                    .wait_until(|s| s.state.is_settled())
                    .await?;
                println!("{}", Screen::from_state(&snapshot.state).render().into_string());
            }
        }
        Ok::<_, Box<dyn std::error::Error>>(())
    }
    .instrument(span)
    .await?;

    if let Some(city) = args.search {
        let span = tracing::info_span!("search", %city);
        async {
            if let Activation::Issued(_) = app.home.submit_search_with(city).await? {
                match tokio::time::timeout(wait, routes.recv()).await {
                    Ok(Some(Route::SearchResults(records))) => {
                        info!(size = records.len(), "Search results");
                        for record in &records {
                            println!("{}\t{}", record.id, record.location());
                        }
                    }
                    Ok(_) => warn!("Search produced no results view"),
                    Err(_) => error!("Search did not complete"),
                }
            }
            Ok::<_, Box<dyn std::error::Error>>(())
        }
        .instrument(span)
        .await?;
    }

    app.shutdown().await?;
    Ok(())
}
