use std::sync::Arc;

use reel::config::Config;
use reel::movies::{MovieCache, OmdbProvider};
use reel::router::Router;
use reel::server;
use reel::static_files::StaticFiles;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::load()?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(cfg.logging.max_level())
        .init();

    if cfg.movies.api_key.is_empty() {
        tracing::warn!("No OMDb API key configured, set OMDB_API_KEY");
    }

    let provider = OmdbProvider::new(&cfg.movies)?;
    let movies = Arc::new(MovieCache::new(provider));
    let assets = StaticFiles::new(&cfg.static_files);
    tracing::info!(root = %assets.root().display(), "Serving static assets");

    let router = Arc::new(Router::new(movies, assets, cfg.movies.route_prefix.clone()));

    tokio::select! {
        res = server::listener::run(&cfg.server, router) => {
            if let Err(e) = res {
                tracing::error!("{:#}", e);
                std::process::exit(1);
            }
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
