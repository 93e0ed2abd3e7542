use rolska_mirror::config::Config;
use rolska_mirror::logging;
use rolska_mirror::module::league::{FetchStrategy, LeagueManager, LeagueUpdater, PageFetcher};
use rolska_mirror::server;

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load_or_default("config.toml")?;

    // Initialize logging
    let _logging_guard = logging::init_logging("logs", "rolska-mirror", &config.log_level);

    info!("Rolska mirror starting...");
    info!("Loaded configuration: {:?}", config);

    let strategy: FetchStrategy = config.fetch_strategy.parse()?;

    let fetcher = PageFetcher::new(
        &config.user_agent,
        Duration::from_secs(config.http_timeout_secs),
        Duration::from_secs(config.browser_timeout_secs),
        Duration::from_secs(config.browser_settle_secs),
    );

    let manager = Arc::new(LeagueManager::new(
        fetcher,
        strategy,
        config.calendar_url.clone(),
        config.ranking_url.clone(),
    ));

    // Scrape once before serving, then keep refreshing on the interval
    let updater = LeagueUpdater::new(manager.clone(), config.update_interval_minutes);
    let _updater_handle = updater.start_with_initial_update().await;
    info!(
        "League updater started (refresh every {} minutes)",
        config.update_interval_minutes
    );

    let app = server::build_router(manager, config.enable_cors);

    let addr = config.server_address();
    info!("Starting API server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
