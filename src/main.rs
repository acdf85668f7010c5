//! Uptime Monitor Binary

use actix_web::{web, App, HttpServer};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uptime_monitor::api;
use uptime_monitor::state::AppState;
use uptime_monitor::{
    default_targets, Config, HealthChecker, HttpProbe, MonitorError, Result, Scheduler,
    TimeSeriesStore,
};

/// Command-line overrides for the environment configuration
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Address the read API listens on
    #[arg(long)]
    bind: Option<String>,

    /// Seconds between health-check rounds
    #[arg(long)]
    interval: Option<u64>,
}

impl Cli {
    fn apply(self, config: &mut Config) {
        if let Some(bind) = self.bind {
            config.bind_address = bind;
        }
        if let Some(seconds) = self.interval {
            config.poll_interval = Duration::from_secs(seconds);
        }
    }
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    initialize_tracing();

    info!("Starting uptime monitor v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::from_env();
    Cli::parse().apply(&mut config);

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        return Err(MonitorError::Config(e));
    }

    let targets = Arc::new(default_targets());
    let store = Arc::new(TimeSeriesStore::new(config.retention));
    let probe = Arc::new(HttpProbe::new(config.probe_timeout)?);
    let checker = Arc::new(HealthChecker::new(
        &config,
        Arc::clone(&targets),
        Arc::clone(&store),
        probe,
    ));

    info!(
        "Monitoring {} targets every {}s, API on {}",
        targets.len(),
        config.poll_interval.as_secs(),
        config.bind_address
    );

    let scheduler = Scheduler::new(checker);
    scheduler.start(config.poll_interval);

    let data = web::Data::new(AppState {
        targets,
        store,
        sparkline_points: config.sparkline_points,
    });

    let server = HttpServer::new(move || App::new().app_data(data.clone()).configure(api::configure))
        .bind(config.bind_address.as_str())
        .map_err(|e| {
            error!("Failed to bind {}: {}", config.bind_address, e);
            MonitorError::Io(e)
        })?;

    let result = server.run().await;

    scheduler.stop();
    info!("Uptime monitor shutdown complete");
    result.map_err(MonitorError::from)
}

/// Initialize structured logging
fn initialize_tracing() {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .json();

    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&log_level))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
