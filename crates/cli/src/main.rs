use clap::Parser;
use cdnsight_domain::CliOverrides;
use cdnsight_jobs::{BlocklistSyncJob, JobRunner};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "cdnsight")]
#[command(version)]
#[command(about = "cdnsight - CDN detection and blocklist status per browser tab (native-messaging host)")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Database path
    #[arg(long)]
    database: Option<String>,

    /// Keep tab status in memory only
    #[arg(long)]
    no_storage: bool,

    /// Blocklist feed URL
    #[arg(long, value_name = "URL")]
    feed_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Browser extension origin; passed by the browser when it launches the host
    #[arg(value_name = "ORIGIN")]
    origin: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        database_path: cli.database.clone(),
        no_storage: cli.no_storage,
        log_level: cli.log_level.clone(),
        feed_url: cli.feed_url.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        origin = cli.origin.as_deref().unwrap_or("-"),
        "Starting cdnsight native host"
    );

    let pool = if config.storage.enabled {
        let database_url = format!("sqlite:{}", config.storage.path);
        Some(bootstrap::init_database(&database_url).await?)
    } else {
        info!("Tab status storage disabled");
        None
    };

    let (outbound_tx, outbound_rx) = mpsc::channel(server::OUTBOUND_QUEUE_DEPTH);

    let services = di::Services::new(&config)?;
    let repos = di::Repositories::new(pool).await?;
    let coordinator = di::build_coordinator(&services, &repos, outbound_tx.clone());

    let shutdown = CancellationToken::new();
    JobRunner::new()
        .with_blocklist_sync(BlocklistSyncJob::new(services.blocklist.clone()))
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    let host = server::NativeHost::new(coordinator, outbound_tx);

    tokio::select! {
        result = host.serve(tokio::io::stdin(), tokio::io::stdout(), outbound_rx) => {
            if let Err(e) = result {
                warn!(error = %e, "Native host stopped with error");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted");
        }
    }

    shutdown.cancel();
    info!("cdnsight native host shutdown complete");
    Ok(())
}
