use anyhow::Context;
use bandstore::{
    AuthManager, BandCollection, BandServer, CommandRegistry, Dispatcher, ServerConfig,
    SnapshotManager,
};
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "bandstore", about = "In-memory music band collection server")]
struct Cli {
    /// Bind host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Bind port
    #[arg(long, default_value_t = 5050)]
    port: u16,

    /// Snapshot file; omit to run without persistence
    #[arg(long)]
    data_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = ServerConfig::new().host(&cli.host).port(cli.port);
    if let Some(path) = &cli.data_file {
        config = config.snapshot_path(path);
    }

    let snapshots = config.snapshot_path.as_ref().map(SnapshotManager::new);

    // A snapshot that exists but cannot be parsed is the one fatal startup
    // error; a missing file just means an empty collection.
    let store = match &snapshots {
        Some(manager) => match manager.load().context("failed to load snapshot")? {
            Some(snapshot) => {
                info!(
                    "loaded {} band(s) from {}",
                    snapshot.metadata.band_count,
                    manager.path().display()
                );
                Arc::new(BandCollection::restore(snapshot))
            }
            None => Arc::new(BandCollection::new()),
        },
        None => {
            warn!("no data file configured, collection will not be persisted");
            Arc::new(BandCollection::new())
        }
    };

    let mut dispatcher = Dispatcher::new(CommandRegistry::with_default_commands(), store.clone())
        .with_history_capacity(config.history_capacity);
    if let Some(manager) = &snapshots {
        dispatcher = dispatcher.with_snapshots(manager.clone());
    }

    let auth = Arc::new(AuthManager::new());
    let server = BandServer::new(config, Arc::new(dispatcher), auth);

    tokio::select! {
        result = server.run() => result.context("server failed")?,
        _ = tokio::signal::ctrl_c() => info!("shutting down"),
    }

    if let Some(manager) = &snapshots {
        let snapshot = store.to_snapshot().await;
        manager.save(&snapshot)?;
        info!(
            "saved {} band(s) to {}",
            snapshot.metadata.band_count,
            manager.path().display()
        );
    }

    Ok(())
}
