//! Mergington Server
//!
//! Axum server for the Mergington High School activity catalog, plus the
//! standalone `seed` command for the same database.

use anyhow::Context;
use clap::Parser;
use mergington_core::seed::{seed_catalog, SeedMode};
use mergington_core::state::{ActivityManager, CatalogDb};
use std::sync::Arc;
use tokio::{net::TcpListener, signal::ctrl_c};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

mod api;
mod assets;
mod config;
mod error;

use api::AppState;
use config::{Args, CliCommand, SeedArgs, ServeArgs};

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let db = Arc::new(
        CatalogDb::open_at(&args.db)
            .with_context(|| format!("Failed to open catalog at {}", args.db.display()))?,
    );

    if args.no_seed {
        info!("Startup seeding disabled");
    } else {
        let inserted = seed_catalog(&ActivityManager::new(&db), SeedMode::IfEmpty)?;
        if inserted == 0 {
            info!("Catalog already populated, skipping seed");
        }
    }

    let state = Arc::new(AppState { db });
    let app = api::router(state);

    let addr = args.addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Mergington API running at http://{}", addr);
    info!("   Catalog:  GET /activities");
    info!("   Signup:   POST /activities/{{name}}/signup?email=");
    info!("   Remove:   DELETE /activities/{{name}}/remove?email=");
    info!("   Docs:     GET /openapi.json");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

fn run_seed(args: SeedArgs) -> anyhow::Result<()> {
    info!("Opening catalog at {}", args.db.display());
    let db = CatalogDb::open_at(&args.db)
        .with_context(|| format!("Failed to open catalog at {}", args.db.display()))?;
    let manager = ActivityManager::new(&db);

    let mode = if args.if_empty {
        SeedMode::IfEmpty
    } else {
        SeedMode::Reset
    };

    let inserted = seed_catalog(&manager, mode)?;
    if inserted == 0 {
        info!("Catalog already populated, nothing seeded");
    }

    for activity in manager.list_all()? {
        info!(
            "{} ({} / {} participants)",
            activity.name,
            activity.participants.len(),
            activity.max_participants
        );
    }
    info!("Total activities: {}", manager.count()?);

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Args::parse().into_command() {
        CliCommand::Serve(args) => run_server(args).await,
        CliCommand::Seed(args) => run_seed(args),
    }
}
