//! `medimate-server`: serves the symptom-checker API.
//!
//! ```text
//! medimate-server --config medimate.toml
//! medimate-server --bind 127.0.0.1:8080 --catalog catalog/clinic.toml --issue-token asha
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use medimate_api::{api_router, ApiContext, ServiceConfig};
use medimate_catalog::Catalog;
use medimate_contracts::history::UserId;

#[derive(Parser, Debug)]
#[command(
    name = "medimate-server",
    about = "MediMate symptom checker API server",
    version
)]
struct Cli {
    /// Service config TOML file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to listen on (overrides the config file).
    #[arg(long)]
    bind: Option<String>,

    /// Symptom catalog TOML file (overrides the config file).
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Issue a bearer token for this user at startup and print it.
    #[arg(long = "issue-token", value_name = "USER_ID")]
    issue_token: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServiceConfig::from_file(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }
    if let Some(catalog) = cli.catalog {
        config.catalog_path = Some(catalog);
    }

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_file(path)?,
        None => Catalog::embedded()?,
    };
    tracing::info!(
        symptoms = catalog.symptoms().len(),
        conditions = catalog.conditions().len(),
        "catalog ready"
    );

    let ctx = ApiContext::new(Arc::new(catalog), &config)?;
    for user in cli.issue_token {
        let token = ctx.sessions.issue(UserId(user.clone()))?;
        println!("token for {user}: {token}");
    }
    tracing::info!(sessions = ctx.sessions.count()?, "session registry ready");

    let app = api_router(ctx).layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "MediMate API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await?;

    Ok(())
}
