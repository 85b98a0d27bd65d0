//! Grants DAO custody service: entry point.
//!
//! Runs the disbursement ledger in-process (pool balances live in an
//! in-memory token ledger seeded from `POOL_SEED`) and exposes it through a
//! small Axum REST API. Every mutating route is restricted to the callers
//! listed in `ADMIN_CALLERS`.

mod api;
mod auth;
mod config;
mod custodian;
mod errors;
mod events;
mod ledger;
mod registry;
mod token;
mod types;

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use auth::AdminSet;
use config::Config;
use custodian::FundsCustodian;
use ledger::Ledger;
use token::InMemoryLedger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging (RUST_LOG controls verbosity).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load optional .env file (ignored if missing).
    let _ = dotenvy::dotenv();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("{e}"))?;

    // ─── Pool ─────────────────────────────────────────────
    let mut tokens = InMemoryLedger::default();
    for (currency, amount) in &config.pool_seed {
        tokens.mint(currency, &config.custodian_account, *amount);
        info!(%currency, amount = %amount, "Seeded pool");
    }
    let custodian = FundsCustodian::new(tokens, config.custodian_account.clone());
    info!(
        account = %custodian.account(),
        admins = config.admin_callers.len(),
        "Custodian ready"
    );

    // ─── REST API ─────────────────────────────────────────
    let authorizer = AdminSet::new(config.admin_callers.iter().cloned());
    let api_state = Arc::new(api::ApiState {
        ledger: Ledger::new(Box::new(authorizer), custodian),
    });

    let app = api::router(api_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", config.api_port);
    info!("API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
