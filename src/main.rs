//! Sales planner service binary.
//!
//! Loads configuration, connects to PostgreSQL, wires the port adapters
//! into the feature routers, and serves the REST API.

use std::sync::Arc;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use sales_planner::adapters::http::{
    plan_router, pricing_router, target_router, PlanAppState, PricingAppState, TargetAppState,
};
use sales_planner::adapters::postgres::{
    PostgresAssignedTargetReader, PostgresAvgPriceSource, PostgresInvoiceHistoryReader,
    PostgresPlanRemarkRepository, PostgresPlanRowRepository,
};
use sales_planner::application::price_resolver::UnitPriceResolver;
use sales_planner::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        "Starting sales planner"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .max_lifetime(config.database.max_lifetime())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let plan_repository = Arc::new(PostgresPlanRowRepository::new(pool.clone()));
    let invoice_history = Arc::new(PostgresInvoiceHistoryReader::new(pool.clone()));
    let remark_repository = Arc::new(PostgresPlanRemarkRepository::new(pool.clone()));
    let price_source = Arc::new(PostgresAvgPriceSource::new(pool.clone()));
    let target_reader = Arc::new(PostgresAssignedTargetReader::new(pool));
    let price_resolver = Arc::new(UnitPriceResolver::new(price_source.clone()));

    let plan_state = PlanAppState::new(
        plan_repository,
        invoice_history,
        remark_repository,
        price_resolver,
    );
    let pricing_state = PricingAppState::new(price_source);
    let target_state = TargetAppState::new(target_reader);

    let cors = if config.server.cors_origins_list().is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        let origins = config
            .server
            .cors_origins_list()
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect::<Vec<_>>();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let app = Router::new()
        .merge(plan_router().with_state(plan_state))
        .merge(pricing_router().with_state(pricing_state))
        .merge(target_router().with_state(target_state))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(std::time::Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "Listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
