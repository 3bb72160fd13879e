use crate::cli::ServeArgs;
use crate::infra::{seed_portfolio, AppState, InMemoryPortfolioRepository};
use crate::routes::with_portfolio_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use rationalizer::config::AppConfig;
use rationalizer::error::AppError;
use rationalizer::telemetry;
use rationalizer::workflows::portfolio::{ApplicationCache, PortfolioService};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryPortfolioRepository::default());
    let cache = Arc::new(ApplicationCache::new(config.portfolio.cache_ttl));
    let portfolio_service = Arc::new(PortfolioService::new(repository, cache));

    if !args.no_seed {
        let seeded = seed_portfolio(&portfolio_service)?;
        info!(applications = seeded, "sample portfolio catalogued");
    }

    let app = with_portfolio_routes(portfolio_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        cache_ttl_secs = config.portfolio.cache_ttl.as_secs(),
        "portfolio rationalizer ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
