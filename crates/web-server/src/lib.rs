use analytics::AlphaEngine;
use axum::{Router, routing::get};
use configuration::AppSettings;
use market_data::{ConstantRiskFree, PriceSource, RiskFreeSource, YahooChartSource};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub price_source: Arc<dyn PriceSource>,
    pub risk_free: Arc<dyn RiskFreeSource>,
    pub engine: Arc<AlphaEngine>,
    pub settings: AppSettings,
}

/// Builds the application router over an already-constructed state.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/get-return/:ticker", get(handlers::get_returns))
        .route("/get-alpha/:ticker/:benchmark", get(handlers::get_alpha))
        .with_state(state)
        .layer(cors)
        // This middleware automatically logs information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
pub async fn run_server(addr: SocketAddr, settings: AppSettings) -> anyhow::Result<()> {
    let price_source = YahooChartSource::new(&settings.market_data)?;
    let risk_free = ConstantRiskFree::new(settings.analytics.risk_free_rate_annualized);

    let state = Arc::new(AppState {
        price_source: Arc::new(price_source),
        risk_free: Arc::new(risk_free),
        engine: Arc::new(AlphaEngine::new()),
        settings,
    });

    let router = app(state);

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
