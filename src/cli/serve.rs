use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::api::{build_router, AppState};
use crate::cli::commands::ServeArgs;
use crate::config::WstgkitConfig;
use crate::errors::WstgkitError;

pub async fn handle_serve(args: ServeArgs, config: &WstgkitConfig) -> Result<(), WstgkitError> {
    info!(host = %args.host, port = args.port, "Starting API server");

    let db = crate::cli::open_database(config)?;
    let catalog = Arc::new(crate::cli::load_catalog(config)?);

    let llm = match crate::cli::build_provider(config) {
        Ok(provider) => Some(Arc::from(provider)),
        Err(e) => {
            warn!("AI endpoints disabled: {}", e);
            None
        }
    };

    let state = AppState {
        db,
        catalog,
        llm,
        llm_timeout_secs: config.llm_timeout_secs(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| WstgkitError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
