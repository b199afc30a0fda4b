use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Extension, Router, routing::get};

use crate::{
    api,
    error::{CatalogError, Result},
    spotify::TokenIssuer,
};

pub const TOKEN_ROUTE: &str = "/api/auth/spotify";

pub fn router(issuer: Arc<dyn TokenIssuer>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route(TOKEN_ROUTE, get(api::token).layer(Extension(issuer)))
}

pub async fn start_api_server(issuer: Arc<dyn TokenIssuer>, addr: &str) -> Result<()> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| CatalogError::Configuration(format!("invalid server address '{addr}': {e}")))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("Token proxy listening on {addr}");
    axum::serve(listener, router(issuer)).await?;
    Ok(())
}
