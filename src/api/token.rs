use std::sync::Arc;

use axum::{Extension, http::StatusCode, response::Json};
use serde_json::{Value, json};

use crate::spotify::TokenIssuer;

/// Hands out a bearer token obtained with the server-held client secret.
///
/// Every call runs a fresh exchange. Clients invalidate a token after a `401`
/// and come back here, so handing them a cached copy could return the very
/// token that was just rejected.
pub async fn token(
    Extension(issuer): Extension<Arc<dyn TokenIssuer>>,
) -> (StatusCode, Json<Value>) {
    match issuer.issue_token().await {
        Ok(access_token) => (StatusCode::OK, Json(json!({ "access_token": access_token }))),
        Err(e) => {
            log::error!("Token exchange failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "failed to obtain an access token from Spotify" })),
            )
        }
    }
}
