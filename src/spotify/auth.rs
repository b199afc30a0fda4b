use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, header::AUTHORIZATION};
use tokio::sync::Mutex;

use crate::{
    error::{CatalogError, Result},
    types::TokenResponse,
    utils,
};

/// Source of fresh bearer tokens.
///
/// Implementations perform exactly one exchange per call. Caching and
/// coalescing of concurrent callers is the job of [`TokenStore`].
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    async fn issue_token(&self) -> Result<String>;
}

/// Exchanges a pre-shared client id/secret for a bearer token using the
/// OAuth 2.0 client-credentials grant.
///
/// This is the only code path that sees the client secret. It should run on
/// the trusted side of the boundary; callers elsewhere get tokens through a
/// [`TokenProxyIssuer`] pointed at the `serve` endpoint.
///
/// # Request
///
/// `POST <token_url>` with `grant_type=client_credentials` as a form body and
/// an `Authorization: Basic base64(client_id:client_secret)` header.
///
/// # Errors
///
/// - Non-success status from the token endpoint
/// - A response without a non-empty `access_token`
/// - Transport failures
pub struct ClientCredentialsIssuer {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl ClientCredentialsIssuer {
    pub fn new(client: Client, token_url: String, client_id: String, client_secret: String) -> Self {
        Self {
            client,
            token_url,
            client_id,
            client_secret,
        }
    }
}

#[async_trait]
impl TokenIssuer for ClientCredentialsIssuer {
    async fn issue_token(&self) -> Result<String> {
        let res = self
            .client
            .post(&self.token_url)
            .header(
                AUTHORIZATION,
                utils::basic_credential(&self.client_id, &self.client_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        read_token(res).await
    }
}

/// Fetches bearer tokens from a token proxy that holds the client secret.
///
/// The proxy answers `GET <endpoint>` with `{ "access_token": "..." }`.
pub struct TokenProxyIssuer {
    client: Client,
    endpoint: String,
}

impl TokenProxyIssuer {
    pub fn new(client: Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl TokenIssuer for TokenProxyIssuer {
    async fn issue_token(&self) -> Result<String> {
        let res = self.client.get(&self.endpoint).send().await?;
        read_token(res).await
    }
}

async fn read_token(res: reqwest::Response) -> Result<String> {
    let status = res.status();
    if !status.is_success() {
        return Err(CatalogError::TokenIssuance(format!(
            "token endpoint returned status {}",
            status.as_u16()
        )));
    }

    let body: TokenResponse = res
        .json()
        .await
        .map_err(|e| CatalogError::TokenIssuance(format!("malformed token response: {e}")))?;

    if body.access_token.is_empty() {
        return Err(CatalogError::TokenIssuance(
            "token endpoint returned an empty access_token".to_string(),
        ));
    }
    Ok(body.access_token)
}

/// Holds the single live bearer token.
///
/// The token is fetched lazily on first use and kept until a request is
/// rejected. There is no expiry tracking.
///
/// # Concurrency
///
/// The slot lock is held for the whole exchange, so callers arriving while a
/// token is being issued wait for that exchange and then read its result.
/// A cold start with many concurrent callers triggers exactly one exchange.
pub struct TokenStore {
    issuer: Arc<dyn TokenIssuer>,
    token: Mutex<Option<String>>,
}

impl TokenStore {
    pub fn new(issuer: Arc<dyn TokenIssuer>) -> Self {
        Self {
            issuer,
            token: Mutex::new(None),
        }
    }

    /// Returns the cached token, issuing a new one if none is held.
    pub async fn get_token(&self) -> Result<String> {
        let mut slot = self.token.lock().await;
        if let Some(token) = slot.as_ref() {
            return Ok(token.clone());
        }

        log::debug!("No cached bearer token, requesting a new one");
        let fresh = self.issuer.issue_token().await?;
        *slot = Some(fresh.clone());
        Ok(fresh)
    }

    /// Drops the cached token if it is still the one that was rejected.
    ///
    /// Comparing against `stale` keeps a token that another caller already
    /// refreshed from being thrown away a second time.
    pub async fn invalidate(&self, stale: &str) {
        let mut slot = self.token.lock().await;
        if slot.as_deref() == Some(stale) {
            log::debug!("Discarding rejected bearer token");
            *slot = None;
        }
    }

    pub async fn current_token(&self) -> Option<String> {
        self.token.lock().await.clone()
    }
}
