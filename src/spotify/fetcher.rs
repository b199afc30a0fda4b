use std::sync::Arc;

use reqwest::{
    Client, Method, Response, StatusCode,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};

use crate::{
    error::{CatalogError, Result},
    spotify::auth::TokenStore,
};

/// Bounded retry rule for authenticated requests.
///
/// A request is attempted at most `max_attempts` times, and only an
/// authentication failure earns another attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl RetryPolicy {
    /// One original attempt plus one retry after a token refresh.
    pub const fn auth_refresh() -> Self {
        Self { max_attempts: 2 }
    }

    pub fn is_auth_failure(status: StatusCode) -> bool {
        status == StatusCode::UNAUTHORIZED
    }

    /// `attempt` is 1-based: the first request is attempt 1.
    pub fn should_retry(&self, attempt: u32, status: StatusCode) -> bool {
        attempt < self.max_attempts && Self::is_auth_failure(status)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::auth_refresh()
    }
}

/// Per-request options supplied by the caller.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            query: Vec::new(),
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Issues HTTP requests carrying the current bearer token.
///
/// # Retry Logic
///
/// On `401 Unauthorized` the rejected token is discarded, a new one is
/// obtained and the request is sent again, exactly once (see
/// [`RetryPolicy::auth_refresh`]). A second `401` surfaces as
/// [`CatalogError::Authentication`]. Any other non-success status surfaces as
/// [`CatalogError::UpstreamStatus`] without a retry.
///
/// # Headers
///
/// Caller headers are sent as given, except `Authorization`, which is always
/// replaced by `Bearer <token>`.
#[derive(Clone)]
pub struct AuthenticatedFetcher {
    client: Client,
    tokens: Arc<TokenStore>,
    policy: RetryPolicy,
}

impl AuthenticatedFetcher {
    pub fn new(client: Client, tokens: Arc<TokenStore>) -> Self {
        Self {
            client,
            tokens,
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    pub async fn request_with_auth(&self, url: &str, options: &RequestOptions) -> Result<Response> {
        let mut attempt = 1;

        loop {
            let token = self.tokens.get_token().await?;
            let headers = merge_headers(&options.headers, &token)?;

            let response = self
                .client
                .request(options.method.clone(), url)
                .query(&options.query)
                .headers(headers)
                .send()
                .await?;

            let status = response.status();
            if self.policy.should_retry(attempt, status) {
                log::debug!("Token rejected for {url} (attempt {attempt}), refreshing");
                self.tokens.invalidate(&token).await;
                attempt += 1;
                continue;
            }

            if RetryPolicy::is_auth_failure(status) {
                return Err(CatalogError::Authentication {
                    status: status.as_u16(),
                });
            }

            if !status.is_success() {
                return Err(CatalogError::UpstreamStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }

            return Ok(response);
        }
    }
}

fn merge_headers(caller: &HeaderMap, token: &str) -> Result<HeaderMap> {
    let mut headers = caller.clone();
    let bearer = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|e| CatalogError::TokenIssuance(format!("token is not a valid header value: {e}")))?;
    headers.insert(AUTHORIZATION, bearer);
    Ok(headers)
}
