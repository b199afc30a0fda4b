//! # Spotify Integration Module
//!
//! The request layer between artistdig and the Spotify Web API. It owns the
//! bearer token, attaches it to every catalog call, refreshes it when the
//! API rejects it, and exposes typed catalog operations.
//!
//! ## Architecture
//!
//! ```text
//! Discovery / Artist cache / Search debouncer
//!          ↓
//! CatalogClient        (typed search, artist detail, top tracks)
//!          ↓
//! AuthenticatedFetcher (bearer header, one retry on 401)
//!          ↓
//! TokenStore           (single cached token, coalesced issuance)
//!          ↓
//! TokenIssuer          (client-credentials exchange or token proxy)
//! ```
//!
//! ## Core Modules
//!
//! ### Authentication
//!
//! [`auth`] - Token acquisition and caching:
//! - **Client Credentials**: `grant_type=client_credentials` with an HTTP Basic
//!   credential derived from the client id and secret
//! - **Token Proxy**: fetches a ready-made token from a trusted endpoint, so the
//!   secret never has to be present where catalog calls are made
//! - **Coalescing**: concurrent callers during a cold start share one exchange
//!
//! ### Authenticated Requests
//!
//! [`fetcher`] - `AuthenticatedFetcher::request_with_auth`:
//! - **Bearer Header**: merged over caller headers, always wins for `Authorization`
//! - **Bounded Retry**: a `401` discards the token and retries exactly once
//! - **Status Mapping**: other failures propagate without retry
//!
//! ### Catalog Operations
//!
//! [`catalog`] - The [`Catalog`](catalog::Catalog) trait and its HTTP implementation:
//! - `GET /search` - artist search with optional page size
//! - `GET /artists/{id}` - artist details (genres, popularity, images)
//! - `GET /artists/{id}/top-tracks` - top tracks for a market
//!
//! ## Error Handling
//!
//! All operations return [`crate::error::Result`]. Catalog failures are wrapped
//! per operation and keep the original cause as their source, which keeps
//! `log` output specific about what went wrong underneath.
//!
//! ## Timeouts
//!
//! No retry covers a hanging upstream. [`CatalogClient::from_settings`](catalog::CatalogClient::from_settings)
//! builds its HTTP client with the configured timeout (10 seconds by default).

pub mod auth;
pub mod catalog;
pub mod fetcher;

pub use auth::{ClientCredentialsIssuer, TokenIssuer, TokenProxyIssuer, TokenStore};
pub use catalog::{Catalog, CatalogClient};
pub use fetcher::{AuthenticatedFetcher, RequestOptions, RetryPolicy};
