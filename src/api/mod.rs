//! # API Module
//!
//! HTTP endpoints served by `artistdig serve`.
//!
//! ## Endpoints
//!
//! - [`token`] - `GET /api/auth/spotify`. Exchanges the server-held client
//!   credentials for a bearer token and returns `{ "access_token": "..." }`.
//!   This is the trusted boundary: the client secret stays on the server and
//!   only the derived token is handed out. Point `ARTISTDIG_TOKEN_ENDPOINT`
//!   of other instances at it.
//! - [`health`] - `GET /health`. Returns status and version for monitoring.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use artistdig::server::router;
//!
//! let app = router(issuer);
//! axum::serve(listener, app).await?;
//! ```

mod health;
mod token;

pub use health::health;
pub use token::token;
