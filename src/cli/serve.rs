use std::sync::Arc;

use reqwest::Client;

use crate::{
    cli,
    config::TokenSource,
    error, info,
    server::{self, TOKEN_ROUTE},
    spotify::{ClientCredentialsIssuer, TokenIssuer},
};

pub async fn serve() {
    let settings = cli::settings();

    let TokenSource::ClientCredentials {
        token_url,
        client_id,
        client_secret,
    } = settings.token_source
    else {
        error!("serve needs SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET; unset ARTISTDIG_TOKEN_ENDPOINT.");
    };

    let client = match Client::builder().timeout(settings.http_timeout).build() {
        Ok(c) => c,
        Err(e) => error!("Cannot build HTTP client. Err: {}", e),
    };
    let issuer: Arc<dyn TokenIssuer> = Arc::new(ClientCredentialsIssuer::new(
        client,
        token_url,
        client_id,
        client_secret,
    ));

    info!(
        "Serving tokens on http://{}{}",
        settings.server_addr, TOKEN_ROUTE
    );
    if let Err(e) = server::start_api_server(issuer, &settings.server_addr).await {
        error!("Token proxy stopped. Err: {}", e);
    }
}
