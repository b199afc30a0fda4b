use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use artistdig::{
    CatalogError, Result,
    server::{self, TOKEN_ROUTE},
    spotify::{TokenIssuer, TokenProxyIssuer, TokenStore},
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

struct StubIssuer {
    calls: AtomicUsize,
    fail: bool,
}

impl StubIssuer {
    fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail,
        })
    }
}

#[async_trait]
impl TokenIssuer for StubIssuer {
    async fn issue_token(&self) -> Result<String> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail {
            return Err(CatalogError::TokenIssuance("client_secret=hunter2 rejected".to_string()));
        }
        Ok(format!("proxied-{n}"))
    }
}

async fn spawn_proxy(issuer: Arc<StubIssuer>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, server::router(issuer)).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_token_route_returns_fresh_token_each_call() {
    let issuer = StubIssuer::new(false);
    let base = spawn_proxy(issuer.clone()).await;
    let client = Client::new();

    for expected in ["proxied-1", "proxied-2"] {
        let res = client.get(format!("{base}{TOKEN_ROUTE}")).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["access_token"], expected);
    }
    assert_eq!(issuer.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_token_route_failure_is_500_without_details() {
    let base = spawn_proxy(StubIssuer::new(true)).await;

    let res = Client::new()
        .get(format!("{base}{TOKEN_ROUTE}"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert!(body.get("access_token").is_none());
    let message = body["error"].as_str().unwrap();
    assert!(!message.contains("hunter2"));
}

#[tokio::test]
async fn test_health_reports_service() {
    let base = spawn_proxy(StubIssuer::new(false)).await;

    let body: Value = Client::new()
        .get(format!("{base}/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "artistdig");
}

#[tokio::test]
async fn test_proxy_issuer_feeds_token_store() {
    let issuer = StubIssuer::new(false);
    let base = spawn_proxy(issuer.clone()).await;
    let proxy = Arc::new(TokenProxyIssuer::new(Client::new(), format!("{base}{TOKEN_ROUTE}")));
    let store = TokenStore::new(proxy);

    assert_eq!(store.get_token().await.unwrap(), "proxied-1");
    assert_eq!(store.get_token().await.unwrap(), "proxied-1");
    assert_eq!(issuer.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_proxy_issuer_surfaces_server_failure() {
    let base = spawn_proxy(StubIssuer::new(true)).await;
    let proxy = TokenProxyIssuer::new(Client::new(), format!("{base}{TOKEN_ROUTE}"));

    let err = proxy.issue_token().await.unwrap_err();

    assert!(matches!(err, CatalogError::TokenIssuance(ref msg) if msg.contains("500")));
}

#[tokio::test]
async fn test_invalid_bind_address_is_a_configuration_error() {
    let err = server::start_api_server(StubIssuer::new(false), "not-an-address")
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::Configuration(_)));
}
