use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use artistdig::{
    CatalogError, Result,
    spotify::{RetryPolicy, TokenIssuer, TokenStore},
};
use async_trait::async_trait;
use reqwest::StatusCode;

/// Issues `token-1`, `token-2`, ... and counts exchanges.
#[derive(Default)]
struct CountingIssuer {
    calls: AtomicUsize,
    delay: Option<Duration>,
    fail: bool,
}

impl CountingIssuer {
    fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenIssuer for CountingIssuer {
    async fn issue_token(&self) -> Result<String> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(CatalogError::TokenIssuance("status 400".to_string()));
        }
        Ok(format!("token-{n}"))
    }
}

#[tokio::test]
async fn test_token_is_issued_lazily_and_cached() {
    let issuer = Arc::new(CountingIssuer::default());
    let store = TokenStore::new(issuer.clone());

    assert_eq!(store.current_token().await, None);
    assert_eq!(issuer.calls(), 0);

    assert_eq!(store.get_token().await.unwrap(), "token-1");
    assert_eq!(store.get_token().await.unwrap(), "token-1");
    assert_eq!(issuer.calls(), 1);
    assert_eq!(store.current_token().await.as_deref(), Some("token-1"));
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_cold_start_issues_once() {
    let issuer = Arc::new(CountingIssuer::slow(Duration::from_millis(100)));
    let store = Arc::new(TokenStore::new(issuer.clone()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.get_token().await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), "token-1");
    }
    assert_eq!(issuer.calls(), 1);
}

#[tokio::test]
async fn test_invalidate_forces_a_new_exchange() {
    let issuer = Arc::new(CountingIssuer::default());
    let store = TokenStore::new(issuer.clone());

    let first = store.get_token().await.unwrap();
    store.invalidate(&first).await;

    assert_eq!(store.current_token().await, None);
    assert_eq!(store.get_token().await.unwrap(), "token-2");
    assert_eq!(issuer.calls(), 2);
}

#[tokio::test]
async fn test_invalidate_ignores_already_replaced_token() {
    let issuer = Arc::new(CountingIssuer::default());
    let store = TokenStore::new(issuer.clone());

    let stale = store.get_token().await.unwrap();
    store.invalidate(&stale).await;
    let fresh = store.get_token().await.unwrap();

    // a second caller reporting the same rejected token
    store.invalidate(&stale).await;

    assert_eq!(store.current_token().await, Some(fresh));
    assert_eq!(issuer.calls(), 2);
}

#[tokio::test]
async fn test_issuance_failure_leaves_slot_empty() {
    let issuer = Arc::new(CountingIssuer::failing());
    let store = TokenStore::new(issuer.clone());

    let err = store.get_token().await.unwrap_err();

    assert!(matches!(err, CatalogError::TokenIssuance(_)));
    assert_eq!(store.current_token().await, None);

    let _ = store.get_token().await;
    assert_eq!(issuer.calls(), 2);
}

#[test]
fn test_retry_policy_only_retries_first_unauthorized() {
    let policy = RetryPolicy::default();

    assert_eq!(policy, RetryPolicy::auth_refresh());
    assert_eq!(policy.max_attempts, 2);
    assert!(policy.should_retry(1, StatusCode::UNAUTHORIZED));
    assert!(!policy.should_retry(2, StatusCode::UNAUTHORIZED));
    assert!(!policy.should_retry(1, StatusCode::FORBIDDEN));
    assert!(!policy.should_retry(1, StatusCode::INTERNAL_SERVER_ERROR));
    assert!(!policy.should_retry(1, StatusCode::OK));
}

#[test]
fn test_single_attempt_policy_never_retries() {
    let policy = RetryPolicy { max_attempts: 1 };

    assert!(!policy.should_retry(1, StatusCode::UNAUTHORIZED));
    assert!(RetryPolicy::is_auth_failure(StatusCode::UNAUTHORIZED));
}
