//! Session scenarios driven through the public façade with an in-process
//! HTTP client that records every request it receives.

use async_trait::async_trait;
use bridge_desktop::MemorySecureStore;
use bridge_traits::error::Result as BridgeResult;
use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
use bridge_traits::storage::SecureStore;
use bytes::Bytes;
use core_runtime::config::CoreConfig;
use core_service::{CoreError, CoreService};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const LOGIN_RESPONSE: &str = r#"{"access_token":"AT1","refresh_token":"RT1","expires_in":3600}"#;
const USER_RESPONSE: &str = r#"{"id":"42","name":"John Doe","username":"@johndoe","bio":"Hi","profile_image_name":"person.circle.fill","post_count":42,"follower_count":589,"following_count":217}"#;

/// Answers by path and records each request.
#[derive(Default)]
struct StubServer {
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubServer {
    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpClient for StubServer {
    async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse> {
        let body = if request.url.ends_with("/auth/login") {
            LOGIN_RESPONSE.to_string()
        } else if request.url.ends_with("/users") {
            format!("[{}]", USER_RESPONSE)
        } else {
            USER_RESPONSE.to_string()
        };
        self.requests.lock().unwrap().push(request);

        Ok(HttpResponse {
            status: 200,
            headers: HashMap::new(),
            body: Bytes::from(body),
        })
    }
}

fn bootstrap() -> (CoreService, Arc<StubServer>, MemorySecureStore) {
    let server = Arc::new(StubServer::default());
    let store = MemorySecureStore::new();
    let config = CoreConfig::builder()
        .base_url("https://api.example.com")
        .key_namespace("com.example.demo")
        .http_client(server.clone())
        .secure_store(Arc::new(store.clone()))
        .build()
        .unwrap();

    (CoreService::new(config), server, store)
}

#[tokio::test]
async fn login_then_fetch_user_sends_bearer_token() {
    let (core, server, store) = bootstrap();

    assert!(core.api_client().login("a@b.com", "x").await.unwrap());
    assert!(core.token_manager().is_authenticated().await);

    let key = core.config().storage_key("accessToken");
    assert_eq!(key, "com.example.demo.accessToken");
    assert_eq!(store.get_secret(&key).await.unwrap(), "AT1");

    let user = core.api_client().fetch_user("42").await.unwrap();
    assert_eq!(user.username, "@johndoe");

    let requests = server.requests();
    assert_eq!(requests.len(), 2);

    let login = &requests[0];
    assert_eq!(login.url, "https://api.example.com/auth/login");
    assert!(!login.headers.contains_key("Authorization"));
    let sent: serde_json::Value = serde_json::from_slice(login.body.as_ref().unwrap()).unwrap();
    assert_eq!(sent, serde_json::json!({"email": "a@b.com", "password": "x"}));

    let fetch = &requests[1];
    assert_eq!(fetch.url, "https://api.example.com/users/42");
    assert_eq!(fetch.headers["Authorization"], "Bearer AT1");
    assert_eq!(fetch.headers["Accept"], "application/json");
}

#[tokio::test]
async fn fetch_user_without_login_is_unauthorized_and_offline() {
    let (core, server, _store) = bootstrap();

    let err = core.api_client().fetch_user("42").await.unwrap_err();

    assert!(matches!(err, CoreError::Network(ref e) if e.is_unauthorized()));
    assert_eq!(server.count(), 0);
}

#[tokio::test]
async fn logout_then_fetch_users_is_unauthorized() {
    let (core, server, store) = bootstrap();

    core.api_client().login("a@b.com", "x").await.unwrap();
    assert_eq!(core.api_client().fetch_users().await.unwrap().len(), 1);
    let before = server.count();

    core.api_client().logout().await.unwrap();
    assert!(!core.token_manager().is_authenticated().await);
    assert!(store.is_empty().await);

    let err = core.api_client().fetch_users().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(server.count(), before);
}

#[tokio::test]
async fn logout_without_session_succeeds() {
    let (core, server, _store) = bootstrap();

    core.api_client().logout().await.unwrap();
    core.api_client().logout().await.unwrap();

    assert_eq!(server.count(), 0);
}

#[tokio::test]
async fn malformed_refresh_response_keeps_stored_pair() {
    let (core, server, store) = bootstrap();
    core.api_client().login("a@b.com", "x").await.unwrap();

    // The stub answers /auth/refresh with a user body, which is not an
    // auth response.
    let err = core.token_manager().refresh_access_token().await.unwrap_err();
    assert!(matches!(
        err,
        core_auth::AuthError::Network(core_net::NetworkError::DecodingFailed(_))
    ));

    let last = server.requests().pop().unwrap();
    assert_eq!(last.url, "https://api.example.com/auth/refresh");
    assert_eq!(
        store.get_secret("com.example.demo.refreshToken").await.unwrap(),
        "RT1"
    );
}

#[tokio::test]
async fn configured_timeout_reaches_every_request() {
    let server = Arc::new(StubServer::default());
    let config = CoreConfig::builder()
        .base_url("https://api.example.com")
        .request_timeout(Duration::from_secs(5))
        .http_client(server.clone())
        .secure_store(Arc::new(MemorySecureStore::new()))
        .build()
        .unwrap();
    let core = CoreService::new(config);

    core.api_client().login("a@b.com", "x").await.unwrap();
    core.api_client().fetch_user("42").await.unwrap();
    let _ = core.token_manager().refresh_access_token().await;

    let requests = server.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests[2].url.ends_with("/auth/refresh"));
    for request in &requests {
        assert_eq!(request.timeout, Some(Duration::from_secs(5)), "{}", request.url);
    }
}
