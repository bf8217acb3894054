//! Integration tests for the HTTP surface.
//!
//! Each test builds the router from an explicit variable set, so nothing here
//! reads or mutates the process environment.

use axum::body::{to_bytes, Body};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN, VARY,
};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use pretty_assertions::assert_eq;
use tower::ServiceExt;

use terraflow_backend::api::{create_router, AppState};
use terraflow_backend::config::Config;

const CORS_HEADERS: [axum::http::HeaderName; 5] = [
    ACCESS_CONTROL_ALLOW_ORIGIN,
    VARY,
    ACCESS_CONTROL_ALLOW_CREDENTIALS,
    ACCESS_CONTROL_ALLOW_HEADERS,
    ACCESS_CONTROL_ALLOW_METHODS,
];

const CREDENTIAL_VARS: [&str; 7] = [
    "FIREBASE_API_KEY",
    "FIREBASE_AUTH_DOMAIN",
    "FIREBASE_DATABASE_URL",
    "FIREBASE_PROJECT_ID",
    "FIREBASE_STORAGE_BUCKET",
    "FIREBASE_MESSAGING_SENDER_ID",
    "FIREBASE_APP_ID",
];

const RELAY_KEYS: [&str; 7] = [
    "apiKey",
    "authDomain",
    "databaseURL",
    "projectId",
    "storageBucket",
    "messagingSenderId",
    "appId",
];

fn app_with(vars: &[(&str, &str)]) -> Router {
    let config = Config::from_vars(vars.iter().map(|(k, v)| (k.to_string(), v.to_string())))
        .expect("config");
    create_router(AppState::new(&config))
}

async fn send(app: Router, method: Method, uri: &str, origin: Option<&str>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(origin) = origin {
        builder = builder.header(ORIGIN, origin);
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_string(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn assert_no_cors(response: &Response) {
    for name in CORS_HEADERS {
        assert!(
            response.headers().get(&name).is_none(),
            "unexpected header {name}"
        );
    }
}

#[tokio::test]
async fn health_scenario() {
    let response = send(app_with(&[]), Method::GET, "/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_string(response).await,
        r#"{"status":"ok","app":"terraflow-backend"}"#
    );
}

#[tokio::test]
async fn health_is_byte_identical_across_calls() {
    let first = body_string(send(app_with(&[]), Method::GET, "/health", None).await).await;
    for _ in 0..3 {
        let next = body_string(send(app_with(&[]), Method::GET, "/health", None).await).await;
        assert_eq!(next, first);
    }
}

#[tokio::test]
async fn config_scenario_without_credentials() {
    let response = send(app_with(&[]), Method::GET, "/api/config", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_string(response).await,
        r#"{"firebaseConfig":{"apiKey":"","authDomain":"","databaseURL":"","projectId":"","storageBucket":"","messagingSenderId":"","appId":""}}"#
    );
}

#[tokio::test]
async fn config_never_omits_a_field() {
    // Every subset of the seven credentials, encoded as a bitmask.
    for mask in 0u32..(1 << CREDENTIAL_VARS.len()) {
        let vars: Vec<(&str, &str)> = CREDENTIAL_VARS
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, name)| (*name, "value"))
            .collect();

        let response = send(app_with(&vars), Method::GET, "/api/config", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        let inner = body["firebaseConfig"].as_object().unwrap();
        assert_eq!(inner.len(), RELAY_KEYS.len());

        for (i, key) in RELAY_KEYS.iter().enumerate() {
            let expected = if mask & (1 << i) != 0 { "value" } else { "" };
            assert_eq!(inner[*key], expected, "mask {mask:#09b} key {key}");
        }
    }
}

#[tokio::test]
async fn config_relays_values_unchanged() {
    let app = app_with(&[
        ("FIREBASE_API_KEY", "AIza-test"),
        ("FIREBASE_DATABASE_URL", "https://terraflow-default-rtdb.example.app"),
        ("FIREBASE_MESSAGING_SENDER_ID", "697583958464"),
    ]);

    let response = send(app, Method::GET, "/api/config", None).await;
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();

    assert_eq!(body["firebaseConfig"]["apiKey"], "AIza-test");
    assert_eq!(
        body["firebaseConfig"]["databaseURL"],
        "https://terraflow-default-rtdb.example.app"
    );
    assert_eq!(body["firebaseConfig"]["messagingSenderId"], "697583958464");
    assert_eq!(body["firebaseConfig"]["authDomain"], "");
}

#[tokio::test]
async fn allowlisted_origin_gets_all_headers_on_every_route() {
    for path in ["/health", "/api/config"] {
        let app = app_with(&[("ALLOWED_ORIGINS", "http://a.com, http://b.com")]);
        let response = send(app, Method::GET, path, Some("http://a.com")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "http://a.com");
        assert_eq!(headers[VARY], "Origin");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type, Authorization");
        assert_eq!(
            headers[ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, PUT, PATCH, DELETE, OPTIONS"
        );
    }
}

#[tokio::test]
async fn comma_whitespace_is_ignored() {
    let vars = [("ALLOWED_ORIGINS", "http://a.com, http://b.com")];

    for origin in ["http://a.com", "http://b.com"] {
        let response = send(app_with(&vars), Method::GET, "/health", Some(origin)).await;
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], origin);
    }

    let response = send(app_with(&vars), Method::GET, "/health", Some("http://c.com")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_no_cors(&response);
}

#[tokio::test]
async fn absent_origin_gets_no_headers() {
    let response = send(app_with(&[]), Method::GET, "/api/config", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_no_cors(&response);
}

#[tokio::test]
async fn preflight_scenario_with_default_allowlist() {
    let response = send(
        app_with(&[]),
        Method::OPTIONS,
        "/api/config",
        Some("http://localhost:3000"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
    assert_eq!(body_string(response).await, "");
}

#[tokio::test]
async fn preflight_is_no_content_for_any_path_and_origin() {
    for path in ["/health", "/api/config", "/unknown"] {
        for origin in [None, Some("http://localhost:3000"), Some("http://evil.example")] {
            let response = send(app_with(&[]), Method::OPTIONS, path, origin).await;

            assert_eq!(response.status(), StatusCode::NO_CONTENT, "{path} {origin:?}");
            assert_eq!(body_string(response).await, "");
        }
    }
}

#[tokio::test]
async fn unmatched_path_keeps_default_not_found() {
    let response = send(app_with(&[]), Method::GET, "/api/unknown", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
