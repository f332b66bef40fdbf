//! Shared helpers for the route tests: a router wired to a mocked WorkOS API
//! and a small cookie-carrying request helper.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use serde_json::{Value, json};
use std::collections::HashMap;
use sso_demo::{Ctx, Settings, create_routes};
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const COOKIE_NAME: &str = "sso_demo_session";

/// Environment for a fully configured app talking to `api_url`
pub fn test_vars(api_url: &str) -> HashMap<&'static str, String> {
    HashMap::from([
        ("WORKOS_API_KEY", "sk_test_123".to_string()),
        ("WORKOS_CLIENT_ID", "client_123".to_string()),
        ("WORKOS_ORGANIZATION_ID", "org_123".to_string()),
        (
            "WORKOS_REDIRECT_URI",
            "http://localhost:8000/callback".to_string(),
        ),
        ("WORKOS_API_URL", api_url.to_string()),
        ("SESSION_SECRET", "test-session-secret".to_string()),
        ("SESSION_COOKIE_SECURE", "false".to_string()),
    ])
}

pub fn settings_from(vars: HashMap<&'static str, String>) -> Settings {
    Settings::from_lookup(move |key: &str| vars.get(key).cloned()).expect("test settings are valid")
}

pub async fn app_with(settings: Settings) -> Router {
    let ctx = Ctx::from_settings(settings)
        .await
        .expect("context builds with an in-memory store");
    create_routes(ctx)
}

pub async fn test_app(server: &MockServer) -> Router {
    app_with(settings_from(test_vars(&server.uri()))).await
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

pub async fn post_form(app: &Router, uri: &str, body: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

/// `name=value` of the session cookie set by `response`, if any
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{}=", COOKIE_NAME)))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

pub fn profile_response() -> Value {
    json!({
        "access_token": "01DMEK0J53CVMC32CK5SE0KZ8Q",
        "profile": {
            "object": "profile",
            "id": "prof_01DMC79VCBZ0NY2099737PSVF1",
            "connection_id": "conn_01E4ZCR3C56J083X43JQXF3JK5",
            "connection_type": "OktaSAML",
            "organization_id": "org_123",
            "email": "todd@foo-corp.com",
            "first_name": "Todd",
            "last_name": "Rundgren",
            "idp_id": "00u1a0ufowBJlzPlk357",
            "raw_attributes": {}
        }
    })
}

pub async fn mount_token_exchange(server: &MockServer, code: &str) {
    Mock::given(method("POST"))
        .and(path("/sso/token"))
        .and(body_string_contains(format!("code={}", code)))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_response()))
        .mount(server)
        .await;
}

/// Complete an IdP-initiated callback and return the logged-in session cookie
pub async fn login(app: &Router, server: &MockServer) -> String {
    mount_token_exchange(server, "good_code").await;
    let response = get(app, "/callback?code=good_code", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    session_cookie(&response).expect("callback sets the session cookie")
}

pub fn directory_json(id: &str, name: &str) -> Value {
    json!({
        "object": "directory",
        "id": id,
        "domain": "foo-corp.com",
        "name": name,
        "organization_id": "org_123",
        "state": "linked",
        "type": "okta scim v2.0",
        "created_at": "2021-06-25T19:07:33.155Z",
        "updated_at": "2021-06-25T19:07:33.155Z"
    })
}

pub fn group_json(id: &str, directory_id: &str, name: &str) -> Value {
    json!({
        "object": "directory_group",
        "id": id,
        "idp_id": format!("idp_{}", id),
        "directory_id": directory_id,
        "organization_id": "org_123",
        "name": name,
        "created_at": "2021-06-25T19:07:33.155Z",
        "updated_at": "2021-06-25T19:07:33.155Z",
        "raw_attributes": {}
    })
}

pub async fn mount_groups(server: &MockServer, directory_id: &str, groups: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/directory_groups"))
        .and(query_param("directory", directory_id))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": groups,
            "list_metadata": { "before": null, "after": null }
        })))
        .mount(server)
        .await;
}
