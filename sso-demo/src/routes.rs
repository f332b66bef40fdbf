use crate::context::Ctx;
use crate::{auth, directory_sync};
use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_cookies::CookieManagerLayer;

/// Create all routes for the application
pub fn create_routes<S: Send + Sync>(ctx: Ctx) -> Router<S> {
    // Directory Sync views require a logged-in session
    let protected_routes = Router::new()
        .route(
            "/directory-info",
            get(directory_sync::directories::directory_info),
        )
        .route(
            "/directory/{id}",
            get(directory_sync::directories::directory_details),
        )
        .route("/users", get(directory_sync::users::list_users))
        .route("/groups", get(directory_sync::groups::list_groups))
        .route_layer(middleware::from_fn_with_state(
            ctx.clone(),
            auth::require_login,
        ));

    let public_routes = Router::new()
        .route("/", get(auth::home::home))
        .route("/login", post(auth::login::login))
        .route("/callback", get(auth::callback::handle_callback))
        .route("/logout", get(auth::logout::logout))
        .route("/health", get(health_check));

    public_routes
        .merge(protected_routes)
        .layer(CookieManagerLayer::new())
        .with_state(ctx)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    tracing::debug!("Health check endpoint called");
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
