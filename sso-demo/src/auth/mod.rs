pub mod callback;
pub mod home;
pub mod login;
pub mod logout;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tower_cookies::Cookies;

use crate::context::Ctx;
use crate::error::AppError;
use crate::session::Session;

/// Name of the user behind a logged-in session, attached to the request by
/// [`require_login`].
#[derive(Debug, Clone, Default)]
pub struct CurrentUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Reject requests whose session is not logged in with 401
pub async fn require_login(
    State(ctx): State<Ctx>,
    cookies: Cookies,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session = Session::load(&ctx, cookies).await?;

    if !session.data.is_logged_in {
        tracing::warn!("Rejected unauthenticated request to {}", request.uri().path());
        return Err(AppError::Unauthenticated);
    }

    request.extensions_mut().insert(CurrentUser {
        first_name: session.data.first_name,
        last_name: session.data.last_name,
    });

    Ok(next.run(request).await)
}
