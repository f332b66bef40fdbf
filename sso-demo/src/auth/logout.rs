use axum::response::Redirect;

use crate::error::AppError;
use crate::session::Session;

/// Clear the login fields of the session and go back to the landing page
pub async fn logout(mut session: Session) -> Result<Redirect, AppError> {
    if session.is_persisted() {
        session.data.clear_login();
        session.save().await?;
        tracing::info!("User logged out");
    }
    Ok(Redirect::to("/"))
}
