/// OAuth Callback Handler
///
/// Exchanges the authorization code for the user's profile and marks the
/// session as logged in.
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use workos_http_client::apis::sso_api::{self, GetProfileAndTokenParams};

use crate::context::Ctx;
use crate::error::AppError;
use crate::session::Session;

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Check the returned `state` against the one stored at login. Sessions
/// without a pending state (IdP-initiated login) are accepted.
fn state_matches(expected: Option<&str>, returned: Option<&str>) -> bool {
    match expected {
        Some(expected) => returned == Some(expected),
        None => true,
    }
}

pub async fn handle_callback(
    State(ctx): State<Ctx>,
    mut session: Session,
    Query(query): Query<CallbackQuery>,
) -> Result<Response, AppError> {
    // Check if the identity provider returned an error
    if let Some(error) = &query.error {
        tracing::warn!(
            "Identity provider returned error {}: {}",
            error,
            query.error_description.as_deref().unwrap_or("no description")
        );
        return Ok(ctx.templates.error_page(
            StatusCode::BAD_REQUEST,
            format!("Redirect callback error: {}", error),
        ));
    }

    if !state_matches(session.data.oauth_state.as_deref(), query.state.as_deref()) {
        tracing::warn!("Callback state does not match the pending login request");
        return Ok(ctx.templates.error_page(
            StatusCode::BAD_REQUEST,
            "Redirect callback error: invalid state parameter. The login request may have expired.",
        ));
    }

    let Some(code) = query.code.filter(|c| !c.is_empty()) else {
        tracing::warn!("No authorization code provided in callback");
        return Ok(ctx.templates.error_page(
            StatusCode::BAD_REQUEST,
            "Error exchanging code for profile: no authorization code received",
        ));
    };

    let profile = match sso_api::get_profile_and_token(
        &ctx.workos,
        GetProfileAndTokenParams {
            client_id: ctx.sso.client_id.clone(),
            code,
        },
    )
    .await
    {
        Ok(profile) => profile,
        Err(e) => {
            tracing::error!("Error exchanging code for profile: {}", e);
            return Ok(ctx.templates.error_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error exchanging code for profile: {}", e),
            ));
        }
    };

    tracing::info!(
        profile_id = %profile.profile.id,
        connection_type = ?profile.profile.connection_type,
        "User logged in"
    );

    session.cycle_id().await?;
    session.data.log_in(profile);
    session.save().await?;

    Ok(Redirect::to("/").into_response())
}
