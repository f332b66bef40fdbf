use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use oauth2::CsrfToken;
use workos_http_client::apis::sso_api::{self, GetAuthorizationUrlParams};

use crate::context::Ctx;
use crate::error::AppError;
use crate::session::Session;

/// `login_method` value that selects the organization's SAML connection
pub const SAML_LOGIN_METHOD: &str = "saml";

#[derive(Debug, serde::Deserialize)]
pub struct LoginForm {
    /// `saml`, or an OAuth provider name such as `GoogleOAuth`
    #[serde(default)]
    pub login_method: String,
}

/// Build the authorization request for the chosen login method
pub fn authorization_params(ctx: &Ctx, login_method: &str, state: String) -> GetAuthorizationUrlParams {
    let mut params = GetAuthorizationUrlParams {
        client_id: ctx.sso.client_id.clone(),
        redirect_uri: ctx.sso.redirect_uri.clone(),
        state: Some(state),
        ..Default::default()
    };

    if login_method == SAML_LOGIN_METHOD {
        params.organization = Some(ctx.sso.organization_id.clone());
    } else {
        params.provider = Some(login_method.to_string());
    }
    params
}

/// Redirect the browser to the identity provider
pub async fn login(
    State(ctx): State<Ctx>,
    mut session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let state = CsrfToken::new_random().secret().clone();
    let params = authorization_params(&ctx, &form.login_method, state.clone());

    let url = match sso_api::get_authorization_url(&ctx.workos, &params) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!(
                "Failed to build authorization URL for login method {:?}: {}",
                form.login_method,
                e
            );
            return Ok(ctx.templates.error_page(
                StatusCode::BAD_REQUEST,
                format!("Failed to start login: {}", e),
            ));
        }
    };

    session.data.oauth_state = Some(state);
    session.save().await?;

    tracing::info!("Generated authorization URL: {}", url);
    Ok(Redirect::to(url.as_str()).into_response())
}
