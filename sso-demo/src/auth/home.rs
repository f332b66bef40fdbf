use axum::{extract::State, response::Html};
use serde_json::json;

use crate::context::Ctx;
use crate::error::AppError;
use crate::session::Session;

/// Landing page: the login form, or a greeting with the cached profile
pub async fn home(State(ctx): State<Ctx>, session: Session) -> Result<Html<String>, AppError> {
    let data = &session.data;
    if !data.is_logged_in {
        return ctx.templates.render("index", &json!({ "title": "Home" }));
    }

    let profile_json = match &data.profile {
        Some(profile) => serde_json::to_string_pretty(profile).map_err(anyhow::Error::from)?,
        None => String::new(),
    };

    ctx.templates.render(
        "login_successful",
        &json!({
            "title": "Login Successful",
            "profile": data.profile,
            "profile_json": profile_json,
            "first_name": data.first_name,
            "last_name": data.last_name,
        }),
    )
}
