//! Handlebars templates compiled into the binary.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::json;

use crate::error::AppError;

const LAYOUT_TEMPLATE: &str = include_str!("../templates/layout.hbs");
const INDEX_TEMPLATE: &str = include_str!("../templates/index.hbs");
const LOGIN_SUCCESSFUL_TEMPLATE: &str = include_str!("../templates/login_successful.hbs");
const DIRECTORY_DETAILS_TEMPLATE: &str = include_str!("../templates/directory_details.hbs");
const USERS_TEMPLATE: &str = include_str!("../templates/users.hbs");
const GROUPS_TEMPLATE: &str = include_str!("../templates/groups.hbs");
const ERROR_TEMPLATE: &str = include_str!("../templates/error.hbs");

#[derive(Clone)]
pub struct Templates {
    registry: Arc<Handlebars<'static>>,
}

impl Templates {
    pub fn new() -> Result<Self, handlebars::TemplateError> {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(false);

        hbs.register_partial("layout", LAYOUT_TEMPLATE)?;
        hbs.register_template_string("index", INDEX_TEMPLATE)?;
        hbs.register_template_string("login_successful", LOGIN_SUCCESSFUL_TEMPLATE)?;
        hbs.register_template_string("directory_details", DIRECTORY_DETAILS_TEMPLATE)?;
        hbs.register_template_string("users", USERS_TEMPLATE)?;
        hbs.register_template_string("groups", GROUPS_TEMPLATE)?;
        hbs.register_template_string("error", ERROR_TEMPLATE)?;

        Ok(Self {
            registry: Arc::new(hbs),
        })
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<Html<String>, AppError> {
        self.registry.render(name, data).map(Html).map_err(|e| {
            tracing::error!("Failed to render template {}: {}", name, e);
            AppError::InternalError("Failed to render page".to_string())
        })
    }

    /// Render the generic error page. Falls back to plain text if the error
    /// template itself cannot be rendered.
    pub fn error_page(&self, status: StatusCode, error: impl Into<String>) -> Response {
        let error = error.into();
        match self
            .registry
            .render("error", &json!({ "title": "Error", "error": error }))
        {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {}", e);
                (status, error).into_response()
            }
        }
    }
}
