pub mod auth;
pub mod context;
pub mod directory_sync;
pub mod error;
pub mod routes;
pub mod session;
pub mod templates;

pub use context::{Ctx, Settings};
pub use routes::create_routes;
