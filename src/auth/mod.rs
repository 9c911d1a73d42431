use crate::state::AppState;
use axum::Router;

mod dto;
pub mod error;
pub mod handlers;
pub mod password;
pub mod services;

pub use error::AuthError;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::auth_routes())
}
