pub mod answers;
pub mod chat;
pub mod health;
pub mod plan;
pub mod profile;
pub mod session;
pub mod tracking;

use axum::Router;

use crate::state::AppState;

/// Every API route, without the transport layers added in `main`.
pub fn api() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(answers::router())
        .merge(profile::router())
        .merge(plan::router())
        .merge(session::router())
        .merge(tracking::router())
        .merge(chat::router())
}
