//! Router assembly.

mod common;
mod docs;
mod users;

pub use common::common_routes;
pub use docs::{docs_routes, ApiDoc, OPENAPI_JSON_PATH};
pub use users::user_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

const MAX_BODY_BYTES: usize = 64 * 1024;

/// Full application: user CRUD, common routes, and API docs.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(user_routes(state))
        .merge(docs_routes())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}
