//! OpenAPI document and Swagger UI.

use crate::error::{ErrorBody, ErrorDetail};
use crate::handlers::users::{self, UserPayload};
use crate::model::User;
use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const OPENAPI_JSON_PATH: &str = "/api-doc/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        description = "REST API for managing users and calculating age dynamically"
    ),
    paths(
        users::create_user,
        users::get_user,
        users::list_users,
        users::update_user,
        users::delete_user,
    ),
    components(schemas(User, UserPayload, ErrorBody, ErrorDetail)),
    tags((name = "Users", description = "User management"))
)]
pub struct ApiDoc;

/// Swagger UI at /swagger, backed by the generated document.
pub fn docs_routes() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger").url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
}
