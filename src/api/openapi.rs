//! OpenAPI document for the HTTP surface

use axum::Json;
use utoipa::OpenApi;

use crate::api::error::ErrorResponse;
use crate::api::handlers::{self, HealthResponse};
use crate::types::{Contact, ContactPayload, FieldError};

#[derive(OpenApi)]
#[openapi(
    info(title = "Contacts API", description = "Create and retrieve contacts"),
    paths(
        handlers::list_contacts,
        handlers::get_contact,
        handlers::create_contact,
        handlers::update_contact,
        handlers::delete_contact,
        handlers::health,
    ),
    components(schemas(Contact, ContactPayload, FieldError, ErrorResponse, HealthResponse)),
    tags((name = "Contact Controller", description = "Create and retrieve contacts"))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
