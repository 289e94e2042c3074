//! API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::error::{ApiError, ErrorResponse};
use crate::api::extract::ValidatedJson;
use crate::api::AppState;
use crate::types::{Contact, ContactPayload};

/// Health check with store status
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let contacts = state.service.count().await?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        contacts,
    }))
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub contacts: usize,
}

/// Retrieves all contacts
#[utoipa::path(
    get,
    path = "/contact/all",
    tag = "Contact Controller",
    responses(
        (status = 200, description = "Successful retrieval of contacts", body = [Contact])
    )
)]
pub async fn list_contacts(
    State(state): State<AppState>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let contacts = state.service.list_contacts().await?;
    Ok(Json(contacts))
}

/// Get contact by id
#[utoipa::path(
    get,
    path = "/contact/{id}",
    tag = "Contact Controller",
    params(("id" = String, Path, description = "Contact identifier")),
    responses(
        (status = 200, description = "Successful retrieval of contact", body = Contact),
        (status = 404, description = "Contact doesn't exist", body = ErrorResponse)
    )
)]
pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError> {
    let contact = state.service.get_by_id(&id).await?;
    Ok(Json(contact))
}

/// Create contact from the provided payload
#[utoipa::path(
    post,
    path = "/contact",
    tag = "Contact Controller",
    request_body = ContactPayload,
    responses(
        (status = 201, description = "Successful creation of contact", body = Contact),
        (status = 400, description = "Bad request: unsuccessful creation", body = ErrorResponse)
    )
)]
pub async fn create_contact(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ContactPayload>,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    let contact = state
        .service
        .save(payload)
        .await
        .map_err(ApiError::rejected)?;

    Ok((StatusCode::CREATED, Json(contact)))
}

/// Update contact by id; responds with the stored record
#[utoipa::path(
    put,
    path = "/contact/{id}",
    tag = "Contact Controller",
    params(("id" = String, Path, description = "Contact identifier")),
    request_body = ContactPayload,
    responses(
        (status = 200, description = "Successful update of contact", body = Contact),
        (status = 400, description = "Bad request: unsuccessful update", body = ErrorResponse)
    )
)]
pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<ContactPayload>,
) -> Result<Json<Contact>, ApiError> {
    apply_update(&state, &id, payload).await
}

/// Delete contact by id
#[utoipa::path(
    delete,
    path = "/contact/{id}",
    tag = "Contact Controller",
    params(("id" = String, Path, description = "Contact identifier")),
    responses(
        (status = 204, description = "Successful deletion of contact"),
        (status = 400, description = "Bad request: unsuccessful deletion", body = ErrorResponse)
    )
)]
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    apply_delete(&state, &id).await
}

/// `/contact/all` is a static route, so mutations on it land here and
/// target the literal id `all`.
pub async fn update_contact_all(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ContactPayload>,
) -> Result<Json<Contact>, ApiError> {
    apply_update(&state, ALL_SEGMENT, payload).await
}

pub async fn delete_contact_all(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    apply_delete(&state, ALL_SEGMENT).await
}

const ALL_SEGMENT: &str = "all";

async fn apply_update(
    state: &AppState,
    id: &str,
    payload: ContactPayload,
) -> Result<Json<Contact>, ApiError> {
    state
        .service
        .update(id, payload)
        .await
        .map_err(ApiError::rejected)?;

    // A delete racing in after the update is still a rejected update.
    let contact = state
        .service
        .get_by_id(id)
        .await
        .map_err(ApiError::rejected)?;
    Ok(Json(contact))
}

async fn apply_delete(state: &AppState, id: &str) -> Result<StatusCode, ApiError> {
    state
        .service
        .delete(id)
        .await
        .map_err(ApiError::rejected)?;

    Ok(StatusCode::NO_CONTENT)
}
