//! HTTP API server

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::storage::ContactStore;

pub mod error;
pub mod extract;
pub mod handlers;
pub mod openapi;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use openapi::ApiDoc;
pub use state::AppState;

/// Build the API router using the provided application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api-doc/openapi.json", get(openapi::openapi_json))
        .route("/contact", post(handlers::create_contact))
        .route(
            "/contact/all",
            get(handlers::list_contacts)
                .put(handlers::update_contact_all)
                .delete(handlers::delete_contact_all),
        )
        .route(
            "/contact/:id",
            get(handlers::get_contact)
                .put(handlers::update_contact)
                .delete(handlers::delete_contact),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Convenience helper wiring the default service over a store
pub fn create_store_router(store: Arc<dyn ContactStore>) -> Router {
    create_router(AppState::with_store(store))
}
