//! Contacts - a small HTTP API for managing contact records
//!
//! - CRUD routes under `/contact` backed by a pluggable store
//! - Request validation before any store access
//! - OpenAPI document served at `/api-doc/openapi.json`

pub mod api;
pub mod config;
pub mod error;
pub mod service;
pub mod storage;
pub mod types;
pub mod validation;

pub use error::{Error, Result};
