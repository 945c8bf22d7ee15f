//! AFIP Padrón Consulta API Library
//!
//! This library provides the core functionality for the padrón consulta
//! service: CUIT validation, the AFIP registry client, normalization of
//! the heterogeneous registry replies and the HTTP handlers that serve
//! them as categorized panels.
//!
//! # Modules
//!
//! - `api`: API definitions.
//! - `core`: Core business logic.
//! - `integrations`: External service integrations.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `models`: API response models.
//! - `padron`: Registry record normalization and categorization.
//! - `padron_client`: AFIP padrón registry client.
//! - `validation`: CUIT input validation.

pub mod api;
pub mod core;
pub mod integrations;

// Re-export primary modules for shared use in tests
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod padron;
pub mod padron_client;
pub mod validation;
