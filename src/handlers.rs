use crate::config::Config;
use crate::errors::AppError;
use crate::models::{ConsultaResponse, PanelSet, ResponseMetadata};
use crate::padron::{categorize, normalize};
use crate::padron_client::PadronClient;
use crate::validation::validate_cuit;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Authenticated padrón client, built once at startup and reused by
    /// every lookup.
    pub padron_client: PadronClient,
}

/// Health check endpoint.
///
/// Returns the service status, version, and health information.
///
/// # Returns
///
/// * `(StatusCode, Json<serde_json::Value>)` - HTTP 200 OK with health status JSON.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "padron-api",
            "version": "0.1.0"
        })),
    )
}

/// GET /api/v1/padron/:cuit
///
/// Validates the CUIT, queries the padrón registry and returns the record
/// as three categorized display panels.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `cuit_input` - CUIT as typed by the operator, separators allowed.
///
/// # Returns
///
/// * `Result<Json<ConsultaResponse>, AppError>` - The categorized record or an error.
pub async fn consultar_padron(
    State(state): State<Arc<AppState>>,
    Path(cuit_input): Path<String>,
) -> Result<Json<ConsultaResponse>, AppError> {
    tracing::info!("GET /padron - input: {}", cuit_input);

    // Step 1: Validate before touching the registry
    let cuit = validate_cuit(&cuit_input).ok_or_else(|| {
        AppError::Validation("CUIT inválido. Debe tener 11 dígitos numéricos.".to_string())
    })?;

    // Step 2: Fetch the raw record
    let record = state
        .padron_client
        .get_taxpayer_details(cuit)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("No se encontraron datos para el CUIT ingresado.".to_string())
        })?;

    // Step 3: Normalize and categorize
    let normalized = normalize(&record);
    if normalized.is_empty() {
        tracing::warn!("Registry reply for CUIT {} carried no displayable fields", cuit);
        return Err(AppError::NotFound(
            "No se encontraron datos para el CUIT ingresado.".to_string(),
        ));
    }
    if normalized.unmapped {
        tracing::warn!(
            "Reply for CUIT {} matched no known schema, returning {} raw fields",
            cuit,
            normalized.len()
        );
    }

    let unmapped = normalized.unmapped;
    let field_count = normalized.len();
    let panels: PanelSet = categorize(normalized.fields).into();

    tracing::info!(
        "Successfully normalized record for CUIT {}. Fields: {}, unmapped: {}",
        cuit,
        field_count,
        unmapped
    );

    Ok(Json(ConsultaResponse {
        cuit,
        unmapped,
        panels,
        metadata: ResponseMetadata::new(state.config.environment()),
    }))
}
