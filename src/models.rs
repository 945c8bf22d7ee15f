use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::padron::{NormalizedField, Panels};

// ============ API Response Models ============

/// A single label/value card inside a display panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelField {
    /// Fixed Spanish display label (e.g. "Razón Social").
    pub label: String,
    /// Raw value as the registry reported it.
    pub value: Value,
}

impl From<NormalizedField> for PanelField {
    fn from(field: NormalizedField) -> Self {
        Self {
            label: field.label,
            value: field.value,
        }
    }
}

/// The three categorized panels the consulta page renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelSet {
    /// Información General.
    pub general: Vec<PanelField>,
    /// Información de Actividad.
    pub activity: Vec<PanelField>,
    /// Información de Domicilio.
    pub address: Vec<PanelField>,
}

impl From<Panels> for PanelSet {
    fn from(panels: Panels) -> Self {
        Self {
            general: panels.general.into_iter().map(PanelField::from).collect(),
            activity: panels.activity.into_iter().map(PanelField::from).collect(),
            address: panels.address.into_iter().map(PanelField::from).collect(),
        }
    }
}

/// Metadata about how a lookup was served.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMetadata {
    /// Registry service the record came from.
    pub source: String,
    /// Registry environment consulted ("prod" or "dev").
    pub environment: String,
    /// Timestamp of the lookup (RFC 3339).
    pub consulted_at: String,
}

impl ResponseMetadata {
    pub fn new(environment: &str) -> Self {
        Self {
            source: "ws_sr_padron_a13".to_string(),
            environment: environment.to_string(),
            consulted_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Response payload for a successful padrón lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultaResponse {
    /// Normalized numeric CUIT that was looked up.
    pub cuit: u64,
    /// True when the registry reply matched no known schema and the panels
    /// carry raw field names; the page shows a warning banner for it.
    pub unmapped: bool,
    /// Categorized display panels.
    pub panels: PanelSet,
    /// Lookup metadata.
    pub metadata: ResponseMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::padron::{categorize, normalize};
    use serde_json::json;

    #[test]
    fn test_panel_set_preserves_order() {
        let record = json!({
            "persona": {
                "idPersona": 20123456789_i64,
                "apellido": "PEREZ",
                "nombre": "JUAN",
                "mesCierre": 12
            }
        });
        let normalized = normalize(&record);
        let panels: PanelSet = categorize(normalized.fields).into();

        assert_eq!(panels.general[0].label, "Contribuyente");
        assert_eq!(panels.general[1].label, "CUIT");
        assert_eq!(panels.activity[0].label, "Mes de Cierre");
        assert!(panels.address.is_empty());
    }

    #[test]
    fn test_consulta_response_serializes_flat_panels() {
        let record = json!({"persona": {"idPersona": 20123456789_i64}});
        let normalized = normalize(&record);
        let response = ConsultaResponse {
            cuit: 20123456789,
            unmapped: normalized.unmapped,
            panels: categorize(normalized.fields).into(),
            metadata: ResponseMetadata::new("prod"),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["cuit"], json!(20123456789_u64));
        assert_eq!(value["unmapped"], json!(false));
        assert_eq!(value["panels"]["general"][0]["label"], json!("CUIT"));
        assert_eq!(value["metadata"]["source"], json!("ws_sr_padron_a13"));
    }
}
