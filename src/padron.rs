//! Normalization of padrón registry records.
//!
//! The registry returns taxpayer data in two shapes. The current
//! ws_sr_padron_a13 reply nests a `persona` object with Spanish field
//! names (here "schema A"); the older gateway reply is a flat object with
//! mixed English and Spanish names ("schema B"). This module decodes
//! whichever shape arrived, maps the known raw fields to fixed display
//! labels, folds the fiscal domicile into `Domicilio - *` entries and tags
//! every field with the display panel it belongs to.

use serde::Deserialize;
use serde_json::Value;

/// Display panel a normalized field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    General,
    Activity,
    Address,
}

/// A single display-ready field: fixed Spanish label, raw value, panel tag.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedField {
    pub label: String,
    pub value: Value,
    pub category: Category,
}

/// Outcome of normalizing one registry reply.
#[derive(Debug, Clone, Default)]
pub struct NormalizedRecord {
    pub fields: Vec<NormalizedField>,
    /// True when the reply matched neither known schema and `fields`
    /// carries the raw keys untranslated.
    pub unmapped: bool,
}

impl NormalizedRecord {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Value for a display label, if the record produced it.
    pub fn get(&self, label: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|field| field.label == label)
            .map(|field| &field.value)
    }
}

/// Taxpayer record nested under `persona` in a schema A reply.
///
/// Every field is optional because the registry omits whatever it has no
/// data for. Unknown fields are ignored so additions on the registry side
/// do not break decoding.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Persona {
    #[serde(rename = "idPersona")]
    pub id_persona: Option<i64>,
    #[serde(rename = "razonSocial")]
    pub razon_social: Option<String>,
    #[serde(rename = "tipoPersona")]
    pub tipo_persona: Option<String>,
    #[serde(rename = "estadoClave")]
    pub estado_clave: Option<String>,
    #[serde(rename = "formaJuridica")]
    pub forma_juridica: Option<String>,
    #[serde(rename = "descripcionActividadPrincipal")]
    pub descripcion_actividad_principal: Option<String>,
    #[serde(rename = "idActividadPrincipal")]
    pub id_actividad_principal: Option<i64>,
    #[serde(rename = "periodoActividadPrincipal")]
    pub periodo_actividad_principal: Option<i64>,
    #[serde(rename = "mesCierre")]
    pub mes_cierre: Option<i64>,
    #[serde(rename = "tipoClave")]
    pub tipo_clave: Option<String>,
    pub apellido: Option<String>,
    pub nombre: Option<String>,
    pub domicilio: Vec<Domicilio>,
}

/// One address entry of a schema A record. Only the first entry (the
/// fiscal domicile) is rendered; later entries are just counted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Domicilio {
    pub direccion: Option<String>,
    pub calle: Option<String>,
    pub numero: Option<i64>,
    pub localidad: Option<String>,
    #[serde(rename = "descripcionProvincia")]
    pub descripcion_provincia: Option<String>,
    #[serde(rename = "codigoPostal")]
    pub codigo_postal: Option<String>,
    #[serde(rename = "tipoDomicilio")]
    pub tipo_domicilio: Option<String>,
    #[serde(rename = "estadoDomicilio")]
    pub estado_domicilio: Option<String>,
}

/// Label given to the composed apellido + nombre field. It always heads
/// the general panel.
pub const CONTRIBUYENTE_LABEL: &str = "Contribuyente";

/// Raw key, display label and panel for flat schema B records, in the
/// order the gateway historically produced them: English names first,
/// Spanish second. When both variants of a label are present the later
/// raw key's value wins while the label keeps its first position.
const FLAT_FIELD_TABLE: &[(&str, &str, Category)] = &[
    ("taxpayerId", "CUIT", Category::General),
    ("taxpayerName", "Razón Social", Category::General),
    ("taxpayerType", "Tipo de Contribuyente", Category::General),
    ("taxpayerStatus", "Estado", Category::General),
    ("inscriptionDate", "Fecha de Inscripción", Category::General),
    ("address", "Domicilio", Category::Address),
    ("city", "Ciudad", Category::General),
    ("province", "Provincia", Category::General),
    ("postalCode", "Código Postal", Category::General),
    ("country", "País", Category::General),
    ("email", "Email", Category::General),
    ("phone", "Teléfono", Category::General),
    ("activityStartDate", "Fecha de Inicio de Actividad", Category::Activity),
    ("activityEndDate", "Fecha de Fin de Actividad", Category::Activity),
    ("activityDescription", "Descripción de Actividad", Category::Activity),
    ("taxCategory", "Categoría Fiscal", Category::General),
    ("taxRegime", "Régimen Fiscal", Category::General),
    ("cuit", "CUIT", Category::General),
    ("razonSocial", "Razón Social", Category::General),
    ("tipoPersona", "Tipo de Persona", Category::General),
    ("estado", "Estado", Category::General),
    ("fechaInscripcion", "Fecha de Inscripción", Category::General),
    ("domicilio", "Domicilio", Category::Address),
    ("ciudad", "Ciudad", Category::General),
    ("provincia", "Provincia", Category::General),
    ("codigoPostal", "Código Postal", Category::General),
    ("pais", "País", Category::General),
    ("telefono", "Teléfono", Category::General),
    ("fechaInicioActividad", "Fecha de Inicio de Actividad", Category::Activity),
    ("fechaFinActividad", "Fecha de Fin de Actividad", Category::Activity),
    ("descripcionActividad", "Descripción de Actividad", Category::Activity),
    ("categoriaFiscal", "Categoría Fiscal", Category::General),
    ("regimenFiscal", "Régimen Fiscal", Category::General),
];

/// Normalizes one raw registry reply into display fields.
///
/// Pure function: schema A is tried first, then the flat schema B table,
/// and as a last resort the reply's own keys are surfaced untranslated
/// with `unmapped` set so the caller can warn. Replies wrapped in an
/// array are unwrapped to their first element; `null`, scalars, empty
/// arrays and empty objects all produce an empty record.
pub fn normalize(record: &Value) -> NormalizedRecord {
    let working = match record {
        Value::Array(items) => match items.first() {
            Some(head) => head,
            None => return NormalizedRecord::default(),
        },
        other => other,
    };

    let object = match working.as_object() {
        Some(object) if !object.is_empty() => object,
        _ => return NormalizedRecord::default(),
    };

    // Schema A: nested persona object with Spanish field names.
    if let Some(persona_value) = object.get("persona") {
        let non_empty = persona_value
            .as_object()
            .map(|p| !p.is_empty())
            .unwrap_or(false);
        if non_empty {
            if let Ok(persona) = serde_json::from_value::<Persona>(persona_value.clone()) {
                let fields = persona_fields(persona);
                if !fields.is_empty() {
                    return NormalizedRecord {
                        fields,
                        unmapped: false,
                    };
                }
            }
        }
    }

    // Schema B: flat record with mixed English/Spanish field names.
    let fields = flat_fields(object);
    if !fields.is_empty() {
        return NormalizedRecord {
            fields,
            unmapped: false,
        };
    }

    // Neither schema matched: surface the non-null raw entries so the
    // operator still sees what the registry sent.
    NormalizedRecord {
        fields: raw_fields(object),
        unmapped: true,
    }
}

fn push_field(fields: &mut Vec<NormalizedField>, label: &str, category: Category, value: Option<Value>) {
    if let Some(value) = value {
        if !value.is_null() {
            fields.push(NormalizedField {
                label: label.to_string(),
                value,
                category,
            });
        }
    }
}

fn persona_fields(persona: Persona) -> Vec<NormalizedField> {
    let mut fields = Vec::new();

    push_field(&mut fields, "CUIT", Category::General, persona.id_persona.map(Value::from));
    push_field(&mut fields, "Razón Social", Category::General, persona.razon_social.map(Value::from));
    push_field(&mut fields, "Tipo de Persona", Category::General, persona.tipo_persona.map(Value::from));
    push_field(&mut fields, "Estado", Category::General, persona.estado_clave.map(Value::from));
    push_field(&mut fields, "Forma Jurídica", Category::General, persona.forma_juridica.map(Value::from));
    push_field(
        &mut fields,
        "Actividad Principal",
        Category::Activity,
        persona.descripcion_actividad_principal.map(Value::from),
    );
    push_field(
        &mut fields,
        "ID Actividad Principal",
        Category::Activity,
        persona.id_actividad_principal.map(Value::from),
    );
    push_field(
        &mut fields,
        "Período Actividad Principal",
        Category::Activity,
        persona.periodo_actividad_principal.map(Value::from),
    );
    push_field(&mut fields, "Mes de Cierre", Category::Activity, persona.mes_cierre.map(Value::from));
    push_field(&mut fields, "Tipo de Clave", Category::General, persona.tipo_clave.map(Value::from));

    // Natural persons carry apellido/nombre instead of razonSocial; the
    // composed full name is shown as "Contribuyente".
    let nombre_completo = format!(
        "{} {}",
        persona.apellido.as_deref().unwrap_or(""),
        persona.nombre.as_deref().unwrap_or("")
    );
    let nombre_completo = nombre_completo.trim();
    if !nombre_completo.is_empty() {
        fields.push(NormalizedField {
            label: CONTRIBUYENTE_LABEL.to_string(),
            value: Value::from(nombre_completo),
            category: Category::General,
        });
    }

    let total_domicilios = persona.domicilio.len();
    if let Some(fiscal) = persona.domicilio.into_iter().next() {
        push_field(&mut fields, "Domicilio - Dirección", Category::Address, fiscal.direccion.map(Value::from));
        push_field(&mut fields, "Domicilio - Calle", Category::Address, fiscal.calle.map(Value::from));
        push_field(&mut fields, "Domicilio - Número", Category::Address, fiscal.numero.map(Value::from));
        push_field(&mut fields, "Domicilio - Localidad", Category::Address, fiscal.localidad.map(Value::from));
        push_field(
            &mut fields,
            "Domicilio - Provincia",
            Category::Address,
            fiscal.descripcion_provincia.map(Value::from),
        );
        push_field(
            &mut fields,
            "Domicilio - Código Postal",
            Category::Address,
            fiscal.codigo_postal.map(Value::from),
        );
        push_field(
            &mut fields,
            "Domicilio - Tipo de Domicilio",
            Category::Address,
            fiscal.tipo_domicilio.map(Value::from),
        );
        push_field(
            &mut fields,
            "Domicilio - Estado del Domicilio",
            Category::Address,
            fiscal.estado_domicilio.map(Value::from),
        );

        if total_domicilios > 1 {
            fields.push(NormalizedField {
                label: "Cantidad de Domicilios".to_string(),
                value: Value::from(total_domicilios as u64),
                category: Category::Address,
            });
        }
    }

    fields
}

fn flat_fields(object: &serde_json::Map<String, Value>) -> Vec<NormalizedField> {
    let mut fields: Vec<NormalizedField> = Vec::new();

    for (raw_key, label, category) in FLAT_FIELD_TABLE {
        if let Some(value) = object.get(*raw_key) {
            if value.is_null() {
                continue;
            }
            match fields.iter_mut().find(|field| field.label == *label) {
                Some(existing) => existing.value = value.clone(),
                None => fields.push(NormalizedField {
                    label: (*label).to_string(),
                    value: value.clone(),
                    category: *category,
                }),
            }
        }
    }

    fields
}

fn raw_fields(object: &serde_json::Map<String, Value>) -> Vec<NormalizedField> {
    object
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| NormalizedField {
            label: key.clone(),
            value: value.clone(),
            category: raw_key_category(key),
        })
        .collect()
}

/// Panel for an untranslated raw key. The key doubles as the display
/// label, so domicile and activity words in it still pick the panel.
fn raw_key_category(key: &str) -> Category {
    if key.contains("Domicilio") {
        Category::Address
    } else if key.contains("Actividad") || key.contains("Período") || key.contains("Mes") {
        Category::Activity
    } else {
        Category::General
    }
}

/// The three display panels. Every normalized field lands in exactly one.
#[derive(Debug, Clone, Default)]
pub struct Panels {
    pub general: Vec<NormalizedField>,
    pub activity: Vec<NormalizedField>,
    pub address: Vec<NormalizedField>,
}

impl Panels {
    pub fn len(&self) -> usize {
        self.general.len() + self.activity.len() + self.address.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Splits normalized fields into the three display panels.
///
/// Fields keep their normalization order within each panel, except that
/// "Contribuyente" is hoisted to the head of the general panel.
pub fn categorize(fields: Vec<NormalizedField>) -> Panels {
    let mut panels = Panels::default();

    let (contribuyente, rest): (Vec<NormalizedField>, Vec<NormalizedField>) = fields
        .into_iter()
        .partition(|field| field.label == CONTRIBUYENTE_LABEL);
    panels.general.extend(contribuyente);

    for field in rest {
        match field.category {
            Category::General => panels.general.push(field),
            Category::Activity => panels.activity.push(field),
            Category::Address => panels.address.push(field),
        }
    }

    panels
}
