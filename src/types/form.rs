//! Dosage form and route of administration types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One record from the `form` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DosageForm {
    pub drug_code: i64,
    pub pharmaceutical_form_code: Option<i64>,
    pub pharmaceutical_form_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One record from the `route` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteOfAdministration {
    pub drug_code: i64,
    pub route_of_administration_code: Option<i64>,
    pub route_of_administration_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
