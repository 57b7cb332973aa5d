//! Packaging and pharmaceutical standard types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One record from the `packaging` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Packaging {
    pub drug_code: i64,
    pub package_size: Option<String>,
    pub package_size_unit: Option<String>,
    pub package_type: Option<String>,
    pub product_information: Option<String>,
    /// Universal Product Code
    pub upc: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One record from the `pharmaceuticalstd` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PharmaceuticalStandard {
    pub drug_code: i64,
    /// Standard the product claims compliance with (e.g. "USP")
    pub pharmaceutical_std: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
