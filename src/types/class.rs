//! Therapeutic class and veterinary species types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One record from the `therapeuticclass` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TherapeuticClass {
    pub drug_code: i64,
    /// AHFS classification name
    pub tc_ahfs: Option<String>,
    /// AHFS classification number
    pub tc_ahfs_number: Option<String>,
    /// ATC classification name
    pub tc_atc: Option<String>,
    /// ATC classification number
    pub tc_atc_number: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One record from the `veterinaryspecies` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VeterinarySpecies {
    pub drug_code: i64,
    pub vet_species_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
