//! Drug product types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One drug product record from the `drugproduct` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrugProduct {
    /// Drug product code, the registry's primary key
    pub drug_code: i64,
    /// Drug Identification Number (8 digits, zero-padded)
    pub drug_identification_number: Option<String>,
    /// Brand name
    pub brand_name: Option<String>,
    /// Product class (e.g. "Human", "Veterinary")
    pub class_name: Option<String>,
    /// Descriptor text
    pub descriptor: Option<String>,
    /// Number of active ingredients
    pub number_of_ais: Option<String>,
    /// Active ingredient group number
    pub ai_group_no: Option<String>,
    /// Marketing company name
    pub company_name: Option<String>,
    /// Last update date as reported by the registry
    pub last_update_date: Option<String>,
    /// Unrecognized upstream fields, passed through unvalidated
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
