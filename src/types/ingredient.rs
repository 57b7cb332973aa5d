//! Active ingredient types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One active ingredient record from the `activeingredient` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveIngredient {
    /// Drug product code this ingredient belongs to
    pub drug_code: i64,
    /// Ingredient name
    pub ingredient_name: String,
    /// Dosage unit
    pub dosage_unit: Option<String>,
    /// Dosage value
    pub dosage_value: Option<String>,
    /// Strength
    pub strength: Option<String>,
    /// Strength unit
    pub strength_unit: Option<String>,
    /// Unrecognized upstream fields, passed through unvalidated
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
