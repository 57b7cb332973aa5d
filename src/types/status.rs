//! Product status and schedule types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One record from the `status` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductStatus {
    pub drug_code: i64,
    pub expiration_date: Option<String>,
    pub external_status_code: Option<String>,
    pub history_date: Option<String>,
    pub lot_number: Option<String>,
    pub original_market_date: Option<String>,
    /// Current status (e.g. "Marketed")
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One record from the `schedule` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub drug_code: i64,
    pub schedule_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
