//! Company types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One company record from the `company` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    /// Company code, the registry's primary key
    pub company_code: i64,
    /// Company name
    pub company_name: String,
    /// Company type (e.g. "DIN OWNER")
    pub company_type: Option<String>,
    /// City
    pub city_name: Option<String>,
    /// Country
    pub country_name: Option<String>,
    /// Post office box
    pub post_office_box: Option<String>,
    /// Postal code
    pub postal_code: Option<String>,
    /// Province
    pub province_name: Option<String>,
    /// Street
    pub street_name: Option<String>,
    /// Suite number
    pub suite_number: Option<String>,
    /// Unrecognized upstream fields, passed through unvalidated
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
