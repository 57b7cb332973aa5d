//! Network URL constants for the DPD SDK.

/// Default base URL of the Health Canada Drug Product Database REST API.
pub const DEFAULT_API_URL: &str = "https://health-products.canada.ca/api/drug";
