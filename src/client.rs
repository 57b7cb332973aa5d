//! Async DPD client — `DpdClient`.
//!
//! # Example
//!
//! ```rust,ignore
//! use dpd_client::client::DpdClient;
//! use dpd_client::params::DrugProductParams;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DpdClient::new()?;
//!
//!     let products = client
//!         .drug_product(DrugProductParams::new().with_din("00326925"))
//!         .await?;
//!     for product in &products {
//!         println!("{:?} {:?}", product.brand_name, product.drug_identification_number);
//!     }
//!     Ok(())
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::cache::ResponseCache;
use crate::endpoint::{self, Endpoint};
use crate::error::{DpdError, DpdResult, HttpError};
use crate::http::client::DpdHttp;
use crate::http::retry::RetryConfig;
use crate::network;
use crate::params::{self, ActiveIngredientParams, DrugProductParams, Language, Query};
use crate::records::decode_records;
use crate::types::*;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Builder for configuring [`DpdClient`] and, with the `blocking` feature,
/// [`blocking::DpdClient`](crate::blocking::DpdClient).
///
/// All settings are fixed at build time and immutable for the life of the
/// client.
#[derive(Debug, Clone)]
pub struct DpdClientBuilder {
    base_url: String,
    lang: Language,
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: Vec<(String, String)>,
    retry: RetryConfig,
    cache_ttl: Option<Duration>,
}

impl Default for DpdClientBuilder {
    fn default() -> Self {
        Self {
            base_url: network::DEFAULT_API_URL.to_string(),
            lang: Language::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
            default_headers: Vec::new(),
            retry: RetryConfig::default(),
            cache_ttl: None,
        }
    }
}

impl DpdClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the API base URL (trailing slashes are trimmed).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Default language for endpoints with localized fields.
    pub fn lang(mut self, lang: Language) -> Self {
        self.lang = lang;
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Set a custom `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Add a default header to all requests.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Configure retries (use `RetryConfig::new(3)` for 3 total attempts
    /// with default backoff).
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Enable response caching with the given time-to-live. Without this,
    /// caching is disabled; a zero TTL also disables it.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    /// Build the async client.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured header is malformed or the HTTP
    /// client cannot be initialized.
    pub fn build(self) -> DpdResult<DpdClient> {
        let headers = self.headers()?;
        let cache = self.cache();
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(headers)
            .build()
            .map_err(HttpError::from)?;

        Ok(DpdClient {
            lang: self.lang,
            http: DpdHttp::new(self.base_url, client, self.retry, cache),
        })
    }

    /// Build the blocking client.
    #[cfg(feature = "blocking")]
    pub fn build_blocking(self) -> DpdResult<crate::blocking::DpdClient> {
        let headers = self.headers()?;
        let cache = self.cache();
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .default_headers(headers)
            .build()
            .map_err(HttpError::from)?;

        Ok(crate::blocking::DpdClient::from_parts(
            self.lang,
            crate::http::blocking::BlockingHttp::new(self.base_url, client, self.retry, cache),
        ))
    }

    fn headers(&self) -> DpdResult<reqwest::header::HeaderMap> {
        use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, USER_AGENT};

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(user_agent) = &self.user_agent {
            let value = HeaderValue::from_str(user_agent).map_err(|e| {
                DpdError::InvalidParameter(format!("invalid user agent: {e}"))
            })?;
            headers.insert(USER_AGENT, value);
        }

        for (name, value) in &self.default_headers {
            let header_name = HeaderName::try_from(name.as_str()).map_err(|e| {
                DpdError::InvalidParameter(format!("invalid header name '{name}': {e}"))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                DpdError::InvalidParameter(format!("invalid header value for '{name}': {e}"))
            })?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }

    fn cache(&self) -> Option<Arc<ResponseCache>> {
        self.cache_ttl
            .filter(|ttl| !ttl.is_zero())
            .map(|ttl| Arc::new(ResponseCache::new(ttl)))
    }
}

/// Async client for the Health Canada Drug Product Database API.
///
/// One method per resource endpoint; each returns the decoded records in
/// response order. Transport resources are acquired in the builder and
/// released when the last clone is dropped.
#[derive(Debug, Clone)]
pub struct DpdClient {
    http: DpdHttp,
    lang: Language,
}

impl DpdClient {
    /// Client for the official API with default settings.
    pub fn new() -> DpdResult<Self> {
        DpdClientBuilder::new().build()
    }

    /// Create a builder for custom configuration.
    pub fn builder() -> DpdClientBuilder {
        DpdClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Default language used when a call does not override it.
    pub fn default_lang(&self) -> Language {
        self.lang
    }

    async fn fetch<T: DeserializeOwned>(&self, ep: &Endpoint, query: Query) -> DpdResult<Vec<T>> {
        let value = self.http.get_json(ep.path, &query).await?;
        Ok(decode_records(ep.name, value)?)
    }

    /// Search drug products. At least one selector must be set on `params`.
    pub async fn drug_product(&self, params: DrugProductParams) -> DpdResult<Vec<DrugProduct>> {
        let query = params.into_query(self.lang)?;
        self.fetch(&endpoint::DRUG_PRODUCT, query).await
    }

    /// Get the company with the given company code.
    pub async fn company(&self, id: u32, lang: Option<Language>) -> DpdResult<Vec<Company>> {
        let query = params::id_query(&endpoint::COMPANY, id, None, self.lang, lang);
        self.fetch(&endpoint::COMPANY, query).await
    }

    /// Search active ingredients by drug code or ingredient name.
    pub async fn active_ingredient(
        &self,
        params: ActiveIngredientParams,
    ) -> DpdResult<Vec<ActiveIngredient>> {
        let query = params.into_query(self.lang)?;
        self.fetch(&endpoint::ACTIVE_INGREDIENT, query).await
    }

    /// Dosage forms for a drug code. `active` limits to active products.
    pub async fn form(
        &self,
        id: u32,
        active: Option<bool>,
        lang: Option<Language>,
    ) -> DpdResult<Vec<DosageForm>> {
        let query = params::id_query(&endpoint::FORM, id, active, self.lang, lang);
        self.fetch(&endpoint::FORM, query).await
    }

    /// Packaging for a drug code.
    pub async fn packaging(&self, id: u32) -> DpdResult<Vec<Packaging>> {
        let query = params::id_query(&endpoint::PACKAGING, id, None, self.lang, None);
        self.fetch(&endpoint::PACKAGING, query).await
    }

    /// Pharmaceutical standard for a drug code.
    pub async fn pharmaceutical_std(&self, id: u32) -> DpdResult<Vec<PharmaceuticalStandard>> {
        let query = params::id_query(&endpoint::PHARMACEUTICAL_STD, id, None, self.lang, None);
        self.fetch(&endpoint::PHARMACEUTICAL_STD, query).await
    }

    /// Routes of administration for a drug code.
    pub async fn route(
        &self,
        id: u32,
        active: Option<bool>,
        lang: Option<Language>,
    ) -> DpdResult<Vec<RouteOfAdministration>> {
        let query = params::id_query(&endpoint::ROUTE, id, active, self.lang, lang);
        self.fetch(&endpoint::ROUTE, query).await
    }

    /// Schedules for a drug code.
    pub async fn schedule(
        &self,
        id: u32,
        active: Option<bool>,
        lang: Option<Language>,
    ) -> DpdResult<Vec<Schedule>> {
        let query = params::id_query(&endpoint::SCHEDULE, id, active, self.lang, lang);
        self.fetch(&endpoint::SCHEDULE, query).await
    }

    /// Status history for a drug code.
    pub async fn status(&self, id: u32, lang: Option<Language>) -> DpdResult<Vec<ProductStatus>> {
        let query = params::id_query(&endpoint::STATUS, id, None, self.lang, lang);
        self.fetch(&endpoint::STATUS, query).await
    }

    /// Therapeutic classes for a drug code.
    pub async fn therapeutic_class(
        &self,
        id: u32,
        lang: Option<Language>,
    ) -> DpdResult<Vec<TherapeuticClass>> {
        let query = params::id_query(&endpoint::THERAPEUTIC_CLASS, id, None, self.lang, lang);
        self.fetch(&endpoint::THERAPEUTIC_CLASS, query).await
    }

    /// Veterinary species for a drug code.
    pub async fn veterinary_species(
        &self,
        id: u32,
        lang: Option<Language>,
    ) -> DpdResult<Vec<VeterinarySpecies>> {
        let query = params::id_query(&endpoint::VETERINARY_SPECIES, id, None, self.lang, lang);
        self.fetch(&endpoint::VETERINARY_SPECIES, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = DpdClient::new().unwrap();
        assert_eq!(client.base_url(), network::DEFAULT_API_URL);
        assert_eq!(client.default_lang(), Language::En);
    }

    #[test]
    fn test_builder_strips_trailing_slash() {
        let client = DpdClient::builder()
            .base_url("https://example.test/api/drug/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://example.test/api/drug");
    }

    #[test]
    fn test_builder_rejects_bad_header() {
        let err = DpdClient::builder()
            .header("bad header name", "value")
            .build()
            .unwrap_err();
        assert!(matches!(err, DpdError::InvalidParameter(_)));
    }

    #[test]
    fn test_builder_custom_settings() {
        let client = DpdClient::builder()
            .lang(Language::Fr)
            .timeout_secs(60)
            .user_agent("dpd-client-tests")
            .retry(RetryConfig::none())
            .cache_ttl(Duration::from_secs(300))
            .build()
            .unwrap();
        assert_eq!(client.default_lang(), Language::Fr);
    }
}
