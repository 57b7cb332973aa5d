//! Blocking DPD client.
//!
//! Thread-per-call twin of [`DpdClient`](crate::client::DpdClient): each
//! call occupies its thread for the full cache/transport/retry/decode
//! sequence. The method surface, validation, retry classification, and
//! caching are identical to the async client.
//!
//! ```rust,ignore
//! use dpd_client::blocking::DpdClient;
//! use dpd_client::params::DrugProductParams;
//!
//! let client = DpdClient::new()?;
//! let products = client.drug_product(DrugProductParams::new().with_din("00326925"))?;
//! ```

use serde::de::DeserializeOwned;

use crate::client::DpdClientBuilder;
use crate::endpoint::{self, Endpoint};
use crate::error::DpdResult;
use crate::http::blocking::BlockingHttp;
use crate::params::{self, ActiveIngredientParams, DrugProductParams, Language, Query};
use crate::records::decode_records;
use crate::types::*;

/// Blocking client for the Health Canada Drug Product Database API.
#[derive(Debug, Clone)]
pub struct DpdClient {
    http: BlockingHttp,
    lang: Language,
}

impl DpdClient {
    /// Client for the official API with default settings.
    pub fn new() -> DpdResult<Self> {
        DpdClientBuilder::new().build_blocking()
    }

    /// Create a builder for custom configuration; finish with
    /// [`DpdClientBuilder::build_blocking`].
    pub fn builder() -> DpdClientBuilder {
        DpdClientBuilder::new()
    }

    pub(crate) fn from_parts(lang: Language, http: BlockingHttp) -> Self {
        Self { http, lang }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Default language used when a call does not override it.
    pub fn default_lang(&self) -> Language {
        self.lang
    }

    fn fetch<T: DeserializeOwned>(&self, ep: &Endpoint, query: Query) -> DpdResult<Vec<T>> {
        let value = self.http.get_json(ep.path, &query)?;
        Ok(decode_records(ep.name, value)?)
    }

    /// Search drug products. At least one selector must be set on `params`.
    pub fn drug_product(&self, params: DrugProductParams) -> DpdResult<Vec<DrugProduct>> {
        let query = params.into_query(self.lang)?;
        self.fetch(&endpoint::DRUG_PRODUCT, query)
    }

    /// Get the company with the given company code.
    pub fn company(&self, id: u32, lang: Option<Language>) -> DpdResult<Vec<Company>> {
        let query = params::id_query(&endpoint::COMPANY, id, None, self.lang, lang);
        self.fetch(&endpoint::COMPANY, query)
    }

    /// Search active ingredients by drug code or ingredient name.
    pub fn active_ingredient(
        &self,
        params: ActiveIngredientParams,
    ) -> DpdResult<Vec<ActiveIngredient>> {
        let query = params.into_query(self.lang)?;
        self.fetch(&endpoint::ACTIVE_INGREDIENT, query)
    }

    /// Dosage forms for a drug code. `active` limits to active products.
    pub fn form(
        &self,
        id: u32,
        active: Option<bool>,
        lang: Option<Language>,
    ) -> DpdResult<Vec<DosageForm>> {
        let query = params::id_query(&endpoint::FORM, id, active, self.lang, lang);
        self.fetch(&endpoint::FORM, query)
    }

    /// Packaging for a drug code.
    pub fn packaging(&self, id: u32) -> DpdResult<Vec<Packaging>> {
        let query = params::id_query(&endpoint::PACKAGING, id, None, self.lang, None);
        self.fetch(&endpoint::PACKAGING, query)
    }

    /// Pharmaceutical standard for a drug code.
    pub fn pharmaceutical_std(&self, id: u32) -> DpdResult<Vec<PharmaceuticalStandard>> {
        let query = params::id_query(&endpoint::PHARMACEUTICAL_STD, id, None, self.lang, None);
        self.fetch(&endpoint::PHARMACEUTICAL_STD, query)
    }

    /// Routes of administration for a drug code.
    pub fn route(
        &self,
        id: u32,
        active: Option<bool>,
        lang: Option<Language>,
    ) -> DpdResult<Vec<RouteOfAdministration>> {
        let query = params::id_query(&endpoint::ROUTE, id, active, self.lang, lang);
        self.fetch(&endpoint::ROUTE, query)
    }

    /// Schedules for a drug code.
    pub fn schedule(
        &self,
        id: u32,
        active: Option<bool>,
        lang: Option<Language>,
    ) -> DpdResult<Vec<Schedule>> {
        let query = params::id_query(&endpoint::SCHEDULE, id, active, self.lang, lang);
        self.fetch(&endpoint::SCHEDULE, query)
    }

    /// Status history for a drug code.
    pub fn status(&self, id: u32, lang: Option<Language>) -> DpdResult<Vec<ProductStatus>> {
        let query = params::id_query(&endpoint::STATUS, id, None, self.lang, lang);
        self.fetch(&endpoint::STATUS, query)
    }

    /// Therapeutic classes for a drug code.
    pub fn therapeutic_class(
        &self,
        id: u32,
        lang: Option<Language>,
    ) -> DpdResult<Vec<TherapeuticClass>> {
        let query = params::id_query(&endpoint::THERAPEUTIC_CLASS, id, None, self.lang, lang);
        self.fetch(&endpoint::THERAPEUTIC_CLASS, query)
    }

    /// Veterinary species for a drug code.
    pub fn veterinary_species(
        &self,
        id: u32,
        lang: Option<Language>,
    ) -> DpdResult<Vec<VeterinarySpecies>> {
        let query = params::id_query(&endpoint::VETERINARY_SPECIES, id, None, self.lang, lang);
        self.fetch(&endpoint::VETERINARY_SPECIES, query)
    }
}
