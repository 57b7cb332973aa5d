//! Query-parameter construction and validation.
//!
//! Every endpoint method funnels through here: caller arguments become a
//! canonical [`Query`] or fail with [`DpdError::InvalidParameter`] before
//! any network traffic. Building a query has no side effects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::endpoint::{self, Endpoint};
use crate::error::DpdError;

/// Language for localized response fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// English (API default)
    #[default]
    #[serde(rename = "en")]
    En,
    /// French
    #[serde(rename = "fr")]
    Fr,
}

impl Language {
    /// The two-letter code sent as the `lang` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }

    /// Parse a language code; anything but `en`/`fr` is rejected.
    pub fn parse(code: &str) -> Result<Self, DpdError> {
        match code {
            "en" => Ok(Language::En),
            "fr" => Ok(Language::Fr),
            other => Err(DpdError::InvalidParameter(format!(
                "unsupported language code '{other}' (expected 'en' or 'fr')"
            ))),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = DpdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::parse(s)
    }
}

/// Canonical query for one request.
///
/// Pair order is preserved for the request URL. [`Query::signature`] sorts
/// the pairs, so two logically identical calls share a cache key no matter
/// the order the caller supplied filters in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    /// Base query shared by every endpoint: `type=json`, plus the resolved
    /// `lang` when the endpoint supports it.
    pub(crate) fn base(endpoint: &Endpoint, default_lang: Language, lang: Option<Language>) -> Self {
        let mut query = Query::default();
        query.set("type", "json");
        if endpoint.lang {
            query.set("lang", lang.unwrap_or(default_lang).as_str());
        }
        query
    }

    pub(crate) fn set(&mut self, key: &str, value: impl fmt::Display) {
        self.pairs.push((key.to_string(), value.to_string()));
    }

    /// Append a list-valued filter: de-duplicated, first-occurrence order
    /// kept, never sorted.
    pub(crate) fn extend_list<I>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut seen: Vec<String> = Vec::new();
        for value in values {
            if !seen.contains(&value) {
                self.pairs.push((key.to_string(), value.clone()));
                seen.push(value);
            }
        }
    }

    /// The key/value pairs in insertion order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Encoded query string in insertion order (values percent-encoded).
    pub(crate) fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Cache signature: endpoint path plus sorted key/value pairs.
    pub(crate) fn signature(&self, path: &str) -> String {
        let mut pairs = self.pairs.clone();
        pairs.sort();
        let joined = pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("{path}?{joined}")
    }
}

/// Filters for the `drugproduct` endpoint.
///
/// At least one of id, DIN, brand name, or status must be set — the API
/// supports listing every product, but that result set is huge, so the
/// client requires a selector.
#[derive(Debug, Clone, Default)]
pub struct DrugProductParams {
    pub id: Option<u32>,
    pub din: Option<String>,
    pub brandname: Option<String>,
    pub status: Vec<String>,
    pub lang: Option<Language>,
}

impl DrugProductParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select by drug product code.
    pub fn with_id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    /// Select by Drug Identification Number.
    pub fn with_din(mut self, din: impl Into<String>) -> Self {
        self.din = Some(din.into());
        self
    }

    /// Select by brand name (the API supports partial matches).
    pub fn with_brandname(mut self, brandname: impl Into<String>) -> Self {
        self.brandname = Some(brandname.into());
        self
    }

    /// Add one product status code to the status filter.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status.push(status.into());
        self
    }

    /// Add several product status codes to the status filter.
    pub fn with_statuses<I, S>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.status.extend(statuses.into_iter().map(Into::into));
        self
    }

    /// Override the client's default language for this call.
    pub fn with_lang(mut self, lang: Language) -> Self {
        self.lang = Some(lang);
        self
    }

    pub(crate) fn into_query(self, default_lang: Language) -> Result<Query, DpdError> {
        let ep = &endpoint::DRUG_PRODUCT;
        if self.id.is_none() && self.din.is_none() && self.brandname.is_none() && self.status.is_empty() {
            return Err(missing_selector(ep));
        }
        let mut query = Query::base(ep, default_lang, self.lang);
        if let Some(id) = self.id {
            query.set("id", id);
        }
        if let Some(din) = self.din {
            query.set("din", din);
        }
        if let Some(brandname) = self.brandname {
            query.set("brandname", brandname);
        }
        query.extend_list("status", self.status);
        Ok(query)
    }
}

/// Filters for the `activeingredient` endpoint.
///
/// At least one of id or ingredient name must be set.
#[derive(Debug, Clone, Default)]
pub struct ActiveIngredientParams {
    pub id: Option<u32>,
    pub ingredientname: Option<String>,
    pub lang: Option<Language>,
}

impl ActiveIngredientParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select by drug product code.
    pub fn with_id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    /// Select by ingredient name.
    pub fn with_ingredientname(mut self, name: impl Into<String>) -> Self {
        self.ingredientname = Some(name.into());
        self
    }

    /// Override the client's default language for this call.
    pub fn with_lang(mut self, lang: Language) -> Self {
        self.lang = Some(lang);
        self
    }

    pub(crate) fn into_query(self, default_lang: Language) -> Result<Query, DpdError> {
        let ep = &endpoint::ACTIVE_INGREDIENT;
        if self.id.is_none() && self.ingredientname.is_none() {
            return Err(missing_selector(ep));
        }
        let mut query = Query::base(ep, default_lang, self.lang);
        if let Some(id) = self.id {
            query.set("id", id);
        }
        if let Some(name) = self.ingredientname {
            query.set("ingredientname", name);
        }
        Ok(query)
    }
}

/// Query for the id-selected endpoints, with the optional `active` flag
/// serialized as `active=yes` only when set to true.
pub(crate) fn id_query(
    endpoint: &Endpoint,
    id: u32,
    active: Option<bool>,
    default_lang: Language,
    lang: Option<Language>,
) -> Query {
    let mut query = Query::base(endpoint, default_lang, lang);
    query.set("id", id);
    if active == Some(true) {
        query.set("active", "yes");
    }
    query
}

fn missing_selector(endpoint: &Endpoint) -> DpdError {
    DpdError::InvalidParameter(format!(
        "{} requires at least one of: {}",
        endpoint.name,
        endpoint.selectors.join(", ")
    ))
}
