//! Endpoint descriptors for the DPD API.
//!
//! One immutable descriptor per resource, created at startup and never
//! mutated. The client layer uses these for paths and validation messages.

/// Description of one DPD resource endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Resource name, as used in errors and logs.
    pub name: &'static str,
    /// Path segment appended to the API base URL.
    pub path: &'static str,
    /// Selector parameters the endpoint accepts; at least one is required.
    pub selectors: &'static [&'static str],
    /// Whether the endpoint accepts a `lang` parameter.
    pub lang: bool,
}

pub const DRUG_PRODUCT: Endpoint = Endpoint {
    name: "drugproduct",
    path: "drugproduct/",
    selectors: &["id", "din", "brandname", "status"],
    lang: true,
};

pub const COMPANY: Endpoint = Endpoint {
    name: "company",
    path: "company/",
    selectors: &["id"],
    lang: true,
};

pub const ACTIVE_INGREDIENT: Endpoint = Endpoint {
    name: "activeingredient",
    path: "activeingredient/",
    selectors: &["id", "ingredientname"],
    lang: true,
};

pub const FORM: Endpoint = Endpoint {
    name: "form",
    path: "form/",
    selectors: &["id"],
    lang: true,
};

// `packaging` and `pharmaceuticalstd` are the two endpoints without
// localized fields; they take no `lang` parameter.
pub const PACKAGING: Endpoint = Endpoint {
    name: "packaging",
    path: "packaging/",
    selectors: &["id"],
    lang: false,
};

pub const PHARMACEUTICAL_STD: Endpoint = Endpoint {
    name: "pharmaceuticalstd",
    path: "pharmaceuticalstd/",
    selectors: &["id"],
    lang: false,
};

pub const ROUTE: Endpoint = Endpoint {
    name: "route",
    path: "route/",
    selectors: &["id"],
    lang: true,
};

pub const SCHEDULE: Endpoint = Endpoint {
    name: "schedule",
    path: "schedule/",
    selectors: &["id"],
    lang: true,
};

pub const STATUS: Endpoint = Endpoint {
    name: "status",
    path: "status/",
    selectors: &["id"],
    lang: true,
};

pub const THERAPEUTIC_CLASS: Endpoint = Endpoint {
    name: "therapeuticclass",
    path: "therapeuticclass/",
    selectors: &["id"],
    lang: true,
};

pub const VETERINARY_SPECIES: Endpoint = Endpoint {
    name: "veterinaryspecies",
    path: "veterinaryspecies/",
    selectors: &["id"],
    lang: true,
};
