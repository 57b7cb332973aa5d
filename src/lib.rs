//! # dpd-client
//!
//! A Rust SDK for the Health Canada Drug Product Database (DPD) REST API.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — endpoint descriptors, query parameters, wire types, errors
//! 2. **HTTP** — request execution with caching, retry, and decoding
//! 3. **Clients** — [`client::DpdClient`] (async) and
//!    [`blocking::DpdClient`], one method per resource endpoint, sharing
//!    the same core
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dpd_client::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DpdClient::builder()
//!         .cache_ttl(std::time::Duration::from_secs(300))
//!         .build()?;
//!
//!     let products = client
//!         .drug_product(DrugProductParams::new().with_din("00326925"))
//!         .await?;
//!     println!("found {} products", products.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All methods return `DpdResult<T>`, an alias for `Result<T, DpdError>`:
//!
//! ```rust,ignore
//! use dpd_client::error::{DpdError, HttpError};
//!
//! match client.company(99999, None).await {
//!     Ok(companies) => println!("{} companies", companies.len()),
//!     Err(DpdError::Http(HttpError::Status { status: 404, .. })) => println!("not found"),
//!     Err(e) => println!("other error: {e}"),
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Endpoint descriptors, one per DPD resource.
pub mod endpoint;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

/// Query-parameter construction and validation.
pub mod params;

/// Wire types for the API resources.
pub mod types;

#[cfg(feature = "http")]
mod cache;
#[cfg(feature = "http")]
mod records;

// ── Layer 2: HTTP ────────────────────────────────────────────────────────────

/// HTTP core: request execution with caching and retry.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: Clients ─────────────────────────────────────────────────────────

/// Async client.
#[cfg(feature = "http")]
pub mod client;

/// Blocking client variant.
#[cfg(feature = "blocking")]
pub mod blocking;

// ── Prelude ──────────────────────────────────────────────────────────────────

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use dpd_client::prelude::*;
/// ```
pub mod prelude {
    pub use crate::endpoint::Endpoint;
    pub use crate::error::{DpdError, DpdResult, HttpError};
    pub use crate::network::DEFAULT_API_URL;
    pub use crate::params::{ActiveIngredientParams, DrugProductParams, Language};

    pub use crate::types::{
        ActiveIngredient, Company, DosageForm, DrugProduct, Packaging, PharmaceuticalStandard,
        ProductStatus, RouteOfAdministration, Schedule, TherapeuticClass, VeterinarySpecies,
    };

    #[cfg(feature = "http")]
    pub use crate::client::{DpdClient, DpdClientBuilder};
    #[cfg(feature = "http")]
    pub use crate::http::retry::RetryConfig;

    #[cfg(feature = "blocking")]
    pub use crate::blocking::DpdClient as BlockingDpdClient;
}
