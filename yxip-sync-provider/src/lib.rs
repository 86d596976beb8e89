//! # yxip-sync-provider
//!
//! DNS zone API capability for `yxip-sync`: a small, trait-based client for
//! the record set of one managed zone.
//!
//! The reconciliation pipeline in `yxip-sync-core` depends only on the
//! [`ZoneApi`] trait — list, find, create, and delete records keyed by
//! `(name, type, content)`. The crate ships one concrete implementation,
//! [`CloudflareZoneClient`], speaking the Cloudflare v4 API.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use yxip_sync_provider::{CloudflareZoneClient, CreateRecordRequest, ZoneApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let zone = CloudflareZoneClient::new(
//!         "api-token".to_string(),
//!         None,
//!         "zone-id".to_string(),
//!     );
//!
//!     let page = zone.list_records(1, 100).await?;
//!     for record in &page.items {
//!         println!("{} {} -> {}", record.name, record.record_type, record.content);
//!     }
//!
//!     zone.create_record(&CreateRecordRequest::a("fast.example.com", "1.1.1.1", 60))
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError). Transient
//! errors (`NetworkError`, `Timeout`, `RateLimited`) are **not** retried here;
//! callers are expected to pace their calls and treat per-record failures as
//! non-fatal. [`ProviderError::is_expected`] distinguishes expected outcomes
//! (record exists, record not found) from genuine faults for log levelling.

mod cloudflare;
mod error;
mod traits;
mod types;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export core trait only (internal traits are not exported)
pub use traits::ZoneApi;

// Re-export types
pub use types::{CreateRecordRequest, RecordPage, ZoneRecord};

// Re-export concrete client
pub use cloudflare::CloudflareZoneClient;
