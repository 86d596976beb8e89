//! Unified error type definition

use thiserror::Error;

// Re-export library error type
pub use yxip_sync_provider::ProviderError;

/// Core layer error type
///
/// Nothing here is fatal to a run: source errors degrade to empty
/// contributions, zone API errors are counted by the reconciler. Malformed
/// rows are not errors at all; the aggregator drops them with a debug log.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Source fetch failed (transport or non-2xx status)
    #[error("Source fetch failed for {source_name}: {detail}")]
    SourceFetch {
        source_name: &'static str,
        detail: String,
    },

    /// Snapshot write error
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] std::io::Error),

    /// Zone API error
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Convenience type alias for `Result<T, CoreError>`.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
