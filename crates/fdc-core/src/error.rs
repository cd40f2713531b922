//! Error type for a consolidation run.

use fdc_ingest::IngestError;
use fdc_transform::TransformError;
use thiserror::Error;

/// Any failure that aborts a consolidation run.
///
/// Stage errors are carried as-is.
#[derive(Debug, Error)]
pub enum ConsolidateError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// Result type for consolidation.
pub type Result<T> = std::result::Result<T, ConsolidateError>;
