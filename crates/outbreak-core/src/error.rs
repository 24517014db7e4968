//! Error type for the load pipeline.

use outbreak_ingest::IngestError;
use outbreak_transform::TransformError;
use thiserror::Error;

/// Errors surfaced by [`crate::LoadPipeline`]. Stage errors pass through
/// unchanged.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Transform(#[from] TransformError),
}

pub type Result<T> = std::result::Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_transparent() {
        let err = LoadError::from(IngestError::SnapshotNotFound {
            name: "deaths".to_string(),
        });
        let inner = IngestError::SnapshotNotFound {
            name: "deaths".to_string(),
        };
        assert_eq!(err.to_string(), inner.to_string());

        let err = LoadError::from(TransformError::MalformedSchema {
            column: "Lat".to_string(),
        });
        assert!(err.to_string().contains("Lat"));
    }
}
