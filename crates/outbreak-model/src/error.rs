use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown metric '{0}' (expected 'confirmed' or 'deaths')")]
    UnknownMetric(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
