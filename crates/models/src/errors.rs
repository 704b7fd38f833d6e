use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("missing or empty field: {0}")]
    EmptyField(&'static str),
    #[error("unexpected type for field: {0}")]
    InvalidType(&'static str),
}
