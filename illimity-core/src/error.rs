use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Unable to determine notification shape")]
    UnrecognizedShape,

    #[error("Malformed amount: {0}")]
    MalformedAmount(String),

    #[error("Malformed date: {0}")]
    MalformedDate(String),

    #[error("Invalid notification pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
