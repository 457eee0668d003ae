use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid {kind} reference: {value}")]
    InvalidReference { kind: &'static str, value: String },
}
