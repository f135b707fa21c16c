use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] hk_core::HkError),
}

pub type SimResult<T> = Result<T, SimError>;
