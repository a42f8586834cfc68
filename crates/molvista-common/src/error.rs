use thiserror::Error;

#[derive(Debug, Error)]
pub enum MolvistaError {
    #[error("Registry error: {0}")]
    Registry(String),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, MolvistaError>;
