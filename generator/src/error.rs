use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("no fresh identifier found after {attempts} attempts")]
    NamesExhausted { attempts: usize },
    #[error("malformed configuration file: {0}")]
    Toml(#[from] toml::de::Error),
}
