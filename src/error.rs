use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersonaError {
    #[error("question catalog not found: {0}")]
    CatalogNotFound(String),

    #[error("norm table not found: {0}")]
    NormsNotFound(String),

    #[error("norm table parse error: {0}")]
    NormsParse(String),

    #[error("catalog parse error: {0}")]
    CatalogParse(String),

    #[error("norm table has no usable entry for {0}")]
    MissingNorm(String),

    #[error("insufficient responses: received {observed}, minimum required is {required}")]
    InsufficientData { observed: usize, required: usize },

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PersonaError {
    /// Errors the caller can fix by changing the submission rather than the installation.
    pub fn is_user_actionable(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}

pub type Result<T> = std::result::Result<T, PersonaError>;
