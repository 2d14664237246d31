use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed document at {context}: {reason}")]
    MalformedDocument { context: String, reason: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl CatalogError {
    /// Structural error naming the course/section that violated the
    /// documented shape.
    pub fn malformed(context: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::MalformedDocument {
            context: context.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
