use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Locale not found in catalog index: {0}")]
    LocaleNotFound(String),

    #[error("Table {table} not found in catalog index for locale {locale}")]
    TableNotFound { locale: String, table: String },

    #[error("Failed to resolve current season: {0}")]
    SeasonResolution(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error means a locale or table is missing from the catalog index
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::LocaleNotFound(_) | Error::TableNotFound { .. })
    }
}

#[cfg(feature = "api")]
impl From<ureq::Error> for Error {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::StatusCode(code) => {
                Error::NetworkError(format!("Server returned HTTP {}", code))
            }
            other => Error::NetworkError(other.to_string()),
        }
    }
}
