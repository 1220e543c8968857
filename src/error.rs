//! Error types for ClickUp API operations.

use thiserror::Error;

/// Errors that can occur while building, resolving or persisting ClickUp models.
#[derive(Debug, Error)]
pub enum ClickUpError {
    /// Configuration is missing or incomplete.
    #[error("ClickUp configuration required: {0}")]
    ConfigMissing(String),

    /// A request was attempted before an API token was set.
    #[error("Must set token before making a request")]
    MissingCredentials,

    /// The credential store could not encrypt or decrypt the token.
    #[error("Credential store error: {0}")]
    Credentials(String),

    /// A builder was pointed at a model type that is not registered.
    #[error("The model [{0}] not found.")]
    UnknownModel(String),

    /// A builder was used before a target model type was bound to it.
    #[error("No model type is bound to the builder")]
    NoRelationTarget,

    /// Neither the model nor any of its ancestors carries a client.
    #[error("No client has been set on the model or its parents")]
    NoClient,

    /// Mutation attempted on a read-only model.
    #[error("{model} is read-only")]
    Readonly { model: &'static str },

    /// `save_or_fail` could not persist the model.
    #[error("Unable to save {model}")]
    UnableToSave { model: &'static str },

    /// A model definition is inconsistent (programmer error).
    #[error("Invalid model configuration: {0}")]
    Configuration(String),

    /// A relation exists for the type, but not for this instance.
    #[error("{0}")]
    InvalidRelationship(String),

    /// A dynamic call did not match anything the receiver supports.
    #[error("Call to undefined method [{0}]")]
    UnsupportedOperation(String),

    /// API request failed.
    #[error("ClickUp API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
}

impl ClickUpError {
    /// Whether this error came from talking to the remote API.
    ///
    /// Write paths (`save`, `delete`) turn these into a `false` result;
    /// everything else is a defect in the caller or in a model definition
    /// and always propagates.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ApiError { .. }
                | Self::HttpError(_)
                | Self::ParseError(_)
                | Self::UrlError(_)
                | Self::RateLimited { .. }
        )
    }

    /// HTTP status code of a failed API call, if known.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { status_code, .. } => *status_code,
            Self::RateLimited { .. } => Some(429),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for ClickUp operations.
pub type Result<T> = core::result::Result<T, ClickUpError>;
