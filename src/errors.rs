use thiserror::Error;

/// Main error type for a Pokedex lookup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The query was empty or whitespace; nothing was sent upstream
    #[error("Please enter a Pokemon name or number.")]
    EmptyQuery,
    /// One of the catalog fetches failed
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Errors related to talking to the remote catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The primary record does not exist (any non-2xx on the primary endpoint)
    #[error("Pokemon not found.")]
    NotFound,
    /// A secondary document answered with a non-2xx status
    #[error("Failed to fetch {resource}: HTTP {status}")]
    Status { resource: String, status: u16 },
    /// The request never produced a response
    #[error("{message}")]
    Transport { resource: String, message: String },
    /// The response body was not the JSON we expected
    #[error("Failed to parse {resource} response: {message}")]
    Decode { resource: String, message: String },
}

const FALLBACK_MESSAGE: &str = "Something went wrong.";

impl LookupError {
    /// The text shown to the user when this error settles a session.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        }
    }
}

impl CatalogError {
    pub fn transport(resource: impl Into<String>, err: impl std::fmt::Display) -> Self {
        CatalogError::Transport {
            resource: resource.into(),
            message: err.to_string(),
        }
    }

    pub fn decode(resource: impl Into<String>, err: impl std::fmt::Display) -> Self {
        CatalogError::Decode {
            resource: resource.into(),
            message: err.to_string(),
        }
    }
}

/// Type alias for Results using LookupError
pub type LookupResult<T> = Result<T, LookupError>;

/// Type alias for Results using CatalogError
pub type CatalogResult<T> = Result<T, CatalogError>;
