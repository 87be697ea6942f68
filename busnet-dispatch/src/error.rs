use thiserror::Error;

/// A required field was left empty.
///
/// The display text is the alert shown to the user.
/// No request is ever sent for an action that fails validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    action: &'static str,
    message: &'static str,
}

impl ValidationError {
    pub(crate) fn new(action: &'static str, message: &'static str) -> Self {
        ValidationError { action, message }
    }

    /// The name of the action that was rejected.
    pub fn action(&self) -> &'static str {
        self.action
    }

    /// The alert text.
    pub fn message(&self) -> &'static str {
        self.message
    }
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
    #[error("{0}")]
    Http(#[from] reqwest::Error),
}

/// Anything that went wrong between sending a request and having something to render.
///
/// All variants are rendered the same way (`Error: <description>`);
/// the split only exists for logging and for library users.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("{0}")]
    Transport(#[from] TransportError),
    #[error("Invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),
}
