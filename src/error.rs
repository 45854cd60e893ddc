/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use std::fmt;

/// Main error type of the library
///
/// Transport failures and non-success HTTP statuses are never reported
/// through this type: they travel inside the returned
/// [`Envelope`](crate::model::envelope::Envelope). `AppError` covers the
/// local failures that happen before a request can be sent.
#[derive(Debug)]
pub enum AppError {
    /// The HTTP client could not be built
    Network(reqwest::Error),
    /// Invalid argument or configuration value
    InvalidInput(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Network(e) => write!(f, "network error: {e}"),
            AppError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Network(e) => Some(e),
            AppError::InvalidInput(_) => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Network(e)
    }
}
