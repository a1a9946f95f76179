//! Error types for the gcc-rest client
//!
//! This module defines the request-lifecycle error taxonomy, using thiserror
//! for ergonomic error definitions. Local file errors surface synchronously
//! from the mutator that caused them; everything else belongs to the single
//! request/response exchange and terminates that request's delivery.

use thiserror::Error;

/// Main error type for compile requests
#[derive(Error, Debug)]
pub enum Error {
    /// Local file read or output write failure
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Network-level failure reaching the compile service
    #[error("transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status from the compile service, carrying the literal
    /// status code, response headers, and raw body
    #[error("compile service returned HTTP {status}")]
    Service {
        status: u16,
        headers: reqwest::header::HeaderMap,
        body: String,
    },

    /// Response body was not valid JSON
    #[error("protocol error: {message}")]
    Protocol {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Well-formed response without compiled code
    #[error("no compiled code in the service response")]
    NoOutput,

    /// Endpoint configuration that cannot be turned into a request URL
    #[error("invalid endpoint: {message}")]
    InvalidEndpoint {
        message: String,
        #[source]
        source: url::ParseError,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Protocol {
            message: err.to_string(),
            source: err,
        }
    }
}
