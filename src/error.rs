//! Error types for asset reads and movie lookups.
//!
//! Neither error escapes to the client as-is: the router turns each variant
//! into an HTTP status. Request-line failures live in
//! [`ParseError`](crate::http::parser::ParseError).

use std::fmt;
use std::io;

/// Failure to serve a static asset.
#[derive(Debug)]
pub enum AssetError {
    /// No such file under the asset root, or the path tried to leave it.
    NotFound(String),
    /// The file exists but could not be read.
    Read { path: String, source: io::Error },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::NotFound(path) => write!(f, "asset not found: {}", path),
            AssetError::Read { path, source } => write!(f, "failed to read {}: {}", path, source),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::NotFound(_) => None,
            AssetError::Read { source, .. } => Some(source),
        }
    }
}

/// Failure reported by a movie data provider.
///
/// Lookups that fail are never cached, so the next request for the same
/// title tries the provider again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Connecting to or talking with the provider failed.
    Transport(String),
    /// The provider did not answer in time.
    Timeout,
    /// The provider answered with a non-200 status.
    Status(u16),
    /// The provider answered 200 with nothing in the body.
    EmptyBody,
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Transport(msg) => write!(f, "provider transport error: {}", msg),
            LookupError::Timeout => write!(f, "provider timed out"),
            LookupError::Status(code) => write!(f, "provider returned status {}", code),
            LookupError::EmptyBody => write!(f, "provider returned an empty body"),
        }
    }
}

impl std::error::Error for LookupError {}
