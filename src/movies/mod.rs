//! Movie lookups
//!
//! This module holds the provider abstraction, the OMDb client and the
//! cache that sits in front of it.

pub mod cache;
pub mod provider;

pub use cache::MovieCache;
pub use provider::{MovieProvider, OmdbProvider};
