//! Reel - movie lookup and static asset server
//!
//! Core library: request-line parsing, routing, static assets and the
//! memoizing movie lookup cache.

pub mod config;
pub mod error;
pub mod http;
pub mod movies;
pub mod router;
pub mod server;
pub mod static_files;
