//! HTTP protocol implementation.
//!
//! This module implements the small slice of HTTP/1.1 the server needs: one
//! request line in, one response out, connection closed.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The per-connection handler implementing the request-response state machine
//! - **`parser`**: Parses request lines and query strings
//! - **`request`**: HTTP request representation
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for the request line
//!        └──────┬──────┘
//!               │ Line received (nothing received → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route and build the response
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!        ┌──────────────────┐
//!        │     Closed       │
//!        └──────────────────┘
//! ```
//!
//! There is no keep-alive and no `Content-Length`: closing the connection
//! marks the end of the body.

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
