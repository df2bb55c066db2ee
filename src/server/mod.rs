//! TCP listener and accept loop.

pub mod listener;
