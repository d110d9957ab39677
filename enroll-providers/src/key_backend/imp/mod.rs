//! Implementations of key backends.

pub mod software;
