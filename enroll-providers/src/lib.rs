//! Traits and implementations for certificate enrollment with proof of
//! possession.
//!
//! Enrollment generates a key pair locally, signs a short-lived proof with the
//! private key and submits only the public key and the proof to the server:
//!
//! * [`key_algorithm`] resolves policy key specifications,
//! * [`key_backend`] generates keys and signs behind an opaque handle,
//! * [`proof`] builds and verifies proof tokens,
//! * [`enrollment`] and [`policy_source`] talk to the server.

pub mod auth;
pub mod common_dto;
pub mod common_models;
pub mod enrollment;
pub mod http_client;
pub mod key_algorithm;
pub mod key_backend;
pub mod policy_source;
pub mod proof;
