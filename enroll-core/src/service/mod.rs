//! Services for enrollment orchestration.

pub mod enrollment_service;
pub mod error;
