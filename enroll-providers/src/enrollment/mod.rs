//! Submission of enrollment requests.
//!
//! An enrollment request carries the public key and the proof of possession of
//! its private half. The server either issues the certificate right away or
//! queues the request; both outcomes are returned to the caller unchanged.

use crate::common_models::policy::{NamespaceLocator, PolicyId};

use self::{
    error::EnrollmentError,
    model::{CertificateReference, EnrollmentRequest},
};

pub mod dto;
pub mod error;
pub mod imp;
pub mod mapper;
pub mod model;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait EnrollmentClient: Send + Sync {
    /// Submits `request` for the policy `policy_id`.
    ///
    /// Consumes the request, which is submitted at most once.
    async fn enroll(
        &self,
        namespace: &NamespaceLocator,
        policy_id: &PolicyId,
        request: EnrollmentRequest,
    ) -> Result<CertificateReference, EnrollmentError>;
}
