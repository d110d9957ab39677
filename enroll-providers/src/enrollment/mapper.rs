use std::str::FromStr;

use super::{
    dto::{EnrollmentRequestDTO, EnrollmentResponseDTO},
    error::EnrollmentError,
    model::{CertificateReference, CertificateStatus, EnrollmentRequest},
};
use crate::http_client::StatusCode;

impl From<EnrollmentRequest> for EnrollmentRequestDTO {
    fn from(value: EnrollmentRequest) -> Self {
        Self {
            enrollment_type: value.enrollment_type,
            proof: value.proof.into(),
            public_key: value.public_key.into(),
        }
    }
}

/// Builds the certificate reference from a 2xx response body.
///
/// A missing status means the request was queued when the server answered
/// `202 Accepted`, and issued otherwise.
pub fn certificate_reference_from_response(
    status_code: StatusCode,
    body: serde_json::Value,
) -> Result<CertificateReference, EnrollmentError> {
    let response: EnrollmentResponseDTO = serde_json::from_value(body.clone())
        .map_err(|e| EnrollmentError::InvalidResponse(e.to_string()))?;

    let status = match response.status.as_deref() {
        Some(status) => CertificateStatus::from_str(status).map_err(|_| {
            EnrollmentError::InvalidResponse(format!("unknown certificate status `{status}`"))
        })?,
        None if status_code.0 == 202 => CertificateStatus::Pending,
        None => CertificateStatus::Issued,
    };

    Ok(CertificateReference {
        id: response.id,
        status,
        body,
    })
}
