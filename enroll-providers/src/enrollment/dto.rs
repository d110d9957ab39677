use serde::{Deserialize, Serialize};

use crate::common_dto::PublicKeyJwkDTO;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRequestDTO {
    pub enrollment_type: String,
    pub proof: String,
    pub public_key: PublicKeyJwkDTO,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EnrollmentResponseDTO {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
}
