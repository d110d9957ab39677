use serde::{Deserialize, Serialize};

use crate::common_models::{PublicKeyJwk, PublicKeyJwkEllipticData, PublicKeyJwkRsaData};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kty")]
pub enum PublicKeyJwkDTO {
    #[serde(rename = "EC")]
    Ec(PublicKeyJwkEllipticDataDTO),
    #[serde(rename = "RSA")]
    Rsa(PublicKeyJwkRsaDataDTO),
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct PublicKeyJwkRsaDataDTO {
    pub n: String,
    pub e: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct PublicKeyJwkEllipticDataDTO {
    pub crv: String,
    pub x: String,
    pub y: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
}

impl From<PublicKeyJwk> for PublicKeyJwkDTO {
    fn from(value: PublicKeyJwk) -> Self {
        match value {
            PublicKeyJwk::Ec(data) => Self::Ec(PublicKeyJwkEllipticDataDTO {
                crv: data.crv,
                x: data.x,
                y: data.y,
                alg: data.alg,
            }),
            PublicKeyJwk::Rsa(data) => Self::Rsa(PublicKeyJwkRsaDataDTO {
                n: data.n,
                e: data.e,
                alg: data.alg,
            }),
        }
    }
}

impl From<PublicKeyJwkDTO> for PublicKeyJwk {
    fn from(value: PublicKeyJwkDTO) -> Self {
        match value {
            PublicKeyJwkDTO::Ec(data) => Self::Ec(PublicKeyJwkEllipticData {
                alg: data.alg,
                crv: data.crv,
                x: data.x,
                y: data.y,
            }),
            PublicKeyJwkDTO::Rsa(data) => Self::Rsa(PublicKeyJwkRsaData {
                alg: data.alg,
                e: data.e,
                n: data.n,
            }),
        }
    }
}
