//! Certificate policy as served by the policy API.
//!
//! Policies are owned by the server; the enrollment flow only reads them.

use serde::{Deserialize, Serialize};
use strum::Display;

use super::macros::{impl_as_str, impl_display, impl_from, impl_into};

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct PolicyId(String);
impl_display!(PolicyId);
impl_from!(PolicyId; String);
impl_into!(PolicyId; String);
impl_as_str!(PolicyId);

/// Owning scope of a policy, e.g. a CA, an application or a principal.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct NamespaceLocator {
    pub kind: String,
    pub id: String,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Display, Serialize, Deserialize)]
pub enum KeyType {
    #[serde(rename = "RSA")]
    #[strum(serialize = "RSA")]
    Rsa,
    #[serde(rename = "EC")]
    #[strum(serialize = "EC")]
    Ec,
}

/// Key requirements of a policy.
///
/// `key_size` applies to RSA keys, `crv` to EC keys. `alg` is kept verbatim so
/// that unknown identifiers are reported by the resolver rather than rejected
/// while parsing.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeySpecification {
    #[serde(rename = "kty")]
    pub key_type: KeyType,
    pub alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crv: Option<String>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificatePolicy {
    pub id: PolicyId,
    pub namespace: NamespaceLocator,
    pub key_spec: KeySpecification,
}
