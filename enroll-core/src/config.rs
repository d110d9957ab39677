use serde::Deserialize;

use enroll_providers::enrollment::model::PROOF_OF_POSSESSION;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnrollCoreConfig {
    pub enrollment_config: EnrollmentConfig,
    pub key_backend_config: KeyBackendConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnrollmentConfig {
    /// Base URL of the key management API, e.g. `https://kms.example.com/api`.
    pub base_url: String,
    pub enrollment_type: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyBackendConfig {
    pub min_rsa_modulus_length: u32,
    pub max_rsa_modulus_length: u32,
}

impl EnrollCoreConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for EnrollmentConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            enrollment_type: PROOF_OF_POSSESSION.to_string(),
        }
    }
}

impl Default for KeyBackendConfig {
    fn default() -> Self {
        Self {
            min_rsa_modulus_length: 2048,
            max_rsa_modulus_length: 4096,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_json_partial() {
        let config = EnrollCoreConfig::from_json(
            r#"{ "enrollmentConfig": { "baseUrl": "https://kms.example.com/api" } }"#,
        )
        .unwrap();

        assert_eq!(config.enrollment_config.base_url, "https://kms.example.com/api");
        assert_eq!(config.enrollment_config.enrollment_type, "proof-of-possession");
        assert_eq!(config.key_backend_config.max_rsa_modulus_length, 4096);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(EnrollCoreConfig::from_json(r#"{ "enrollmentConfig": 1 }"#).is_err());
    }
}
