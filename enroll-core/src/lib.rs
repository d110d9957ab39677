//! Client-side certificate enrollment with proof of possession.
//!
//! Given a certificate policy served by a key management service, the library
//! generates a matching key pair locally, proves possession of the private key
//! with a short-lived signed token and submits only the public key and the
//! proof for enrollment. The private key never leaves the key backend.
//!
//! ## Repository structure
//!
//! The library consists of three crates:
//!
//! * **Crypto**: raw-byte RSA and ECDSA signers. Delimited in its own directory to
//!   enable future certification of the cryptographic components, e.g. in the
//!   [NIST Cryptographic Module Validation Program (CMVP)][cmvp].
//! * **Providers**
//!   * Algorithm parameter resolver
//!   * Key backend
//!   * Proof token builder and verifier
//!   * Enrollment and policy clients
//! * **Core**
//!   * Enrollment session state machine
//!   * Services
//!
//! ## Getting started
//!
//! Initialize the core with a bearer token source and an account provider:
//!
//! ```ignore rust
//! let core = EnrollCore::new(
//!     None,
//!     Arc::new(ReqwestClient::default()),
//!     Arc::new(StaticBearerToken::new(token)),
//!     Arc::new(StaticAccount::new("user-abc")),
//! )?;
//!
//! let session = core
//!     .enrollment_service
//!     .enroll(&namespace, &policy_id)
//!     .await?;
//! ```
//!
//! `None` initializes the core with the default configuration, see
//! [`config::EnrollCoreConfig`].
//!
//! [cmvp]: https://csrc.nist.gov/Projects/Cryptographic-Module-Validation-Program

use std::{error::Error, sync::Arc};

use config::EnrollCoreConfig;
use enroll_crypto::imp::CryptoProviderImpl;
use enroll_providers::{
    auth::{AccountProvider, BearerTokenSource},
    enrollment::imp::HttpEnrollmentClient,
    http_client::HttpClient,
    key_backend::imp::software::{Params as SoftwareKeyBackendParams, SoftwareKeyBackend},
    policy_source::imp::HttpPolicySource,
};
use service::enrollment_service::EnrollmentService;
use session::clock::SystemClock;
use url::Url;

pub mod config;
pub mod service;
pub mod session;

#[cfg(test)]
mod test;

pub struct EnrollCore {
    pub enrollment_service: EnrollmentService,
}

impl EnrollCore {
    pub fn new(
        config: Option<EnrollCoreConfig>,
        client: Arc<dyn HttpClient>,
        token_source: Arc<dyn BearerTokenSource>,
        account_provider: Arc<dyn AccountProvider>,
    ) -> Result<Self, Box<dyn Error>> {
        let config = config.unwrap_or_default();
        let base_url = Url::parse(&config.enrollment_config.base_url)?;

        // initialize crypto provider
        let crypto_provider = Arc::new(CryptoProviderImpl::with_default_signers());

        // initialize key backend
        let key_backend = Arc::new(SoftwareKeyBackend::new(
            crypto_provider.clone(),
            SoftwareKeyBackendParams {
                min_rsa_modulus_length: config.key_backend_config.min_rsa_modulus_length,
                max_rsa_modulus_length: config.key_backend_config.max_rsa_modulus_length,
            },
        ));

        // initialize server clients
        let policy_source = Arc::new(HttpPolicySource::new(
            base_url.clone(),
            client.clone(),
            token_source.clone(),
        ));
        let enrollment_client = Arc::new(HttpEnrollmentClient::new(base_url, client, token_source));

        let enrollment_service = EnrollmentService::new(
            policy_source,
            account_provider,
            key_backend,
            enrollment_client,
            crypto_provider,
            Arc::new(SystemClock),
            config.enrollment_config.enrollment_type,
        );

        Ok(Self { enrollment_service })
    }
}
