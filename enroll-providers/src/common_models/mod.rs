pub mod macros;
pub mod policy;

/// Public key in its JSON Web Key representation.
///
/// This is the only artifact derived from a generated key pair that ever leaves
/// the process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PublicKeyJwk {
    Ec(PublicKeyJwkEllipticData),
    Rsa(PublicKeyJwkRsaData),
}

impl PublicKeyJwk {
    pub fn get_alg(&self) -> &Option<String> {
        match self {
            PublicKeyJwk::Ec(val) => &val.alg,
            PublicKeyJwk::Rsa(val) => &val.alg,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKeyJwkRsaData {
    pub alg: Option<String>,
    pub e: String,
    pub n: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKeyJwkEllipticData {
    pub alg: Option<String>,
    pub crv: String,
    pub x: String,
    pub y: String,
}
