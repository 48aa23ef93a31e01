use {
    crate::{constants::SHA256_OUTPUT_LEN, crypto::hmac_sha256, GatewayError},
    std::fmt::{Debug, Display, Formatter, Result as FmtResult},
};

/// A raw secret key, optionally prefixed with a scheme tag (`kSecret`).
///
/// Some upstream signing schemes seed the key-derivation chain with a literal
/// prefix in front of the secret key; others use the secret key verbatim. The
/// prefix is a deployment parameter carried by
/// [`SigningScheme`][crate::SigningScheme], not a hard-coded literal.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey {
    /// The prefix followed by the raw secret key.
    prefixed_key: Vec<u8>,
}

/// The `kDate` key: `HMAC_SHA256(prefix + secret, "YYYYMMDD")`.
///
/// Never reused across a UTC date boundary; the chain is recomputed per request.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DateKey {
    /// The raw key.
    key: [u8; SHA256_OUTPUT_LEN],
}

/// The `kRegion` key: a [`DateKey`] HMAC-SHA256 hashed with the region.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RegionKey {
    /// The raw key.
    key: [u8; SHA256_OUTPUT_LEN],
}

/// The `kService` key: a [`RegionKey`] HMAC-SHA256 hashed with the service.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ServiceKey {
    /// The raw key.
    key: [u8; SHA256_OUTPUT_LEN],
}

/// The `kSigning` key: a [`ServiceKey`] HMAC-SHA256 hashed with the scope
/// terminator literal.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SigningKey {
    /// The resulting raw signing key.
    key: [u8; SHA256_OUTPUT_LEN],
}

impl SecretKey {
    /// Create a new `SecretKey` from a raw secret key and a scheme prefix.
    ///
    /// The prefix may be empty. Fails only when the raw secret key is empty;
    /// this is the sole failure mode of the signing path.
    pub fn new(raw: &str, prefix: &str) -> Result<Self, GatewayError> {
        if raw.is_empty() {
            return Err(GatewayError::EmptySecretKey);
        }

        let mut prefixed_key = Vec::with_capacity(prefix.len() + raw.len());
        prefixed_key.extend_from_slice(prefix.as_bytes());
        prefixed_key.extend_from_slice(raw.as_bytes());
        Ok(Self {
            prefixed_key,
        })
    }

    /// Create a new [`DateKey`] from this `SecretKey` and a `YYYYMMDD` date.
    pub fn to_date_key(&self, date: &str) -> DateKey {
        DateKey {
            key: hmac_sha256(&self.prefixed_key, date.as_bytes()),
        }
    }

    /// Create a new [`SigningKey`] from this `SecretKey` by running the full
    /// date → region → service → terminator chain.
    pub fn to_signing_key(&self, date: &str, region: &str, service: &str, terminator: &str) -> SigningKey {
        self.to_date_key(date).to_region_key(region).to_service_key(service).to_signing_key(terminator)
    }
}

impl DateKey {
    /// Create a new [`RegionKey`] from this `DateKey` and a region.
    pub fn to_region_key(&self, region: &str) -> RegionKey {
        RegionKey {
            key: hmac_sha256(&self.key, region.as_bytes()),
        }
    }
}

impl RegionKey {
    /// Create a new [`ServiceKey`] from this `RegionKey` and a service.
    pub fn to_service_key(&self, service: &str) -> ServiceKey {
        ServiceKey {
            key: hmac_sha256(&self.key, service.as_bytes()),
        }
    }
}

impl ServiceKey {
    /// Create a new [`SigningKey`] from this `ServiceKey` and the scope
    /// terminator literal.
    pub fn to_signing_key(&self, terminator: &str) -> SigningKey {
        SigningKey {
            key: hmac_sha256(&self.key, terminator.as_bytes()),
        }
    }
}

impl SigningKey {
    /// Produce the hex signature over a string to sign.
    pub fn sign(&self, string_to_sign: &[u8]) -> String {
        hex::encode(hmac_sha256(&self.key, string_to_sign))
    }
}

impl AsRef<[u8; SHA256_OUTPUT_LEN]> for DateKey {
    fn as_ref(&self) -> &[u8; SHA256_OUTPUT_LEN] {
        &self.key
    }
}

impl AsRef<[u8; SHA256_OUTPUT_LEN]> for RegionKey {
    fn as_ref(&self) -> &[u8; SHA256_OUTPUT_LEN] {
        &self.key
    }
}

impl AsRef<[u8; SHA256_OUTPUT_LEN]> for ServiceKey {
    fn as_ref(&self) -> &[u8; SHA256_OUTPUT_LEN] {
        &self.key
    }
}

impl AsRef<[u8; SHA256_OUTPUT_LEN]> for SigningKey {
    fn as_ref(&self) -> &[u8; SHA256_OUTPUT_LEN] {
        &self.key
    }
}

// Key material never appears in Debug or Display output.

impl Debug for SecretKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("SecretKey")
    }
}

impl Debug for DateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("DateKey")
    }
}

impl Debug for RegionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("RegionKey")
    }
}

impl Debug for ServiceKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("ServiceKey")
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("SigningKey")
    }
}

impl Display for SecretKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("SecretKey")
    }
}

impl Display for SigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("SigningKey")
    }
}

#[cfg(test)]
mod tests {
    use {super::SecretKey, crate::GatewayError};

    #[test_log::test]
    fn test_chain_known_vector() {
        // AWS SigV4 reference vector: with an "AWS4" prefix and the
        // "aws4_request" terminator the chain must reproduce the published
        // signing key for this secret.
        let secret = SecretKey::new("wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY", "AWS4").unwrap();
        let signing = secret.to_signing_key("20150830", "us-east-1", "example", "aws4_request");
        assert_eq!(
            signing.as_ref(),
            &[
                0x43u8, 0x1cu8, 0xc9u8, 0xefu8, 0x58u8, 0x76u8, 0x28u8, 0x7du8, 0xbbu8, 0x92u8, 0x5du8, 0x4bu8,
                0xa4u8, 0x62u8, 0x9fu8, 0x45u8, 0x90u8, 0x02u8, 0xadu8, 0x1du8, 0x26u8, 0xb7u8, 0xc7u8, 0x51u8,
                0x60u8, 0x1bu8, 0xb2u8, 0x04u8, 0xe1u8, 0x17u8, 0x18u8, 0xb8u8
            ]
        );
    }

    #[test_log::test]
    fn test_chain_step_equivalence() {
        let secret = SecretKey::new("top-secret", "").unwrap();
        let stepped =
            secret.to_date_key("20260829").to_region_key("cn-north-1").to_service_key("cv").to_signing_key("request");
        let chained = secret.to_signing_key("20260829", "cn-north-1", "cv", "request");
        assert_eq!(stepped, chained);

        let other = secret.to_signing_key("20260830", "cn-north-1", "cv", "request");
        assert_ne!(stepped, other);
    }

    #[test_log::test]
    fn test_empty_secret_rejected() {
        match SecretKey::new("", "AWS4") {
            Err(GatewayError::EmptySecretKey) => (),
            other => panic!("expected EmptySecretKey, got {:?}", other),
        }
    }

    #[test_log::test]
    fn test_key_material_redacted() {
        let secret = SecretKey::new("top-secret", "").unwrap();
        assert_eq!(format!("{:?}", secret), "SecretKey");
        assert_eq!(format!("{}", secret), "SecretKey");

        let signing = secret.to_signing_key("20260829", "cn-north-1", "cv", "request");
        assert_eq!(format!("{:?}", signing), "SigningKey");
        assert!(!format!("{:?}", secret.to_date_key("20260829")).contains("top-secret"));
    }
}
