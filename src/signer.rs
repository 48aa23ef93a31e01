use {
    crate::{
        canonical::{self, SignedRequestSpec},
        constants::*,
        credentials::Credentials,
        signing_key::SecretKey,
        GatewayError,
    },
    chrono::{DateTime, Utc},
    log::trace,
    subtle::ConstantTimeEq,
};

/// The deployment parameters of one signing scheme variant.
///
/// Service name, API region, terminator literal, secret-key prefix, and the
/// signed-header set are explicit fields rather than hard-coded literals, so a
/// scheme revision is a configuration change. The defaults are pinned to the
/// Volcengine visual API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningScheme {
    /// Algorithm literal emitted in the `Authorization` header and the string
    /// to sign.
    pub algorithm: String,

    /// Region segment of the credential scope.
    pub region: String,

    /// Service segment of the credential scope.
    pub service: String,

    /// Terminator literal: the final segment of the credential scope and the
    /// key-derivation chain. Must match the upstream verifier exactly.
    pub terminator: String,

    /// Literal prefixed to the secret key when seeding key derivation. Empty
    /// for schemes that use the secret key verbatim.
    pub secret_key_prefix: String,

    /// Content-Type header value signed and sent with every request.
    pub content_type: String,

    /// Whether the payload hash is also carried (and signed) as an
    /// `x-content-sha256` header.
    pub include_content_sha256: bool,
}

impl Default for SigningScheme {
    fn default() -> Self {
        Self {
            algorithm: ALGORITHM_HMAC_SHA256.to_string(),
            region: DEFAULT_REGION.to_string(),
            service: DEFAULT_SERVICE.to_string(),
            terminator: SCOPE_TERMINATOR.to_string(),
            secret_key_prefix: String::new(),
            content_type: APPLICATION_JSON.to_string(),
            include_content_sha256: false,
        }
    }
}

/// The header values produced by one signing pass, ready to go on the wire.
#[derive(Clone, Debug)]
pub struct SignedHeaders {
    /// The `Authorization` header value.
    pub authorization: String,

    /// The `X-Date` header value, fixed-width `YYYYMMDDTHHMMSSZ`.
    pub x_date: String,

    /// The `Content-Type` header value.
    pub content_type: String,

    /// The `Host` header value.
    pub host: String,

    /// The `X-Content-Sha256` header value, when the scheme includes it.
    pub content_sha256: Option<String>,
}

impl SignedHeaders {
    /// The signed wire headers as lowercase name/value pairs, in canonical
    /// (byte-sorted) order.
    pub fn as_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            (HEADER_CONTENT_TYPE.to_string(), self.content_type.clone()),
            (HEADER_HOST.to_string(), self.host.clone()),
        ];
        if let Some(hash) = &self.content_sha256 {
            pairs.push((HEADER_X_CONTENT_SHA256.to_string(), hash.clone()));
        }
        pairs.push((HEADER_X_DATE.to_string(), self.x_date.clone()));
        pairs
    }
}

/// Computes time-scoped authorization headers for upstream requests.
///
/// A pure function of its inputs plus the supplied timestamp; it holds no
/// state, performs no I/O, and cannot block. The only failure mode is an
/// empty secret key.
#[derive(Clone, Debug, Default)]
pub struct Signer {
    scheme: SigningScheme,
}

impl Signer {
    /// Create a signer for a scheme.
    pub fn new(scheme: SigningScheme) -> Self {
        Self {
            scheme,
        }
    }

    /// Retrieve the scheme this signer is parameterized with.
    #[inline]
    pub fn scheme(&self) -> &SigningScheme {
        &self.scheme
    }

    /// Sign a request spec, producing the authorization, date, and
    /// (scheme-dependent) content-hash header values.
    ///
    /// The signature covers exactly the bytes the spec describes; mutating
    /// the query, headers, or body afterwards invalidates it.
    pub fn sign(&self, spec: &SignedRequestSpec, credentials: &Credentials) -> Result<SignedHeaders, GatewayError> {
        let secret = SecretKey::new(credentials.secret_key(), &self.scheme.secret_key_prefix)?;

        let timestamp = spec.timestamp_compact();
        let date = canonical::date_of(&timestamp);
        let scope = canonical::credential_scope(date, &self.scheme.region, &self.scheme.service, &self.scheme.terminator);

        let mut headers = SignedHeaders {
            authorization: String::new(),
            x_date: timestamp.clone(),
            content_type: self.scheme.content_type.clone(),
            host: spec.host.clone(),
            content_sha256: self.scheme.include_content_sha256.then(|| spec.payload_hash()),
        };

        let signed_pairs = headers.as_pairs();
        let canonical_request = canonical::canonical_request(spec, &signed_pairs);
        trace!("Canonical request:\n{}", String::from_utf8_lossy(&canonical_request));

        let string_to_sign = canonical::string_to_sign(&self.scheme.algorithm, &timestamp, &scope, &canonical_request);
        trace!("String to sign:\n{}", String::from_utf8_lossy(&string_to_sign));

        let signing_key = secret.to_signing_key(date, &self.scheme.region, &self.scheme.service, &self.scheme.terminator);
        let signature = signing_key.sign(&string_to_sign);

        headers.authorization = format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            self.scheme.algorithm,
            credentials.access_key(),
            scope,
            canonical::signed_header_names(&signed_pairs),
            signature,
        );
        Ok(headers)
    }

    /// Sign a request as of a fixed instant.
    ///
    /// Convenience for verifiers and tests that need to reproduce a signature
    /// for a timestamp taken from the wire.
    pub fn sign_at(
        &self,
        spec: &SignedRequestSpec,
        credentials: &Credentials,
        timestamp: DateTime<Utc>,
    ) -> Result<SignedHeaders, GatewayError> {
        let mut spec = spec.clone();
        spec.timestamp = timestamp;
        self.sign(&spec, credentials)
    }
}

/// Compare two hex signatures in constant time.
pub fn verify_signature(expected: &str, provided: &str) -> bool {
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use {
        super::{verify_signature, Signer, SigningScheme},
        crate::{canonical::SignedRequestSpec, credentials::Credentials},
        bytes::Bytes,
        chrono::{TimeZone, Utc},
        http::Method,
        std::collections::BTreeMap,
    };

    fn spec(body: &'static [u8]) -> SignedRequestSpec {
        let mut query = BTreeMap::new();
        query.insert("Action".to_string(), "CVProcess".to_string());
        query.insert("Version".to_string(), "2022-08-31".to_string());
        SignedRequestSpec {
            method: Method::POST,
            host: "visual.volcengineapi.com".to_string(),
            path: "/".to_string(),
            query,
            body: Bytes::from_static(body),
            timestamp: Utc.with_ymd_and_hms(2026, 8, 29, 1, 2, 3).unwrap(),
        }
    }

    fn creds() -> Credentials {
        Credentials::new("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY")
    }

    #[test_log::test]
    fn test_sign_deterministic() {
        let signer = Signer::default();
        let spec = spec(b"{\"prompt\":\"a cat\"}");
        let first = signer.sign(&spec, &creds()).unwrap();
        let second = signer.sign(&spec, &creds()).unwrap();
        assert_eq!(first.authorization, second.authorization);
        assert_eq!(first.x_date, "20260829T010203Z");
    }

    #[test_log::test]
    fn test_authorization_header_shape() {
        let signer = Signer::default();
        let headers = signer.sign(&spec(b"{}"), &creds()).unwrap();
        assert!(headers.authorization.starts_with(
            "HMAC-SHA256 Credential=AKIDEXAMPLE/20260829/cn-north-1/cv/request, SignedHeaders=content-type;host;x-date, Signature="
        ));
        let signature = headers.authorization.rsplit('=').next().unwrap();
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(headers.content_sha256.is_none());
    }

    #[test_log::test]
    fn test_content_sha256_header_when_scheme_includes_it() {
        let scheme = SigningScheme {
            include_content_sha256: true,
            ..SigningScheme::default()
        };
        let signer = Signer::new(scheme);
        let spec = spec(b"{}");
        let headers = signer.sign(&spec, &creds()).unwrap();
        assert_eq!(headers.content_sha256.as_deref(), Some(spec.payload_hash().as_str()));
        assert!(headers.authorization.contains("SignedHeaders=content-type;host;x-content-sha256;x-date"));
    }

    #[test_log::test]
    fn test_body_change_changes_signature() {
        let signer = Signer::default();
        let with_cat = signer.sign(&spec(b"{\"prompt\":\"a cat\"}"), &creds()).unwrap();
        let with_bat = signer.sign(&spec(b"{\"prompt\":\"a bat\"}"), &creds()).unwrap();
        assert_ne!(with_cat.authorization, with_bat.authorization);
    }

    #[test_log::test]
    fn test_empty_secret_is_the_only_failure() {
        let signer = Signer::default();
        let err = signer.sign(&spec(b"{}"), &Credentials::new("AKIDEXAMPLE", "")).unwrap_err();
        assert_eq!(err.error_code(), "EmptySecretKey");
    }

    #[test_log::test]
    fn test_verify_signature() {
        assert!(verify_signature("deadbeef", "deadbeef"));
        assert!(!verify_signature("deadbeef", "deadbeee"));
        assert!(!verify_signature("deadbeef", "deadbee"));
    }
}
