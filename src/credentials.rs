use {
    crate::{constants::*, GatewayError},
    std::fmt::{Debug, Formatter, Result as FmtResult},
};

/// An access key / secret key pair.
///
/// Lifetime is per-request; pairs are never cached, persisted, or logged.
/// `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
}

/// Credential values optionally supplied with a single request.
///
/// Empty strings are treated as absent, matching how callers commonly send
/// blank form fields.
#[derive(Clone, Default)]
pub struct CredentialOverrides {
    /// The request-supplied access key, if any.
    pub access_key: Option<String>,

    /// The request-supplied secret key, if any.
    pub secret_key: Option<String>,
}

impl Credentials {
    /// Create a credential pair.
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Retrieve the access key.
    #[inline]
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Retrieve the secret key.
    #[inline]
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Resolve the effective credentials for one invocation.
    ///
    /// Resolution order, per field: the request-supplied value, else the
    /// configured fallback pair, else failure. Runs before any network or CPU
    /// work so a credential-less request costs nothing.
    pub fn resolve(overrides: &CredentialOverrides, fallback: Option<&Credentials>) -> Result<Credentials, GatewayError> {
        let access_key = overrides
            .access_key
            .as_deref()
            .filter(|v| !v.is_empty())
            .or_else(|| fallback.map(Credentials::access_key))
            .filter(|v| !v.is_empty());
        let secret_key = overrides
            .secret_key
            .as_deref()
            .filter(|v| !v.is_empty())
            .or_else(|| fallback.map(Credentials::secret_key))
            .filter(|v| !v.is_empty());

        match (access_key, secret_key) {
            (Some(access_key), Some(secret_key)) => Ok(Credentials::new(access_key, secret_key)),
            _ => Err(GatewayError::MissingCredentials(format!(
                "Missing credentials: supply access_key and secret_key with the request or set {} and {}",
                ENV_ACCESS_KEY, ENV_SECRET_KEY,
            ))),
        }
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("Credentials")
    }
}

impl Debug for CredentialOverrides {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CredentialOverrides")
            .field("access_key", &self.access_key.as_ref().map(|_| "<set>"))
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<set>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{CredentialOverrides, Credentials};

    #[test_log::test]
    fn test_request_values_win() {
        let fallback = Credentials::new("FALLBACK", "fallback-secret");
        let overrides = CredentialOverrides {
            access_key: Some("REQAK".to_string()),
            secret_key: Some("req-secret".to_string()),
        };
        let resolved = Credentials::resolve(&overrides, Some(&fallback)).unwrap();
        assert_eq!(resolved.access_key(), "REQAK");
        assert_eq!(resolved.secret_key(), "req-secret");
    }

    #[test_log::test]
    fn test_fallback_fills_missing_fields() {
        let fallback = Credentials::new("FALLBACK", "fallback-secret");
        let overrides = CredentialOverrides {
            access_key: Some("REQAK".to_string()),
            secret_key: None,
        };
        let resolved = Credentials::resolve(&overrides, Some(&fallback)).unwrap();
        assert_eq!(resolved.access_key(), "REQAK");
        assert_eq!(resolved.secret_key(), "fallback-secret");
    }

    #[test_log::test]
    fn test_empty_strings_treated_as_absent() {
        let overrides = CredentialOverrides {
            access_key: Some("".to_string()),
            secret_key: Some("".to_string()),
        };
        let err = Credentials::resolve(&overrides, None).unwrap_err();
        assert_eq!(err.error_code(), "MissingCredentials");
    }

    #[test_log::test]
    fn test_no_source_at_all() {
        let err = Credentials::resolve(&CredentialOverrides::default(), None).unwrap_err();
        assert_eq!(err.error_code(), "MissingCredentials");
        assert!(err.to_string().contains("VISIONGATE_ACCESS_KEY"));
    }

    #[test_log::test]
    fn test_debug_redacted() {
        let creds = Credentials::new("AKIDEXAMPLE", "top-secret");
        assert_eq!(format!("{:?}", creds), "Credentials");

        let overrides = CredentialOverrides {
            access_key: None,
            secret_key: Some("top-secret".to_string()),
        };
        let debug = format!("{:?}", overrides);
        assert!(!debug.contains("top-secret"));
        assert!(debug.contains("<set>"));
    }
}
