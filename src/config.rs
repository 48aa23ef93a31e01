use {
    crate::{constants::*, credentials::Credentials, signer::SigningScheme},
    derive_builder::Builder,
    std::{env, time::Duration},
};

/// Static configuration of a gateway instance.
///
/// Resolved once at startup and injected into the gateway at construction
/// time; request-handling code never reads the ambient environment. Defaults
/// target the Volcengine visual API.
///
/// GatewayConfig structs are immutable. Use [`GatewayConfigBuilder`] to
/// construct one programmatically.
#[derive(Builder, Clone, Debug)]
pub struct GatewayConfig {
    /// The upstream host.
    #[builder(setter(into), default = "DEFAULT_HOST.to_string()")]
    host: String,

    /// The upstream URI path.
    #[builder(setter(into), default = "UPSTREAM_PATH.to_string()")]
    path: String,

    /// The API version merged into every query string.
    #[builder(setter(into), default = "DEFAULT_API_VERSION.to_string()")]
    api_version: String,

    /// The signing scheme variant in use.
    #[builder(default)]
    scheme: SigningScheme,

    /// Fallback credentials used when a request supplies none.
    #[builder(setter(into, strip_option), default)]
    fallback_credentials: Option<Credentials>,

    /// Per-call upstream deadline.
    #[builder(default = "Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS)")]
    upstream_timeout: Duration,

    /// Bind address for the HTTP surface.
    #[builder(setter(into), default = "DEFAULT_BIND_ADDR.to_string()")]
    bind_addr: String,
}

impl GatewayConfig {
    /// Create a [`GatewayConfigBuilder`] to construct a [`GatewayConfig`].
    #[inline]
    pub fn builder() -> GatewayConfigBuilder {
        GatewayConfigBuilder::default()
    }

    /// Build a configuration from the process environment.
    ///
    /// This is the only place the environment is consulted. `VISIONGATE_ACCESS_KEY`
    /// and `VISIONGATE_SECRET_KEY` supply the fallback credential pair (both must
    /// be present and non-empty to take effect); `VISIONGATE_BIND` overrides the
    /// bind address.
    pub fn from_env() -> Self {
        let mut builder = Self::builder();

        let access_key = env::var(ENV_ACCESS_KEY).ok().filter(|v| !v.is_empty());
        let secret_key = env::var(ENV_SECRET_KEY).ok().filter(|v| !v.is_empty());
        if let (Some(access_key), Some(secret_key)) = (access_key, secret_key) {
            builder.fallback_credentials(Credentials::new(access_key, secret_key));
        }

        if let Ok(bind) = env::var(ENV_BIND_ADDR) {
            builder.bind_addr(bind);
        }

        builder.build().expect("all config fields have defaults")
    }

    /// Retrieve the upstream host.
    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Retrieve the upstream URI path.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Retrieve the API version.
    #[inline]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Retrieve the signing scheme.
    #[inline]
    pub fn scheme(&self) -> &SigningScheme {
        &self.scheme
    }

    /// Retrieve the fallback credentials, if configured.
    #[inline]
    pub fn fallback_credentials(&self) -> Option<&Credentials> {
        self.fallback_credentials.as_ref()
    }

    /// Retrieve the per-call upstream deadline.
    #[inline]
    pub fn upstream_timeout(&self) -> Duration {
        self.upstream_timeout
    }

    /// Retrieve the bind address for the HTTP surface.
    #[inline]
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::builder().build().expect("all config fields have defaults")
    }
}
