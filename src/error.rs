use {
    crate::constants::*,
    http::status::StatusCode,
    std::{
        error::Error,
        fmt::{Display, Formatter, Result as FmtResult},
    },
};

/// Error returned when an invocation of the gateway fails.
///
/// Every failure path produces one of these kinds; none is silently dropped
/// and none is fatal to the process. Client-caused failures map to 4xx status
/// codes, upstream and transport failures to 5xx.
#[derive(Debug)]
#[non_exhaustive]
pub enum GatewayError {
    /// The signing path was handed an empty secret key. This is the only
    /// failure mode of the signer itself.
    EmptySecretKey,

    /// The upstream returned a body that could not be parsed as JSON. The raw
    /// text is preserved for diagnostics.
    MalformedResponse {
        /// The upstream HTTP status code.
        status: u16,
        /// The unparseable body, verbatim.
        raw: String,
    },

    /// No usable credential pair: neither the request nor the configured
    /// fallback supplied both keys. Raised before any network or CPU work.
    MissingCredentials(/* message */ String),

    /// The network call itself failed: DNS, TLS, timeout, or connection
    /// errors. Never retried automatically.
    TransportFailure(Box<dyn Error + Send + Sync>),

    /// The upstream rejected the request with a structured error; the
    /// extracted message is passed through.
    UpstreamError {
        /// The upstream HTTP status code.
        status: u16,
        /// The extracted error message.
        message: String,
    },
}

impl GatewayError {
    /// A stable machine-readable code for the error kind.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptySecretKey => ERR_CODE_EMPTY_SECRET_KEY,
            Self::MalformedResponse {
                ..
            } => ERR_CODE_MALFORMED_RESPONSE,
            Self::MissingCredentials(_) => ERR_CODE_MISSING_CREDENTIALS,
            Self::TransportFailure(_) => ERR_CODE_TRANSPORT_FAILURE,
            Self::UpstreamError {
                ..
            } => ERR_CODE_UPSTREAM_ERROR,
        }
    }

    /// The HTTP status surfaced to the caller for this error.
    ///
    /// Upstream errors keep the upstream status when it is itself an error
    /// status; anything else is normalized to 502.
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::EmptySecretKey | Self::MissingCredentials(_) => StatusCode::BAD_REQUEST,
            Self::MalformedResponse {
                ..
            }
            | Self::TransportFailure(_) => StatusCode::BAD_GATEWAY,
            Self::UpstreamError {
                status,
                ..
            } => match StatusCode::from_u16(*status) {
                Ok(code) if code.is_client_error() || code.is_server_error() => code,
                _ => StatusCode::BAD_GATEWAY,
            },
        }
    }
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::EmptySecretKey => f.write_str("Signing requires a non-empty secret key"),
            Self::MalformedResponse {
                status,
                raw,
            } => write!(f, "Upstream returned unparseable content (status {}): {}", status, raw),
            Self::MissingCredentials(msg) => f.write_str(msg),
            Self::TransportFailure(e) => write!(f, "Upstream call failed: {}", e),
            Self::UpstreamError {
                message,
                ..
            } => f.write_str(message),
        }
    }
}

impl Error for GatewayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::TransportFailure(ref e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> GatewayError {
        GatewayError::TransportFailure(Box::new(e))
    }
}

#[cfg(test)]
mod tests {
    use {super::GatewayError, std::error::Error};

    #[test_log::test]
    fn test_codes_and_statuses() {
        let e = GatewayError::MissingCredentials("Missing credentials".to_string());
        assert_eq!(e.error_code(), "MissingCredentials");
        assert_eq!(e.http_status(), 400);
        assert_eq!(e.to_string(), "Missing credentials");

        let e = GatewayError::EmptySecretKey;
        assert_eq!(e.error_code(), "EmptySecretKey");
        assert_eq!(e.http_status(), 400);

        let e = GatewayError::UpstreamError {
            status: 403,
            message: "SignatureDoesNotMatch".to_string(),
        };
        assert_eq!(e.error_code(), "UpstreamError");
        assert_eq!(e.http_status(), 403);
        assert_eq!(e.to_string(), "SignatureDoesNotMatch");

        // A nonsensical upstream status is normalized to 502.
        let e = GatewayError::UpstreamError {
            status: 200,
            message: "odd".to_string(),
        };
        assert_eq!(e.http_status(), 502);

        let e = GatewayError::MalformedResponse {
            status: 200,
            raw: "not json".to_string(),
        };
        assert_eq!(e.error_code(), "MalformedResponse");
        assert_eq!(e.http_status(), 502);
        assert!(e.to_string().contains("not json"));
    }

    #[test_log::test]
    fn test_transport_failure_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        let e = GatewayError::TransportFailure(Box::new(io));
        assert_eq!(e.error_code(), "TransportFailure");
        assert_eq!(e.http_status(), 502);
        assert!(e.source().is_some());
        assert!(e.to_string().contains("reset by peer"));
    }
}
