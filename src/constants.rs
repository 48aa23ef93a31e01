//! Common constants used throughout the crate.
//!
//! This was consolidated here because the signing constants (service, version,
//! terminator) kept drifting apart when they were redefined per module. If a
//! value is spelled incorrectly, at least it can be fixed in one spot.
//!
//! Tests that are testing the content of an error code or message should not use
//! these constants; they should use hard-coded strings so the tests are also
//! testing for misspellings.
//!
//! Please keep this file organized alphabetically.

/// Upstream action that submits a video-generation task.
pub(crate) const ACTION_GENERATE_VIDEO: &str = "CVProcess";

/// Upstream action that queries the result of a previously submitted task.
pub(crate) const ACTION_QUERY_TASK: &str = "CVProcessResult";

/// Signing algorithm literal, sent verbatim in the `Authorization` header.
pub(crate) const ALGORITHM_HMAC_SHA256: &str = "HMAC-SHA256";

/// Content-Type for all upstream request bodies.
pub(crate) const APPLICATION_JSON: &str = "application/json";

/// Upstream API version merged into the query string of every call.
pub(crate) const DEFAULT_API_VERSION: &str = "2022-08-31";

/// Default bind address for the HTTP surface.
pub(crate) const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Default upstream host.
pub(crate) const DEFAULT_HOST: &str = "visual.volcengineapi.com";

/// Default region in the credential scope.
pub(crate) const DEFAULT_REGION: &str = "cn-north-1";

/// Default service name in the credential scope.
pub(crate) const DEFAULT_SERVICE: &str = "cv";

/// Default per-call upstream deadline, in seconds.
pub(crate) const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 60;

/// Environment variable supplying the fallback access key.
pub(crate) const ENV_ACCESS_KEY: &str = "VISIONGATE_ACCESS_KEY";

/// Environment variable overriding the bind address.
pub(crate) const ENV_BIND_ADDR: &str = "VISIONGATE_BIND";

/// Environment variable supplying the fallback secret key.
pub(crate) const ENV_SECRET_KEY: &str = "VISIONGATE_SECRET_KEY";

/// Error code: EmptySecretKey
pub(crate) const ERR_CODE_EMPTY_SECRET_KEY: &str = "EmptySecretKey";

/// Error code: MalformedResponse
pub(crate) const ERR_CODE_MALFORMED_RESPONSE: &str = "MalformedResponse";

/// Error code: MissingCredentials
pub(crate) const ERR_CODE_MISSING_CREDENTIALS: &str = "MissingCredentials";

/// Error code: TransportFailure
pub(crate) const ERR_CODE_TRANSPORT_FAILURE: &str = "TransportFailure";

/// Error code: UpstreamError
pub(crate) const ERR_CODE_UPSTREAM_ERROR: &str = "UpstreamError";

/// Header name: `authorization`.
pub(crate) const HEADER_AUTHORIZATION: &str = "authorization";

/// Header name: `content-type`.
pub(crate) const HEADER_CONTENT_TYPE: &str = "content-type";

/// Header name: `host`.
pub(crate) const HEADER_HOST: &str = "host";

/// Header name: `x-content-sha256`.
pub(crate) const HEADER_X_CONTENT_SHA256: &str = "x-content-sha256";

/// Header name: `x-date`.
pub(crate) const HEADER_X_DATE: &str = "x-date";

/// Compact ISO 8601 timestamp format: `YYYYMMDDTHHMMSSZ`.
pub(crate) const ISO8601_COMPACT_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Length of the date-only prefix (`YYYYMMDD`) of a compact timestamp.
pub(crate) const ISO8601_DATE_LENGTH: usize = 8;

/// Model version field sent with generation requests.
pub(crate) const MODEL_VERSION: &str = "v1.3";

/// Query parameter carrying the action name.
pub(crate) const QUERY_ACTION: &str = "Action";

/// Query parameter carrying the API version.
pub(crate) const QUERY_VERSION: &str = "Version";

/// Request key identifying the video-generation pipeline.
pub(crate) const REQ_KEY_VIDEO_GENERATION: &str = "video_generation";

/// Fixed final segment of the credential scope and key-derivation chain.
pub(crate) const SCOPE_TERMINATOR: &str = "request";

/// Length of a hex-encoded SHA-256 digest in bytes.
pub(crate) const SHA256_HEX_LENGTH: usize = 64;

/// Length of a SHA-256 digest in bytes.
pub(crate) const SHA256_OUTPUT_LEN: usize = 32;

/// Root path of the upstream API.
pub(crate) const UPSTREAM_PATH: &str = "/";
