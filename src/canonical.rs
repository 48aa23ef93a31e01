//! Canonicalization functionality for signature generation.
//!
//! This builds the byte-exact canonical request and string to sign that seed
//! the signature. The canonical request is derived, never persisted; any
//! mutation of the method, path, query, headers, or body after signing
//! invalidates the signature.

use {
    crate::{
        constants::{ISO8601_COMPACT_FORMAT, ISO8601_DATE_LENGTH, SHA256_HEX_LENGTH},
        crypto::{sha256_hex, sha256},
    },
    bytes::Bytes,
    chrono::{DateTime, Utc},
    http::Method,
    std::collections::BTreeMap,
};

/// The inputs covered by a signature, exactly as they will go on the wire.
///
/// The query must already contain the action name and API version before
/// signing. Keys are held in a [`BTreeMap`] so canonicalization is sorted by
/// key byte order and independent of insertion order. Values must be
/// pre-encoded by the caller if they contain reserved characters.
#[derive(Clone, Debug)]
pub struct SignedRequestSpec {
    /// The HTTP method that will actually be sent.
    pub method: Method,

    /// The upstream host, also emitted as the `host` header.
    pub host: String,

    /// The URI path.
    pub path: String,

    /// Query parameters, including `Action` and `Version`.
    pub query: BTreeMap<String, String>,

    /// The body bytes exactly as they will be transmitted.
    pub body: Bytes,

    /// The UTC instant the signature is scoped to.
    pub timestamp: DateTime<Utc>,
}

impl SignedRequestSpec {
    /// Format the timestamp as the fixed-width `YYYYMMDDTHHMMSSZ` form.
    pub fn timestamp_compact(&self) -> String {
        self.timestamp.format(ISO8601_COMPACT_FORMAT).to_string()
    }

    /// Hex SHA-256 digest of the body. An empty body hashes the empty byte
    /// sequence; it is never omitted.
    pub fn payload_hash(&self) -> String {
        sha256_hex(&self.body)
    }

    /// The canonical query string: pairs sorted by key byte order, joined as
    /// `key=value` with `&`. This exact string must also be sent on the wire.
    pub fn canonical_query_string(&self) -> String {
        let mut result = String::new();
        for (key, value) in &self.query {
            if !result.is_empty() {
                result.push('&');
            }
            result.push_str(key);
            result.push('=');
            result.push_str(value);
        }
        result
    }
}

/// The date-only `YYYYMMDD` form of a compact timestamp.
///
/// Derived by truncation rather than formatted independently so the two can
/// never disagree.
pub(crate) fn date_of(timestamp_compact: &str) -> &str {
    &timestamp_compact[..ISO8601_DATE_LENGTH]
}

/// The credential scope: `date/region/service/terminator`.
pub(crate) fn credential_scope(date: &str, region: &str, service: &str, terminator: &str) -> String {
    format!("{}/{}/{}/{}", date, region, service, terminator)
}

/// Build the canonical request over the spec and the resolved signed headers.
///
/// Layout: `METHOD\nPATH\nQUERY\nHEADERS\nSIGNED_HEADER_NAMES\nPAYLOAD_HASH`
/// where `HEADERS` is one `name:value\n` line per signed header, in list
/// order. Header names must be lowercase and values must contain no embedded
/// newlines.
pub(crate) fn canonical_request(spec: &SignedRequestSpec, signed_headers: &[(String, String)]) -> Vec<u8> {
    let mut result = Vec::with_capacity(256);
    result.extend(spec.method.as_str().as_bytes());
    result.push(b'\n');
    result.extend(spec.path.as_bytes());
    result.push(b'\n');
    result.extend(spec.canonical_query_string().as_bytes());
    result.push(b'\n');
    for (name, value) in signed_headers {
        debug_assert!(!value.contains('\n'), "signed header value must not contain a newline");
        result.extend(name.as_bytes());
        result.push(b':');
        result.extend(value.as_bytes());
        result.push(b'\n');
    }
    result.push(b'\n');
    result.extend(signed_header_names(signed_headers).as_bytes());
    result.push(b'\n');
    result.extend(spec.payload_hash().as_bytes());
    result
}

/// The semicolon-joined signed-header-name list.
pub(crate) fn signed_header_names(signed_headers: &[(String, String)]) -> String {
    signed_headers.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>().join(";")
}

/// Build the string to sign:
/// `ALGORITHM\nTIMESTAMP\nCREDENTIAL_SCOPE\nhex(sha256(canonical_request))`.
pub(crate) fn string_to_sign(
    algorithm: &str,
    timestamp_compact: &str,
    credential_scope: &str,
    canonical_request: &[u8],
) -> Vec<u8> {
    let hashed_canonical_request = hex::encode(sha256(canonical_request));
    let mut result = Vec::with_capacity(
        algorithm.len() + 1 + timestamp_compact.len() + 1 + credential_scope.len() + 1 + SHA256_HEX_LENGTH,
    );
    result.extend(algorithm.as_bytes());
    result.push(b'\n');
    result.extend(timestamp_compact.as_bytes());
    result.push(b'\n');
    result.extend(credential_scope.as_bytes());
    result.push(b'\n');
    result.extend(hashed_canonical_request.as_bytes());
    result
}

#[cfg(test)]
mod tests {
    use {
        super::{canonical_request, credential_scope, date_of, signed_header_names, string_to_sign, SignedRequestSpec},
        bytes::Bytes,
        chrono::{TimeZone, Utc},
        http::Method,
        std::collections::BTreeMap,
    };

    fn spec() -> SignedRequestSpec {
        let mut query = BTreeMap::new();
        query.insert("Version".to_string(), "2022-08-31".to_string());
        query.insert("Action".to_string(), "CVProcess".to_string());
        SignedRequestSpec {
            method: Method::POST,
            host: "visual.example.com".to_string(),
            path: "/".to_string(),
            query,
            body: Bytes::from_static(b"{}"),
            timestamp: Utc.with_ymd_and_hms(2026, 8, 29, 12, 34, 56).unwrap(),
        }
    }

    #[test_log::test]
    fn test_timestamp_and_date_forms() {
        let spec = spec();
        let ts = spec.timestamp_compact();
        assert_eq!(ts, "20260829T123456Z");
        assert_eq!(date_of(&ts), "20260829");
    }

    #[test_log::test]
    fn test_canonical_query_sorted_by_key() {
        let spec = spec();
        // BTreeMap iteration is byte-ordered regardless of insertion order.
        assert_eq!(spec.canonical_query_string(), "Action=CVProcess&Version=2022-08-31");
    }

    #[test_log::test]
    fn test_canonical_request_layout() {
        let spec = spec();
        let headers = vec![
            ("content-type".to_string(), "application/json".to_string()),
            ("host".to_string(), "visual.example.com".to_string()),
            ("x-date".to_string(), "20260829T123456Z".to_string()),
        ];
        let creq = canonical_request(&spec, &headers);
        let expected = format!(
            "POST\n/\nAction=CVProcess&Version=2022-08-31\ncontent-type:application/json\nhost:visual.example.com\nx-date:20260829T123456Z\n\ncontent-type;host;x-date\n{}",
            spec.payload_hash(),
        );
        assert_eq!(creq, expected.as_bytes());
    }

    #[test_log::test]
    fn test_empty_body_hashes_empty_sequence() {
        let mut spec = spec();
        spec.body = Bytes::new();
        assert_eq!(spec.payload_hash(), "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855");
    }

    #[test_log::test]
    fn test_string_to_sign_layout() {
        let spec = spec();
        let headers = vec![("host".to_string(), "visual.example.com".to_string())];
        let creq = canonical_request(&spec, &headers);
        let scope = credential_scope("20260829", "cn-north-1", "cv", "request");
        let sts = string_to_sign("HMAC-SHA256", "20260829T123456Z", &scope, &creq);
        let text = String::from_utf8(sts).unwrap();
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "HMAC-SHA256");
        assert_eq!(lines[1], "20260829T123456Z");
        assert_eq!(lines[2], "20260829/cn-north-1/cv/request");
        assert_eq!(lines[3].len(), 64);
    }

    #[test_log::test]
    fn test_signed_header_names_joined() {
        let headers = vec![
            ("content-type".to_string(), "application/json".to_string()),
            ("host".to_string(), "h".to_string()),
        ];
        assert_eq!(signed_header_names(&headers), "content-type;host");
    }
}
