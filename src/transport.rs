use {
    crate::GatewayError,
    async_trait::async_trait,
    bytes::Bytes,
    http::Method,
    log::debug,
    reqwest::{
        header::{HeaderMap, HeaderName, HeaderValue},
        Client,
    },
    std::time::Duration,
};

/// A fully signed upstream request, ready to transmit.
///
/// Headers are carried as plain name/value strings; the transport converts
/// them to wire form. The body must be exactly the bytes the signature was
/// computed over.
#[derive(Clone, Debug)]
pub struct UpstreamRequest {
    /// The HTTP method; must be the method the signature covers.
    pub method: Method,

    /// The absolute URL, query string included.
    pub url: String,

    /// Header name/value pairs, including `authorization`.
    pub headers: Vec<(String, String)>,

    /// The body bytes. Empty for GET requests.
    pub body: Bytes,
}

/// The raw upstream response before translation.
#[derive(Clone, Debug)]
pub struct UpstreamResponse {
    /// The upstream HTTP status code.
    pub status: u16,

    /// The response body as text.
    pub body: String,
}

/// The single network seam of the gateway.
///
/// Exactly one `execute` call happens per gateway invocation. Implementations
/// must be safe to share across concurrent invocations; test doubles stub
/// this trait to count calls or verify signatures.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the HTTP call and return the raw response.
    ///
    /// Network-level failures (DNS, TLS, timeout, connection reset) surface
    /// as [`GatewayError::TransportFailure`], never silently swallowed.
    async fn execute(&self, request: UpstreamRequest) -> Result<UpstreamResponse, GatewayError>;
}

/// [`Transport`] implementation over a shared `reqwest` client.
///
/// The client carries a fixed per-call deadline; the gateway holds no lock
/// while a call is in flight.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with a bounded per-call timeout.
    pub fn new(timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: UpstreamRequest) -> Result<UpstreamResponse, GatewayError> {
        let mut headers = HeaderMap::with_capacity(request.headers.len());
        for (name, value) in &request.headers {
            let name = HeaderName::try_from(name.as_str())
                .map_err(|e| GatewayError::TransportFailure(Box::new(e)))?;
            let value = HeaderValue::from_str(value).map_err(|e| GatewayError::TransportFailure(Box::new(e)))?;
            headers.insert(name, value);
        }

        debug!("{} {}", request.method, request.url);
        let mut builder = self.client.request(request.method.clone(), &request.url).headers(headers);
        if !request.body.is_empty() {
            builder = builder.body(request.body.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("upstream responded with status {}", status);

        Ok(UpstreamResponse {
            status,
            body,
        })
    }
}
