use {
    crate::{
        canonical::SignedRequestSpec,
        config::GatewayConfig,
        constants::*,
        credentials::{CredentialOverrides, Credentials},
        signer::Signer,
        transport::{Transport, UpstreamRequest, UpstreamResponse},
        GatewayError,
    },
    bytes::Bytes,
    chrono::Utc,
    http::Method,
    log::debug,
    serde_json::Value,
    std::{collections::BTreeMap, sync::Arc},
};

/// Authenticates and relays one request to the upstream vision API.
///
/// Each invocation is independent: credentials are resolved, the body is
/// serialized, the request is signed and sent exactly once, and the response
/// is translated. Nothing persists across calls; task identifiers are opaque
/// strings forwarded verbatim. The gateway is `Send + Sync` and may serve
/// concurrent invocations over one shared transport.
pub struct Gateway {
    config: GatewayConfig,
    signer: Signer,
    transport: Arc<dyn Transport>,
}

impl Gateway {
    /// Create a gateway from a resolved configuration and a transport.
    pub fn new(config: GatewayConfig, transport: Arc<dyn Transport>) -> Self {
        let signer = Signer::new(config.scheme().clone());
        Self {
            config,
            signer,
            transport,
        }
    }

    /// Retrieve the gateway configuration.
    #[inline]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Invoke one upstream action.
    ///
    /// `params` are action-specific query parameters; `Action` and the
    /// configured `Version` are merged in before signing. `body_fields` is
    /// serialized to compact JSON for POST actions and ignored for GET. The
    /// method used for signing is the method actually sent.
    ///
    /// Exactly one upstream call is made; there is no retry, polling, or
    /// caching. Status queries are just another action through this same
    /// path.
    pub async fn invoke(
        &self,
        action: &str,
        method: Method,
        params: BTreeMap<String, String>,
        body_fields: &Value,
        credentials: &CredentialOverrides,
    ) -> Result<Value, GatewayError> {
        // Fail fast, before any signing or serialization work.
        let credentials = Credentials::resolve(credentials, self.config.fallback_credentials())?;

        let mut query = params;
        query.insert(QUERY_ACTION.to_string(), action.to_string());
        query.insert(QUERY_VERSION.to_string(), self.config.api_version().to_string());

        // Value's Display is compact JSON with object keys in map order, so
        // equal input always produces byte-identical bodies.
        let body = if method == Method::GET {
            Bytes::new()
        } else {
            Bytes::from(body_fields.to_string())
        };

        let spec = SignedRequestSpec {
            method,
            host: self.config.host().to_string(),
            path: self.config.path().to_string(),
            query,
            body,
            timestamp: Utc::now(),
        };
        let signed = self.signer.sign(&spec, &credentials)?;

        let url = format!("https://{}{}?{}", spec.host, spec.path, spec.canonical_query_string());
        let mut headers = signed.as_pairs();
        headers.push((HEADER_AUTHORIZATION.to_string(), signed.authorization.clone()));

        debug!("invoking upstream action {}", action);
        let response = self
            .transport
            .execute(UpstreamRequest {
                method: spec.method.clone(),
                url,
                headers,
                body: spec.body.clone(),
            })
            .await?;

        translate_response(response)
    }

    /// Submit a video-generation task.
    pub async fn generate_video(
        &self,
        prompt: &str,
        ratio: &str,
        credentials: &CredentialOverrides,
    ) -> Result<Value, GatewayError> {
        let body = serde_json::json!({
            "req_key": REQ_KEY_VIDEO_GENERATION,
            "prompt": prompt,
            "ratio": ratio,
            "model_version": MODEL_VERSION,
        });
        self.invoke(ACTION_GENERATE_VIDEO, Method::POST, BTreeMap::new(), &body, credentials).await
    }

    /// Query the status of a previously submitted task. The task id is
    /// forwarded verbatim, never interpreted.
    pub async fn check_status(&self, task_id: &str, credentials: &CredentialOverrides) -> Result<Value, GatewayError> {
        let body = serde_json::json!({
            "task_id": task_id,
        });
        self.invoke(ACTION_QUERY_TASK, Method::POST, BTreeMap::new(), &body, credentials).await
    }
}

/// Translate a raw upstream response into the uniform result.
///
/// 2xx with parseable JSON passes through unmodified. Non-2xx with parseable
/// JSON becomes an upstream error with the embedded message extracted.
/// Unparseable content becomes a malformed-response error carrying the raw
/// text.
fn translate_response(response: UpstreamResponse) -> Result<Value, GatewayError> {
    let success = (200..300).contains(&response.status);
    match serde_json::from_str::<Value>(&response.body) {
        Ok(json) if success => Ok(json),
        Ok(json) => Err(GatewayError::UpstreamError {
            status: response.status,
            message: extract_error_message(&json),
        }),
        Err(_) => Err(GatewayError::MalformedResponse {
            status: response.status,
            raw: response.body,
        }),
    }
}

/// Pull the upstream error message out of the `ResponseMetadata.Error.Message`
/// envelope; fall back to the whole JSON document when the envelope is absent.
fn extract_error_message(json: &Value) -> String {
    match json.pointer("/ResponseMetadata/Error/Message").and_then(Value::as_str) {
        Some(message) => message.to_string(),
        None => json.to_string(),
    }
}
