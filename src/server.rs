//! HTTP surface bound over the gateway.
//!
//! Thin by design: handlers deserialize the caller's request, hand the
//! gateway a credential override and the action inputs, and map the result
//! back to JSON. All policy lives in the gateway and signer.

use {
    crate::{
        credentials::CredentialOverrides,
        error::GatewayError,
        gateway::Gateway,
        transport::HttpTransport,
        GatewayConfig,
    },
    axum::{
        extract::State,
        response::{IntoResponse, Response},
        routing::{get, post},
        Json, Router,
    },
    log::{error, info},
    serde::{Deserialize, Serialize},
    serde_json::{json, Value},
    std::{error::Error, sync::Arc},
    tower_http::cors::{Any, CorsLayer},
};

/// Caller request for `POST /api/generate_video`.
#[derive(Debug, Deserialize)]
struct GenerateVideoRequest {
    prompt: String,

    #[serde(default = "default_ratio")]
    ratio: String,

    #[serde(default)]
    access_key: Option<String>,

    #[serde(default)]
    secret_key: Option<String>,
}

/// Caller request for `POST /api/check_status`.
#[derive(Debug, Deserialize)]
struct CheckStatusRequest {
    task_id: String,

    #[serde(default)]
    access_key: Option<String>,

    #[serde(default)]
    secret_key: Option<String>,
}

/// Error payload: an HTTP error status with a `detail` string.
#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

fn default_ratio() -> String {
    "16:9".to_string()
}

/// Build the router for a gateway instance.
///
/// CORS is wide open: the surface is meant to sit behind a browser frontend
/// on another origin, matching the deployment this gateway fronts.
pub fn router(gateway: Arc<Gateway>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/", get(liveness))
        .route("/api/generate_video", post(generate_video))
        .route("/api/check_status", post(check_status))
        .layer(cors)
        .with_state(gateway)
}

/// Build the gateway from configuration and serve it until shutdown.
pub async fn serve(config: GatewayConfig) -> Result<(), Box<dyn Error + Send + Sync>> {
    let transport = HttpTransport::new(config.upstream_timeout())?;
    let bind_addr = config.bind_addr().to_string();
    let gateway = Arc::new(Gateway::new(config, Arc::new(transport)));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("listening on {}", bind_addr);
    axum::serve(listener, router(gateway)).await?;
    Ok(())
}

async fn liveness() -> Json<Value> {
    Json(json!({
        "status": "visiongate is running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn generate_video(State(gateway): State<Arc<Gateway>>, Json(request): Json<GenerateVideoRequest>) -> Response {
    let credentials = CredentialOverrides {
        access_key: request.access_key,
        secret_key: request.secret_key,
    };
    match gateway.generate_video(&request.prompt, &request.ratio, &credentials).await {
        Ok(payload) => Json(payload).into_response(),
        Err(e) => error_response(e),
    }
}

async fn check_status(State(gateway): State<Arc<Gateway>>, Json(request): Json<CheckStatusRequest>) -> Response {
    let credentials = CredentialOverrides {
        access_key: request.access_key,
        secret_key: request.secret_key,
    };
    match gateway.check_status(&request.task_id, &credentials).await {
        Ok(payload) => Json(payload).into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(e: GatewayError) -> Response {
    error!("{}: {}", e.error_code(), e);
    (
        e.http_status(),
        Json(ErrorBody {
            detail: e.to_string(),
        }),
    )
        .into_response()
}
