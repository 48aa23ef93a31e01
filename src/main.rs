use {
    log::info,
    std::error::Error,
    visiongate::{serve, GatewayConfig},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    env_logger::init();

    // The environment is read exactly once, here; request handling never
    // touches it.
    let config = GatewayConfig::from_env();
    info!("visiongate {} starting", env!("CARGO_PKG_VERSION"));

    serve(config).await
}
