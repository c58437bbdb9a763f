//! beacon-api binary

use beacon_api::server;
use beacon_common::{init_tracing, AppConfig, TracingConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    let tracing_config = if config.app.env.is_production() {
        TracingConfig::production()
    } else {
        TracingConfig::development()
    };
    init_tracing(&tracing_config);

    server::run(config).await
}
