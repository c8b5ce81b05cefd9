use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use traffic_dump::{routes, AppConfig, AppState, LoggingInterceptor, TracingSink};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing()?;

    let config = AppConfig::load()?;
    info!("Configuration loaded successfully");

    let interceptor = LoggingInterceptor::new(config.interceptor(), Arc::new(TracingSink));
    info!(
        name = interceptor.config().name(),
        variants = ?interceptor.registry(),
        "Traffic dump interceptor ready"
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        config: Arc::new(config),
    };
    let app = routes::create_app(state, interceptor);

    let listener = TcpListener::bind(&addr).await?;
    info!("Traffic dump demo listening on {}", addr);
    info!("Set RUST_LOG=traffic_dump=debug to see dumps");

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() -> Result<()> {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::registry();

    match log_format.as_str() {
        "json" => {
            subscriber
                .with(tracing_subscriber::fmt::layer().json())
                .with(tracing_subscriber::EnvFilter::from_default_env())
                .init();
        }
        _ => {
            subscriber
                .with(tracing_subscriber::fmt::layer())
                .with(tracing_subscriber::EnvFilter::from_default_env())
                .init();
        }
    }

    Ok(())
}
