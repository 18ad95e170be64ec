mod compile;
mod config;
mod errors;
mod render;
mod routes;
mod state;
mod storage;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::compile::LatexCompiler;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::S3ArtifactStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cvforge API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    let store = S3ArtifactStore::new(s3, config.s3_bucket.clone(), config.s3_public_url.clone());
    info!("Artifact store initialized (bucket: {})", config.s3_bucket);

    // Initialize compiler driver
    let (program, args) = config
        .latex_command
        .split_first()
        .map(|(program, args)| (program.clone(), args.to_vec()))
        .ok_or_else(|| anyhow::anyhow!("LATEX_PROGRAM must not be empty"))?;
    info!(
        "LaTeX compiler: {} (timeout {}s)",
        config.latex_command.join(" "),
        config.compile_timeout_secs
    );
    let compiler = LatexCompiler::new(
        program,
        args,
        Duration::from_secs(config.compile_timeout_secs),
    );

    // Build app state
    let state = AppState {
        compiler,
        store: Arc::new(store),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "cvforge-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    // MinIO only serves path-style requests.
    let s3_config = aws_sdk_s3::config::Builder::from(&s3_config)
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(s3_config)
}
