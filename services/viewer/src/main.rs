//! Sphere Viewer Server
//!
//! Serves the Svalbard map, the panorama pages and their data.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use sphere_catalog::{CatalogLayout, ExifReader};
use viewer::config::ViewerConfig;
use viewer::routes::build_router;
use viewer::state::AppState;

/// Sphere Viewer Server
#[derive(Parser, Debug)]
#[command(name = "viewer")]
#[command(about = "Svalbard map with 360° panorama viewer")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:5000", env = "VIEWER_LISTEN_ADDR")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Number of worker threads
    #[arg(long, env = "VIEWER_WORKER_THREADS")]
    worker_threads: Option<usize>,

    /// Layer configuration file
    #[arg(long, default_value = "config/viewer.yaml", env = "VIEWER_CONFIG")]
    config: PathBuf,

    /// Directory served under /static
    #[arg(long, default_value = "static", env = "VIEWER_STATIC_DIR")]
    static_dir: PathBuf,

    /// Public address of the map page, used for share links
    #[arg(long, env = "VIEWER_PUBLIC_URL")]
    public_url: Option<String>,

    /// Skip compiling the sphere catalog at startup
    #[arg(long, env = "VIEWER_NO_COMPILE")]
    no_compile: bool,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Build runtime with configured threads
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(run_server(args))
}

async fn run_server(args: Args) -> Result<()> {
    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    // Initialize Prometheus metrics exporter
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    info!("Starting sphere viewer");

    let mut config = ViewerConfig::load(&args.config)?;
    if args.public_url.is_some() {
        config.public_url = args.public_url.clone();
    }

    if !args.no_compile {
        compile_catalog(args.static_dir.clone()).await;
    }

    let state = Arc::new(AppState::new(&config, &args.static_dir)?);
    let app = build_router(state, prometheus_handle);

    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", args.listen))?;

    info!("Sphere viewer listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server failed")?;

    Ok(())
}

/// Rebuild `spheres.geojson` from the panorama directory.
///
/// A failed compile leaves the previous catalog in place.
async fn compile_catalog(static_dir: PathBuf) {
    let layout = CatalogLayout::under(&static_dir);
    let result =
        tokio::task::spawn_blocking(move || sphere_catalog::compile(&layout, &ExifReader)).await;

    match result {
        Ok(Ok(report)) => info!(
            spheres = report.written,
            skipped = report.skipped.len(),
            "Sphere catalog ready"
        ),
        Ok(Err(e)) => error!(error = %e, "Failed to compile sphere catalog"),
        Err(e) => error!(error = %e, "Sphere catalog task panicked"),
    }
}
