use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use nutrisim_api::RestApi;
use nutrisim_core::Dataset;
use nutrisim_similarity::{Recommender, RecommenderConfig, ScalingScope, DEFAULT_TOP_K};

/// Recommends nutritionally similar foods over HTTP
#[derive(Parser, Debug)]
#[command(name = "nutrisim")]
#[command(about = "Nutritionally similar food recommendations", long_about = None)]
struct Args {
    /// Path to the food dataset (CSV)
    #[arg(short, long, env = "NUTRISIM_DATA_FILE", default_value = "./data/foods.csv")]
    data_file: PathBuf,

    /// Address to bind the HTTP API to
    #[arg(long, env = "NUTRISIM_HOST", default_value = "0.0.0.0")]
    host: String,

    /// HTTP API port
    #[arg(long, env = "NUTRISIM_HTTP_PORT", default_value_t = 5000)]
    http_port: u16,

    /// Number of recommendations per request
    #[arg(long, env = "NUTRISIM_TOP_K", default_value_t = DEFAULT_TOP_K)]
    top_k: usize,

    /// Vectors the min-max scaler is fitted on: "query" or "pool"
    #[arg(long, env = "NUTRISIM_SCALING", default_value_t = ScalingScope::Query)]
    scaling: ScalingScope,

    /// Log level
    #[arg(long, env = "NUTRISIM_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    anyhow::ensure!(args.top_k >= 1, "--top-k must be at least 1");

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting NutriSim v{}", env!("CARGO_PKG_VERSION"));
    info!("Data file: {:?}", args.data_file);
    info!("Top-k: {}, scaling: {}", args.top_k, args.scaling);

    let dataset = Arc::new(Dataset::from_csv_path(&args.data_file)?);
    let config = RecommenderConfig {
        top_k: args.top_k,
        scaling: args.scaling,
    };
    let recommender = Arc::new(Recommender::new(dataset, config));
    info!("Dataset initialized");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        result = serve_http(recommender, args.host.clone(), args.http_port) => {
            result?;
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}

/// Runs the HTTP server on its own actix `System` thread until it stops.
async fn serve_http(recommender: Arc<Recommender>, host: String, port: u16) -> anyhow::Result<()> {
    info!("Starting HTTP server on {}:{}", host, port);
    let addr = format!("{}:{}", host, port);
    let http_handle = std::thread::spawn(move || {
        let sys = actix_web::rt::System::new();
        sys.block_on(RestApi::start(recommender, host, port))
    });

    match tokio::task::spawn_blocking(move || http_handle.join()).await? {
        Ok(result) => result.with_context(|| format!("HTTP server on {} failed", addr)),
        Err(_) => anyhow::bail!("HTTP server thread panicked"),
    }
}
