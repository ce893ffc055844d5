use clap::Parser;
use pawmatch_api::{AppState, Authenticator, RestApi, TokenAuthenticator};
use pawmatch_core::ReportStore;
use pawmatch_similarity::{ExtractorHandle, MatchEngine, MatchPolicy};
use pawmatch_storage::{import_reports, FsImageStore, LmdbReportStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Candidate matching for lost and found dog reports
#[derive(Parser, Debug)]
#[command(name = "pawmatch")]
#[command(about = "Proposes matches between lost and found dog reports", long_about = None)]
struct Args {
    /// Path to the report database directory
    #[arg(short, long, default_value = "./data")]
    data_dir: PathBuf,

    /// Directory report image paths are resolved against
    #[arg(long, default_value = "./images")]
    image_root: PathBuf,

    /// HTTP API port
    #[arg(long, default_value_t = 8080)]
    http_port: u16,

    /// ONNX model for the visual feature extractor (requires the `onnx` feature)
    #[arg(long)]
    model: Option<PathBuf>,

    /// JSON object mapping bearer tokens to user ids
    #[arg(long)]
    tokens: Option<PathBuf>,

    /// JSON array of reports to import at startup
    #[arg(long)]
    seed: Option<PathBuf>,

    /// JSON match policy overriding the default gates
    #[arg(long)]
    policy: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

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

    info!("Starting pawmatch v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {:?}", args.data_dir);
    info!("Image root: {:?}", args.image_root);
    info!("HTTP API port: {}", args.http_port);

    let reports: Arc<dyn ReportStore> = Arc::new(LmdbReportStore::new(args.data_dir.join("lmdb"))?);
    info!("Report store initialized");

    if let Some(seed) = &args.seed {
        import_reports(reports.as_ref(), seed)?;
    }

    let auth: Arc<dyn Authenticator> = match &args.tokens {
        Some(path) => {
            let auth = TokenAuthenticator::from_file(path)?;
            info!("Loaded {} bearer tokens", auth.len());
            Arc::new(auth)
        }
        None => {
            warn!("No token file given; every request will be rejected as unauthorized");
            Arc::new(TokenAuthenticator::default())
        }
    };

    let policy = match &args.policy {
        Some(path) => serde_json::from_slice::<MatchPolicy>(&std::fs::read(path)?)?,
        None => MatchPolicy::default(),
    };

    let extractor = ExtractorHandle::new();
    load_extractor(&extractor, args.model.clone());

    let engine = MatchEngine::new(
        reports,
        Arc::new(FsImageStore::new(&args.image_root)),
        extractor,
        policy,
    )?;
    let state = Arc::new(AppState::new(engine, auth));

    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(state, http_port).await {
                error!("HTTP server error: {}", e);
            }
        })
    });

    info!("pawmatch started successfully");
    info!("HTTP API: http://localhost:{}/", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}

/// Load the model off the main task; matching answers 503 until it is installed
#[cfg(feature = "onnx")]
fn load_extractor(handle: &ExtractorHandle, model: Option<PathBuf>) {
    let Some(path) = model else {
        warn!("No --model given; matching stays unavailable");
        return;
    };
    let handle = handle.clone();
    tokio::task::spawn_blocking(move || {
        match pawmatch_similarity::OnnxExtractor::load(&path) {
            Ok(extractor) => {
                handle.install(Arc::new(extractor));
                info!("Visual feature extractor ready: {:?}", path);
            }
            Err(e) => error!("Failed to load visual feature extractor: {:#}", e),
        }
    });
}

#[cfg(not(feature = "onnx"))]
fn load_extractor(_handle: &ExtractorHandle, model: Option<PathBuf>) {
    if model.is_some() {
        warn!("Built without the `onnx` feature; --model is ignored");
    }
    warn!("No visual feature extractor available; matching stays unavailable");
}
