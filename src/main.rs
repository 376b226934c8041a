use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use shiftgrid::api::{self, AppState};
use shiftgrid::config::EngineConfig;
use shiftgrid::db::DbPool;
use shiftgrid::forecasting::SalesModel;
use shiftgrid::provider::WeatherProvider;

#[derive(Parser, Debug)]
#[command(version, about = "Shiftgrid workforce scheduling engine", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to the TOML config file.
    #[arg(short, long, global = true, default_value = "shiftgrid.toml")]
    config: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server (default).
    Serve,
    /// Run pending database migrations and exit.
    Migrate,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    match args.command {
        Some(Command::Migrate) => run_migrate(&args.config).await,
        Some(Command::Serve) | None => run_server(&args.config).await,
    }
}

fn init_tracing(observability: &shiftgrid::config::ObservabilityConfig) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(observability.log_level.clone()));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if observability.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

fn load_config(path: &PathBuf) -> EngineConfig {
    match EngineConfig::from_file(path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load config from {}: {err}", path.display());
            std::process::exit(1);
        }
    }
}

async fn run_migrate(config_path: &PathBuf) {
    let config = load_config(config_path);
    init_tracing(&config.observability);

    let db = DbPool::from_config(&config.database)
        .await
        .expect("failed to connect to database / run migrations");
    drop(db);
    tracing::info!("Migrations applied");
}

async fn run_server(config_path: &PathBuf) {
    let config = load_config(config_path);
    init_tracing(&config.observability);

    tracing::info!(config_file = %config_path.display(), "Starting shiftgrid");

    let db = DbPool::from_config(&config.database)
        .await
        .expect("Failed to initialize database pool");

    let http_client = reqwest::Client::builder()
        .build()
        .expect("Failed to build HTTP client");
    let weather = Arc::new(WeatherProvider::new(http_client, config.weather.clone()));

    let model = Arc::new(
        SalesModel::load(&config.forecasting.model_path)
            .expect("Failed to load sales forecasting model artifact"),
    );

    let state = AppState {
        db,
        weather,
        model,
        solver: config.solver.clone(),
    };

    let app = api::router(state);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
