use innosistemas_web::{
    AppState,
    config::{AppConfig, Env},
    create_router,
    repository::{InMemoryTeamRepository, RepositoryState},
};
use std::{process::ExitCode, sync::Arc};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Loads configuration, installs logging, builds the team store and serves the
/// guarded pages.
#[tokio::main]
async fn main() -> ExitCode {
    // 1. Configuration (fail-fast)
    dotenv::dotenv().ok();
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("FATAL: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // 2. Logging: RUST_LOG wins, otherwise crate debug + request traces.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "innosistemas_web=debug,tower_http=info".into());

    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 3. Team store, seeded with the sample catalog.
    let repo = Arc::new(InMemoryTeamRepository::seeded()) as RepositoryState;

    // 4. Router and server
    let bind_addr = config.bind_addr;
    let app = create_router(AppState::new(repo, config));

    let listener = match TcpListener::bind(bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%bind_addr, error = %e, "failed to bind listener");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Listening on {}", bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at: http://{}/api/swagger-ui", bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server terminated");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
