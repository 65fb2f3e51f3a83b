use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use palp_api::config::ServerConfig;
use palp_api::router::build_app_router;
use palp_api::session::SessionStore;
use palp_api::state::{AppState, Services};
use palp_external::box_files::BoxClient;
use palp_external::google::GoogleClient;
use palp_external::linked_data::LinkedDataClient;
use palp_external::luna::LunaClient;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "palp_api=debug,palp_external=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = palp_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    palp_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    palp_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Thumbnail cache ---
    tokio::fs::create_dir_all(&config.thumbnail_dir)
        .await
        .expect("Failed to create thumbnail directory");

    // --- External services ---
    let google = Arc::new(
        GoogleClient::from_key_file(&config.google_service_account_file)
            .expect("Failed to load Google service account"),
    );
    tracing::info!(account = %google.service_account_email(), "Google client ready");

    let box_client =
        BoxClient::from_config_file(&config.box_config_file).expect("Failed to load Box config");
    let luna = LunaClient::new(config.luna_base_url.clone()).expect("Failed to build Luna client");
    let linked_data = LinkedDataClient::new().expect("Failed to build linked-data client");

    let services = Services {
        sheets: google.clone(),
        drive: google.clone(),
        translator: google,
        files: Arc::new(box_client),
        catalog: Arc::new(luna),
        linked_data: Arc::new(linked_data),
    };

    // --- App state ---
    let sessions = Arc::new(SessionStore::new(chrono::Duration::minutes(
        config.jwt.expiry_mins,
    )));
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        sessions: Arc::clone(&sessions),
        services,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    let open_sessions = sessions.len().await;
    tracing::info!(open_sessions, "Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
