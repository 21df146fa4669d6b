//! ImageVault Server — self-hosted image organization service.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use vault_core::config::AppConfig;
use vault_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("IMAGEVAULT_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting ImageVault v{}", env!("CARGO_PKG_VERSION"));

    // Database connection + migrations
    let db = vault_database::connection::DatabasePool::connect(&config.database).await?;
    vault_database::migration::run_migrations(db.pool()).await?;

    // Asset store
    let asset_store = vault_storage::build_asset_store(&config.asset_store).await?;

    // Repositories
    let user_repo: Arc<dyn vault_database::repositories::UserRepository> = Arc::new(
        vault_database::repositories::PgUserRepository::new(db.pool().clone()),
    );
    let folder_repo: Arc<dyn vault_database::repositories::FolderRepository> = Arc::new(
        vault_database::repositories::PgFolderRepository::new(db.pool().clone()),
    );
    let image_repo: Arc<dyn vault_database::repositories::ImageRepository> = Arc::new(
        vault_database::repositories::PgImageRepository::new(db.pool().clone()),
    );

    // Auth
    let password_hasher = vault_auth::password::hasher::PasswordHasher::new();
    let password_validator = vault_auth::password::validator::PasswordValidator::new(&config.auth);
    let jwt_encoder = vault_auth::jwt::encoder::JwtEncoder::new(&config.auth);
    let jwt_decoder = Arc::new(vault_auth::jwt::decoder::JwtDecoder::new(&config.auth));

    // Services
    let user_service = Arc::new(vault_service::user::service::UserService::new(
        Arc::clone(&user_repo),
        password_hasher,
        password_validator,
        jwt_encoder,
    ));
    let folder_service = Arc::new(vault_service::folder::service::FolderService::new(
        Arc::clone(&folder_repo),
        config.references.clone(),
    ));
    let image_service = Arc::new(vault_service::image::service::ImageService::new(
        Arc::clone(&image_repo),
        Arc::clone(&folder_repo),
        Arc::clone(&asset_store),
        config.references.clone(),
    ));

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let app_state = vault_api::state::AppState {
        config: Arc::new(config),
        db,
        asset_store,
        jwt_decoder,
        user_service,
        folder_service,
        image_service,
    };

    let app = vault_api::router::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("ImageVault server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("ImageVault server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
