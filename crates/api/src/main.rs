use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use griot_api::config::ServerConfig;
use griot_api::router::build_app_router;
use griot_api::state::AppState;
use griot_gateway::{FedapayClient, GatewayConfig, PaymentGateway};
use griot_ledger::{AccessGate, EntitlementLedger, PaymentReconciler};
use griot_storage::{StorageClient, StorageConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Configuration loaded");

    // --- Postgres ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = griot_db::create_pool(&database_url)
        .await
        .expect("Could not open a Postgres connection pool");

    griot_db::health_check(&pool)
        .await
        .expect("Postgres did not answer the startup health check");

    griot_db::run_migrations(&pool)
        .await
        .expect("Schema migrations failed");
    tracing::info!("Postgres pool ready, schema migrated");

    // --- Payment gateway ---
    let gateway_config = GatewayConfig::from_env();
    let webhook_secret = gateway_config.webhook_secret.clone();
    let gateway: Arc<dyn PaymentGateway> = Arc::new(FedapayClient::new(&gateway_config));
    tracing::info!(
        environment = %gateway_config.environment,
        "Payment gateway client ready"
    );

    // --- Object storage ---
    let storage_config = StorageConfig::from_env();
    let storage = StorageClient::new(&storage_config);
    tracing::info!(bucket = %storage_config.audio_bucket, "Storage client ready");

    // --- Domain services ---
    let ledger = EntitlementLedger::with_grant_listens(pool.clone(), config.listens_per_purchase);
    let reconciler = PaymentReconciler::new(pool.clone(), ledger.clone());
    let gate = AccessGate::new(
        pool.clone(),
        ledger,
        storage_config.audio_bucket.clone(),
        storage_config.play_url_ttl_secs,
    );

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        gateway,
        storage,
        reconciler,
        gate,
        webhook_secret,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Serve ---
    let addr = SocketAddr::new(config.host.parse().expect("HOST is not an IP address"), config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Could not bind the listen address");
    tracing::info!(%addr, "Accepting connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Shutdown complete");
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "griot_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Resolve once the process has been asked to stop.
///
/// Listens for SIGINT and, on Unix, SIGTERM, so an interactive Ctrl-C and
/// a supervisor's stop request both drain in-flight requests before exit.
async fn shutdown_signal() {
    let interrupt = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Could not install the Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Could not install the SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => tracing::info!("SIGINT received, draining"),
        () = terminate => tracing::info!("SIGTERM received, draining"),
    }
}
