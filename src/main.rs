use bridge_tvl::{api, config::Config, db::init_db, Registry, ReportController, ReportStore, Repository};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let registry = match Registry::from_path(&config.registry_path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to load registry: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        projects = registry.projects.len(),
        bridges = registry.bridge_count(),
        tokens = registry.tokens.len(),
        "Registry loaded"
    );

    let pool = match init_db(&config.database_path).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    let store: Arc<dyn ReportStore> = Arc::new(Repository::new(pool));
    let controller = Arc::new(ReportController::new(
        store,
        Arc::new(registry),
        config.tolerance(),
    ));

    let app = api::create_router(api::AppState::new(controller));

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!(granularity = %config.granularity, "Server listening on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
