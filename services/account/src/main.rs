use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use account::{
    config::ServiceConfig,
    database::run_migrations,
    repositories::{PgTransactionRunner, TransactionRunner},
    routes,
    service::AccountService,
    state::AppState,
    usecases::{AccountInteractor, SessionInteractor},
};
use common::database::{health_check, init_pool};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting account service");

    let config = ServiceConfig::from_env()?;

    // Initialize database connection pool
    let pool = init_pool(&config.database).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    run_migrations(&pool).await?;

    let store: Arc<dyn TransactionRunner> = Arc::new(PgTransactionRunner::new(pool));
    let app_state = AppState {
        store: store.clone(),
        account_usecase: Arc::new(AccountInteractor::new(store.clone(), AccountService::new())),
        session_usecase: Arc::new(SessionInteractor::new(store)),
    };

    info!("Account service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let address = config.server.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Account service listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
