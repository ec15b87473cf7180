use anyhow::Context;
use dotenvy::dotenv;
use rollcall::logging::init_tracing;
use rollcall::router::init_router;
use rollcall::state::AppState;
use rollcall_config::{CorsConfig, JwtConfig, ServerConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_tracing()?;

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = rollcall_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    rollcall_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let state = AppState::new(pool, JwtConfig::from_env(), CorsConfig::from_env());
    let app = init_router(state);

    let server_config = ServerConfig::from_env();
    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!(address = %address, "Server running");
    info!("Swagger UI available at /swagger-ui, Scalar UI at /scalar");

    axum::serve(listener, app).await?;

    Ok(())
}
