use anyhow::Context;

use qarzdaftar_api::app::app;
use qarzdaftar_api::config;
use qarzdaftar_api::database::TenantRegistry;
use qarzdaftar_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting QarzDaftar API in {:?} mode", config.environment);

    let registry = TenantRegistry::from_env().context("constructing tenant registry")?;
    // Create the system database and its schema before accepting requests.
    registry
        .system_pool()
        .await
        .context("bootstrapping system database")?;

    let state = AppState::new(registry);
    let app = app(state.clone());

    // Allow tests or deployments to override port via env
    let port = std::env::var("QARZ_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    println!("🚀 QarzDaftar API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server")?;

    state.registry.close_all().await;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
