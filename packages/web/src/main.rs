use dioxus::prelude::*;

use domain::Platform;

fn main() {
    #[cfg(feature = "server")]
    {
        match tokio::runtime::Runtime::new() {
            Ok(runtime) => {
                if let Err(e) = runtime.block_on(launch_server()) {
                    tracing::error!("Server stopped: {e}");
                    std::process::exit(1);
                }
            }
            Err(e) => {
                eprintln!("Failed to start the tokio runtime: {e}");
                std::process::exit(1);
            }
        }
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() -> Result<(), Box<dyn std::error::Error>> {
    use axum::extract::DefaultBodyLimit;
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use std::time::Duration;
    use tower_http::services::ServeDir;
    use tower_sessions::cookie::SameSite;
    use tower_sessions::{Expiry, SessionManagerLayer};
    use tower_sessions_sqlx_store::PostgresStore;
    use tracing_subscriber::EnvFilter;

    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init()
        .ok();

    let config = api::config::ServerConfig::load()?;
    tracing::info!(
        "Storage at {} served under {}",
        config.storage_dir.display(),
        config.public_storage_url
    );

    let pool = api::db::get_pool().await?;

    sqlx::migrate!("../api/migrations").run(pool).await?;

    let session_store = PostgresStore::new(pool.clone());
    session_store.migrate().await?;

    api::bootstrap_admin(pool, config).await?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(config.session_secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(
            Duration::from_secs(60 * 60 * 24 * 7).try_into()?,
        )); // 7 days

    tokio::fs::create_dir_all(&config.storage_dir).await?;

    let mut router = axum::Router::new();
    // Uploaded files, unless they are served from another origin
    let storage_path = config.public_storage_url.trim_end_matches('/');
    if storage_path.starts_with('/') && storage_path.len() > 1 {
        router = router.nest_service(storage_path, ServeDir::new(&config.storage_dir));
    }
    let router = router
        .serve_dioxus_application(ServeConfig::new(), App)
        .layer(DefaultBodyLimit::max(domain::storage::MAX_UPLOAD_BODY_BYTES))
        .layer(session_layer);

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}

#[component]
fn App() -> Element {
    rsx! {
        ui::PortalApp { platform: Platform::Web }
    }
}
