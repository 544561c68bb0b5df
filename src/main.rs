use cafe_site::{
    AppState, HttpCredentialVerifier, InMemoryRepository, RepositoryState, SiteContent,
    StaticCredentialVerifier, VerifierState,
    carousel::Autoplay,
    config::{AppConfig, Env},
    create_router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Loads configuration, initialises logging, builds the catalogs and state,
/// starts the featured-slide autoplay and serves HTTP until shutdown.
#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cafe_site=debug,tower_http=info".into());

    // Pretty output locally, JSON for log aggregation in production.
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

    let content = SiteContent::seeded().expect("FATAL: shipped catalog data failed validation");
    tracing::info!(
        menu = content.menu.len(),
        gallery = content.gallery.len(),
        blog = content.blog.len(),
        "catalogs loaded"
    );

    let verifier: VerifierState = match &config.auth_backend_url {
        Some(url) => {
            tracing::info!(%url, "verifying credentials against remote auth backend");
            Arc::new(HttpCredentialVerifier::new(url.clone()))
        }
        None => {
            tracing::warn!("using the static demo credential pair for admin login");
            Arc::new(StaticCredentialVerifier::new(
                config.admin_email.clone(),
                config.admin_password.clone(),
            ))
        }
    };

    let repo =
        Arc::new(InMemoryRepository::with_capacity(config.inquiry_capacity)) as RepositoryState;
    let bind_addr = config.bind_addr.clone();
    let autoplay_interval = config.autoplay_interval;

    let app_state = AppState::new(config, content, repo, verifier)
        .expect("FATAL: home carousel has no slides");

    // Held for the life of the server; dropping it cancels the timer.
    let autoplay = Autoplay::spawn(app_state.featured.clone(), autoplay_interval);

    let app = create_router(app_state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .expect("FATAL: could not bind HTTP listener. Check BIND_ADDR.");

    tracing::info!("Listening on {}", bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at /swagger-ui");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server exited with error");
    }

    autoplay.stop();
    tracing::info!("shutdown complete");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler, run until killed rather than exiting at once.
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
