use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Read-only catalog access, the contact form and the login flow. None of
/// these need a session.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness check for load balancers.
        .route("/health", get(|| async { "ok" }))
        // GET /api/menu?category=...
        .route("/api/menu", get(handlers::get_menu))
        // GET /api/menu/categories
        // Category bar with per-category counts.
        .route("/api/menu/categories", get(handlers::get_menu_categories))
        // GET /api/gallery?category=...
        .route("/api/gallery", get(handlers::get_gallery))
        // GET /api/blog?category=...
        // Matches against post tags, ignoring case.
        .route("/api/blog", get(handlers::get_blog))
        // GET /api/blog/{slug}
        .route("/api/blog/{slug}", get(handlers::get_blog_post))
        // GET /api/blog/{slug}/related
        .route("/api/blog/{slug}/related", get(handlers::get_related_posts))
        // GET /api/featured
        // Current home carousel slide.
        .route("/api/featured", get(handlers::get_featured))
        // POST /api/inquiries
        // Contact form intake. Validates, then records after the configured delay.
        .route("/api/inquiries", post(handlers::submit_inquiry))
        // POST /api/auth/login, GET /api/auth/verify, POST /api/auth/logout
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/verify", get(handlers::verify_session))
        .route("/api/auth/logout", post(handlers::logout))
}
