use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, patch, post},
};

/// Admin Router Module
///
/// Dashboard, inquiry triage and control of the featured carousel. Nested
/// under `/api/admin` behind `admin_guard`, which redirects any session that
/// is not an authenticated admin to `/admin/login`.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /api/admin/stats
        .route("/stats", get(handlers::get_admin_stats))
        // GET /api/admin/{menu,gallery,blog}?category=...&q=...
        // Catalog screens: category filter and text search combined.
        .route("/menu", get(handlers::get_admin_menu))
        .route("/gallery", get(handlers::get_admin_gallery))
        .route("/blog", get(handlers::get_admin_blog))
        // GET /api/admin/inquiries
        .route("/inquiries", get(handlers::get_inquiries))
        // PATCH /api/admin/inquiries/{id}/status
        .route(
            "/inquiries/{id}/status",
            patch(handlers::update_inquiry_status),
        )
        // PUT /api/admin/featured
        // Pins the carousel; out-of-range indices clamp.
        .route("/featured", axum::routing::put(handlers::select_featured))
        // POST /api/admin/featured/advance
        .route("/featured/advance", post(handlers::advance_featured))
}
