use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
};
use std::sync::{Arc, Mutex};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Client-state components.
pub mod carousel;
pub mod catalog;
pub mod session;
pub mod site;

// Content, persistence and the HTTP surface.
pub mod auth;
pub mod config;
pub mod contact;
pub mod content;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;

// Routing segregation (Public, Admin).
pub mod routes;
use auth::AuthSession;
use routes::{admin, public};

// --- Public Re-exports ---

pub use carousel::{Carousel, CarouselError, SharedCarousel};
pub use config::AppConfig;
pub use contact::InquiryService;
pub use content::SiteContent;
pub use error::ApiError;
pub use repository::{InMemoryRepository, RepositoryState};
pub use session::{CredentialVerifier, HttpCredentialVerifier, StaticCredentialVerifier};

use models::{FeaturedSlide, Slide};

/// ApiDoc
///
/// Aggregates every `#[utoipa::path]` handler and wire schema into the
/// OpenAPI document served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::get_menu, handlers::get_menu_categories, handlers::get_gallery,
        handlers::get_blog, handlers::get_blog_post, handlers::get_related_posts,
        handlers::get_featured,
        handlers::submit_inquiry, handlers::login, handlers::verify_session,
        handlers::logout, handlers::get_admin_stats, handlers::get_admin_menu,
        handlers::get_admin_gallery, handlers::get_admin_blog, handlers::get_inquiries,
        handlers::update_inquiry_status, handlers::advance_featured,
        handlers::select_featured
    ),
    components(
        schemas(
            models::MenuItem, models::GalleryImage, models::BlogPost, models::Slide,
            models::FeaturedSlide, models::AdminDashboardStats, models::AdvanceRequest,
            models::SelectSlideRequest, models::ErrorBody, catalog::CategoryCount,
            contact::ContactForm, contact::ContactInquiry, contact::InquirySubject,
            contact::InquiryStatus,
            contact::StatusUpdate, contact::FieldError, session::Session, session::User,
            session::Role, session::Credentials, carousel::Direction,
        )
    ),
    tags(
        (name = "cafe-site", description = "De Globe Café site API")
    )
)]
struct ApiDoc;

/// The shared credential verifier handle.
pub type VerifierState = Arc<dyn CredentialVerifier>;

/// AppState
///
/// Single, cloneable container of everything handlers need.
#[derive(Clone)]
pub struct AppState {
    /// Read-only catalogs built at startup.
    pub content: Arc<SiteContent>,
    /// Contact inquiry intake and triage.
    pub inquiries: InquiryService,
    /// Credential authority behind the login endpoint.
    pub verifier: VerifierState,
    /// Home page carousel, advanced by autoplay and by admins.
    pub featured: SharedCarousel<Slide>,
    /// The loaded, immutable configuration.
    pub config: AppConfig,
}

impl AppState {
    /// Wires the state together. Fails only when there are no home slides.
    pub fn new(
        config: AppConfig,
        content: SiteContent,
        repo: RepositoryState,
        verifier: VerifierState,
    ) -> Result<Self, CarouselError> {
        let featured = Arc::new(Mutex::new(Carousel::new(content.slides.clone())?));
        Ok(Self {
            inquiries: InquiryService::new(repo, config.submit_delay),
            content: Arc::new(content),
            verifier,
            featured,
            config,
        })
    }

    pub fn featured_slide(&self) -> Result<FeaturedSlide, ApiError> {
        let carousel = self
            .featured
            .lock()
            .map_err(|_| ApiError::Internal("featured carousel lock poisoned".to_string()))?;
        Ok(FeaturedSlide {
            index: carousel.index(),
            total: carousel.len(),
            slide: carousel.current().clone(),
        })
    }

    pub fn with_featured(&self, f: impl FnOnce(&mut Carousel<Slide>)) -> Result<(), ApiError> {
        let mut carousel = self
            .featured
            .lock()
            .map_err(|_| ApiError::Internal("featured carousel lock poisoned".to_string()))?;
        f(&mut carousel);
        Ok(())
    }
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for VerifierState {
    fn from_ref(app_state: &AppState) -> VerifierState {
        app_state.verifier.clone()
    }
}

/// admin_guard
///
/// Route layer for the admin router. The gate is evaluated on every request;
/// anything short of an authenticated admin is redirected (303) to the login
/// screen.
async fn admin_guard(AuthSession(session): AuthSession, request: Request, next: Next) -> Response {
    if session::can_access_admin(&session) {
        return next.run(request).await;
    }
    tracing::info!(
        uri = %request.uri(),
        authenticated = session.is_authenticated(),
        "admin access denied; redirecting to login"
    );
    Redirect::to(site::ADMIN_LOGIN_PATH).into_response()
}

/// create_router
///
/// Assembles the routing tree, scoped middleware and observability layers.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public routes: no guard.
        .merge(public::public_routes())
        // Admin routes: every request passes `admin_guard` first.
        .nest(
            "/api/admin",
            admin::admin_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                admin_guard,
            )),
        )
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Request span carrying method, uri and the `x-request-id` so every log line
/// of one request correlates.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
