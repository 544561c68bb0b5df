use crate::{
    AppState,
    auth::{self, AuthSession},
    catalog::{CatalogView, CategoryCount, Selection},
    contact::{ContactForm, ContactInquiry, StatusUpdate},
    error::ApiError,
    models::{
        AdminCatalog, AdminDashboardStats, AdvanceRequest, BlogPost, FeaturedSlide, GalleryImage,
        MenuItem, SelectSlideRequest,
    },
    session::{Credentials, Session},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

// --- Filter Structs ---

/// CategoryFilter
///
/// Query parameters shared by the catalog listings. An absent, blank or
/// `all` category returns the whole catalog.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct CategoryFilter {
    /// Category id or tag to filter by (case-insensitive).
    pub category: Option<String>,
}

impl CategoryFilter {
    fn selection(&self) -> Selection {
        Selection::parse(self.category.as_deref())
    }
}

/// CatalogSearch
///
/// Query parameters of the admin catalog screens: the category filter plus a
/// free-text search, both applied together.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct CatalogSearch {
    /// Category id or tag to filter by (case-insensitive).
    pub category: Option<String>,
    /// Text matched against names and descriptions (case-insensitive).
    pub q: Option<String>,
}

impl CatalogSearch {
    fn selection(&self) -> Selection {
        Selection::parse(self.category.as_deref())
    }
}

/// Posts suggested under an article.
const RELATED_POSTS: usize = 2;

// --- Public Handlers ---

/// get_menu
///
/// [Public Route] Lists menu items, optionally narrowed to one category.
#[utoipa::path(
    get,
    path = "/api/menu",
    params(CategoryFilter),
    responses((status = 200, description = "Filtered menu", body = CatalogView<MenuItem>))
)]
pub async fn get_menu(
    State(state): State<AppState>,
    Query(filter): Query<CategoryFilter>,
) -> Json<CatalogView<MenuItem>> {
    Json(state.content.menu.view(&filter.selection()))
}

/// get_menu_categories
///
/// [Public Route] The menu's category bar: every category with its item count.
#[utoipa::path(
    get,
    path = "/api/menu/categories",
    responses((status = 200, description = "Category counts", body = [CategoryCount]))
)]
pub async fn get_menu_categories(State(state): State<AppState>) -> Json<Vec<CategoryCount>> {
    Json(state.content.menu.category_counts())
}

/// get_gallery
///
/// [Public Route] Lists gallery images, optionally narrowed to one category.
#[utoipa::path(
    get,
    path = "/api/gallery",
    params(CategoryFilter),
    responses((status = 200, description = "Filtered gallery", body = CatalogView<GalleryImage>))
)]
pub async fn get_gallery(
    State(state): State<AppState>,
    Query(filter): Query<CategoryFilter>,
) -> Json<CatalogView<GalleryImage>> {
    Json(state.content.gallery.view(&filter.selection()))
}

/// get_blog
///
/// [Public Route] Lists blog posts whose tags include the requested category.
#[utoipa::path(
    get,
    path = "/api/blog",
    params(CategoryFilter),
    responses((status = 200, description = "Filtered posts", body = CatalogView<BlogPost>))
)]
pub async fn get_blog(
    State(state): State<AppState>,
    Query(filter): Query<CategoryFilter>,
) -> Json<CatalogView<BlogPost>> {
    Json(state.content.blog.view(&filter.selection()))
}

/// get_blog_post
///
/// [Public Route] A single post by slug. Unknown slugs are a 404 with a JSON body.
#[utoipa::path(
    get,
    path = "/api/blog/{slug}",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Found", body = BlogPost),
        (status = 404, description = "No such post")
    )
)]
pub async fn get_blog_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPost>, ApiError> {
    state
        .content
        .post_by_slug(&slug)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("blog post '{slug}'")))
}

/// get_featured
///
/// [Public Route] The home page carousel's current slide. Autoplay moves it
/// forward on a fixed period.
#[utoipa::path(
    get,
    path = "/api/featured",
    responses((status = 200, description = "Current slide", body = FeaturedSlide))
)]
pub async fn get_featured(State(state): State<AppState>) -> Result<Json<FeaturedSlide>, ApiError> {
    state.featured_slide().map(Json)
}

/// submit_inquiry
///
/// [Public Route] Records a contact form submission after validation. All
/// field violations are reported together with a 422.
#[utoipa::path(
    post,
    path = "/api/inquiries",
    request_body = ContactForm,
    responses(
        (status = 201, description = "Recorded", body = ContactInquiry),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn submit_inquiry(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<(StatusCode, Json<ContactInquiry>), ApiError> {
    let inquiry = state.inquiries.submit(form).await?;
    Ok((StatusCode::CREATED, Json(inquiry)))
}

/// get_related_posts
///
/// [Public Route] Up to two other posts to read after `slug`, never the post itself.
#[utoipa::path(
    get,
    path = "/api/blog/{slug}/related",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Related posts", body = [BlogPost]),
        (status = 404, description = "No such post")
    )
)]
pub async fn get_related_posts(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<BlogPost>>, ApiError> {
    if state.content.post_by_slug(&slug).is_none() {
        return Err(ApiError::NotFound(format!("blog post '{slug}'")));
    }
    Ok(Json(state.content.related_posts(&slug, RELATED_POSTS)))
}

// --- Auth Handlers ---

/// login
///
/// [Public Route] One credential check, no retry. On success the response is
/// the session record the client persists, carrying a signed token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = Credentials,
    responses(
        (status = 200, description = "Logged in", body = Session),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<Session>, ApiError> {
    let grant = state.verifier.verify(&credentials).await.inspect_err(|e| {
        tracing::info!(email = %credentials.email, reason = %e, "login rejected");
    })?;

    let token = auth::issue_token(&grant.user, &state.config)?;
    tracing::info!(email = %grant.user.email, role = ?grant.user.role, "login succeeded");
    Ok(Json(Session::authenticated(grant.user, token)))
}

/// verify_session
///
/// [Public Route] Echoes the session the bearer token rehydrates to, or 401
/// when it rehydrates to logged out.
#[utoipa::path(
    get,
    path = "/api/auth/verify",
    responses(
        (status = 200, description = "Valid session", body = Session),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn verify_session(
    AuthSession(session): AuthSession,
) -> Result<Json<Session>, StatusCode> {
    if session.is_authenticated() {
        Ok(Json(session))
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

/// logout
///
/// [Public Route] Tokens are stateless, so logging out hands back the empty
/// record for the client to store. Idempotent.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 200, description = "Logged out", body = Session))
)]
pub async fn logout() -> Json<Session> {
    Json(Session::logged_out())
}

// --- Admin Handlers ---
// Every route below sits behind `admin_guard`, which has already checked
// `can_access_admin` for this request.

/// get_admin_stats
///
/// [Admin Route] Dashboard counters.
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    responses((status = 200, description = "Stats", body = AdminDashboardStats))
)]
pub async fn get_admin_stats(State(state): State<AppState>) -> Json<AdminDashboardStats> {
    let inquiries = state.inquiries.list().await;
    Json(AdminDashboardStats {
        menu_items: state.content.menu.len(),
        gallery_images: state.content.gallery.len(),
        blog_posts: state.content.blog.len(),
        total_inquiries: inquiries.len(),
        new_inquiries: inquiries
            .iter()
            .filter(|inquiry| inquiry.status == crate::contact::InquiryStatus::New)
            .count(),
    })
}

/// get_admin_menu
///
/// [Admin Route] Menu management table.
#[utoipa::path(
    get,
    path = "/api/admin/menu",
    params(CatalogSearch),
    responses((status = 200, description = "Searched menu", body = AdminCatalog<MenuItem>))
)]
pub async fn get_admin_menu(
    State(state): State<AppState>,
    Query(search): Query<CatalogSearch>,
) -> Json<AdminCatalog<MenuItem>> {
    let menu = &state.content.menu;
    Json(AdminCatalog {
        view: menu.search(&search.selection(), search.q.as_deref()),
        counts: menu.category_counts(),
    })
}

/// get_admin_gallery
///
/// [Admin Route] Gallery management grid.
#[utoipa::path(
    get,
    path = "/api/admin/gallery",
    params(CatalogSearch),
    responses((status = 200, description = "Searched gallery", body = AdminCatalog<GalleryImage>))
)]
pub async fn get_admin_gallery(
    State(state): State<AppState>,
    Query(search): Query<CatalogSearch>,
) -> Json<AdminCatalog<GalleryImage>> {
    let gallery = &state.content.gallery;
    Json(AdminCatalog {
        view: gallery.search(&search.selection(), search.q.as_deref()),
        counts: gallery.category_counts(),
    })
}

/// get_admin_blog
///
/// [Admin Route] Blog management list. Categories match post tags.
#[utoipa::path(
    get,
    path = "/api/admin/blog",
    params(CatalogSearch),
    responses((status = 200, description = "Searched posts", body = AdminCatalog<BlogPost>))
)]
pub async fn get_admin_blog(
    State(state): State<AppState>,
    Query(search): Query<CatalogSearch>,
) -> Json<AdminCatalog<BlogPost>> {
    let blog = &state.content.blog;
    Json(AdminCatalog {
        view: blog.search(&search.selection(), search.q.as_deref()),
        counts: blog.category_counts(),
    })
}

/// get_inquiries
///
/// [Admin Route] All contact inquiries, newest first.
#[utoipa::path(
    get,
    path = "/api/admin/inquiries",
    responses((status = 200, description = "Inquiries", body = [ContactInquiry]))
)]
pub async fn get_inquiries(State(state): State<AppState>) -> Json<Vec<ContactInquiry>> {
    Json(state.inquiries.list().await)
}

/// update_inquiry_status
///
/// [Admin Route] Moves an inquiry between `new`, `read` and `replied`.
#[utoipa::path(
    patch,
    path = "/api/admin/inquiries/{id}/status",
    params(("id" = Uuid, Path, description = "Inquiry ID")),
    request_body = StatusUpdate,
    responses(
        (status = 200, description = "Updated", body = ContactInquiry),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_inquiry_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<ContactInquiry>, ApiError> {
    state
        .inquiries
        .set_status(id, update.status)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("inquiry {id}")))
}

/// advance_featured
///
/// [Admin Route] Steps the featured carousel forward or back.
#[utoipa::path(
    post,
    path = "/api/admin/featured/advance",
    request_body = AdvanceRequest,
    responses((status = 200, description = "New slide", body = FeaturedSlide))
)]
pub async fn advance_featured(
    State(state): State<AppState>,
    Json(request): Json<AdvanceRequest>,
) -> Result<Json<FeaturedSlide>, ApiError> {
    state.with_featured(|carousel| {
        carousel.advance(request.direction);
    })?;
    state.featured_slide().map(Json)
}

/// select_featured
///
/// [Admin Route] Pins the featured carousel to a slide. Indices past the end
/// clamp to the last slide.
#[utoipa::path(
    put,
    path = "/api/admin/featured",
    request_body = SelectSlideRequest,
    responses((status = 200, description = "New slide", body = FeaturedSlide))
)]
pub async fn select_featured(
    State(state): State<AppState>,
    Json(request): Json<SelectSlideRequest>,
) -> Result<Json<FeaturedSlide>, ApiError> {
    state.with_featured(|carousel| {
        carousel.select_index(request.index);
    })?;
    state.featured_slide().map(Json)
}
