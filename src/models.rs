use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::carousel::Direction;
use crate::catalog::{CatalogView, CategoryCount, Identified, Searchable, Tagged};

// --- Catalog Entities ---

/// MenuItem
///
/// One dish or drink on the public menu. `category` is one of the menu
/// category ids (e.g. `tea-coffee`, `momos`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    // Price in whole rupees.
    pub price: u32,
    pub image: String,
    pub category: String,
    pub is_best_seller: bool,
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allergens: Vec<String>,
}

/// GalleryImage
///
/// A photo in the gallery grid and lightbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct GalleryImage {
    pub id: String,
    pub url: String,
    pub caption: String,
    pub alt: String,
    pub category: String,
}

/// BlogPost
///
/// A published article. Posts are filtered by their free-form `tags`, and
/// addressed individually by `slug`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub featured_image: String,
    pub author: String,
    #[ts(type = "string")]
    pub published_at: NaiveDate,
    pub tags: Vec<String>,
    pub read_time: String,
}

/// Slide
///
/// One entry of the home page hero carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Slide {
    pub name: String,
    pub description: String,
    pub image: String,
}

impl Tagged for MenuItem {
    fn tags(&self) -> Vec<&str> {
        vec![self.category.as_str()]
    }
}

impl Tagged for GalleryImage {
    fn tags(&self) -> Vec<&str> {
        vec![self.category.as_str()]
    }
}

impl Tagged for BlogPost {
    fn tags(&self) -> Vec<&str> {
        self.tags.iter().map(String::as_str).collect()
    }
}

impl Searchable for MenuItem {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }
}

impl Searchable for GalleryImage {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.caption.as_str(), self.alt.as_str()]
    }
}

impl Searchable for BlogPost {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.excerpt.as_str()]
    }
}

impl Identified for MenuItem {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for GalleryImage {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for BlogPost {
    fn id(&self) -> &str {
        &self.id
    }
}

// --- Request Payloads ---

/// AdvanceRequest
///
/// Input for moving the featured carousel one step (POST /api/admin/featured/advance).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct AdvanceRequest {
    pub direction: Direction,
}

/// SelectSlideRequest
///
/// Input for pinning the featured carousel to a slide (PUT /api/admin/featured).
/// Out-of-range indices are clamped to the last slide.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct SelectSlideRequest {
    pub index: usize,
}

// --- Output Schemas ---

/// FeaturedSlide
///
/// The slide currently shown by the home page carousel, with its position.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct FeaturedSlide {
    pub index: usize,
    pub total: usize,
    pub slide: Slide,
}

/// AdminDashboardStats
///
/// Output schema for the admin dashboard (GET /api/admin/stats).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct AdminDashboardStats {
    pub menu_items: usize,
    pub gallery_images: usize,
    pub blog_posts: usize,
    pub total_inquiries: usize,
    /// Inquiries still in the `new` state.
    pub new_inquiries: usize,
}

/// AdminCatalog
///
/// Output schema for the admin catalog screens: the searched view plus the
/// per-category counters shown above the table.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct AdminCatalog<T> {
    pub view: CatalogView<T>,
    pub counts: Vec<CategoryCount>,
}

/// ErrorBody
///
/// JSON body carried by every non-2xx API response.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<crate::contact::FieldError>,
}
