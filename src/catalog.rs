use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;
use utoipa::ToSchema;

/// The filter-selector sentinel. Never stored on an entity.
pub const ALL: &str = "all";

/// Tagged
///
/// Anything that belongs to a category-partitioned catalog. Menu items carry
/// a single category, blog posts carry several free-form tags.
pub trait Tagged {
    fn tags(&self) -> Vec<&str>;

    fn has_tag(&self, category: &str) -> bool {
        self.tags().iter().any(|tag| tag.eq_ignore_ascii_case(category))
    }
}

/// Selection
///
/// The single active category a page filters by.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Category(String),
}

impl Selection {
    /// Interprets a raw query value. Absent, blank and `"all"` (any case) select everything.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Selection::All,
            Some(value) if value.eq_ignore_ascii_case(ALL) => Selection::All,
            Some(value) => Selection::Category(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Selection::All => ALL,
            Selection::Category(category) => category,
        }
    }
}

/// filter
///
/// Returns the entities matching `selection`, preserving their original order.
/// `All` returns the input unchanged. Tag comparison ignores ASCII case.
pub fn filter<T: Tagged + Clone>(entities: &[T], selection: &Selection) -> Vec<T> {
    match selection {
        Selection::All => entities.to_vec(),
        Selection::Category(category) => entities
            .iter()
            .filter(|entity| entity.has_tag(category))
            .cloned()
            .collect(),
    }
}

/// Searchable
///
/// Free-text fields the admin search box matches against.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;

    /// Case-insensitive substring match on any field. A blank query matches everything.
    fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        needle.is_empty()
            || self
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// search
///
/// `filter` narrowed further by a text query. Both conditions must hold and
/// source order is preserved.
pub fn search<T: Tagged + Searchable + Clone>(
    entities: &[T],
    selection: &Selection,
    query: &str,
) -> Vec<T> {
    filter(entities, selection)
        .into_iter()
        .filter(|entity| entity.matches_query(query))
        .collect()
}

/// Category
///
/// One entry of a catalog's fixed category set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
}

/// CategorySet
///
/// The enumerated categories a catalog type allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySet(pub &'static [Category]);

impl CategorySet {
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|category| category.id.eq_ignore_ascii_case(tag))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.0.iter()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("entity {0} has no tags")]
    UntaggedEntity(String),
    #[error("entity {id} has no tag from the allowed categories (tags: {tags:?})")]
    UnknownCategory { id: String, tags: Vec<String> },
    #[error("entity {0} is tagged with the reserved selector \"all\"")]
    ReservedCategory(String),
}

/// Identified
///
/// Entities expose a stable identifier so validation errors can name them.
pub trait Identified {
    fn id(&self) -> &str;
}

/// Catalog
///
/// A validated, read-only list of entities. Built once from static data and
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    categories: CategorySet,
    items: Vec<T>,
}

impl<T: Tagged + Identified + Clone> Catalog<T> {
    /// Validates that every entity carries at least one allowed tag and none
    /// carries the `"all"` sentinel.
    pub fn new(categories: CategorySet, items: Vec<T>) -> Result<Self, CatalogError> {
        for item in &items {
            let tags = item.tags();
            if tags.is_empty() {
                return Err(CatalogError::UntaggedEntity(item.id().to_string()));
            }
            if tags.iter().any(|tag| tag.eq_ignore_ascii_case(ALL)) {
                return Err(CatalogError::ReservedCategory(item.id().to_string()));
            }
            if !tags.iter().any(|tag| categories.contains(tag)) {
                return Err(CatalogError::UnknownCategory {
                    id: item.id().to_string(),
                    tags: tags.iter().map(|tag| tag.to_string()).collect(),
                });
            }
        }
        Ok(Self { categories, items })
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn categories(&self) -> CategorySet {
        self.categories
    }

    pub fn view(&self, selection: &Selection) -> CatalogView<T> {
        CatalogView {
            items: filter(&self.items, selection),
            selection: selection.as_str().to_string(),
            query: None,
            total: self.items.len(),
        }
    }

    /// Like `view`, additionally matching `query` against the searchable text.
    /// A blank or absent query behaves exactly like `view`.
    pub fn search(&self, selection: &Selection, query: Option<&str>) -> CatalogView<T>
    where
        T: Searchable,
    {
        let query = query.map(str::trim).filter(|q| !q.is_empty());
        CatalogView {
            items: search(&self.items, selection, query.unwrap_or_default()),
            selection: selection.as_str().to_string(),
            query: query.map(str::to_string),
            total: self.items.len(),
        }
    }

    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<&T> {
        self.items.iter().find(|item| predicate(item))
    }

    /// Entity counts per category, led by an `all` row covering the whole catalog.
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        let mut counts = vec![CategoryCount {
            id: ALL.to_string(),
            name: "All".to_string(),
            count: self.items.len(),
        }];
        counts.extend(self.categories.iter().map(|category| CategoryCount {
            id: category.id.to_string(),
            name: category.name.to_string(),
            count: self.items.iter().filter(|item| item.has_tag(category.id)).count(),
        }));
        counts
    }
}

/// CatalogView
///
/// A filtered slice of a catalog. `total` is the size of the source catalog so
/// the client can tell "no match" apart from "nothing loaded".
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct CatalogView<T> {
    pub items: Vec<T>,
    pub selection: String,
    #[ts(optional)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub total: usize,
}

impl<T> CatalogView<T> {
    /// True when the filter matched nothing in a non-empty catalog.
    pub fn is_empty_state(&self) -> bool {
        self.items.is_empty() && self.total > 0
    }
}

/// CategoryCount
///
/// One row of the category bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct CategoryCount {
    pub id: String,
    pub name: String,
    pub count: usize,
}
