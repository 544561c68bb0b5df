use chrono::NaiveDate;

use crate::catalog::{Catalog, CatalogError, Category, CategorySet};
use crate::models::{BlogPost, GalleryImage, MenuItem, Slide};

// --- Category Sets ---

#[rustfmt::skip]
pub const MENU_CATEGORIES: CategorySet = CategorySet(&[
    Category { id: "tea-coffee", name: "Tea / Coffee" },
    Category { id: "snacks", name: "Snacks" },
    Category { id: "burgers", name: "Burgers" },
    Category { id: "maggi", name: "Maggi" },
    Category { id: "soup", name: "Soup" },
    Category { id: "fried-rice", name: "Fried Rice" },
    Category { id: "momos", name: "Momos" },
    Category { id: "chinese-veg", name: "Chinese Starters (Veg)" },
    Category { id: "chinese-nonveg", name: "Chinese Starters (Non-Veg)" },
]);

#[rustfmt::skip]
pub const GALLERY_CATEGORIES: CategorySet = CategorySet(&[
    Category { id: "coffee", name: "Coffee" },
    Category { id: "food", name: "Food" },
    Category { id: "desserts", name: "Desserts" },
    Category { id: "tea", name: "Tea" },
    Category { id: "ambiance", name: "Ambiance" },
]);

#[rustfmt::skip]
pub const BLOG_CATEGORIES: CategorySet = CategorySet(&[
    Category { id: "coffee", name: "Coffee" },
    Category { id: "menu", name: "Menu" },
    Category { id: "culture", name: "Culture" },
    Category { id: "sustainability", name: "Sustainability" },
]);

/// SiteContent
///
/// Every catalog the public pages render. Built once at startup and shared
/// read-only for the life of the process.
#[derive(Debug, Clone)]
pub struct SiteContent {
    pub menu: Catalog<MenuItem>,
    pub gallery: Catalog<GalleryImage>,
    pub blog: Catalog<BlogPost>,
    pub slides: Vec<Slide>,
}

impl SiteContent {
    /// Builds the shipped catalogs, running them through the same validation
    /// any other catalog gets.
    pub fn seeded() -> Result<Self, CatalogError> {
        Ok(Self {
            menu: Catalog::new(MENU_CATEGORIES, menu_items())?,
            gallery: Catalog::new(GALLERY_CATEGORIES, gallery_images())?,
            blog: Catalog::new(BLOG_CATEGORIES, blog_posts())?,
            slides: home_slides(),
        })
    }

    pub fn post_by_slug(&self, slug: &str) -> Option<&BlogPost> {
        self.blog.find(|post| post.slug == slug)
    }

    /// Up to `limit` other posts, in catalog order, to show under `slug`.
    pub fn related_posts(&self, slug: &str, limit: usize) -> Vec<BlogPost> {
        self.blog
            .items()
            .iter()
            .filter(|post| post.slug != slug)
            .take(limit)
            .cloned()
            .collect()
    }
}

const PEXELS: &str = "https://images.pexels.com/photos";

fn pexels(photo: u32, width: u32) -> String {
    format!("{PEXELS}/{photo}/pexels-photo-{photo}.jpeg?auto=compress&cs=tinysrgb&w={width}")
}

fn menu_items() -> Vec<MenuItem> {
    // (name, description, price, photo, category, best seller)
    #[rustfmt::skip]
    let rows: [(&str, &str, u32, u32, &str, bool); 29] = [
        ("Special Coffee", "Handmade coffee, brewed with passion. Rich aromas and smooth flavors.", 120, 312418, "tea-coffee", true),
        ("Masala Chai", "Traditional Indian tea with aromatic spices.", 60, 1638280, "tea-coffee", true),
        ("Black Coffee", "Pure, strong coffee for the true coffee enthusiast.", 100, 434213, "tea-coffee", false),
        ("Green Tea", "Refreshing and healthy green tea.", 80, 1417945, "tea-coffee", false),
        ("Aloo Samosa", "Crispy golden samosas filled with spicy mashed potatoes and peas.", 60, 5560763, "snacks", true),
        ("Chicken Samosa", "Flaky pastry stuffed with spiced minced chicken.", 80, 5560763, "snacks", true),
        ("French Fries", "Crispy golden fries, perfectly seasoned and served hot.", 120, 1893556, "snacks", false),
        ("Bread Pakora", "Spiced bread fritters, crispy outside and soft inside.", 90, 4958792, "snacks", false),
        ("Aloo Burger", "Crispy potato patty with fresh vegetables and tangy sauces.", 120, 1639562, "burgers", true),
        ("Chicken Burger", "Juicy chicken patty with lettuce, tomato, and special sauce.", 180, 2282532, "burgers", true),
        ("Veg Burger", "Fresh vegetable patty with crisp lettuce and tangy mayo.", 100, 1639562, "burgers", false),
        ("Plain Maggi", "The classic instant Maggi noodles.", 80, 4518617, "maggi", true),
        ("Cheese Veg Maggi", "Maggi loaded with melted cheese and fresh veggies.", 120, 4518617, "maggi", true),
        ("Chicken Chilli Garlic Maggi", "Spicy, garlicky Maggi tossed with tender chicken.", 150, 4518617, "maggi", false),
        ("Veg Soup", "A light yet flavorful vegetable soup.", 100, 539451, "soup", true),
        ("Chicken Soup", "Hearty chicken soup with aromatic herbs.", 140, 539451, "soup", false),
        ("Tomato Soup", "Classic tomato soup with fresh herbs and cream.", 90, 539451, "soup", false),
        ("Veg Fried Rice", "Basmati rice stir-fried with fresh vegetables and spices.", 150, 2664216, "fried-rice", true),
        ("Chicken Fried Rice", "Fried rice with tender chicken and mixed vegetables.", 180, 2664216, "fried-rice", true),
        ("Egg Fried Rice", "Classic fried rice with scrambled eggs and soy sauce.", 140, 2664216, "fried-rice", false),
        ("Veg Momos (8 Pcs)", "Steamed dumplings filled with fresh vegetables.", 120, 5419336, "momos", true),
        ("Chicken Momos (8 Pcs)", "Juicy chicken-filled steamed dumplings.", 150, 5419336, "momos", true),
        ("Fried Momos (8 Pcs)", "Crispy fried momos served with spicy chutney.", 140, 5419336, "momos", false),
        ("Veg Chilli Garlic Noodles", "Spicy noodles tossed with vegetables and garlic.", 140, 1279330, "chinese-veg", true),
        ("Veg Manchurian", "Vegetable balls in tangy Manchurian sauce.", 160, 4518848, "chinese-veg", false),
        ("Chilli Paneer", "Cottage cheese cubes in spicy Indo-Chinese sauce.", 180, 4518848, "chinese-veg", true),
        ("Chicken Chilli Garlic Noodles", "Garlicky noodles tossed with tender chicken.", 180, 1279330, "chinese-nonveg", true),
        ("Chicken Manchurian", "Tender chicken in savory Manchurian sauce.", 200, 4518848, "chinese-nonveg", true),
        ("Chicken Chilli", "Chicken stir-fried with bell peppers and onions.", 190, 4518848, "chinese-nonveg", false),
    ];

    rows.iter()
        .enumerate()
        .map(|(i, &(name, description, price, photo, category, best))| MenuItem {
            id: (i + 1).to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price,
            image: pexels(photo, 400),
            category: category.to_string(),
            is_best_seller: best,
            is_available: true,
            allergens: Vec::new(),
        })
        .collect()
}

fn gallery_images() -> Vec<GalleryImage> {
    #[rustfmt::skip]
    let rows: [(u32, &str, &str); 9] = [
        (302899, "Signature Espresso", "coffee"),
        (312418, "Artisan Cappuccino", "coffee"),
        (1028714, "Fresh Pastries", "food"),
        (1603901, "Gourmet Sandwiches", "food"),
        (1059905, "Fresh Salads", "food"),
        (291528, "Delicious Desserts", "desserts"),
        (1833306, "Cozy Interior", "ambiance"),
        (1638280, "Premium Tea Selection", "tea"),
        (2253643, "Barista at Work", "ambiance"),
    ];

    rows.iter()
        .enumerate()
        .map(|(i, &(photo, caption, category))| GalleryImage {
            id: (i + 1).to_string(),
            url: pexels(photo, 800),
            caption: caption.to_string(),
            alt: caption.to_string(),
            category: category.to_string(),
        })
        .collect()
}

fn blog_posts() -> Vec<BlogPost> {
    let post = |id: &str,
                title: &str,
                slug: &str,
                excerpt: &str,
                content: &str,
                photo: u32,
                author: &str,
                (y, m, d): (i32, u32, u32),
                tags: &[&str],
                read_time: &str| BlogPost {
        id: id.to_string(),
        title: title.to_string(),
        slug: slug.to_string(),
        excerpt: excerpt.to_string(),
        content: content.trim_end().to_string(),
        featured_image: pexels(photo, 800),
        author: author.to_string(),
        published_at: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        read_time: read_time.to_string(),
    };

    vec![
        post(
            "1",
            "The Art of Perfect Espresso: A Guide for Coffee Lovers",
            "art-of-perfect-espresso",
            "Discover the secrets behind crafting the perfect espresso shot, from bean selection \
             to extraction techniques that will elevate your coffee experience.",
            include_str!("../content/blog/art-of-perfect-espresso.md"),
            312418,
            "Raj Kumar",
            (2024, 3, 15),
            &["Coffee", "Espresso", "Brewing", "Tips"],
            "5 min read",
        ),
        post(
            "2",
            "Seasonal Menu Updates: Fresh Flavors for Every Season",
            "seasonal-menu-updates",
            "Explore how we adapt our menu to celebrate the flavors of each season, bringing you \
             fresh ingredients and innovative recipes year-round.",
            include_str!("../content/blog/seasonal-menu-updates.md"),
            1028714,
            "Priya Sharma",
            (2024, 3, 10),
            &["Menu", "Seasonal", "Local", "Fresh"],
            "4 min read",
        ),
        post(
            "3",
            "Coffee Culture in Lucknow: A Growing Movement",
            "coffee-culture-lucknow",
            "Dive into the evolving coffee culture in Lucknow and how De Globe Café has been part \
             of this exciting transformation over the years.",
            include_str!("../content/blog/coffee-culture-lucknow.md"),
            2253643,
            "Amit Singh",
            (2024, 3, 5),
            &["Culture", "Lucknow", "Community", "History"],
            "6 min read",
        ),
        post(
            "4",
            "Sustainable Practices: Our Commitment to the Environment",
            "sustainable-practices",
            "Learn about our environmental initiatives and how we're working towards a more \
             sustainable future in the food and beverage industry.",
            include_str!("../content/blog/sustainable-practices.md"),
            1591373,
            "Raj Kumar",
            (2024, 2, 28),
            &["Sustainability", "Environment", "Community", "Responsibility"],
            "5 min read",
        ),
    ]
}

fn home_slides() -> Vec<Slide> {
    const UPLOADS: &str = "https://deglobecafe.in/wp-content/uploads/2025/03";
    vec![
        Slide {
            name: "Aloo Samosa".to_string(),
            description: "Crispy golden samosas filled with spicy mashed potatoes and peas."
                .to_string(),
            image: format!("{UPLOADS}/aloo-burger-high-1024x683.jpeg"),
        },
        Slide {
            name: "Chicken Samosa".to_string(),
            description: "Flaky pastry stuffed with spiced minced chicken, deep-fried to perfection."
                .to_string(),
            image: format!("{UPLOADS}/chicken_samosa_high-1024x683.jpeg"),
        },
        Slide {
            name: "Paneer Patties".to_string(),
            description: "A crunchy delight with soft, flavorful paneer stuffing.".to_string(),
            image: format!("{UPLOADS}/paneer_patties-high-1024x768.webp"),
        },
    ]
}
