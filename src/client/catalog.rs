//! Fallback catalog and image path resolution.

use crate::model::Product;
use crate::uploads::UPLOADS_ROUTE;

/// The five products shown when the catalog cannot be loaded or is empty.
pub fn sample_products() -> Vec<Product> {
    let sample = |id, name: &str, description: &str, price, stock, image: &str| Product {
        id,
        name: name.to_string(),
        description: Some(description.to_string()),
        price,
        stock,
        image: Some(image.to_string()),
    };

    vec![
        sample(
            1,
            "Pink Hairband",
            "Soft, stylish, and perfect for any occasion.",
            199.0,
            10,
            "/samples/pink-hairband.jpeg",
        ),
        sample(
            2,
            "Elegant Hijab",
            "Lightweight, premium fabric, beautiful drape.",
            349.0,
            8,
            "/samples/elegant-hijab.jpeg",
        ),
        sample(
            3,
            "Colorful Beads Set",
            "Vibrant beads for creative jewelry making.",
            149.0,
            15,
            "/samples/beads-set.jpeg",
        ),
        sample(
            4,
            "Trendy Ketcher",
            "Trendy hair ketcher for a secure hold.",
            99.0,
            20,
            "/samples/trendy-ketcher.jpeg",
        ),
        sample(
            5,
            "Chic Rings Set",
            "Set of 5 chic rings for every mood.",
            299.0,
            12,
            "/samples/chic-rings.jpeg",
        ),
    ]
}

/// Where the client should load a product image from.
///
/// Absolute URLs and root-relative paths pass through; bare filenames are
/// uploads served by the API.
pub fn resolve_image_src(api_base: &str, image: Option<&str>) -> Option<String> {
    let image = image.filter(|i| !i.is_empty())?;

    if image.starts_with("http://") || image.starts_with("https://") || image.starts_with('/') {
        return Some(image.to_string());
    }

    Some(format!(
        "{}{}/{}",
        api_base.trim_end_matches('/'),
        UPLOADS_ROUTE,
        image
    ))
}
