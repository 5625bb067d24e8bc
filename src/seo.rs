//! Page metadata for search engines (title, description, canonical URL,
//! schema.org structured data).

use crate::catalog::Product;
use serde::Serialize;
use serde_json::{json, Value};

/// Storefront identity used in generated metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    /// Store name, appended to page titles
    pub name: String,
    /// ISO currency code for offers
    pub currency: String,
}

impl Default for Site {
    fn default() -> Self {
        Self { name: "BatteryHub".to_string(), currency: "INR".to_string() }
    }
}

/// Metadata attached to a page response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMeta {
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    pub structured_data: Value,
}

impl Site {
    /// Metadata for the full listing page.
    pub fn listing(&self, base_url: &str) -> SeoMeta {
        SeoMeta {
            title: format!("{} - Shop High-Quality Batteries", self.name),
            description: "Explore our wide range of batteries for cars, bikes, inverters, and home UPS systems. Find top brands like Amaron, Exide, and Livguard.".to_string(),
            canonical_url: format!("{}/batteries", base_url),
            structured_data: json!({
                "@context": "https://schema.org",
                "@type": "CollectionPage",
                "name": format!("{} Batteries", self.name),
                "description": "Browse our collection of high-quality batteries for various applications.",
            }),
        }
    }

    /// Metadata for a search results page.
    pub fn search(&self, base_url: &str, term: Option<&str>) -> SeoMeta {
        let (title, for_term, matching, canonical_url) = match term {
            Some(term) => (
                format!("Search Results for \"{}\" - {}", term, self.name),
                format!(" for \"{}\"", term),
                format!(" matching \"{}\"", term),
                format!("{}/search?q={}", base_url, urlencoding::encode(term)),
            ),
            None => (
                format!("Search Batteries - {}", self.name),
                String::new(),
                String::new(),
                format!("{}/search", base_url),
            ),
        };

        SeoMeta {
            title,
            description: format!(
                "Find the best batteries matching your search{}. Filter by category, brand, and price to get the perfect battery.",
                for_term
            ),
            canonical_url,
            structured_data: json!({
                "@context": "https://schema.org",
                "@type": "SearchResultsPage",
                "name": match term {
                    Some(term) => format!("Battery Search for {}", term),
                    None => "Battery Search".to_string(),
                },
                "description":
                    format!("Search results for batteries{} on {}.", matching, self.name),
            }),
        }
    }

    /// Metadata for a product page. Catalog-supplied overrides win.
    pub fn product(&self, base_url: &str, product: &Product) -> SeoMeta {
        let title = product
            .meta_title
            .clone()
            .unwrap_or_else(|| format!("{} - {}", product.name, self.name));

        let description = product.meta_description.clone().unwrap_or_else(|| {
            format!(
                "Buy {} from {}. High-quality {} battery from {}.",
                product.name, self.name, product.category, product.brand
            )
        });

        let structured_data =
            product.structured_data.clone().unwrap_or_else(|| self.product_schema(product));

        SeoMeta {
            title,
            description,
            canonical_url: format!("{}/product/{}", base_url, product.slug),
            structured_data,
        }
    }

    fn product_schema(&self, product: &Product) -> Value {
        let availability = if product.in_stock() {
            "https://schema.org/InStock"
        } else {
            "https://schema.org/OutOfStock"
        };

        let mut schema = json!({
            "@context": "https://schema.org",
            "@type": "Product",
            "name": product.name,
            "image": product.image,
            "description": product.description,
            "brand": { "@type": "Brand", "name": product.brand },
            "offers": {
                "@type": "Offer",
                "price": product.price,
                "priceCurrency": self.currency,
                "availability": availability,
            },
        });

        if product.rating > 0.0 {
            schema["aggregateRating"] = json!({
                "@type": "AggregateRating",
                "ratingValue": product.rating,
                "reviewCount": 1,
            });
        }

        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:5000";

    fn make_product() -> Product {
        let mut product =
            Product::new("amaron-din44", "Amaron DIN44", "Car Batteries", "Amaron", 4899.0);
        product.description = "Maintenance-free".to_string();
        product.rating = 4.6;
        product.stock = 3;
        product
    }

    #[test]
    fn test_listing() {
        let seo = Site::default().listing(BASE);
        assert_eq!(seo.title, "BatteryHub - Shop High-Quality Batteries");
        assert_eq!(seo.canonical_url, "http://localhost:5000/batteries");
        assert_eq!(seo.structured_data["@type"], "CollectionPage");
    }

    #[test]
    fn test_search_with_term() {
        let seo = Site::default().search(BASE, Some("car battery"));
        assert_eq!(seo.title, "Search Results for \"car battery\" - BatteryHub");
        assert_eq!(seo.canonical_url, "http://localhost:5000/search?q=car%20battery");
        assert!(seo.description.contains("for \"car battery\""));
        assert_eq!(seo.structured_data["name"], "Battery Search for car battery");
    }

    #[test]
    fn test_search_without_term() {
        let seo = Site::default().search(BASE, None);
        assert_eq!(seo.title, "Search Batteries - BatteryHub");
        assert_eq!(seo.canonical_url, "http://localhost:5000/search");
        assert_eq!(seo.structured_data["name"], "Battery Search");
    }

    #[test]
    fn test_product_generated_schema() {
        let seo = Site::default().product(BASE, &make_product());
        assert_eq!(seo.title, "Amaron DIN44 - BatteryHub");
        assert_eq!(seo.canonical_url, "http://localhost:5000/product/amaron-din44");
        assert!(seo.description.contains("Car Batteries battery from Amaron"));

        let schema = &seo.structured_data;
        assert_eq!(schema["@type"], "Product");
        assert_eq!(schema["offers"]["priceCurrency"], "INR");
        assert_eq!(schema["offers"]["availability"], "https://schema.org/InStock");
        assert_eq!(schema["aggregateRating"]["reviewCount"], 1);
    }

    #[test]
    fn test_product_out_of_stock_unrated() {
        let mut product = make_product();
        product.stock = 0;
        product.rating = 0.0;

        let seo = Site::default().product(BASE, &product);
        assert_eq!(seo.structured_data["offers"]["availability"], "https://schema.org/OutOfStock");
        assert!(seo.structured_data.get("aggregateRating").is_none());
    }

    #[test]
    fn test_product_overrides() {
        let mut product = make_product();
        product.meta_title = Some("Custom Title".to_string());
        product.meta_description = Some("Custom description".to_string());
        product.structured_data = Some(json!({ "@type": "Product", "sku": "DIN44" }));

        let seo = Site::default().product(BASE, &product);
        assert_eq!(seo.title, "Custom Title");
        assert_eq!(seo.description, "Custom description");
        assert_eq!(seo.structured_data["sku"], "DIN44");
    }

    #[test]
    fn test_custom_site() {
        let site = Site { name: "VoltMart".to_string(), currency: "USD".to_string() };
        let seo = site.product(BASE, &make_product());
        assert_eq!(seo.title, "Amaron DIN44 - VoltMart");
        assert_eq!(seo.structured_data["offers"]["priceCurrency"], "USD");
    }
}
