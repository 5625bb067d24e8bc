//! Output formatting for products, result pages, and facet lists
//! (table, JSON, markdown, CSV).

use crate::catalog::Product;
use crate::config::OutputFormat;
use crate::facets::Facet;
use crate::query::QueryResult;

/// Formats catalog data for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single product.
    pub fn format_product(&self, product: &Product) -> String {
        match self.format {
            OutputFormat::Json => self.json(product, "{}"),
            OutputFormat::Table => self.table_single(product),
            OutputFormat::Markdown => self.markdown_single(product),
            OutputFormat::Csv => self.csv_products(std::slice::from_ref(product)),
        }
    }

    /// Formats multiple products.
    pub fn format_products(&self, products: &[Product]) -> String {
        if products.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json(products, "[]"),
            OutputFormat::Table => {
                let mut out = self.table_products(products);
                out.push_str(&format!("\n\nTotal: {} products", products.len()));
                out
            }
            OutputFormat::Markdown => {
                let mut out = self.markdown_products(products);
                out.push_str(&format!("\n\n*{} products found*", products.len()));
                out
            }
            OutputFormat::Csv => self.csv_products(products),
        }
    }

    /// Formats one page of query results with its pagination footer.
    pub fn format_page(&self, result: &QueryResult) -> String {
        let footer = format!(
            "Page {} of {} ({} matching products)",
            result.page, result.page_count, result.total
        );

        match self.format {
            OutputFormat::Json => self.json(result, "{}"),
            OutputFormat::Csv => self.csv_products(&result.items),
            OutputFormat::Table if result.is_empty() => format!("No products found.\n\n{}", footer),
            OutputFormat::Table => format!("{}\n\n{}", self.table_products(&result.items), footer),
            OutputFormat::Markdown if result.is_empty() => {
                format!("No products found.\n\n*{}*", footer)
            }
            OutputFormat::Markdown => {
                format!("{}\n\n*{}*", self.markdown_products(&result.items), footer)
            }
        }
    }

    /// Formats a facet value list (sentinel included).
    pub fn format_facets(&self, facet: Facet, values: &[String]) -> String {
        match self.format {
            OutputFormat::Json => self.json(values, "[]"),
            OutputFormat::Csv => {
                let mut lines = vec![facet.to_string()];
                lines.extend(values.iter().map(|v| Self::csv_escape(v)));
                lines.join("\n")
            }
            OutputFormat::Markdown => {
                let mut lines = vec![format!("### {}", facet)];
                lines.push(String::new());
                lines.extend(values.iter().map(|v| format!("- {}", v)));
                lines.join("\n")
            }
            OutputFormat::Table => {
                let mut lines = vec![facet.to_string(), format!("{:-<24}", "")];
                lines.extend(values.iter().cloned());
                lines.join("\n")
            }
        }
    }

    // JSON formatting

    fn json<T: serde::Serialize + ?Sized>(&self, value: &T, fallback: &str) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| fallback.to_string())
    }

    // Table formatting

    fn table_single(&self, product: &Product) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Slug:     {}", product.slug));
        lines.push(format!("Name:     {}", product.name));
        lines.push(format!("Category: {}", product.category));
        lines.push(format!("Brand:    {}", product.brand));

        if !product.capacity.is_empty() {
            lines.push(format!("Capacity: {}", product.capacity));
        }

        lines.push(format!("Price:    {:.2}", product.price));

        if product.rating > 0.0 {
            lines.push(format!("Rating:   {:.1}/5", product.rating));
        } else {
            lines.push("Rating:   N/A".to_string());
        }

        lines.push(format!(
            "Stock:    {}",
            if product.in_stock() {
                format!("{} in stock", product.stock)
            } else {
                "Out of Stock".to_string()
            }
        ));

        if let Some(created_at) = product.created_at {
            lines.push(format!("Listed:   {}", created_at.format("%Y-%m-%d")));
        }

        if !product.tags.is_empty() {
            lines.push(format!("Tags:     {}", product.tags.join(", ")));
        }

        let summary = product.short_description.as_deref().unwrap_or(&product.description);
        if !summary.is_empty() {
            lines.push(String::new());
            lines.push(summary.to_string());
        }

        lines.join("\n")
    }

    fn table_products(&self, products: &[Product]) -> String {
        let slug_width = 28;
        let price_width = 10;
        let rating_width = 6;
        let brand_width = 12;
        let name_width = 40;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<slug_width$}  {:<price_width$}  {:<rating_width$}  {:<brand_width$}  {}",
            "Slug", "Price", "Rating", "Brand", "Name"
        ));
        lines.push(
            [slug_width, price_width, rating_width, brand_width, name_width]
                .iter()
                .map(|width| "-".repeat(*width))
                .collect::<Vec<_>>()
                .join("  "),
        );

        for product in products {
            let rating_str = if product.rating > 0.0 {
                format!("{:.1}", product.rating)
            } else {
                "N/A".to_string()
            };

            lines.push(format!(
                "{:<slug_width$}  {:>price_width$.2}  {:>rating_width$}  {:<brand_width$}  {}",
                truncate(&product.slug, slug_width),
                product.price,
                rating_str,
                truncate(&product.brand, brand_width),
                truncate(&product.name, name_width)
            ));
        }

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_single(&self, product: &Product) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", product.name));
        lines.push(String::new());

        lines.push(format!("- **Slug:** {}", product.slug));
        lines.push(format!("- **Category:** {}", product.category));
        lines.push(format!("- **Brand:** {}", product.brand));
        if !product.capacity.is_empty() {
            lines.push(format!("- **Capacity:** {}", product.capacity));
        }
        lines.push(format!("- **Price:** {:.2}", product.price));
        if product.rating > 0.0 {
            lines.push(format!("- **Rating:** {:.1}/5", product.rating));
        }
        lines.push(format!(
            "- **Availability:** {}",
            if product.in_stock() { "In Stock" } else { "Out of Stock" }
        ));

        if !product.description.is_empty() {
            lines.push(String::new());
            lines.push(product.description.clone());
        }

        lines.join("\n")
    }

    fn markdown_products(&self, products: &[Product]) -> String {
        let mut lines = Vec::new();

        lines.push("| Slug | Price | Rating | Brand | Name |".to_string());
        lines.push("|------|-------|--------|-------|------|".to_string());

        for product in products {
            let rating_str =
                if product.rating > 0.0 { format!("{:.1}", product.rating) } else { String::new() };

            lines.push(format!(
                "| {} | {:.2} | {} | {} | {} |",
                product.slug,
                product.price,
                rating_str,
                product.brand,
                truncate(&product.name, 40)
            ));
        }

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "slug,name,category,brand,capacity,price,rating,stock,created_at,tags".to_string()
    }

    fn csv_products(&self, products: &[Product]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for product in products {
            let created_at = product.created_at.map(|d| d.to_rfc3339()).unwrap_or_default();

            lines.push(format!(
                "{},{},{},{},{},{},{},{},{},{}",
                Self::csv_escape(&product.slug),
                Self::csv_escape(&product.name),
                Self::csv_escape(&product.category),
                Self::csv_escape(&product.brand),
                Self::csv_escape(&product.capacity),
                product.price,
                product.rating,
                product.stock,
                created_at,
                Self::csv_escape(&product.tags.join(";"))
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

/// Shortens `s` to `width` characters, marking the cut with "...".
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let kept: String = s.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}
