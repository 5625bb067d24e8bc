//! battery-catalog - Battery storefront catalog query service
//!
//! Filters, sorts, and paginates a product catalog loaded fresh on every
//! request, and serves it over a JSON API or prints it from the command line.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod facets;
pub mod filters;
pub mod format;
pub mod query;
pub mod seo;
pub mod server;

pub use catalog::{CatalogError, CatalogSource, Product};
pub use config::Config;
pub use facets::{distinct_values, Facet};
pub use query::{find_by_slug, QueryError, QueryParams, QueryResult, QuerySpec, SortKey};
