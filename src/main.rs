//! battery-catalog - Battery storefront catalog query service
//!
//! Serves the catalog API or runs catalog queries from the command line.

use anyhow::Result;
use battery_catalog::commands::{
    self, FacetsCommand, ListCommand, ProductCommand, RecommendCommand,
};
use battery_catalog::config::{Config, OutputFormat};
use battery_catalog::facets::Facet;
use battery_catalog::query::QueryParams;
use battery_catalog::server;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "battery-catalog",
    version,
    about = "Battery storefront catalog query service",
    long_about = "Filter, sort, and paginate a battery catalog from the command line, or serve it as a JSON API."
)]
struct Cli {
    /// Catalog location (JSON file path or http(s) URL)
    #[arg(long, global = true, env = "CATALOG_SOURCE")]
    catalog: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products with filters, sorting, and pagination
    #[command(alias = "ls")]
    List {
        /// Case-insensitive search in name, description, and tags
        #[arg(short, long)]
        term: Option<String>,

        /// Exact category
        #[arg(long)]
        category: Option<String>,

        /// Exact brand
        #[arg(long)]
        brand: Option<String>,

        /// Exact capacity
        #[arg(long)]
        capacity: Option<String>,

        /// Minimum price (inclusive)
        #[arg(long)]
        min_price: Option<String>,

        /// Maximum price (inclusive)
        #[arg(long)]
        max_price: Option<String>,

        /// Sort order: priceAsc, priceDesc, ratingDesc, newest
        #[arg(short, long)]
        sort_by: Option<String>,

        /// Page number (1-based)
        #[arg(short, long)]
        page: Option<String>,

        /// Products per page
        #[arg(long)]
        page_size: Option<String>,
    },

    /// Look up products by slug
    #[command(alias = "p")]
    Product {
        /// Slug(s) to look up
        #[arg(required = true)]
        slugs: Vec<String>,
    },

    /// List distinct values of a facet (category, brand, capacity)
    Facets {
        /// Facet field
        field: Facet,
    },

    /// Show products related to a slug
    Recommend {
        /// Product slug
        slug: String,

        /// Maximum number of products
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Run the HTTP API server
    Serve {
        /// Address to bind
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(catalog) = cli.catalog {
        config.source = catalog;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    match cli.command {
        Commands::List {
            term,
            category,
            brand,
            capacity,
            min_price,
            max_price,
            sort_by,
            page,
            page_size,
        } => {
            let params = QueryParams {
                term,
                category,
                brand,
                capacity,
                min_price,
                max_price,
                sort_by,
                page,
                page_size,
            };

            let cmd = ListCommand::new(config);
            let output = cmd.execute(&params).await?;
            println!("{}", output);
        }

        Commands::Product { slugs } => {
            let cmd = ProductCommand::new(config);

            let output = if slugs.len() == 1 {
                cmd.execute(&slugs[0]).await?
            } else {
                cmd.execute_batch(&slugs).await?
            };

            println!("{}", output);
        }

        Commands::Facets { field } => {
            let cmd = FacetsCommand::new(config);
            let output = cmd.execute(field).await?;
            println!("{}", output);
        }

        Commands::Recommend { slug, limit } => {
            if let Some(limit) = limit {
                config.recommendation_limit = limit;
            }

            let cmd = RecommendCommand::new(config);
            let output = cmd.execute(&slug).await?;
            println!("{}", output);
        }

        Commands::Serve { bind, port } => {
            if let Some(bind) = bind {
                config.bind = bind;
            }
            if let Some(port) = port {
                config.port = port;
            }

            let source = commands::open_source(&config)?;
            server::serve(&config, source).await?;
        }
    }

    Ok(())
}
