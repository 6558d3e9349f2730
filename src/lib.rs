//! Build-time sitemap generation from declarative route maps.
//!
//! Given a mapping of route paths to sitemap metadata (static values,
//! lists of per-path values, or async resolvers producing either), this
//! crate writes a standards-compliant `sitemap.xml` once the host build
//! tool finishes bundling.
//!
//! Two entry points:
//!
//! - [`sitemap_plugin`]: a plugin descriptor wired into the host tool's
//!   lifecycle (`config_resolved` to observe the output directory,
//!   `close_bundle` to generate after bundling)
//! - [`generate_sitemap`]: direct invocation outside any lifecycle
//!
//! # Example
//!
//! ```ignore
//! use sitemapper::{Routes, RouteValue, SitemapConfig, SitemapFields, sitemap_plugin};
//!
//! let config = SitemapConfig::new("https://example.com").routes(
//!     Routes::new()
//!         .route("/", RouteValue::Entry(SitemapFields::new().priority(1.0)))
//!         .route("/drafts", RouteValue::Skip)
//!         .route("/posts", RouteValue::dynamic(|_route| async move {
//!             Ok(vec![/* one RouteEntry per post */])
//!         })),
//! );
//!
//! let mut plugin = sitemap_plugin(config);
//! // host tool drives: plugin.config_resolved(&resolved);
//! //                   plugin.close_bundle().await?;
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod logger;
pub mod plugin;
pub mod utils;

// Re-export commonly used types
pub use config::{
    ChangeFreq, Lastmod, ResolvedRoute, RouteEntry, RouteValue, Routes, SitemapConfig,
    SitemapFields,
};
pub use error::{Result, SitemapError};
pub use generator::{SitemapEntry, generate_sitemap};
pub use plugin::{ApplyPhase, ResolvedBuildConfig, SitemapPlugin, sitemap_plugin};
