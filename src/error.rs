//! Error types for configuration loading and sitemap generation.
//!
//! Flattening failures (invalid route values, resolver errors) abort the
//! whole generation call and surface here. Write failures never do: they
//! are logged and swallowed inside [`generate_sitemap`].
//!
//! [`generate_sitemap`]: crate::generator::generate_sitemap

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sitemap operations
pub type Result<T> = std::result::Result<T, SitemapError>;

/// Errors raised while loading configuration or flattening routes
#[derive(Debug, Error)]
pub enum SitemapError {
    /// A route's value has an unsupported shape (not skip, metadata,
    /// metadata list, or resolver).
    #[error("invalid route value for route: {route}")]
    InvalidRouteValue { route: String },

    /// A dynamic route's resolver returned an error.
    #[error("resolver failed for route: {route}")]
    Resolver {
        route: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("`{url}` is not an absolute site URL")]
    InvalidSiteUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
