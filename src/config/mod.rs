//! Sitemap configuration.
//!
//! A [`SitemapConfig`] is supplied once, at plugin construction, and stays
//! immutable for the whole generation call. It can be built in code or
//! loaded from a TOML file:
//!
//! ```toml
//! site_url = "https://example.com"
//! default_priority = 0.5
//! default_change_freq = "weekly"
//! minify = false
//!
//! [routes]
//! "/" = { priority = 1.0 }
//! "/about" = { last_modified = "2025-01-15" }
//! "/posts" = [
//!     { path = "/posts/hello" },
//!     { path = "/posts/world", change_frequency = "daily" },
//! ]
//! ```
//!
//! TOML cannot express an explicit skip (there is no null); omit the route
//! instead, or add [`RouteValue::Skip`] in code. Dynamic routes are
//! likewise code-only: load the static table, then push resolvers onto
//! [`SitemapConfig::routes`].

pub mod route;

pub use route::{
    ChangeFreq, Lastmod, ResolvedRoute, RouteEntry, RouteFuture, RouteResolver, RouteValue,
    Routes, SitemapFields,
};

use crate::error::{Result, SitemapError};
use serde::Deserialize;
use std::{fs, path::Path};
use url::Url;

// ============================================================================
// Sitemap Configuration
// ============================================================================

/// Configuration for one sitemap.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Absolute site URL, prepended verbatim to every route path.
    /// No slash normalization takes place at the join point.
    pub site_url: String,

    /// Route table driving entry generation.
    pub routes: Routes,

    /// Priority for entries that do not set one (or set zero).
    pub default_priority: f32,

    /// Change frequency for entries that do not set one.
    pub default_change_freq: ChangeFreq,

    /// Strip insignificant whitespace from the generated XML.
    pub minify: bool,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            site_url: String::new(),
            routes: Routes::new(),
            default_priority: 0.5,
            default_change_freq: ChangeFreq::Weekly,
            minify: false,
        }
    }
}

impl SitemapConfig {
    /// Create a configuration for `site_url` with an empty route table.
    pub fn new(site_url: impl Into<String>) -> Self {
        Self {
            site_url: site_url.into(),
            ..Self::default()
        }
    }

    /// Replace the route table, returning `self` for chaining.
    pub fn routes(mut self, routes: Routes) -> Self {
        self.routes = routes;
        self
    }

    /// Load configuration from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| SitemapError::Io(path.to_path_buf(), err))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML content.
    ///
    /// File-sourced configurations are validated eagerly: `site_url` must
    /// parse as an absolute URL. Programmatic construction performs no
    /// validation; malformed route values surface at generation time.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate_site_url()?;
        Ok(config)
    }

    fn validate_site_url(&self) -> Result<()> {
        Url::parse(&self.site_url).map_err(|source| SitemapError::InvalidSiteUrl {
            url: self.site_url.clone(),
            source,
        })?;
        Ok(())
    }
}
