//! Build-tool lifecycle adapter.
//!
//! The plugin registers two lifecycle hooks with the host build tool: it
//! observes the resolved configuration to learn the final client output
//! directory, then writes the sitemap once bundling completes. The output
//! directory is plain struct state: defaulted at construction, overwritten
//! at most once by [`SitemapPlugin::config_resolved`], read once by
//! [`SitemapPlugin::close_bundle`].

use crate::{config::SitemapConfig, debug, error::Result, generator::generate_sitemap};
use std::path::{Path, PathBuf};

/// Default client output directory when the host does not report one.
pub const DEFAULT_OUT_DIR: &str = "dist/client";

/// Lifecycle phase a plugin participates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyPhase {
    /// Production builds only.
    Build,
    /// Development server sessions.
    Serve,
}

/// Resolved host-tool settings observed by the plugin.
///
/// Only the client output directory is read; everything else in the host
/// configuration is opaque to sitemap generation.
#[derive(Debug, Clone, Default)]
pub struct ResolvedBuildConfig {
    pub out_dir: Option<String>,
}

/// Sitemap plugin descriptor registered with the host build tool.
pub struct SitemapPlugin {
    config: SitemapConfig,
    out_dir: PathBuf,
}

/// Create the plugin for a sitemap configuration.
pub fn sitemap_plugin(config: SitemapConfig) -> SitemapPlugin {
    SitemapPlugin {
        config,
        out_dir: DEFAULT_OUT_DIR.into(),
    }
}

impl SitemapPlugin {
    /// Plugin name reported to the host.
    pub const NAME: &'static str = "sitemapper";

    /// The plugin only participates in production builds.
    pub fn apply(&self) -> ApplyPhase {
        ApplyPhase::Build
    }

    /// Capture the final client output directory.
    ///
    /// Directories that do not end in `client` belong to a different
    /// bundle target and leave the default in place.
    pub fn config_resolved(&mut self, resolved: &ResolvedBuildConfig) {
        if let Some(dir) = resolved.out_dir.as_deref()
            && dir.ends_with("client")
        {
            debug!("sitemap"; "output directory resolved to {dir}");
            self.out_dir = dir.into();
        }
    }

    /// Generate the sitemap after the bundle is written.
    pub async fn close_bundle(&self) -> Result<()> {
        generate_sitemap(&self.config, &self.out_dir).await
    }

    /// Output directory the sitemap will be written into.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}
