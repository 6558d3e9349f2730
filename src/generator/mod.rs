//! Sitemap generation.
//!
//! Converts the route table into `<out_dir>/sitemap.xml`:
//!
//! - **flatten**: expand the route table into ordered entries, resolving
//!   dynamic routes sequentially
//! - **stream**: serialize entries as sitemap 0.9 XML
//!
//! Flattening errors abort generation and surface to the caller. Write
//! failures do not: they are logged and swallowed, so a broken disk never
//! fails the surrounding build.

pub mod flatten;
pub mod stream;

pub use flatten::{SitemapEntry, flatten_routes};
pub use stream::SitemapStream;

use crate::{config::SitemapConfig, debug, error::Result, log};
use anyhow::Context;
use std::{borrow::Cow, fs, path::Path, time::Instant};

/// Output file name inside the resolved output directory.
pub const SITEMAP_FILE: &str = "sitemap.xml";

/// Generate `sitemap.xml` under `out_dir`.
///
/// Relative directories resolve against the process working directory.
/// Returns an error only for flattening failures; see the module docs for
/// the write-failure contract.
pub async fn generate_sitemap(config: &SitemapConfig, out_dir: impl AsRef<Path>) -> Result<()> {
    log!("sitemap"; "generating...");
    let start = Instant::now();

    let entries = flatten_routes(config).await?;
    debug!("sitemap"; "flattened {} routes into {} entries", config.routes.len(), entries.len());

    match write_sitemap(config, &entries, out_dir.as_ref()) {
        Ok(()) => {
            log!("sitemap"; "{} entries in {:.2}s", entries.len(), start.elapsed().as_secs_f64());
        }
        Err(err) => {
            log!("error"; "sitemap write failed: {err:#}");
        }
    }

    Ok(())
}

/// Serialize and write all entries. Failures here are reported to the
/// caller for logging only.
fn write_sitemap(
    config: &SitemapConfig,
    entries: &[SitemapEntry],
    out_dir: &Path,
) -> anyhow::Result<()> {
    let mut stream = SitemapStream::new(&config.site_url)?;
    for entry in entries {
        stream.write(entry)?;
    }
    let xml = stream.end()?;
    let xml = minify_xml(&xml, config.minify);

    let path = out_dir.join(SITEMAP_FILE);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, &*xml)
        .with_context(|| format!("Failed to write sitemap to {}", path.display()))?;

    Ok(())
}

/// Minify XML content if enabled.
pub fn minify_xml(content: &[u8], enabled: bool) -> Cow<'_, [u8]> {
    if enabled {
        let xml_str = std::str::from_utf8(content).unwrap_or("");
        let minified = xml_str
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("");
        Cow::Owned(minified.into_bytes())
    } else {
        Cow::Borrowed(content)
    }
}
