//! Streaming sitemap XML serialization.
//!
//! [`SitemapStream`] emits the sitemap 0.9 schema one entry at a time:
//! constructed with the site hostname, fed entries through
//! [`SitemapStream::write`], finalized by [`SitemapStream::end`] which
//! yields the XML bytes.
//!
//! # Output
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2025-01-15T00:00:00Z</lastmod>
//!     <changefreq>weekly</changefreq>
//!     <priority>0.5</priority>
//!   </url>
//! </urlset>
//! ```

use super::SitemapEntry;
use anyhow::Result;
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::{borrow::Cow, io::Cursor};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Streaming `<urlset>` writer.
pub struct SitemapStream {
    hostname: String,
    writer: Writer<Cursor<Vec<u8>>>,
}

impl SitemapStream {
    /// Open a stream for `hostname` and emit the document preamble.
    pub fn new(hostname: &str) -> Result<Self> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::with_capacity(4096)), b' ', 2);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        let mut urlset = BytesStart::new("urlset");
        urlset.push_attribute(("xmlns", SITEMAP_NS));
        writer.write_event(Event::Start(urlset))?;

        Ok(Self {
            hostname: hostname.to_owned(),
            writer,
        })
    }

    /// Append one `<url>` element.
    ///
    /// `lastmod` is emitted only when present; `changefreq` and `priority`
    /// are always present on a finalized entry.
    pub fn write(&mut self, entry: &SitemapEntry) -> Result<()> {
        let loc = self.loc(&entry.url);

        self.writer.write_event(Event::Start(BytesStart::new("url")))?;
        self.text_element("loc", &loc)?;
        if let Some(lastmod) = &entry.lastmod {
            self.text_element("lastmod", lastmod)?;
        }
        self.text_element("changefreq", entry.changefreq.as_str())?;
        self.text_element("priority", &format!("{:.1}", entry.priority))?;
        self.writer.write_event(Event::End(BytesEnd::new("url")))?;

        Ok(())
    }

    /// Close the document and yield the XML bytes.
    pub fn end(mut self) -> Result<Vec<u8>> {
        self.writer.write_event(Event::End(BytesEnd::new("urlset")))?;
        Ok(self.writer.into_inner().into_inner())
    }

    /// Resolve a location against the stream hostname. Absolute URLs pass
    /// through; anything else is prefixed.
    fn loc<'a>(&self, url: &'a str) -> Cow<'a, str> {
        if url.starts_with("http://") || url.starts_with("https://") {
            Cow::Borrowed(url)
        } else {
            Cow::Owned(format!("{}{}", self.hostname, url))
        }
    }

    fn text_element(&mut self, name: &str, text: &str) -> Result<()> {
        self.writer.write_event(Event::Start(BytesStart::new(name)))?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChangeFreq;

    fn entry(url: &str) -> SitemapEntry {
        SitemapEntry {
            url: url.to_string(),
            lastmod: None,
            changefreq: ChangeFreq::Weekly,
            priority: 0.5,
        }
    }

    fn render(entries: &[SitemapEntry]) -> String {
        let mut stream = SitemapStream::new("https://example.com").unwrap();
        for e in entries {
            stream.write(e).unwrap();
        }
        String::from_utf8(stream.end().unwrap()).unwrap()
    }

    #[test]
    fn test_empty_stream() {
        let xml = render(&[]);

        assert!(xml.contains(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#)));
        assert!(xml.contains("</urlset>"));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_single_entry() {
        let mut e = entry("https://example.com/");
        e.lastmod = Some("2025-01-15T00:00:00Z".to_string());
        let xml = render(&[e]);

        assert!(xml.contains("<url>"));
        assert!(xml.contains("<loc>https://example.com/</loc>"));
        assert!(xml.contains("<lastmod>2025-01-15T00:00:00Z</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>0.5</priority>"));
        assert!(xml.contains("</url>"));
    }

    #[test]
    fn test_multiple_entries_in_write_order() {
        let xml = render(&[
            entry("https://example.com/"),
            entry("https://example.com/posts/hello"),
            entry("https://example.com/about"),
        ]);

        assert_eq!(xml.matches("<url>").count(), 3);
        let first = xml.find("/posts/hello").unwrap();
        let second = xml.find("/about").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_lastmod_omitted_when_absent() {
        let xml = render(&[entry("https://example.com/")]);
        assert!(!xml.contains("<lastmod>"));
    }

    #[test]
    fn test_escapes_special_chars() {
        let xml = render(&[entry("https://example.com/search?q=a&b=c")]);
        assert!(xml.contains("<loc>https://example.com/search?q=a&amp;b=c</loc>"));
    }

    #[test]
    fn test_relative_locations_get_hostname() {
        let xml = render(&[entry("/relative")]);
        assert!(xml.contains("<loc>https://example.com/relative</loc>"));
    }

    #[test]
    fn test_priority_formats_one_decimal() {
        let mut e = entry("https://example.com/");
        e.priority = 1.0;
        let xml = render(&[e]);
        assert!(xml.contains("<priority>1.0</priority>"));
    }

    #[test]
    fn test_xml_structure() {
        let xml = render(&[entry("https://example.com/")]);

        let lines: Vec<&str> = xml.lines().collect();
        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert!(lines[1].starts_with("<urlset"));
        assert_eq!(*lines.last().unwrap(), "</urlset>");
    }
}
