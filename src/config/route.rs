//! Route table types.
//!
//! A route table maps URL paths to the metadata that drives sitemap entry
//! generation. Values come in five shapes, matched exhaustively by the
//! flattener:
//!
//! | Variant                  | Effect                                        |
//! |--------------------------|-----------------------------------------------|
//! | [`RouteValue::Skip`]     | route emits nothing                           |
//! | [`RouteValue::Entry`]    | one entry, addressed by the route key         |
//! | [`RouteValue::Entries`]  | one entry per element, each at its own `path` |
//! | [`RouteValue::Dynamic`]  | async resolver, awaited at generation time    |
//! | [`RouteValue::Raw`]      | unsupported shape, fails generation           |
//!
//! `Raw` only arises from data-driven tables (JSON/TOML documents); the
//! typed constructors never produce it.

use crate::utils::date::DateTimeUtc;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::{fmt, future::Future, pin::Pin};

// ============================================================================
// Change Frequency
// ============================================================================

/// Expected change frequency of a page, per the sitemap 0.9 schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    #[default]
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Last Modified
// ============================================================================

/// Last-modification timestamp of a page.
///
/// A typed date renders as RFC 3339; a raw string passes through to the
/// sitemap verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "String")]
pub enum Lastmod {
    Date(DateTimeUtc),
    Raw(String),
}

impl Lastmod {
    /// Render the `<lastmod>` value.
    pub fn to_value(&self) -> String {
        match self {
            Self::Date(dt) => dt.to_rfc3339(),
            Self::Raw(s) => s.clone(),
        }
    }
}

impl From<String> for Lastmod {
    fn from(s: String) -> Self {
        Self::Raw(s)
    }
}

impl From<&str> for Lastmod {
    fn from(s: &str) -> Self {
        Self::Raw(s.to_string())
    }
}

impl From<DateTimeUtc> for Lastmod {
    fn from(dt: DateTimeUtc) -> Self {
        Self::Date(dt)
    }
}

// ============================================================================
// Metadata Fields
// ============================================================================

/// Per-route sitemap metadata.
///
/// Every field is optional; missing values fall back to the configuration
/// defaults when the entry is built.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SitemapFields {
    pub last_modified: Option<Lastmod>,
    pub change_frequency: Option<ChangeFreq>,
    pub priority: Option<f32>,
}

impl SitemapFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_modified(mut self, value: impl Into<Lastmod>) -> Self {
        self.last_modified = Some(value.into());
        self
    }

    pub fn change_frequency(mut self, freq: ChangeFreq) -> Self {
        self.change_frequency = Some(freq);
        self
    }

    pub fn priority(mut self, priority: f32) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// One element of a listed route.
///
/// `path` addresses the entry from the site root, replacing the route key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RouteEntry {
    pub path: String,
    #[serde(flatten)]
    pub fields: SitemapFields,
}

impl RouteEntry {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            fields: SitemapFields::default(),
        }
    }

    pub fn fields(mut self, fields: SitemapFields) -> Self {
        self.fields = fields;
        self
    }
}

// ============================================================================
// Dynamic Resolution
// ============================================================================

/// Metadata produced by a dynamic route resolver.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedRoute {
    /// One entry, addressed by the route key.
    One(SitemapFields),
    /// One entry per element, each addressed by its own `path`.
    Many(Vec<RouteEntry>),
}

impl From<SitemapFields> for ResolvedRoute {
    fn from(fields: SitemapFields) -> Self {
        Self::One(fields)
    }
}

impl From<Vec<RouteEntry>> for ResolvedRoute {
    fn from(entries: Vec<RouteEntry>) -> Self {
        Self::Many(entries)
    }
}

/// Future returned by a route resolver.
pub type RouteFuture = Pin<Box<dyn Future<Output = anyhow::Result<ResolvedRoute>> + Send>>;

/// Async callback resolving a route key to metadata.
pub type RouteResolver = Box<dyn Fn(String) -> RouteFuture + Send + Sync>;

// ============================================================================
// Route Values
// ============================================================================

/// The value associated with one route key.
pub enum RouteValue {
    /// Explicit skip: the route emits nothing.
    Skip,
    /// One entry at the route key.
    Entry(SitemapFields),
    /// One entry per element at the element's own `path`.
    Entries(Vec<RouteEntry>),
    /// Metadata resolved through an async callback at generation time.
    Dynamic(RouteResolver),
    /// A value of unsupported shape from a data-driven table; generation
    /// fails on it, naming the route.
    Raw(serde_json::Value),
}

impl RouteValue {
    /// Wrap an async callback as a dynamic route.
    ///
    /// The callback receives the route key and returns either a single
    /// [`SitemapFields`] or a `Vec<RouteEntry>`.
    ///
    /// ```ignore
    /// RouteValue::dynamic(|route| async move {
    ///     Ok(vec![RouteEntry::new(format!("{route}/1"))])
    /// })
    /// ```
    pub fn dynamic<F, Fut, R>(resolver: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
        R: Into<ResolvedRoute>,
    {
        Self::Dynamic(Box::new(move |route: String| -> RouteFuture {
            let fut = resolver(route);
            Box::pin(async move { fut.await.map(Into::into) })
        }))
    }
}

impl fmt::Debug for RouteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => f.write_str("Skip"),
            Self::Entry(fields) => f.debug_tuple("Entry").field(fields).finish(),
            Self::Entries(list) => f.debug_tuple("Entries").field(list).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
            Self::Raw(value) => f.debug_tuple("Raw").field(value).finish(),
        }
    }
}

impl From<serde_json::Value> for RouteValue {
    /// Classify an untyped value: `null` skips, objects and arrays become
    /// typed metadata, everything else (and malformed objects/arrays) is
    /// retained as [`RouteValue::Raw`] and rejected at generation.
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Skip,
            Value::Object(_) => serde_json::from_value::<SitemapFields>(value.clone())
                .map(Self::Entry)
                .unwrap_or(Self::Raw(value)),
            Value::Array(_) => serde_json::from_value::<Vec<RouteEntry>>(value.clone())
                .map(Self::Entries)
                .unwrap_or(Self::Raw(value)),
            other => Self::Raw(other),
        }
    }
}

impl<'de> Deserialize<'de> for RouteValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from(value))
    }
}

// ============================================================================
// Route Table
// ============================================================================

/// Insertion-ordered route table.
///
/// Iteration order is the order routes were added (or their order in the
/// source document when deserialized), and it fixes the order of entries in
/// the generated sitemap.
#[derive(Debug, Default)]
pub struct Routes(Vec<(String, RouteValue)>);

impl Routes {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a route, returning `self` for chaining.
    pub fn route(mut self, path: impl Into<String>, value: RouteValue) -> Self {
        self.push(path, value);
        self
    }

    /// Append a route in place.
    pub fn push(&mut self, path: impl Into<String>, value: RouteValue) {
        self.0.push((path.into(), value));
    }

    /// Iterate routes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RouteValue)> {
        self.0.iter().map(|(path, value)| (path.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, RouteValue)> for Routes {
    fn from_iter<I: IntoIterator<Item = (K, RouteValue)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(path, value)| (path.into(), value))
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for Routes {
    /// Deserialize from a map, keeping document order.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RoutesVisitor;

        impl<'de> de::Visitor<'de> for RoutesVisitor {
            type Value = Routes;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of route paths to sitemap metadata")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Routes, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut routes = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((path, value)) = map.next_entry::<String, RouteValue>()? {
                    routes.push((path, value));
                }
                Ok(Routes(routes))
            }
        }

        deserializer.deserialize_map(RoutesVisitor)
    }
}
