//! Route flattening.
//!
//! Expands the route table into the final ordered entry list, resolving
//! dynamic values. Routes are visited strictly sequentially: a dynamic
//! resolver is awaited before the next route is examined, so no two
//! resolvers ever run concurrently and output order always matches table
//! order, with list expansions inlined at their origin point.

use crate::{
    config::{
        ChangeFreq, Lastmod, ResolvedRoute, RouteEntry, RouteValue, SitemapConfig, SitemapFields,
    },
    error::{Result, SitemapError},
};

/// One finalized `<url>` record, ready for serialization.
///
/// Created fresh on every generation call and discarded after the write.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub lastmod: Option<String>,
    pub changefreq: ChangeFreq,
    pub priority: f32,
}

/// Flatten the route table into sitemap entries.
///
/// Fails with [`SitemapError::InvalidRouteValue`] on a route of unsupported
/// shape and [`SitemapError::Resolver`] when a dynamic resolver errors;
/// either aborts the whole call. This is the only validation performed.
pub async fn flatten_routes(config: &SitemapConfig) -> Result<Vec<SitemapEntry>> {
    let mut entries = Vec::with_capacity(config.routes.len());

    for (route, value) in config.routes.iter() {
        match value {
            RouteValue::Skip => {}
            RouteValue::Entry(fields) => entries.push(build_entry(config, route, fields)),
            RouteValue::Entries(list) => extend_from_list(&mut entries, config, list),
            RouteValue::Dynamic(resolver) => {
                let resolved =
                    resolver(route.to_owned())
                        .await
                        .map_err(|source| SitemapError::Resolver {
                            route: route.to_owned(),
                            source,
                        })?;
                match resolved {
                    ResolvedRoute::One(fields) => {
                        entries.push(build_entry(config, route, &fields));
                    }
                    ResolvedRoute::Many(list) => extend_from_list(&mut entries, config, &list),
                }
            }
            RouteValue::Raw(_) => {
                return Err(SitemapError::InvalidRouteValue {
                    route: route.to_owned(),
                });
            }
        }
    }

    Ok(entries)
}

/// List elements address themselves: each URL uses the element's own
/// `path`, not the route key.
fn extend_from_list(entries: &mut Vec<SitemapEntry>, config: &SitemapConfig, list: &[RouteEntry]) {
    entries.extend(
        list.iter()
            .map(|entry| build_entry(config, &entry.path, &entry.fields)),
    );
}

/// Build one entry. The URL is the site URL with the path appended as-is;
/// a zero priority falls back to the configured default.
fn build_entry(config: &SitemapConfig, path: &str, fields: &SitemapFields) -> SitemapEntry {
    SitemapEntry {
        url: format!("{}{}", config.site_url, path),
        lastmod: fields.last_modified.as_ref().map(Lastmod::to_value),
        changefreq: fields
            .change_frequency
            .unwrap_or(config.default_change_freq),
        priority: match fields.priority {
            Some(p) if p != 0.0 => p,
            _ => config.default_priority,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Routes;
    use crate::utils::date::DateTimeUtc;
    use serde_json::json;

    fn make_config(routes: Routes) -> SitemapConfig {
        SitemapConfig::new("https://ex.com").routes(routes)
    }

    #[tokio::test]
    async fn test_plain_objects_preserve_count_and_order() {
        let config = make_config(
            Routes::new()
                .route("/", RouteValue::Entry(SitemapFields::new()))
                .route("/about", RouteValue::Entry(SitemapFields::new()))
                .route("/contact", RouteValue::Entry(SitemapFields::new())),
        );

        let entries = flatten_routes(&config).await.unwrap();
        let urls: Vec<&str> = entries.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(
            urls,
            [
                "https://ex.com/",
                "https://ex.com/about",
                "https://ex.com/contact"
            ]
        );
    }

    #[tokio::test]
    async fn test_list_elements_use_their_own_path() {
        let config = make_config(Routes::new().route(
            "/posts",
            RouteValue::Entries(vec![
                RouteEntry::new("/posts/hello"),
                RouteEntry::new("/posts/world"),
            ]),
        ));

        let entries = flatten_routes(&config).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].url, "https://ex.com/posts/hello");
        assert_eq!(entries[1].url, "https://ex.com/posts/world");
    }

    #[tokio::test]
    async fn test_skip_emits_nothing() {
        let config = make_config(
            Routes::new()
                .route("/a", RouteValue::Entry(SitemapFields::new()))
                .route("/drafts", RouteValue::Skip),
        );

        let entries = flatten_routes(&config).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url, "https://ex.com/a");
    }

    #[tokio::test]
    async fn test_raw_value_fails_naming_the_route() {
        let config = make_config(
            Routes::new()
                .route("/a", RouteValue::Entry(SitemapFields::new()))
                .route("/bad", RouteValue::from(json!(42))),
        );

        match flatten_routes(&config).await {
            Err(SitemapError::InvalidRouteValue { route }) => assert_eq!(route, "/bad"),
            other => panic!("expected InvalidRouteValue, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_sync_resolver_matches_static_entry() {
        let fields = SitemapFields::new()
            .priority(0.8)
            .change_frequency(ChangeFreq::Daily);

        let static_config = make_config(
            Routes::new().route("/about", RouteValue::Entry(fields.clone())),
        );
        let dynamic_config = make_config(Routes::new().route(
            "/about",
            RouteValue::dynamic(move |_route| {
                let fields = fields.clone();
                async move { Ok(fields) }
            }),
        ));

        let from_static = flatten_routes(&static_config).await.unwrap();
        let from_dynamic = flatten_routes(&dynamic_config).await.unwrap();
        assert_eq!(from_static, from_dynamic);
    }

    #[tokio::test]
    async fn test_async_resolver_expands_list() {
        let config = make_config(Routes::new().route(
            "/posts",
            RouteValue::dynamic(|_route| async move {
                Ok(vec![
                    RouteEntry::new("/posts/1"),
                    RouteEntry::new("/posts/2"),
                ])
            }),
        ));

        let entries = flatten_routes(&config).await.unwrap();
        assert_eq!(entries[0].url, "https://ex.com/posts/1");
        assert_eq!(entries[1].url, "https://ex.com/posts/2");
    }

    #[tokio::test]
    async fn test_resolver_receives_route_key() {
        let config = make_config(Routes::new().route(
            "/docs",
            RouteValue::dynamic(|route| async move {
                Ok(vec![RouteEntry::new(format!("{route}/intro"))])
            }),
        ));

        let entries = flatten_routes(&config).await.unwrap();
        assert_eq!(entries[0].url, "https://ex.com/docs/intro");
    }

    #[tokio::test]
    async fn test_resolver_error_propagates() {
        let config = make_config(Routes::new().route(
            "/posts",
            RouteValue::dynamic(|_route| async move {
                Err::<SitemapFields, _>(anyhow::anyhow!("backend down"))
            }),
        ));

        let err = flatten_routes(&config).await.unwrap_err();
        assert!(matches!(err, SitemapError::Resolver { route, .. } if route == "/posts"));
    }

    #[tokio::test]
    async fn test_defaulting_fills_priority_and_changefreq() {
        let config = make_config(Routes::new().route("/", RouteValue::Entry(SitemapFields::new())));

        let entries = flatten_routes(&config).await.unwrap();
        assert_eq!(entries[0].priority, 0.5);
        assert_eq!(entries[0].changefreq, ChangeFreq::Weekly);
        assert_eq!(entries[0].lastmod, None);
    }

    #[tokio::test]
    async fn test_zero_priority_falls_back_to_default() {
        let config = make_config(
            Routes::new().route("/", RouteValue::Entry(SitemapFields::new().priority(0.0))),
        );

        let entries = flatten_routes(&config).await.unwrap();
        assert_eq!(entries[0].priority, 0.5);
    }

    #[tokio::test]
    async fn test_lastmod_date_vs_string() {
        let config = make_config(
            Routes::new()
                .route(
                    "/dated",
                    RouteValue::Entry(
                        SitemapFields::new().last_modified(DateTimeUtc::from_ymd(2025, 1, 15)),
                    ),
                )
                .route(
                    "/verbatim",
                    RouteValue::Entry(SitemapFields::new().last_modified("January 2025")),
                ),
        );

        let entries = flatten_routes(&config).await.unwrap();
        assert_eq!(entries[0].lastmod.as_deref(), Some("2025-01-15T00:00:00Z"));
        assert_eq!(entries[1].lastmod.as_deref(), Some("January 2025"));
    }

    #[tokio::test]
    async fn test_mixed_table_scenario() {
        // "/a" static, "/b" skipped, "/c" a list whose elements address
        // themselves from the site root.
        let config = make_config(
            Routes::new()
                .route("/a", RouteValue::Entry(SitemapFields::new()))
                .route("/b", RouteValue::Skip)
                .route(
                    "/c",
                    RouteValue::Entries(vec![
                        RouteEntry::new("/c/1"),
                        RouteEntry::new("/c/2"),
                    ]),
                ),
        );

        let entries = flatten_routes(&config).await.unwrap();
        let urls: Vec<&str> = entries.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(
            urls,
            ["https://ex.com/a", "https://ex.com/c/1", "https://ex.com/c/2"]
        );
    }

    #[tokio::test]
    async fn test_no_url_normalization() {
        let config = SitemapConfig::new("https://ex.com/").routes(
            Routes::new().route("/a", RouteValue::Entry(SitemapFields::new())),
        );

        // Site URL and path concatenate exactly; duplicate slashes stay.
        let entries = flatten_routes(&config).await.unwrap();
        assert_eq!(entries[0].url, "https://ex.com//a");
    }
}
