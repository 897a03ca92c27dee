//! Sitemap generation.
//!
//! Lists every written document page (redirects excluded) under the
//! configured site URL:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url><loc>https://example.com/adversaries/1/Acid%20Burrower</loc></url>
//! </urlset>
//! ```

use crate::config::SiteConfig;
use crate::core::RoutePath;
use crate::log;
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Write `sitemap.xml` when enabled and a site URL is known.
///
/// Returns the written path.
pub fn build_sitemap(config: &SiteConfig, routes: &[RoutePath]) -> Result<Option<PathBuf>> {
    let Some(base) = config.site.base().filter(|_| config.build.sitemap) else {
        return Ok(None);
    };
    let path = config.output_dir().join("sitemap.xml");
    let xml = Sitemap::build(base, routes).into_xml();
    fs::write(&path, xml)
        .with_context(|| format!("Failed to write sitemap to {}", path.display()))?;

    log!("sitemap"; "{} urls", routes.len());
    Ok(Some(path))
}

struct Sitemap {
    locs: Vec<String>,
}

impl Sitemap {
    fn build(base: &str, routes: &[RoutePath]) -> Self {
        let mut routes: Vec<&RoutePath> = routes.iter().collect();
        routes.sort();
        let locs = routes
            .into_iter()
            .map(|route| format!("{base}{}", route.to_encoded()))
            .collect();
        Self { locs }
    }

    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(64 * self.locs.len() + 128);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for loc in &self.locs {
            xml.push_str("  <url><loc>");
            xml.push_str(&escape_xml(loc));
            xml.push_str("</loc></url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}
