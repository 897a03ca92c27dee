//! Output writing.
//!
//! Each page becomes `<output>/<decoded route segments>/index.html`. Pages
//! are written in parallel; a route that can't become a directory is
//! skipped with a warning instead of failing the build.

use super::{Page, PageKind, Site};
use crate::core::RoutePath;
use crate::logger::ProgressLine;
use crate::warn;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::path::Path;

/// What ended up on disk.
#[derive(Debug, Default)]
pub struct WriteReport {
    /// Routes of written document pages, for the sitemap.
    pub documents: Vec<RoutePath>,
    pub redirects: usize,
    /// Pages skipped for unsafe route segments.
    pub unsafe_routes: usize,
}

impl WriteReport {
    pub fn pages(&self) -> usize {
        self.documents.len() + self.redirects
    }
}

/// Write all pages and `404.html` below `output`.
pub fn write_site(site: &Site, output: &Path, clean: bool) -> Result<WriteReport> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clean output directory {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    let progress = ProgressLine::new(&[("pages", site.pages.len())]);
    let written = site
        .pages
        .par_iter()
        .map(|page| {
            let result = write_page(page, output);
            progress.inc("pages");
            result
        })
        .collect::<Result<Vec<_>>>()?;
    progress.finish();

    let mut report = WriteReport::default();
    for page in written {
        match page {
            Some(page) if page.kind == PageKind::Document => {
                report.documents.push(page.route.clone());
            }
            Some(_) => report.redirects += 1,
            None => report.unsafe_routes += 1,
        }
    }

    let not_found = output.join("404.html");
    fs::write(&not_found, &site.not_found)
        .with_context(|| format!("Failed to write {}", not_found.display()))?;

    Ok(report)
}

fn write_page<'a>(page: &'a Page, root: &Path) -> Result<Option<&'a Page>> {
    let dir = match page.route.output_dir(root) {
        Ok(dir) => dir,
        Err(e) => {
            warn!("build"; "skipping page: {}", e);
            return Ok(None);
        }
    };
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join("index.html");
    fs::write(&path, &page.html).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(Some(page))
}
