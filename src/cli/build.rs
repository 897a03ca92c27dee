//! `daggerdex build`: fetch, render, write.

use crate::cli::common;
use crate::config::SiteConfig;
use crate::fetch::{CollectionFetcher, Transport};
use crate::generator::{SiteReport, WriteReport, generate, sitemap::build_sitemap, write_site};
use crate::log;
use crate::logger::warning_count;
use crate::utils::plural::plural_count;
use anyhow::Result;
use std::time::Instant;

/// Outcome of a finished build.
#[derive(Debug)]
pub struct BuildSummary {
    pub site: SiteReport,
    pub written: WriteReport,
}

/// Build the site from the configured content API.
pub fn build_site(config: &SiteConfig) -> Result<BuildSummary> {
    let fetcher = common::http_fetcher(config)?;
    build_with(&fetcher, config)
}

/// Build the site from any transport.
pub fn build_with<T: Transport>(
    fetcher: &CollectionFetcher<T>,
    config: &SiteConfig,
) -> Result<BuildSummary> {
    let started = Instant::now();
    let warnings_before = warning_count();

    let site = common::runtime()?.block_on(generate(fetcher, config))?;
    let written = write_site(&site, config.output_dir(), config.build.clean)?;
    build_sitemap(config, &written.documents)?;

    let summary = BuildSummary {
        site: site.report,
        written,
    };
    log!(
        "build";
        "{} in {:.2}s ({}, {}, {})",
        plural_count(summary.written.pages(), "page"),
        started.elapsed().as_secs_f64(),
        plural_count(summary.site.skipped, "skipped record"),
        plural_count(summary.site.degraded, "degraded fetch"),
        plural_count(warning_count().saturating_sub(warnings_before), "warning"),
    );
    Ok(summary)
}
