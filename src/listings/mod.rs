//! One-shot retail catalog listings
//!
//! Thin glue next to the review pipeline: each site is a single rendered
//! page, extracted once without retries, and all rows land in one combined
//! artifact. The JS-heavy sites go through the same fetch boundary with
//! `render_js` turned on, so no browser automation leaks in here.

mod sites;

pub use sites::{extract_hepsiburada, extract_migros, extract_trendyol, Listing};

use crate::config::Config;
use crate::fetch::FetchAdapter;
use crate::output::write_records;
use scraper::Html;
use std::path::Path;

/// Trendyol men's-shorts category page
pub const TRENDYOL_URL: &str = "https://www.trendyol.com/erkek-sort-x-g2-c119";

/// Migros phones category page
pub const MIGROS_URL: &str = "https://www.migros.com.tr/telefon-c-2add";

/// Hepsiburada men's-shorts category page
pub const HEPSIBURADA_URL: &str = "https://www.hepsiburada.com/erkek-sortlar-c-60000754";

/// Scrapes the three retail catalogs and writes one combined artifact
///
/// Sites fail independently: a site that cannot be fetched contributes no
/// rows but does not stop the others.
pub async fn run_listings<A: FetchAdapter>(config: &Config, adapter: &A) -> crate::Result<()> {
    let sites: [(&str, &str, bool, fn(&Html) -> Vec<Listing>); 3] = [
        // Trendyol serves its grid without client-side rendering
        ("Trendyol", TRENDYOL_URL, false, extract_trendyol),
        ("Migros", MIGROS_URL, true, extract_migros),
        ("Hepsiburada", HEPSIBURADA_URL, true, extract_hepsiburada),
    ];

    let mut rows: Vec<Listing> = Vec::new();
    for (site, url, render_js, extract) in sites {
        match adapter.fetch(url, render_js).await {
            Ok(markup) => {
                let doc = Html::parse_document(&markup);
                let site_rows = extract(&doc);
                tracing::info!("{}: {} listings", site, site_rows.len());
                rows.extend(site_rows);
            }
            Err(e) => {
                tracing::error!("{}: fetch failed, skipping site: {}", site, e);
            }
        }
    }

    write_records(Path::new(&config.output.listings_path), &rows)?;
    tracing::info!(
        "Saved {} listings to {}",
        rows.len(),
        config.output.listings_path
    );
    Ok(())
}
