//! Pagination driver: per-entity page traversal with partial-failure semantics
//!
//! One entity's reviews span several pages, each page naming the next. The
//! driver walks them sequentially, retrying transient fetch and extraction
//! failures with the configured attempt budget, and never discards records it
//! has already collected: every exit path hands the accumulator back to the
//! caller for flushing.

use crate::fetch::{FetchAdapter, Fetcher};
use crate::review::extract::{
    extract_reviews, extract_total_reviews, next_page_url, Extraction, REVIEWS_PER_PAGE,
};
use crate::review::labels::LabelTable;
use crate::review::record::{Entity, Review};
use scraper::Html;
use std::fmt;

/// Terminal classification for one entity's traversal
///
/// Every variant flushes whatever the accumulator holds; extracted records
/// are never lost to a later failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityOutcome {
    /// All budgeted pages processed, or the pager ran out early
    Completed,

    /// The first page never arrived; the entity yields an empty artifact
    FirstPageUnavailable,

    /// Every extraction attempt on one page came back empty
    ExtractionExhausted { page: usize },

    /// A next-page fetch ran out of attempts; earlier pages are kept
    TruncatedByFetch { page: usize },
}

impl fmt::Display for EntityOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::FirstPageUnavailable => write!(f, "first page unavailable"),
            Self::ExtractionExhausted { page } => {
                write!(f, "aborted on page {}", page + 1)
            }
            Self::TruncatedByFetch { page } => {
                write!(f, "truncated after page {}", page + 1)
            }
        }
    }
}

/// Drives fetch and extraction across one entity's review pages
pub struct ReviewScraper<'a, A> {
    fetcher: &'a Fetcher<A>,
    labels: &'a LabelTable,
}

impl<'a, A: FetchAdapter> ReviewScraper<'a, A> {
    pub fn new(fetcher: &'a Fetcher<A>, labels: &'a LabelTable) -> Self {
        Self { fetcher, labels }
    }

    /// Collects every reachable review for one entity
    ///
    /// The accumulator grows monotonically in page order and is returned on
    /// every exit path together with the terminal classification.
    pub async fn scrape_entity(&self, entity: &Entity) -> (Vec<Review>, EntityOutcome) {
        let mut reviews: Vec<Review> = Vec::new();

        let Some(link) = entity.link.as_deref().filter(|link| !link.is_empty()) else {
            tracing::warn!("No source link for {}, skipping", entity.name);
            return (reviews, EntityOutcome::FirstPageUnavailable);
        };

        let markup = match self.fetcher.fetch_with_retry(link, true).await {
            Ok(markup) => markup,
            Err(e) => {
                tracing::warn!("Could not fetch first page for {}: {}", entity.name, e);
                return (reviews, EntityOutcome::FirstPageUnavailable);
            }
        };
        let mut doc = Html::parse_document(&markup);

        let total = extract_total_reviews(&doc);
        if total == 0 {
            tracing::info!("No reviews declared for {}", entity.name);
            return (reviews, EntityOutcome::Completed);
        }

        // The declared total rounds up to a page budget; the estimate may
        // overshoot the real page count, which the pager check below absorbs.
        let page_count = (total / REVIEWS_PER_PAGE + 1) as usize;
        let mut current_url = link.to_string();

        for page in 0..page_count {
            tracing::info!("Page {}/{} for {}", page + 1, page_count, entity.name);

            match self
                .extract_with_refetch(&mut doc, &current_url, &entity.name)
                .await
            {
                Extraction::Found(mut page_reviews) => reviews.append(&mut page_reviews),
                Extraction::NotFound => {
                    tracing::warn!(
                        "Skipping {} after {} failed extraction attempts on page {}",
                        entity.name,
                        self.fetcher.max_attempts(),
                        page + 1
                    );
                    return (reviews, EntityOutcome::ExtractionExhausted { page });
                }
            }

            if page + 1 == page_count {
                break;
            }

            let Some(next_url) = next_page_url(&doc, page) else {
                tracing::info!("No more pages for {}", entity.name);
                break;
            };

            match self.fetcher.fetch_with_retry(&next_url, true).await {
                Ok(markup) => {
                    doc = Html::parse_document(&markup);
                    current_url = next_url;
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to fetch next page for {}: {}; keeping {} reviews",
                        entity.name,
                        e,
                        reviews.len()
                    );
                    return (reviews, EntityOutcome::TruncatedByFetch { page });
                }
            }
        }

        (reviews, EntityOutcome::Completed)
    }

    /// Runs the extractor, re-fetching the current page while it reports
    /// absent structure
    ///
    /// The re-fetch targets the URL that produced the current page, so a
    /// transiently broken render gets a fresh chance without advancing the
    /// traversal. At most `max_attempts` extraction attempts.
    async fn extract_with_refetch(
        &self,
        doc: &mut Html,
        url: &str,
        entity_name: &str,
    ) -> Extraction {
        let budget = self.fetcher.max_attempts();
        for attempt in 1..=budget {
            match extract_reviews(doc, entity_name, self.labels) {
                found @ Extraction::Found(_) => return found,
                Extraction::NotFound => {
                    tracing::warn!(
                        "Reviews not found (attempt {}/{}), re-fetching {}",
                        attempt,
                        budget,
                        url
                    );
                }
            }

            if attempt == budget {
                break;
            }
            match self.fetcher.fetch_with_retry(url, true).await {
                Ok(markup) => *doc = Html::parse_document(&markup),
                // Fetching went dead while retrying; no point extracting again
                Err(_) => break,
            }
        }

        Extraction::NotFound
    }
}
