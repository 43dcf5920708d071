//! Review scraping: the paginated extraction-with-retry core
//!
//! This module contains:
//! - Record and entity types plus label normalization tables
//! - Tolerant field extraction over rendered review pages
//! - The pagination driver walking page-by-page with bounded retries
//! - The batch orchestrator tying input batches to output artifacts

mod batch;
mod driver;
mod extract;
mod labels;
mod record;

pub use batch::{run_reviews, BATCH_STEP};
pub use driver::{EntityOutcome, ReviewScraper};
pub use extract::{
    extract_reviews, extract_total_reviews, next_page_url, Extraction, REVIEWS_PER_PAGE, SITE_BASE,
};
pub use labels::LabelTable;
pub use record::{Entity, Review};
