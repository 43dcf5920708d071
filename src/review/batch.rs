//! Batch orchestration: input discovery, entity iteration, artifact writes
//!
//! The listing stage leaves entity descriptors in offset-numbered JSON batch
//! files. This module walks them in offset order, runs the pagination driver
//! once per entity, and writes one artifact per entity. Faults are isolated
//! at the entity level: nothing that happens inside one entity stops the
//! batch.

use crate::config::Config;
use crate::fetch::{FetchAdapter, Fetcher};
use crate::output::{sanitize_filename, write_records};
use crate::review::driver::ReviewScraper;
use crate::review::labels::LabelTable;
use crate::review::record::Entity;
use std::path::{Path, PathBuf};

/// Offset step between batch files produced by the listing stage
pub const BATCH_STEP: usize = 30;

/// Runs the review pipeline over every discoverable input batch
///
/// Batches are visited in ascending offset order, entities in batch order.
/// Every processed entity gets an artifact, including entities that produced
/// zero records; skipped entities (skip list, unreadable batch) get none.
pub async fn run_reviews<A: FetchAdapter>(
    config: &Config,
    fetcher: &Fetcher<A>,
    labels: &LabelTable,
) -> crate::Result<()> {
    let input_dir = Path::new(&config.input.directory);
    let prefix = effective_prefix(config)?;
    let reviews_dir = PathBuf::from(&config.output.reviews_dir);
    std::fs::create_dir_all(&reviews_dir)?;

    let scraper = ReviewScraper::new(fetcher, labels);
    let mut entities_done = 0usize;

    for offset in batch_offsets(input_dir, &prefix)? {
        let batch_path = input_dir.join(format!("{}_page_{}.json", prefix, offset));
        let entities = match read_batch(&batch_path) {
            Ok(entities) => entities,
            Err(e) => {
                tracing::error!("Skipping unreadable batch {}: {}", batch_path.display(), e);
                continue;
            }
        };
        tracing::info!(
            "Processing batch {} ({} entities)",
            batch_path.display(),
            entities.len()
        );

        for entity in &entities {
            if config.skip.names.iter().any(|name| name == &entity.name) {
                tracing::info!("Skipping restaurant: {}", entity.name);
                continue;
            }

            tracing::info!("Scraping reviews for: {}", entity.name);
            let (reviews, outcome) = scraper.scrape_entity(entity).await;

            let artifact = reviews_dir.join(format!("{}.json", sanitize_filename(&entity.name)));
            if let Err(e) = write_records(&artifact, &reviews) {
                tracing::error!("Failed to write {}: {}", artifact.display(), e);
                continue;
            }
            tracing::info!(
                "Saved {} reviews to {} ({})",
                reviews.len(),
                artifact.display(),
                outcome
            );
            entities_done += 1;
        }
    }

    tracing::info!("Batch run complete: {} entities processed", entities_done);
    Ok(())
}

/// Resolves the batch file prefix, defaulting to the input directory's name
fn effective_prefix(config: &Config) -> std::io::Result<String> {
    if !config.input.prefix.is_empty() {
        return Ok(config.input.prefix.clone());
    }
    let dir = std::fs::canonicalize(&config.input.directory)?;
    Ok(dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default())
}

/// Finds batch offsets present on disk, stepping by [`BATCH_STEP`]
///
/// Offsets that never made it to disk are skipped; files whose offset is off
/// the step grid are ignored.
fn batch_offsets(dir: &Path, prefix: &str) -> std::io::Result<Vec<usize>> {
    let marker = format!("{}_page_", prefix);
    let mut present: Vec<usize> = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let Some(offset) = name
            .strip_prefix(&marker)
            .and_then(|rest| rest.strip_suffix(".json"))
            .and_then(|rest| rest.parse::<usize>().ok())
        else {
            continue;
        };
        present.push(offset);
    }

    let Some(max) = present.iter().copied().max() else {
        return Ok(Vec::new());
    };
    Ok((0..=max)
        .step_by(BATCH_STEP)
        .filter(|offset| present.contains(offset))
        .collect())
}

fn read_batch(path: &Path) -> crate::Result<Vec<Entity>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
