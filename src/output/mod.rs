//! Output module for writing JSON artifacts
//!
//! This module handles:
//! - Sanitizing entity names into filesystem-safe artifact names
//! - Writing record sequences as pretty-printed UTF-8 JSON

use serde::Serialize;
use std::fs;
use std::path::Path;

/// Characters that cannot appear in a path segment on common filesystems
const ILLEGAL_FILENAME_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Strips path-hostile characters from an entity name
///
/// Everything else, apostrophes and non-ASCII letters included, passes
/// through unchanged.
///
/// # Example
///
/// ```
/// use bedesten::output::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Joe's / Grill?"), "Joe's  Grill");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !ILLEGAL_FILENAME_CHARS.contains(c))
        .collect()
}

/// Writes records to `path` as a pretty-printed JSON array
///
/// Non-ASCII characters are written literally, which `serde_json` does by
/// default; downstream consumers expect readable Turkish text, not escapes.
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> crate::Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;
    Ok(())
}
