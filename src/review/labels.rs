//! Label normalization tables
//!
//! The source site serves Turkish month abbreviations and trip-type labels.
//! These tables are built once at startup and passed into the extractor;
//! nothing in this module is process-global state.

use std::collections::HashMap;

/// Immutable lookup tables for visit dates and travel types
#[derive(Debug, Clone)]
pub struct LabelTable {
    months: HashMap<&'static str, &'static str>,
    travel_types: HashMap<&'static str, &'static str>,
}

impl Default for LabelTable {
    fn default() -> Self {
        let months = HashMap::from([
            ("Oca", "01"),
            ("Şub", "02"),
            ("Mar", "03"),
            ("Nis", "04"),
            ("May", "05"),
            ("Haz", "06"),
            ("Tem", "07"),
            ("Ağu", "08"),
            ("Eyl", "09"),
            ("Eki", "10"),
            ("Kas", "11"),
            ("Ara", "12"),
        ]);

        let travel_types = HashMap::from([
            ("Çiftler", "Couple"),
            ("Aile", "Family"),
            ("Yalnız", "Solo"),
            ("İşletme", "Business"),
            ("Arkadaşlar", "Friends"),
        ]);

        Self {
            months,
            travel_types,
        }
    }
}

impl LabelTable {
    /// Converts a `<month> <year>` visit label to `MM.YYYY`
    ///
    /// Returns an empty string when the text is not exactly two tokens or the
    /// month abbreviation is unknown.
    pub fn convert_visit_date(&self, raw: &str) -> String {
        let mut parts = raw.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(month), Some(year), None) => self
                .months
                .get(month)
                .map(|number| format!("{}.{}", number, year))
                .unwrap_or_default(),
            _ => String::new(),
        }
    }

    /// Maps a travel-type label to its canonical English form
    ///
    /// Unknown labels pass through unchanged so new site vocabulary is kept
    /// rather than blanked.
    pub fn travel_type(&self, raw: &str) -> String {
        self.travel_types
            .get(raw)
            .map(|label| label.to_string())
            .unwrap_or_else(|| raw.to_string())
    }
}
