// ABOUTME: Selects directory entries whose specialty contains a target string.
// ABOUTME: Matching is case- and accent-insensitive and keeps input order.

use crate::models::RawEntry;
use crate::text::normalize;

/// Returns the entries whose specialty name contains `specialty` after
/// normalization. Entries with no specialty name never match.
pub fn filter_by_specialty<'a>(entries: &'a [RawEntry], specialty: &str) -> Vec<&'a RawEntry> {
    let target = normalize(specialty);
    tracing::info!(total = entries.len(), specialty, "filtering directory entries");

    let matches: Vec<&RawEntry> = entries
        .iter()
        .filter(|entry| {
            entry
                .specialty_name()
                .is_some_and(|name| normalize(name).contains(&target))
        })
        .collect();

    tracing::debug!(matched = matches.len(), specialty, "specialty filter done");
    matches
}
