use crate::constants::WILDCARD_MARKER;

/// How a configured log entry is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Passed through unchanged.
    Literal,
    /// Expanded by the filesystem scan.
    Wildcard,
}

/// Classify a configured entry by the presence of the wildcard marker.
pub fn classify(entry: &str) -> EntryKind {
    if entry.contains(WILDCARD_MARKER) {
        EntryKind::Wildcard
    } else {
        EntryKind::Literal
    }
}

/// Entries split by kind, each side in its original relative order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PartitionedEntries {
    pub scan_patterns: Vec<String>,
    pub literal_paths: Vec<String>,
}

/// Split entries into scan patterns and literal paths. Empty entries are dropped.
pub fn partition_entries<I, S>(entries: I) -> PartitionedEntries
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut partitioned = PartitionedEntries::default();

    for entry in entries.into_iter().map(Into::into) {
        if entry.is_empty() {
            continue;
        }
        match classify(&entry) {
            EntryKind::Wildcard => partitioned.scan_patterns.push(entry),
            EntryKind::Literal => partitioned.literal_paths.push(entry),
        }
    }

    partitioned
}
