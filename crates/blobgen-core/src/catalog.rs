//! Ordered record of the files accepted in one run.
//!
//! Insertion order is the scan order after filtering. It fixes the index of
//! every file in the pointer, size and name tables and the value of its
//! enumeration member, so records are only ever appended.

use std::path::PathBuf;

/// One embedded file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    /// Sanitized symbol name; not guaranteed unique or non-empty
    pub identifier: String,
    /// Content length in bytes, excluding encoder padding
    pub byte_size: usize,
    /// Zero-based position in the catalog
    pub ordinal: usize,
    /// File the record was built from
    pub source: PathBuf,
}

/// Append-only list of [`ResourceRecord`]s with a running size total
#[derive(Debug, Clone, Default)]
pub struct ResourceCatalog {
    records: Vec<ResourceRecord>,
    total_size: u64,
}

impl ResourceCatalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record and returns it with its ordinal assigned
    pub fn push(
        &mut self,
        identifier: impl Into<String>,
        byte_size: usize,
        source: impl Into<PathBuf>,
    ) -> &ResourceRecord {
        let ordinal = self.records.len();
        self.total_size += byte_size as u64;
        self.records.push(ResourceRecord {
            identifier: identifier.into(),
            byte_size,
            ordinal,
            source: source.into(),
        });
        &self.records[ordinal]
    }

    /// Iterates records in ordinal order
    pub fn iter(&self) -> std::slice::Iter<'_, ResourceRecord> {
        self.records.iter()
    }

    /// Number of records (`numFiles` in the generated header)
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing has been added
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of all record sizes
    pub fn total_size(&self) -> u64 {
        self.total_size
    }
}

impl<'a> IntoIterator for &'a ResourceCatalog {
    type Item = &'a ResourceRecord;
    type IntoIter = std::slice::Iter<'a, ResourceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_are_dense() {
        let mut catalog = ResourceCatalog::new();
        assert_eq!(catalog.push("a", 3, "a.png").ordinal, 0);
        assert_eq!(catalog.push("b", 5, "b.png").ordinal, 1);
        assert_eq!(catalog.push("a", 1, "a_.png").ordinal, 2);

        let ordinals: Vec<_> = catalog.iter().map(|r| r.ordinal).collect();
        assert_eq!(ordinals, [0, 1, 2]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_total_size() {
        let mut catalog = ResourceCatalog::new();
        assert_eq!(catalog.total_size(), 0);
        catalog.push("a", 3, "a.png");
        catalog.push("b", 5, "b.png");
        assert_eq!(catalog.total_size(), 8);
    }

    #[test]
    fn test_records_keep_their_source() {
        let mut catalog = ResourceCatalog::new();
        catalog.push("logo", 3, "/assets/logo.png");
        catalog.push("logo", 4, "/assets/lo go.png");

        let sources: Vec<_> = catalog.iter().map(|r| r.source.to_str().unwrap()).collect();
        assert_eq!(sources, ["/assets/logo.png", "/assets/lo go.png"]);
        assert_eq!(catalog.iter().nth(1).unwrap().byte_size, 4);
    }
}
