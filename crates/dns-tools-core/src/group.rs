//! Records grouped by owner name
//!
//! [`ZoneRecords`] is built once from the parsed CSV rows and is not
//! mutated afterwards; filtering produces a new value.

use std::collections::BTreeMap;

use crate::record::{DnsRecord, RecordType};
use crate::zone;

/// One CSV row without its owner name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEntry {
    pub ttl: u32,
    pub record_type: RecordType,
    pub data: String,
}

/// Mapping from fully qualified name to the rows of that name
///
/// Names iterate in ordinal (byte-wise) ascending order. Rows of one name
/// keep the order they were read in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneRecords {
    by_name: BTreeMap<String, Vec<RecordEntry>>,
}

impl ZoneRecords {
    /// Group records by owner name
    pub fn from_records(records: impl IntoIterator<Item = DnsRecord>) -> Self {
        let mut by_name: BTreeMap<String, Vec<RecordEntry>> = BTreeMap::new();
        for record in records {
            by_name.entry(record.name).or_default().push(RecordEntry {
                ttl: record.ttl,
                record_type: record.record_type,
                data: record.data,
            });
        }
        Self { by_name }
    }

    /// Number of distinct names
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Rows for one name
    pub fn get(&self, name: &str) -> Option<&[RecordEntry]> {
        self.by_name.get(name).map(Vec::as_slice)
    }

    /// Names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    /// Names with their rows, in sorted order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RecordEntry])> {
        self.by_name
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    /// Keep only names equal to `zone` or below it at a label boundary
    pub fn within_zone(self, zone_name: &str) -> Self {
        let by_name = self
            .by_name
            .into_iter()
            .filter(|(name, _)| zone::is_in_zone(name, zone_name))
            .collect();
        Self { by_name }
    }

    /// Distinct record types, ordered by mnemonic
    pub fn record_types(&self) -> Vec<RecordType> {
        let mut types: BTreeMap<String, RecordType> = BTreeMap::new();
        for entry in self.by_name.values().flatten() {
            types
                .entry(entry.record_type.to_string())
                .or_insert_with(|| entry.record_type.clone());
        }
        types.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ZoneRecords {
        ZoneRecords::from_records(vec![
            DnsRecord::new("www.example.com", 300, RecordType::A, "192.0.2.1"),
            DnsRecord::new("example.com", 3600, RecordType::NS, "ns1.example.net."),
            DnsRecord::new("www.example.com", 300, RecordType::A, "192.0.2.2"),
            DnsRecord::new("wwwexample.com", 300, RecordType::A, "192.0.2.3"),
            DnsRecord::new("mail.example.com", 300, RecordType::MX, "10 mx.example.com."),
        ])
    }

    #[test]
    fn test_grouping_preserves_row_order_within_name() {
        let records = sample();
        let www = records.get("www.example.com").unwrap();
        assert_eq!(www.len(), 2);
        assert_eq!(www[0].data, "192.0.2.1");
        assert_eq!(www[1].data, "192.0.2.2");
    }

    #[test]
    fn test_names_are_sorted() {
        let records = sample();
        let names: Vec<_> = records.names().collect();
        assert_eq!(
            names,
            vec!["example.com", "mail.example.com", "www.example.com", "wwwexample.com"]
        );
    }

    #[test]
    fn test_within_zone_drops_foreign_names() {
        let records = sample().within_zone("example.com");
        assert_eq!(records.len(), 3);
        assert!(records.get("wwwexample.com").is_none());
        assert!(records.get("example.com").is_some());
    }

    #[test]
    fn test_record_types_are_distinct() {
        let types = sample().record_types();
        assert_eq!(types, vec![RecordType::A, RecordType::MX, RecordType::NS]);
    }
}
