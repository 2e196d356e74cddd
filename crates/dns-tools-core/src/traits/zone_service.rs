// # Zone Service Trait
//
// Defines the interface to the cloud DNS management API.
//
// ## Implementations
//
// - Azure DNS: `dns-tools-provider-azure` crate
//
// ## Usage
//
// ```rust,ignore
// use dns_tools_core::ZoneService;
//
// async fn dump(service: &dyn ZoneService) -> dns_tools_core::Result<()> {
//     service.get_zone("dns-rg", "example.com").await?;
//     for set in service.list_record_sets("dns-rg", "example.com").await? {
//         println!("{} {}", set.name, set.record_type());
//     }
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::record::RecordType;

/// A hosted DNS zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    /// Zone name, e.g. `example.com`
    pub name: String,
    /// Provider resource ID, if the provider exposes one
    pub id: Option<String>,
    /// Number of record sets reported by the provider
    pub number_of_record_sets: Option<u64>,
}

/// Start of authority values of a zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoaRecord {
    pub host: String,
    pub email: String,
    pub serial_number: u64,
    pub refresh_time: u64,
    pub retry_time: u64,
    pub expire_time: u64,
    pub minimum_ttl: u64,
}

/// Values of a record set, by type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSetData {
    /// IPv4 addresses
    A(Vec<String>),
    /// IPv6 addresses
    Aaaa(Vec<String>),
    /// Canonical name target
    Cname(String),
    /// Alias record set pointing at a provider resource; it has no values
    /// of its own
    Alias(RecordType),
    /// Name server targets
    Ns(Vec<String>),
    /// Start of authority
    Soa(SoaRecord),
    /// Any record set the tools do not transform (MX, PTR, SRV, TXT, CAA, ...)
    Unsupported(RecordType),
}

/// A record set in the provider's model
///
/// `name` is relative to the zone; the apex is `@`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    /// Relative name
    pub name: String,
    /// Time-to-live in seconds
    pub ttl: u32,
    /// Typed values
    pub data: RecordSetData,
}

impl RecordSet {
    pub fn new(name: impl Into<String>, ttl: u32, data: RecordSetData) -> Self {
        Self {
            name: name.into(),
            ttl,
            data,
        }
    }

    /// Record type of this set
    pub fn record_type(&self) -> RecordType {
        match &self.data {
            RecordSetData::A(_) => RecordType::A,
            RecordSetData::Aaaa(_) => RecordType::AAAA,
            RecordSetData::Cname(_) => RecordType::CNAME,
            RecordSetData::Ns(_) => RecordType::NS,
            RecordSetData::Soa(_) => RecordType::SOA,
            RecordSetData::Alias(rtype) | RecordSetData::Unsupported(rtype) => rtype.clone(),
        }
    }
}

/// Trait for the cloud DNS management API
///
/// All calls are single-shot: implementations must not retry, cache or
/// spawn tasks. The pipelines call them strictly one at a time.
///
/// # Not found
///
/// `get_zone` reports a missing zone as [`crate::Error::NotFound`];
/// `get_record_set` reports a missing record set as `Ok(None)`.
#[async_trait]
pub trait ZoneService: Send + Sync {
    /// Look up a zone
    async fn get_zone(&self, resource_group: &str, zone_name: &str) -> crate::Result<Zone>;

    /// List every record set of a zone, in provider order
    async fn list_record_sets(
        &self,
        resource_group: &str,
        zone_name: &str,
    ) -> crate::Result<Vec<RecordSet>>;

    /// Look up one record set by relative name and type
    async fn get_record_set(
        &self,
        resource_group: &str,
        zone_name: &str,
        relative_name: &str,
        record_type: &RecordType,
    ) -> crate::Result<Option<RecordSet>>;

    /// Create a record set; `record_set.name` is the relative name
    async fn create_record_set(
        &self,
        resource_group: &str,
        zone_name: &str,
        record_set: &RecordSet,
    ) -> crate::Result<RecordSet>;

    /// Provider name (for logging)
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_set_type() {
        let set = RecordSet::new("www", 300, RecordSetData::A(vec!["192.0.2.1".into()]));
        assert_eq!(set.record_type(), RecordType::A);

        let set = RecordSet::new("@", 300, RecordSetData::Unsupported(RecordType::TXT));
        assert_eq!(set.record_type(), RecordType::TXT);
    }
}
