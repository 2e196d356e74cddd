//! Zone download pipeline
//!
//! ```text
//! ZoneService ── RecordSet ──▶ records_from_set ── DnsRecord ──▶ CsvWriter
//! ```
//!
//! Rows are written as they are produced. If writing fails part way, the
//! rows already written stay in the file.

use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::csv::CsvWriter;
use crate::error::{Error, Result};
use crate::record::{DnsRecord, RecordType};
use crate::report::Report;
use crate::traits::{RecordSet, RecordSetData, ZoneService};
use crate::zone;

/// Result of a download run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    /// Record sets returned by the provider
    pub record_sets: usize,
    /// CSV rows written
    pub rows: usize,
    /// Warnings about record sets left out of the file
    pub report: Report,
}

/// Convert one provider record set into CSV records
///
/// Fails with [`Error::UnsupportedRecordType`] for types that are not
/// transformed.
pub fn records_from_set(set: &RecordSet, zone_name: &str) -> Result<Vec<DnsRecord>> {
    let dns_name = zone::absolute_name(&set.name, zone_name);
    let record = |record_type: RecordType, data: String| {
        DnsRecord::new(dns_name.clone(), set.ttl, record_type, data)
    };
    let qualified = |target: &str| zone::qualify_target(target, zone_name).0;

    let records = match &set.data {
        RecordSetData::A(addresses) => addresses
            .iter()
            .map(|addr| record(RecordType::A, addr.clone()))
            .collect(),
        RecordSetData::Aaaa(addresses) => addresses
            .iter()
            .map(|addr| record(RecordType::AAAA, addr.clone()))
            .collect(),
        RecordSetData::Ns(targets) => targets
            .iter()
            .map(|target| record(RecordType::NS, qualified(target)))
            .collect(),
        RecordSetData::Cname(target) => vec![record(RecordType::CNAME, qualified(target))],
        RecordSetData::Alias(rtype) => {
            debug!("Alias {} record set {} has no values to write", rtype, set.name);
            Vec::new()
        }
        RecordSetData::Soa(soa) => {
            let data = format!(
                "{} {} {} {} {} {} {}",
                qualified(&soa.host),
                soa.email,
                soa.serial_number,
                soa.refresh_time,
                soa.retry_time,
                soa.expire_time,
                soa.minimum_ttl
            );
            vec![record(RecordType::SOA, data)]
        }
        RecordSetData::Unsupported(rtype) => return Err(Error::unsupported(rtype.as_str())),
    };

    Ok(records)
}

/// Warning recorded for each record set of an unsupported type
pub fn unsupported_set_warning(record_type: &str) -> String {
    format!(
        "{t} records exist in the zone but {t} records are not supported by this tool. \
         Hence this record types are missing in the CSV file.",
        t = record_type
    )
}

/// Check that the zone exists and list all of its record sets
pub async fn fetch_record_sets(
    service: &dyn ZoneService,
    resource_group: &str,
    zone_name: &str,
) -> Result<Vec<RecordSet>> {
    let zone = service.get_zone(resource_group, zone_name).await?;
    debug!(
        "Zone {} found via {} (id: {:?})",
        zone.name,
        service.provider_name(),
        zone.id
    );

    let sets = service.list_record_sets(resource_group, zone_name).await?;
    info!("Listed {} record set(s) in zone {}", sets.len(), zone_name);
    Ok(sets)
}

/// Write record sets as CSV rows in the given order
pub fn write_record_sets<W: Write>(
    sets: &[RecordSet],
    zone_name: &str,
    writer: &mut CsvWriter<W>,
) -> Result<DownloadSummary> {
    let mut report = Report::new();

    for set in sets {
        match records_from_set(set, zone_name) {
            Ok(records) => {
                for record in &records {
                    writer.write_record(record)?;
                }
            }
            Err(Error::UnsupportedRecordType(rtype)) => {
                report.warn(unsupported_set_warning(&rtype));
            }
            Err(e) => return Err(e),
        }
    }

    Ok(DownloadSummary {
        record_sets: sets.len(),
        rows: writer.rows_written(),
        report,
    })
}

/// Download a whole zone into a CSV file
///
/// The file is only created once the zone has been listed successfully.
pub async fn download_zone(
    service: &dyn ZoneService,
    resource_group: &str,
    zone_name: &str,
    csv_file: impl AsRef<Path>,
) -> Result<DownloadSummary> {
    let sets = fetch_record_sets(service, resource_group, zone_name).await?;

    let mut writer = CsvWriter::create(csv_file.as_ref())?;
    let summary = write_record_sets(&sets, zone_name, &mut writer)?;
    writer.finish()?;

    info!(
        "Wrote {} row(s) to {}",
        summary.rows,
        csv_file.as_ref().display()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::SoaRecord;

    const ZONE: &str = "example.com";

    #[test]
    fn test_apex_a_records_one_row_per_address() {
        let set = RecordSet::new(
            "@",
            300,
            RecordSetData::A(vec!["192.0.2.1".into(), "192.0.2.2".into()]),
        );
        let rows: Vec<String> = records_from_set(&set, ZONE)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            rows,
            vec!["example.com;300;A;192.0.2.1", "example.com;300;A;192.0.2.2"]
        );
    }

    #[test]
    fn test_relative_targets_are_qualified() {
        let set = RecordSet::new("alias", 60, RecordSetData::Cname("www".into()));
        let rows = records_from_set(&set, ZONE).unwrap();
        assert_eq!(rows[0].to_string(), "alias.example.com;60;CNAME;www.example.com.");

        let set = RecordSet::new(
            "sub",
            3600,
            RecordSetData::Ns(vec!["ns1.example.net.".into(), "ns2".into()]),
        );
        let rows = records_from_set(&set, ZONE).unwrap();
        assert_eq!(rows[0].data, "ns1.example.net.");
        assert_eq!(rows[1].data, "ns2.example.com.");
    }

    #[test]
    fn test_alias_set_writes_no_rows() {
        let set = RecordSet::new("cdn", 3600, RecordSetData::Alias(RecordType::CNAME));
        assert!(records_from_set(&set, ZONE).unwrap().is_empty());
    }

    #[test]
    fn test_soa_tuple() {
        let set = RecordSet::new(
            "@",
            3600,
            RecordSetData::Soa(SoaRecord {
                host: "ns1-01.azure-dns.com.".into(),
                email: "azuredns-hostmaster.microsoft.com".into(),
                serial_number: 1,
                refresh_time: 3600,
                retry_time: 300,
                expire_time: 2419200,
                minimum_ttl: 300,
            }),
        );
        let rows = records_from_set(&set, ZONE).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].to_string(),
            "example.com;3600;SOA;ns1-01.azure-dns.com. azuredns-hostmaster.microsoft.com 1 3600 300 2419200 300"
        );
    }

    #[test]
    fn test_unsupported_sets_warn_once_per_occurrence() {
        let sets = vec![
            RecordSet::new("@", 300, RecordSetData::Unsupported(RecordType::TXT)),
            RecordSet::new("www", 300, RecordSetData::A(vec!["192.0.2.1".into()])),
            RecordSet::new("_sip._tcp", 300, RecordSetData::Unsupported(RecordType::SRV)),
            RecordSet::new("info", 300, RecordSetData::Unsupported(RecordType::TXT)),
        ];

        let mut writer = CsvWriter::new(Vec::new());
        let summary = write_record_sets(&sets, ZONE, &mut writer).unwrap();

        assert_eq!(summary.record_sets, 4);
        assert_eq!(summary.rows, 1);
        assert_eq!(summary.report.warnings.len(), 3);
        assert!(summary.report.warnings[0].starts_with("TXT records exist in the zone"));
        assert!(summary.report.warnings[1].starts_with("SRV records exist in the zone"));
        assert_eq!(
            String::from_utf8(writer.finish().unwrap()).unwrap(),
            "www.example.com;300;A;192.0.2.1\n"
        );
    }
}
