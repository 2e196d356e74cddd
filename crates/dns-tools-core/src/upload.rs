//! Zone upload pipeline
//!
//! ```text
//! CSV ─▶ ZoneRecords ─▶ within_zone ─▶ per-name buckets (A, AAAA, CNAME)
//!                                            │
//!                               get_record_set ─▶ create_record_set
//! ```
//!
//! Record sets that already exist are never touched. Each create call
//! stands alone: a failure is reported and the run moves on.

use std::path::Path;

use tracing::{debug, info};

use crate::csv;
use crate::error::Result;
use crate::group::{RecordEntry, ZoneRecords};
use crate::record::RecordType;
use crate::report::Report;
use crate::traits::{RecordSet, RecordSetData, ZoneService};
use crate::zone;

/// Values of one type collected for one name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bucket {
    /// TTL of the last row of this type
    pub ttl: u32,
    /// Values in file order
    pub values: Vec<String>,
}

impl Bucket {
    fn push(&mut self, ttl: u32, value: String) {
        // Rows of one set are assumed to share a TTL; the last one wins.
        self.ttl = ttl;
        self.values.push(value);
    }
}

/// Uploadable buckets of one name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameBuckets {
    /// Relative name (`@` for the apex)
    pub relative_name: String,
    pub a: Bucket,
    pub aaaa: Bucket,
    pub cname: Bucket,
}

impl NameBuckets {
    /// Non-empty buckets in upload order: A, AAAA, CNAME
    pub fn non_empty(&self) -> impl Iterator<Item = (RecordType, &Bucket)> {
        [
            (RecordType::A, &self.a),
            (RecordType::AAAA, &self.aaaa),
            (RecordType::CNAME, &self.cname),
        ]
        .into_iter()
        .filter(|(_, bucket)| !bucket.values.is_empty())
    }
}

/// One warning per distinct record type the uploader cannot create
pub fn unsupported_type_warnings(records: &ZoneRecords) -> Vec<String> {
    records
        .record_types()
        .into_iter()
        .filter(|rtype| !rtype.is_uploadable())
        .map(|rtype| {
            format!(
                "Record(s) of type {} in CSV file which is currently not supported by the tool. \
                 Please handle records manually.",
                rtype
            )
        })
        .collect()
}

/// Sort the rows of one name into typed buckets
///
/// Relative CNAME targets are qualified with the zone name and a warning
/// is added to `report`.
pub fn collect_buckets(
    relative_name: &str,
    entries: &[RecordEntry],
    zone_name: &str,
    report: &mut Report,
) -> NameBuckets {
    let mut buckets = NameBuckets {
        relative_name: relative_name.to_string(),
        ..Default::default()
    };

    for entry in entries {
        match entry.record_type {
            RecordType::A => buckets.a.push(entry.ttl, entry.data.clone()),
            RecordType::AAAA => buckets.aaaa.push(entry.ttl, entry.data.clone()),
            RecordType::CNAME => {
                let (target, rewritten) = zone::qualify_target(&entry.data, zone_name);
                if rewritten {
                    report.warn(format!(
                        "Name {} referenced by CNAME record {} is not terminated with a dot (\".\"). \
                         This might cause unexpected behavior in Azure DNS. \
                         Hence, zone name was added to the name: {}",
                        entry.data, relative_name, target
                    ));
                }
                buckets.cname.push(entry.ttl, target);
            }
            _ => {}
        }
    }

    buckets
}

/// Upload grouped records into an existing zone
pub async fn upload_records(
    service: &dyn ZoneService,
    resource_group: &str,
    zone_name: &str,
    records: ZoneRecords,
) -> Result<Report> {
    let zone = service.get_zone(resource_group, zone_name).await?;
    debug!("Zone {} found via {}", zone.name, service.provider_name());

    let total = records.len();
    let records = records.within_zone(zone_name);
    info!(
        "{} of {} name(s) belong to zone {}",
        records.len(),
        total,
        zone_name
    );

    let mut report = Report::new();
    for warning in unsupported_type_warnings(&records) {
        report.warn(warning);
    }

    for (dns_name, entries) in records.iter() {
        let Some(relative_name) = zone::relative_name(dns_name, zone_name) else {
            continue;
        };
        let buckets = collect_buckets(&relative_name, entries, zone_name, &mut report);

        for (record_type, bucket) in buckets.non_empty() {
            upload_bucket(
                service,
                resource_group,
                zone_name,
                &relative_name,
                record_type,
                bucket,
                &mut report,
            )
            .await;
        }
    }

    Ok(report)
}

async fn upload_bucket(
    service: &dyn ZoneService,
    resource_group: &str,
    zone_name: &str,
    relative_name: &str,
    record_type: RecordType,
    bucket: &Bucket,
    report: &mut Report,
) {
    let data = match record_type {
        RecordType::A => RecordSetData::A(bucket.values.clone()),
        RecordType::AAAA => RecordSetData::Aaaa(bucket.values.clone()),
        RecordType::CNAME => match bucket.values.as_slice() {
            [target] => RecordSetData::Cname(target.clone()),
            _ => {
                report.error(format!(
                    "More than one alias in CNAME record set for name {}. \
                     This is not valid! Record set skipped.",
                    relative_name
                ));
                return;
            }
        },
        _ => return,
    };

    match service
        .get_record_set(resource_group, zone_name, relative_name, &record_type)
        .await
    {
        Ok(Some(_)) => {
            report.warn(format!(
                "Record set {} for name {} already exists. Skipping record set.",
                record_type, relative_name
            ));
            return;
        }
        Ok(None) => {}
        Err(e) => {
            report.error(format!(
                "Error while looking up record set {} for name {}: {}",
                record_type, relative_name, e
            ));
            return;
        }
    }

    let record_set = RecordSet::new(relative_name, bucket.ttl, data);
    match service
        .create_record_set(resource_group, zone_name, &record_set)
        .await
    {
        Ok(_) => {
            debug!("Created record set {} {}", record_type, relative_name);
            for value in &bucket.values {
                report.created(format!(
                    "{};{};{};{}",
                    relative_name, bucket.ttl, record_type, value
                ));
            }
        }
        Err(e) => report.error(format!(
            "Error while creating record set {} for name {}: {}",
            record_type, relative_name, e
        )),
    }
}

/// Read a CSV file and upload its records into an existing zone
///
/// The whole file is parsed before the provider is contacted, so a
/// malformed file never leads to a partial upload.
pub async fn upload_zone(
    service: &dyn ZoneService,
    resource_group: &str,
    zone_name: &str,
    csv_file: impl AsRef<Path>,
) -> Result<Report> {
    let records = csv::read_zone_file(csv_file)?;
    upload_records(service, resource_group, zone_name, records).await
}
