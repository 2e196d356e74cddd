// # dns-tools-core
//
// Core library for moving DNS zones between a cloud provider and CSV files.
//
// ## Architecture Overview
//
// - **ZoneService**: Trait for the provider's zone API (get/list/create)
// - **csv / group**: The `name;ttl;type;data` file format and per-name grouping
// - **download**: Provider record sets -> CSV rows
// - **upload**: CSV rows -> create-if-absent record sets
// - **report**: Created / warning / error lines collected during a run
//
// The binaries in the `dns-tools` crate are thin wrappers around
// [`download::download_zone`] and [`upload::upload_zone`].

pub mod config;
pub mod csv;
pub mod download;
pub mod error;
pub mod group;
pub mod record;
pub mod report;
pub mod traits;
pub mod upload;
pub mod zone;

// Re-export core types for convenience
pub use config::{AzureCredentials, CredentialArgs, ZoneTarget};
pub use download::{DownloadSummary, download_zone};
pub use error::{Error, Result};
pub use group::{RecordEntry, ZoneRecords};
pub use record::{DnsRecord, RecordType};
pub use report::{Report, Style};
pub use traits::{RecordSet, RecordSetData, SoaRecord, Zone, ZoneService};
pub use upload::{upload_records, upload_zone};
