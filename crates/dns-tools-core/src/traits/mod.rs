//! Core traits for dns-tools
//!
//! - [`ZoneService`]: List, look up and create record sets of a hosted zone

pub mod zone_service;

pub use zone_service::{RecordSet, RecordSetData, SoaRecord, Zone, ZoneService};
