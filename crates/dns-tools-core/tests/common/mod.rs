//! Test doubles and common utilities for pipeline contract tests

#![allow(dead_code)]

use dns_tools_core::error::{Error, Result};
use dns_tools_core::traits::{RecordSet, Zone, ZoneService};
use dns_tools_core::RecordType;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const RESOURCE_GROUP: &str = "dns-rg";
pub const ZONE: &str = "example.com";

/// In-memory zone service that records every call
#[derive(Clone)]
pub struct MemoryZoneService {
    zone: Option<String>,
    sets: Arc<Mutex<Vec<RecordSet>>>,
    /// Relative names whose create call fails
    failing_creates: Arc<Mutex<Vec<String>>>,
    /// Relative names whose lookup call fails
    failing_lookups: Arc<Mutex<Vec<String>>>,
    list_fails: bool,
    get_calls: Arc<AtomicUsize>,
    create_calls: Arc<AtomicUsize>,
}

impl MemoryZoneService {
    /// Service hosting an empty `example.com`
    pub fn new() -> Self {
        Self::with_sets(Vec::new())
    }

    /// Service hosting `example.com` with the given record sets
    pub fn with_sets(sets: Vec<RecordSet>) -> Self {
        Self {
            zone: Some(ZONE.to_string()),
            sets: Arc::new(Mutex::new(sets)),
            failing_creates: Arc::new(Mutex::new(Vec::new())),
            failing_lookups: Arc::new(Mutex::new(Vec::new())),
            list_fails: false,
            get_calls: Arc::new(AtomicUsize::new(0)),
            create_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Service without any zone
    pub fn without_zone() -> Self {
        Self {
            zone: None,
            ..Self::new()
        }
    }

    /// Service whose listing call fails
    pub fn failing_list() -> Self {
        Self {
            list_fails: true,
            ..Self::new()
        }
    }

    /// Make create calls for `relative_name` fail
    pub fn fail_creates_for(&self, relative_name: &str) {
        self.failing_creates
            .lock()
            .unwrap()
            .push(relative_name.to_string());
    }

    /// Make lookup calls for `relative_name` fail with a server error
    pub fn fail_lookups_for(&self, relative_name: &str) {
        self.failing_lookups
            .lock()
            .unwrap()
            .push(relative_name.to_string());
    }

    pub fn get_call_count(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn create_call_count(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Snapshot of the hosted record sets
    pub fn sets(&self) -> Vec<RecordSet> {
        self.sets.lock().unwrap().clone()
    }

    fn check_zone(&self, resource_group: &str, zone_name: &str) -> Result<()> {
        match &self.zone {
            Some(zone) if resource_group == RESOURCE_GROUP && zone == zone_name => Ok(()),
            _ => Err(Error::not_found(format!("Zone {} not found", zone_name))),
        }
    }
}

#[async_trait::async_trait]
impl ZoneService for MemoryZoneService {
    async fn get_zone(&self, resource_group: &str, zone_name: &str) -> Result<Zone> {
        self.check_zone(resource_group, zone_name)?;
        Ok(Zone {
            name: zone_name.to_string(),
            id: None,
            number_of_record_sets: Some(self.sets.lock().unwrap().len() as u64),
        })
    }

    async fn list_record_sets(
        &self,
        resource_group: &str,
        zone_name: &str,
    ) -> Result<Vec<RecordSet>> {
        self.check_zone(resource_group, zone_name)?;
        if self.list_fails {
            return Err(Error::provider("memory", "listing failed"));
        }
        Ok(self.sets())
    }

    async fn get_record_set(
        &self,
        resource_group: &str,
        zone_name: &str,
        relative_name: &str,
        record_type: &RecordType,
    ) -> Result<Option<RecordSet>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.check_zone(resource_group, zone_name)?;

        if self
            .failing_lookups
            .lock()
            .unwrap()
            .iter()
            .any(|name| name == relative_name)
        {
            return Err(Error::provider("memory", "lookup failed"));
        }

        Ok(self
            .sets
            .lock()
            .unwrap()
            .iter()
            .find(|set| set.name == relative_name && &set.record_type() == record_type)
            .cloned())
    }

    async fn create_record_set(
        &self,
        resource_group: &str,
        zone_name: &str,
        record_set: &RecordSet,
    ) -> Result<RecordSet> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.check_zone(resource_group, zone_name)?;

        if self
            .failing_creates
            .lock()
            .unwrap()
            .contains(&record_set.name)
        {
            return Err(Error::provider("memory", "create rejected"));
        }

        self.sets.lock().unwrap().push(record_set.clone());
        Ok(record_set.clone())
    }

    fn provider_name(&self) -> &'static str {
        "memory"
    }
}
