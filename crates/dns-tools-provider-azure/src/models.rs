//! Azure Resource Manager wire types for DNS zones and record sets
//!
//! Only the properties the tools read or write are modelled; everything
//! else in a response is ignored.

use serde::{Deserialize, Serialize};

use dns_tools_core::{Error, RecordSet, RecordSetData, RecordType, SoaRecord, Zone};

use crate::PROVIDER;

#[derive(Debug, Deserialize)]
pub struct ArmZone {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub properties: ZoneProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneProperties {
    pub number_of_record_sets: Option<u64>,
}

impl From<ArmZone> for Zone {
    fn from(zone: ArmZone) -> Self {
        Zone {
            name: zone.name,
            id: zone.id,
            number_of_record_sets: zone.properties.number_of_record_sets,
        }
    }
}

/// One page of `GET .../dnsZones/{zone}/all`
#[derive(Debug, Deserialize)]
pub struct RecordSetPage {
    #[serde(default)]
    pub value: Vec<ArmRecordSet>,
    #[serde(rename = "nextLink")]
    pub next_link: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ArmRecordSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// e.g. `Microsoft.Network/dnszones/A`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    pub properties: RecordSetProperties,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RecordSetProperties {
    #[serde(rename = "TTL", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(rename = "ARecords", skip_serializing_if = "Option::is_none")]
    pub a_records: Option<Vec<ARecord>>,
    #[serde(rename = "AAAARecords", skip_serializing_if = "Option::is_none")]
    pub aaaa_records: Option<Vec<AaaaRecord>>,
    #[serde(rename = "NSRecords", skip_serializing_if = "Option::is_none")]
    pub ns_records: Option<Vec<NsRecord>>,
    #[serde(rename = "CNAMERecord", skip_serializing_if = "Option::is_none")]
    pub cname_record: Option<CnameRecord>,
    #[serde(rename = "SOARecord", skip_serializing_if = "Option::is_none")]
    pub soa_record: Option<ArmSoaRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ARecord {
    #[serde(rename = "ipv4Address")]
    pub ipv4_address: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AaaaRecord {
    #[serde(rename = "ipv6Address")]
    pub ipv6_address: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NsRecord {
    pub nsdname: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CnameRecord {
    pub cname: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArmSoaRecord {
    pub host: String,
    pub email: String,
    pub serial_number: u64,
    pub refresh_time: u64,
    pub retry_time: u64,
    pub expire_time: u64,
    #[serde(rename = "minimumTTL")]
    pub minimum_ttl: u64,
}

/// ARM error envelope: `{"error": {"code": "...", "message": "..."}}`
#[derive(Debug, Deserialize)]
pub struct ArmErrorResponse {
    pub error: ArmError,
}

#[derive(Debug, Deserialize)]
pub struct ArmError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// Identity platform token response
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: Option<u64>,
}

/// Identity platform error response
#[derive(Debug, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: String,
}

impl ArmRecordSet {
    /// Record type from the resource type suffix
    pub fn record_type(&self) -> Option<RecordType> {
        self.resource_type
            .as_deref()
            .and_then(|t| t.rsplit('/').next())
            .filter(|t| !t.is_empty())
            .map(RecordType::from_mnemonic)
    }

    /// Convert into the provider-neutral model
    pub fn into_record_set(self) -> Result<RecordSet, Error> {
        let record_type = self.record_type().ok_or_else(|| {
            Error::provider(PROVIDER, "Record set without a resource type in response")
        })?;
        let name = self.name.unwrap_or_else(|| dns_tools_core::zone::APEX.to_string());
        let props = self.properties;
        let ttl = props.ttl.unwrap_or_default();

        let data = match record_type {
            RecordType::A => RecordSetData::A(
                props
                    .a_records
                    .unwrap_or_default()
                    .into_iter()
                    .map(|r| r.ipv4_address)
                    .collect(),
            ),
            RecordType::AAAA => RecordSetData::Aaaa(
                props
                    .aaaa_records
                    .unwrap_or_default()
                    .into_iter()
                    .map(|r| r.ipv6_address)
                    .collect(),
            ),
            RecordType::NS => RecordSetData::Ns(
                props
                    .ns_records
                    .unwrap_or_default()
                    .into_iter()
                    .map(|r| r.nsdname)
                    .collect(),
            ),
            // Alias record sets carry `targetResource` instead of a target
            RecordType::CNAME => match props.cname_record {
                Some(target) => RecordSetData::Cname(target.cname),
                None => RecordSetData::Alias(RecordType::CNAME),
            },
            RecordType::SOA => {
                let soa = props.soa_record.ok_or_else(|| {
                    Error::provider(PROVIDER, "SOA record set has no SOA record")
                })?;
                RecordSetData::Soa(SoaRecord {
                    host: soa.host,
                    email: soa.email,
                    serial_number: soa.serial_number,
                    refresh_time: soa.refresh_time,
                    retry_time: soa.retry_time,
                    expire_time: soa.expire_time,
                    minimum_ttl: soa.minimum_ttl,
                })
            }
            other => RecordSetData::Unsupported(other),
        };

        Ok(RecordSet::new(name, ttl, data))
    }

    /// Request body for creating `set`
    pub fn create_body(set: &RecordSet) -> Result<Self, Error> {
        let mut properties = RecordSetProperties {
            ttl: Some(set.ttl),
            ..Default::default()
        };

        match &set.data {
            RecordSetData::A(addresses) => {
                properties.a_records = Some(
                    addresses
                        .iter()
                        .map(|a| ARecord {
                            ipv4_address: a.clone(),
                        })
                        .collect(),
                );
            }
            RecordSetData::Aaaa(addresses) => {
                properties.aaaa_records = Some(
                    addresses
                        .iter()
                        .map(|a| AaaaRecord {
                            ipv6_address: a.clone(),
                        })
                        .collect(),
                );
            }
            RecordSetData::Ns(targets) => {
                properties.ns_records = Some(
                    targets
                        .iter()
                        .map(|t| NsRecord { nsdname: t.clone() })
                        .collect(),
                );
            }
            RecordSetData::Cname(target) => {
                properties.cname_record = Some(CnameRecord {
                    cname: target.clone(),
                });
            }
            RecordSetData::Soa(_) | RecordSetData::Alias(_) | RecordSetData::Unsupported(_) => {
                return Err(Error::unsupported(set.record_type().as_str()));
            }
        }

        Ok(Self {
            name: None,
            resource_type: None,
            properties,
        })
    }
}
