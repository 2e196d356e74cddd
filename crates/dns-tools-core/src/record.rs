//! DNS record interchange model
//!
//! A [`DnsRecord`] is one row of the CSV interchange format: a fully
//! qualified owner name (no trailing dot), a TTL, a record type and a
//! type-specific data string.

use std::fmt;
use std::str::FromStr;

/// DNS record type mnemonic
///
/// Only A, AAAA, CNAME, NS and SOA are ever transformed. The other known
/// provider types are kept so they can be named in warnings; anything else
/// read from a CSV file ends up in [`RecordType::Other`].
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    AAAA,
    CNAME,
    NS,
    SOA,
    MX,
    PTR,
    SRV,
    TXT,
    CAA,
    Other(String),
}

impl RecordType {
    /// Types the uploader can create
    pub const UPLOADABLE: [RecordType; 3] = [RecordType::A, RecordType::AAAA, RecordType::CNAME];

    /// Upper-case mnemonic, e.g. `"AAAA"`
    pub fn as_str(&self) -> &str {
        match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::CNAME => "CNAME",
            RecordType::NS => "NS",
            RecordType::SOA => "SOA",
            RecordType::MX => "MX",
            RecordType::PTR => "PTR",
            RecordType::SRV => "SRV",
            RecordType::TXT => "TXT",
            RecordType::CAA => "CAA",
            RecordType::Other(s) => s,
        }
    }

    /// Parse a mnemonic; unknown tokens become [`RecordType::Other`]
    ///
    /// Matching is case-sensitive: `"a"` is not an A record.
    pub fn from_mnemonic(s: &str) -> Self {
        match s {
            "A" => RecordType::A,
            "AAAA" => RecordType::AAAA,
            "CNAME" => RecordType::CNAME,
            "NS" => RecordType::NS,
            "SOA" => RecordType::SOA,
            "MX" => RecordType::MX,
            "PTR" => RecordType::PTR,
            "SRV" => RecordType::SRV,
            "TXT" => RecordType::TXT,
            "CAA" => RecordType::CAA,
            other => RecordType::Other(other.to_string()),
        }
    }

    /// Whether the uploader can create record sets of this type
    pub fn is_uploadable(&self) -> bool {
        Self::UPLOADABLE.contains(self)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_mnemonic(s))
    }
}

/// One record of the interchange format
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DnsRecord {
    /// Fully qualified owner name without trailing dot
    pub name: String,
    /// Time-to-live in seconds
    pub ttl: u32,
    /// Record type
    pub record_type: RecordType,
    /// Type-specific data (address, target name or SOA tuple)
    pub data: String,
}

impl DnsRecord {
    pub fn new(
        name: impl Into<String>,
        ttl: u32,
        record_type: RecordType,
        data: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ttl,
            record_type,
            data: data.into(),
        }
    }
}

/// Renders the record as a CSV row without line terminator
impl fmt::Display for DnsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{};{};{};{}",
            self.name, self.ttl, self.record_type, self.data
        )
    }
}
