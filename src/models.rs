//! Record types read from and written to disk.
//!
//! Input records follow the traceroute result layout (`prb_id`, `timestamp`,
//! nested `result` hops, `dst_name`); fields the pipeline does not use are
//! ignored on deserialization.

use serde::{Deserialize, Serialize};

use crate::config::UNKNOWN;

/// Probe identifier as assigned by the measurement platform.
pub type ProbeId = u64;

/// One traceroute result as loaded from the input file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InputRecord {
    pub prb_id: ProbeId,
    pub timestamp: i64,
    /// Hops in path order. The last entry is the one closest to the destination.
    #[serde(default)]
    pub result: Vec<HopResult>,
    #[serde(default)]
    pub dst_name: String,
}

/// A single hop and the replies collected for it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HopResult {
    pub hop: u32,
    /// Missing when the hop carries only an `error` field.
    #[serde(default)]
    pub result: Vec<Sample>,
}

/// One reply (or timeout) for a hop.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Sample {
    /// Round-trip time in milliseconds; absent for timeouts (`"x": "*"`).
    #[serde(default)]
    pub rtt: Option<f64>,
}

/// Where a probe is located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationInfo {
    pub country: String,
    pub continent: String,
}

impl LocationInfo {
    /// Location used whenever a lookup fails.
    pub fn unknown() -> Self {
        Self {
            country: UNKNOWN.to_string(),
            continent: UNKNOWN.to_string(),
        }
    }

    /// Builds a location from a country code, deriving the continent from the static table.
    pub fn from_country(country: impl Into<String>) -> Self {
        let country = country.into();
        let continent = crate::continent::continent_for(&country)
            .unwrap_or(UNKNOWN)
            .to_string();
        Self { country, continent }
    }

    pub fn is_unknown(&self) -> bool {
        self.country == UNKNOWN
    }
}

impl Default for LocationInfo {
    fn default() -> Self {
        Self::unknown()
    }
}

/// One output record. Field order matches the serialized document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub prb_id: ProbeId,
    pub timestamp: i64,
    pub hops: usize,
    pub destination: String,
    pub country: String,
    pub continent: String,
    pub rtt_destino: f64,
}

impl EnrichedRecord {
    /// Derives every locally computable field and leaves the location unknown.
    pub fn from_input(record: &InputRecord) -> Self {
        let destination = if record.dst_name.is_empty() {
            UNKNOWN.to_string()
        } else {
            record.dst_name.clone()
        };
        let unknown = LocationInfo::unknown();

        Self {
            prb_id: record.prb_id,
            timestamp: record.timestamp,
            hops: record.result.len(),
            destination,
            country: unknown.country,
            continent: unknown.continent,
            rtt_destino: crate::rtt::reduce(&record.result),
        }
    }

    pub fn set_location(&mut self, location: LocationInfo) {
        self.country = location.country;
        self.continent = location.continent;
    }
}
