use serde::Deserialize;

use crate::common;

/// Cumulative write counters of one disk-stats line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DiskSample {
    pub writes_completed: u64,
    pub sectors_written: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskDelta {
    pub writes: u64,
    pub sectors: u64,
    pub bytes: u64,
}

impl DiskDelta {
    pub fn terabytes(&self) -> f64 {
        common::bytes_to_tb(self.bytes)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PowerReport {
    pub samples: u64,
    pub total_wh: f64,
}

// scaphandre json exporter, one object per line:
// {"host": {"timestamp": 1700000000.5, "consumption": 41000000.0, ...}, "consumers": [...]}
#[derive(Debug, Clone, Deserialize)]
pub struct HostRecord {
    pub host: HostSample,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HostSample {
    /// seconds
    pub timestamp: f64,
    /// µW
    pub consumption: f64,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProcessRecord {
    #[serde(default)]
    pub consumers: Vec<Consumer>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct Consumer {
    #[serde(default)]
    pub cmdline: String,
    /// µW
    #[serde(default)]
    pub consumption: f64,
}

/// Result of integrating a scaphandre stream.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct EnergyReport {
    pub total_uj: f64, // µJ == µW·s
    pub records: u64,
    pub skipped: u64,
}

impl EnergyReport {
    pub fn kwh(&self) -> f64 {
        common::uj_to_kwh(self.total_uj)
    }
}
