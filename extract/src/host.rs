//! Whole-host energy from a scaphandre json stream.

use std::{io::BufRead, path::Path};

use crate::{
    common,
    error::*,
    models::{EnergyReport, HostRecord},
};

/// Integrate host power over the timestamps of consecutive records.
///
/// Each record contributes `consumption * (timestamp - previous timestamp)`.
/// The first record only seeds the previous timestamp. Lines that fail to
/// parse are logged, counted in `skipped` and do not move the previous
/// timestamp.
pub fn integrate_host<R: BufRead>(reader: R) -> Result<EnergyReport, RError> {
    let mut report = EnergyReport::default();
    let mut prev_time: Option<f64> = None;

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| new_rerr!(IOERR, "{}", e))?;
        let record: HostRecord = match serde_json::from_str(&line) {
            Ok(record) => record,
            Err(e) => {
                ignore_rerr!(new_rerr!(
                    MALFORMED_RECORD,
                    "Skipping line {} due to error: {}",
                    idx + 1,
                    e
                ));
                report.skipped += 1;
                continue;
            }
        };

        let host = record.host;
        log::debug!("host at {}: {} uW", host.timestamp, host.consumption);
        if let Some(prev) = prev_time {
            report.total_uj += host.consumption * (host.timestamp - prev);
        }
        prev_time = Some(host.timestamp);
        report.records += 1;
    }

    log::info!(
        "Integrated {} host records ({} skipped)",
        report.records,
        report.skipped
    );
    Ok(report)
}

pub fn integrate_host_from<P: AsRef<Path>>(path: P) -> Result<EnergyReport, RError> {
    integrate_host(common::open_log(path)?)
}
