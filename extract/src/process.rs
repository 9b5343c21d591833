//! Energy attributed to the processes whose command line matches a
//! pattern, from a scaphandre json stream.

use std::{io::BufRead, path::Path};

use crate::{
    common,
    error::*,
    models::{Consumer, EnergyReport, ProcessRecord},
};

/// Case-insensitive command line filter.
#[derive(Debug, Clone)]
pub struct CmdlineFilter {
    pattern: String,
}

impl CmdlineFilter {
    pub fn new<S: AsRef<str>>(pattern: S) -> Self {
        Self {
            pattern: pattern.as_ref().to_lowercase(),
        }
    }

    pub fn matches(&self, consumer: &Consumer) -> bool {
        consumer.cmdline.to_lowercase().contains(&self.pattern)
    }
}

/// Sum the power of matching consumers in each record and hold it for
/// `interval_s` seconds.
///
/// Malformed lines are logged and counted in `skipped`. Records without
/// matching consumers still count in `records`.
pub fn integrate_process<R: BufRead>(
    reader: R,
    filter: &CmdlineFilter,
    interval_s: f64,
) -> Result<EnergyReport, RError> {
    let mut report = EnergyReport::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| new_rerr!(IOERR, "{}", e))?;
        let record: ProcessRecord = match serde_json::from_str(line.trim()) {
            Ok(record) => record,
            Err(e) => {
                ignore_rerr!(new_rerr!(
                    MALFORMED_RECORD,
                    "Skipping invalid JSON line {}: {}",
                    idx + 1,
                    e
                ));
                report.skipped += 1;
                continue;
            }
        };

        let interval_uw: f64 = record
            .consumers
            .iter()
            .filter(|c| filter.matches(c))
            .map(|c| c.consumption)
            .sum();
        log::debug!("line {}: {} uW matched", idx + 1, interval_uw);

        report.total_uj += interval_uw * interval_s;
        report.records += 1;
    }

    log::info!(
        "Integrated {} process records ({} skipped)",
        report.records,
        report.skipped
    );
    Ok(report)
}

pub fn integrate_process_from<P: AsRef<Path>>(
    path: P,
    filter: &CmdlineFilter,
    interval_s: f64,
) -> Result<EnergyReport, RError> {
    integrate_process(common::open_log(path)?, filter, interval_s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::capture;

    const RECORD: &str = r#"{"host":{"consumption":41000000.0,"timestamp":1.0},"consumers":[{"exe":"/usr/bin/chia_harvester","cmdline":"chia_harvester","pid":812,"consumption":500000},{"exe":"/usr/bin/other","cmdline":"other","pid":9,"consumption":999999}]}"#;

    fn chia() -> CmdlineFilter {
        CmdlineFilter::new(common::DEFAULT_PATTERN)
    }

    #[test]
    fn only_matching_consumers_count() {
        let report = integrate_process(RECORD.as_bytes(), &chia(), 2.0).unwrap();
        assert_eq!(report.total_uj, 1_000_000.0);
        assert_eq!(report.records, 1);
    }

    #[test]
    fn pattern_is_case_insensitive() {
        let line = r#"{"consumers":[{"cmdline":"/opt/CHIA/bin/Chia plots create","consumption":10},{"cmdline":"python chia_farmer","consumption":5}]}"#;
        let report = integrate_process(line.as_bytes(), &CmdlineFilter::new("ChIa"), 2.0).unwrap();
        assert_eq!(report.total_uj, 30.0);
    }

    #[test]
    fn missing_keys_default_to_nothing() {
        let input = "{}\n{\"consumers\":[{\"pid\":1}]}\n{\"consumers\":[{\"cmdline\":\"chia\"}]}\n";
        let report = integrate_process(input.as_bytes(), &chia(), 2.0).unwrap();
        assert_eq!(report.total_uj, 0.0);
        assert_eq!(report.records, 3);
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn accumulates_across_records() {
        let input = format!("{RECORD}\n{RECORD}\n{RECORD}\n");
        let report = integrate_process(input.as_bytes(), &chia(), 2.0).unwrap();
        assert_eq!(report.total_uj, 3_000_000.0);
        assert!((report.kwh() - 3e6 / 3.6e12).abs() < 1e-18);
    }

    #[test]
    fn corrupt_lines_are_skipped() {
        let clean = format!("{RECORD}\n{RECORD}\n");
        let dirty = format!("{RECORD}\n{{\"consumers\": [\n{RECORD}\nnot json\n");

        let (clean, clean_warnings) =
            capture::warnings(|| integrate_process(clean.as_bytes(), &chia(), 2.0).unwrap());
        let (dirty, dirty_warnings) =
            capture::warnings(|| integrate_process(dirty.as_bytes(), &chia(), 2.0).unwrap());
        assert_eq!(clean.total_uj, dirty.total_uj);
        assert_eq!(dirty.skipped, 2);

        assert!(clean_warnings.is_empty());
        assert_eq!(dirty_warnings.len(), 2);
        assert!(dirty_warnings[0].contains("Skipping invalid JSON line 2"));
        assert!(dirty_warnings[1].contains("Skipping invalid JSON line 4"));
    }

    #[test]
    fn reads_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(common::SCAPHANDRE_LOG);
        std::fs::write(&path, format!("{RECORD}\n")).unwrap();
        let report = integrate_process_from(&path, &chia(), 4.0).unwrap();
        assert_eq!(report.total_uj, 2_000_000.0);
    }
}
