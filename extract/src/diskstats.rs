//! Write volume of a device between the first and last sample of a
//! disk-stats log.
//!
//! Each log line is a snapshot of the kernel's cumulative per-device
//! counters, prefixed by whatever the recording script adds. Only the
//! first and the last line matter.

use std::{io::BufRead, path::Path};

use crate::{
    common,
    error::*,
    models::{DiskDelta, DiskSample},
};

// 0-indexed whitespace fields
pub const WRITES_FIELD: usize = 9;
pub const SECTORS_FIELD: usize = 11;

fn parse_field(fields: &[&str], which: usize) -> Option<u64> {
    fields.get(which)?.parse().ok()
}

/// Parse the writes-completed and sectors-written counters of one line.
pub fn parse_sample(line: &str) -> Option<DiskSample> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    log::debug!("disk-stats fields: {:?}", fields);

    Some(DiskSample {
        writes_completed: parse_field(&fields, WRITES_FIELD)?,
        sectors_written: parse_field(&fields, SECTORS_FIELD)?,
    })
}

fn names_device(line: &str, device: &str) -> bool {
    line.split_whitespace()
        .take(WRITES_FIELD)
        .any(|field| field == device)
}

/// Compute the counter deltas between the first and last line of `reader`.
///
/// With `device`, lines not naming that device are ignored. Blank lines
/// are always ignored. A single matching line yields a zero delta.
pub fn disk_delta<R: BufRead>(
    reader: R,
    device: Option<&str>,
    sector_size: u64,
) -> Result<DiskDelta, RError> {
    let mut initial: Option<String> = None;
    let mut last: Option<String> = None;

    for line in reader.lines() {
        let line = line.map_err(|e| new_rerr!(IOERR, "{}", e))?;
        if line.trim().is_empty() {
            continue;
        }
        if let Some(dev) = device {
            if !names_device(&line, dev) {
                continue;
            }
        }

        if initial.is_none() {
            initial = Some(line);
        } else {
            last = Some(line);
        }
    }

    let label = device.unwrap_or(common::DEFAULT_DEVICE);
    let Some(initial) = initial else {
        match device {
            Some(dev) => throw_rerr!(NOT_FOUND, "No disk stats for device `{}`", dev),
            None => throw_rerr!(
                PARSE_FAILURE,
                "Could not parse initial or final stats for {}",
                label
            ),
        }
    };
    let last = last.unwrap_or_else(|| initial.clone());

    let (Some(init), Some(fin)) = (parse_sample(&initial), parse_sample(&last)) else {
        throw_rerr!(
            PARSE_FAILURE,
            "Could not parse initial or final stats for {}",
            label
        );
    };

    let (Some(writes), Some(sectors)) = (
        fin.writes_completed.checked_sub(init.writes_completed),
        fin.sectors_written.checked_sub(init.sectors_written),
    ) else {
        throw_rerr!(
            INVALID_VALUE,
            "Disk counters for {} went backwards ({:?} -> {:?})",
            label,
            init,
            fin
        );
    };

    let Some(bytes) = sectors.checked_mul(sector_size) else {
        throw_rerr!(
            INVALID_VALUE,
            "{} sectors of {} bytes overflow a byte count",
            sectors,
            sector_size
        );
    };

    Ok(DiskDelta {
        writes,
        sectors,
        bytes,
    })
}

pub fn disk_delta_from<P: AsRef<Path>>(
    path: P,
    device: Option<&str>,
    sector_size: u64,
) -> Result<DiskDelta, RError> {
    disk_delta(common::open_log(path)?, device, sector_size)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn line(dev: &str, writes: u64, sectors: u64) -> String {
        format!("Mon 12:00:00 8 5 {dev} 4021 17 80211 5310 {writes} 88 {sectors} 930 0 6120 6240\n")
    }

    fn delta(input: &str, device: Option<&str>) -> Result<DiskDelta, RError> {
        disk_delta(Cursor::new(input.to_owned()), device, common::SECTOR_SIZE)
    }

    #[test]
    fn parses_fixed_fields() {
        let sample = parse_sample(&line("sda5", 100, 200)).unwrap();
        assert_eq!(
            sample,
            DiskSample {
                writes_completed: 100,
                sectors_written: 200
            }
        );
        assert!(parse_sample("8 5 sda5 1 2 3").is_none());
        assert!(parse_sample("a b c d e f g h i x k 12").is_none());
    }

    #[test]
    fn first_and_last_line() {
        let input = line("sda5", 100, 200) + &line("sda5", 120, 250) + &line("sda5", 150, 300);
        let d = delta(&input, None).unwrap();
        assert_eq!(d.writes, 50);
        assert_eq!(d.sectors, 100);
        assert_eq!(d.bytes, 51200);
        assert!((d.terabytes() - 5.12e-8).abs() < 1e-20);
    }

    #[test]
    fn single_line_is_zero_delta() {
        let d = delta(&line("sda5", 100, 200), None).unwrap();
        assert_eq!(
            d,
            DiskDelta {
                writes: 0,
                sectors: 0,
                bytes: 0
            }
        );
    }

    #[test]
    fn trailing_blank_lines_ignored() {
        let input = line("sda5", 1, 2) + &line("sda5", 3, 6) + "\n  \n";
        assert_eq!(delta(&input, None).unwrap().writes, 2);
    }

    #[test]
    fn non_numeric_field_is_parse_failure() {
        let input = line("sda5", 100, 200) + "Mon 12:00:01 8 5 sda5 1 1 1 1 oops 1 300\n";
        let err = delta(&input, None).unwrap_err();
        assert_eq!(err.kind(), RErrorKind::ParseFailure);
        assert_eq!(err.msg(), "Could not parse initial or final stats for sda5");
    }

    #[test]
    fn empty_log_is_parse_failure() {
        let err = delta("", None).unwrap_err();
        assert_eq!(err.kind(), RErrorKind::ParseFailure);
        assert_eq!(err.msg(), "Could not parse initial or final stats for sda5");
    }

    #[test]
    fn device_filter_picks_matching_lines() {
        let input = line("sda5", 100, 200)
            + &line("sdb1", 5, 5)
            + &line("sda5", 110, 260)
            + &line("sdb1", 7, 7);

        // physical first/last spans two devices
        let err = delta(&input, None).unwrap_err();
        assert_eq!(err.kind(), RErrorKind::InvalidValue);

        let d = delta(&input, Some("sda5")).unwrap();
        assert_eq!(d.writes, 10);
        assert_eq!(d.bytes, 60 * 512);

        let err = delta(&input, Some("nvme0n1")).unwrap_err();
        assert_eq!(err.kind(), RErrorKind::NotFound);
    }

    #[test]
    fn counters_going_backwards() {
        let input = line("sda5", 150, 300) + &line("sda5", 100, 200);
        let err = delta(&input, None).unwrap_err();
        assert_eq!(err.kind(), RErrorKind::InvalidValue);
    }

    #[test]
    fn custom_sector_size() {
        let input = line("sda5", 0, 0) + &line("sda5", 1, 2);
        let d = disk_delta(Cursor::new(input), None, 4096).unwrap();
        assert_eq!(d.bytes, 8192);
    }

    #[test]
    fn reads_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(common::DISK_LOG);
        std::fs::write(&path, line("sda5", 100, 200) + &line("sda5", 150, 300)).unwrap();
        assert_eq!(disk_delta_from(&path, None, 512).unwrap().bytes, 51200);

        let err = disk_delta_from(dir.path().join("missing"), None, 512).unwrap_err();
        assert_eq!(err.kind(), RErrorKind::NotFound);
    }
}
