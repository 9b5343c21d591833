use std::{fs::File, io::BufReader, path::Path};

use crate::error::*;

// Kernel disk statistics always count 512-byte sectors, whatever the
// physical block size of the device.
pub const SECTOR_SIZE: u64 = 512;

pub const BYTES_PER_TB: f64 = 1e12;
pub const SECS_PER_HOUR: f64 = 3600.0;
// 1 kWh = 3.6e12 µJ (µW·s)
pub const UJ_PER_KWH: f64 = 3.6e12;

pub const DISK_LOG: &str = "chia_io.log";
pub const POWER_LOG: &str = "power_values.txt";
pub const SCAPHANDRE_LOG: &str = "scaphandre_json";

pub const DEFAULT_DEVICE: &str = "sda5";
pub const DEFAULT_PATTERN: &str = "chia";
// power meter sampling period
pub const POWER_INTERVAL_S: f64 = 0.01;
// each scaphandre json line covers one sampling period
pub const SCAPHANDRE_INTERVAL_S: f64 = 2.0;

#[inline]
pub fn bytes_to_tb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_TB
}

/// Energy of one sample held for `interval_s` seconds, in Wh.
#[inline]
pub fn watt_sample_to_wh(watt: f64, interval_s: f64) -> f64 {
    watt * interval_s / SECS_PER_HOUR
}

#[inline]
pub fn uj_to_kwh(uj: f64) -> f64 {
    uj / UJ_PER_KWH
}

pub(crate) fn map_io_err(e: std::io::Error, path: &Path) -> RError {
    match e.kind() {
        std::io::ErrorKind::NotFound => {
            new_rerr!(NOT_FOUND, "`{}`: {}", path.display(), e)
        }
        std::io::ErrorKind::PermissionDenied => {
            new_rerr!(NOT_ALLOWED, "`{}`: {}", path.display(), e)
        }
        _ => new_rerr!(IOERR, "`{}`: {}", path.display(), e),
    }
}

/// Open a measurement log for buffered reading.
pub fn open_log<P: AsRef<Path>>(path: P) -> Result<BufReader<File>, RError> {
    let path = path.as_ref();
    log::info!("Reading `{}`", path.display());
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| map_io_err(e, path))
}
