//! Energy from a power meter trace: one wattage value per line, sampled
//! at a fixed period.

use std::{io::Read, path::Path};

use crate::{common, error::*, models::PowerReport};

/// Integrate a trace of wattage samples taken every `interval_s` seconds.
///
/// Empty and whitespace-only lines carry no sample and are passed over.
/// Any other line that is not a single bare float aborts the whole run.
pub fn integrate_power<R: Read>(reader: R, interval_s: f64) -> Result<PowerReport, RError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut report = PowerReport::default();
    for res in rdr.records() {
        let rec = res.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(0);
            new_rerr!(PARSE_FAILURE, "Bad power sample at line {}: {}", line, e)
        })?;
        let line = rec.position().map(|p| p.line()).unwrap_or(0);

        if rec.len() == 1 && rec[0].is_empty() {
            continue;
        }
        if rec.len() != 1 {
            throw_rerr!(
                PARSE_FAILURE,
                "Bad power sample at line {}: expected one value, found {}",
                line,
                rec.len()
            );
        }

        let watt: f64 = rec[0].parse().map_err(|e| {
            new_rerr!(
                PARSE_FAILURE,
                "Bad power sample at line {}: `{}`: {}",
                line,
                &rec[0],
                e
            )
        })?;
        report.total_wh += common::watt_sample_to_wh(watt, interval_s);
        report.samples += 1;
    }

    log::info!("Integrated {} power samples", report.samples);
    Ok(report)
}

pub fn integrate_power_from<P: AsRef<Path>>(
    path: P,
    interval_s: f64,
) -> Result<PowerReport, RError> {
    integrate_power(common::open_log(path)?, interval_s)
}
