use std::{io::Write, path::PathBuf};

use crate::{
    diskstats,
    error::*,
    host,
    models::{DiskDelta, EnergyReport, PowerReport},
    power,
    process::{self, CmdlineFilter},
};

pub fn disk_report(delta: &DiskDelta) -> String {
    format!(
        "Write operations: {}\nBytes written: {} bytes = {:.4} TB",
        delta.writes,
        delta.bytes,
        delta.terabytes()
    )
}

pub fn power_report(report: &PowerReport) -> String {
    format!("Total Energy Consumption: {:.4} Wh", report.total_wh)
}

pub fn host_report(report: &EnergyReport) -> String {
    format!("Total host energy: {:.6} kWh", report.kwh())
}

/// `chia` reports as "Chia Energy Consumption (kWh): ...".
pub fn process_report(report: &EnergyReport, pattern: &str) -> String {
    let mut chars = pattern.chars();
    let label: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::from("Process"),
    };
    format!("{} Energy Consumption (kWh): {:.6}", label, report.kwh())
}

fn emit<W: Write>(out: &mut W, line: &str) -> Result<(), RError> {
    writeln!(out, "{}", line).map_err(|e| new_rerr!(IOERR, "{}", e))
}

/// A disk log that cannot be parsed is reported on `out` and is not an
/// error of the run.
pub fn run_diskstats<W: Write>(
    out: &mut W,
    file: PathBuf,
    device: Option<String>,
    sector_size: u64,
) -> Result<(), RError> {
    match diskstats::disk_delta_from(file, device.as_deref(), sector_size) {
        Ok(delta) => emit(out, &disk_report(&delta)),
        Err(e) if e.kind() == PARSE_FAILURE => emit(out, &format!("Error: {}", e.msg())),
        Err(e) => Err(e),
    }
}

pub fn run_power<W: Write>(out: &mut W, file: PathBuf, interval_s: f64) -> Result<(), RError> {
    let report = power::integrate_power_from(file, interval_s)?;
    emit(out, &power_report(&report))
}

pub fn run_host<W: Write>(out: &mut W, file: PathBuf) -> Result<(), RError> {
    let report = host::integrate_host_from(file)?;
    emit(out, &host_report(&report))
}

pub fn run_process<W: Write>(
    out: &mut W,
    file: PathBuf,
    pattern: String,
    interval_s: f64,
) -> Result<(), RError> {
    let filter = CmdlineFilter::new(&pattern);
    let report = process::integrate_process_from(file, &filter, interval_s)?;
    emit(out, &process_report(&report, &pattern))
}
