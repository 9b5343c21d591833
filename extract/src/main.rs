use clap::{Parser, Subcommand};
use std::path::PathBuf;

use energy_extract::{common, tool};

#[derive(Debug, Parser)]
#[command(version = "0.1.0")]
#[command(name = "energy-extract")]
#[command(about = "Energy and disk I/O figures from workload measurement logs")]
struct Arg {
    #[command(subcommand)]
    tool: Tool,
}

#[derive(Debug, Subcommand)]
enum Tool {
    /// Write operations and bytes written between the first and last disk-stats sample
    Diskstats {
        /// Disk-stats log, one snapshot per line
        #[arg(default_value = common::DISK_LOG)]
        file: PathBuf,
        #[arg(
            short = 'd',
            long = "device",
            value_name = "NAME",
            help = "Only consider lines of this device (e.g. sda5)"
        )]
        device: Option<String>,
        #[arg(
            long = "sector-size",
            default_value_t = common::SECTOR_SIZE,
            value_parser = clap::value_parser!(u64).range(1..),
            help = "Bytes per sector"
        )]
        sector_size: u64,
    },
    /// Energy of a power meter trace, one wattage value per line
    Power {
        /// Power trace
        #[arg(default_value = common::POWER_LOG)]
        file: PathBuf,
        #[arg(
            short = 'i',
            long = "interval",
            value_name = "SECOND",
            default_value_t = common::POWER_INTERVAL_S,
            value_parser = parse_interval,
            help = "Sampling period of the trace"
        )]
        interval: f64,
    },
    /// Host energy from a scaphandre json stream
    Host {
        /// Scaphandre json output, one object per line
        #[arg(default_value = common::SCAPHANDRE_LOG)]
        file: PathBuf,
    },
    /// Energy of the processes whose command line matches a pattern
    ///
    /// The pattern is matched case-insensitively anywhere in the command line.
    /// Every json line is assumed to cover one sampling interval.
    Process {
        /// Scaphandre json output, one object per line
        #[arg(default_value = common::SCAPHANDRE_LOG)]
        file: PathBuf,
        #[arg(
            short = 'p',
            long = "pattern",
            default_value = common::DEFAULT_PATTERN,
            help = "Command line substring to match"
        )]
        pattern: String,
        #[arg(
            short = 'i',
            long = "interval",
            value_name = "SECOND",
            default_value_t = common::SCAPHANDRE_INTERVAL_S,
            value_parser = parse_interval,
            help = "Interval covered by each json line"
        )]
        interval: f64,
    },
}

fn parse_interval(s: &str) -> Result<f64, String> {
    let secs: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(format!("interval must be a positive number of seconds, got {}", s));
    }
    Ok(secs)
}

fn main() {
    // skipped-line diagnostics share stdout with the report
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "warn");
    }
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stdout)
        .format_timestamp(None)
        .init();
    let arg = Arg::parse();
    let mut out = std::io::stdout();

    if let Err(e) = match arg.tool {
        Tool::Diskstats {
            file,
            device,
            sector_size,
        } => tool::run_diskstats(&mut out, file, device, sector_size),
        Tool::Power { file, interval } => tool::run_power(&mut out, file, interval),
        Tool::Host { file } => tool::run_host(&mut out, file),
        Tool::Process {
            file,
            pattern,
            interval,
        } => tool::run_process(&mut out, file, pattern, interval),
    } {
        eprintln!("ERROR:{}", e);
        std::process::exit(1);
    }

    std::process::exit(0);
}
