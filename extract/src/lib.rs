//! Energy and I/O figures from the logs recorded around a workload run:
//! kernel disk-stats snapshots, power meter traces and scaphandre json
//! telemetry.

#[macro_use]
mod error;
pub use error::*;

pub mod common;
pub mod diskstats;
pub mod host;
pub mod models;
pub mod power;
pub mod process;
pub mod tool;
