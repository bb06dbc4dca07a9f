//! Metrics report output.
//!
//! Two formats, matching what downstream analysis scripts expect:
//!
//! - CSV: `trips.csv` (one row per completed trip) and `ticks.csv` (one row
//!   per tick with throughput and peak street load).
//! - JSON: a single summary object with the run aggregates.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;
use serde::Serialize;

use crate::{Metrics, SimResult};

/// Write `trips.csv` and `ticks.csv` for a finished run into `dir`.
///
/// `dir` must already exist.
pub fn write_csv_report(metrics: &Metrics, dir: &Path) -> SimResult<()> {
    let mut trips: Writer<File> = Writer::from_path(dir.join("trips.csv"))?;
    trips.write_record(["trip", "travel_time_steps"])?;
    for (i, &steps) in metrics.trip_times().iter().enumerate() {
        trips.write_record(&[i.to_string(), steps.to_string()])?;
    }
    trips.flush()?;

    let mut ticks: Writer<File> = Writer::from_path(dir.join("ticks.csv"))?;
    ticks.write_record(["tick", "arrivals", "peak_street_load"])?;
    for (i, &arrivals) in metrics.throughput_per_tick().iter().enumerate() {
        let peak = metrics.edge_load_history()[i]
            .iter()
            .fold(0.0f64, |m, &l| m.max(l));
        ticks.write_record(&[(i + 1).to_string(), arrivals.to_string(), peak.to_string()])?;
    }
    ticks.flush()?;
    Ok(())
}

/// The run aggregates serialized by [`write_json_summary`].
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub departures: u32,
    pub total_throughput: u32,
    pub average_trip_time: f64,
    pub max_edge_load: f64,
}

impl RunSummary {
    pub fn from_metrics(metrics: &Metrics) -> Self {
        Self {
            ticks: metrics.current_tick(),
            departures: metrics.departures(),
            total_throughput: metrics.total_throughput(),
            average_trip_time: metrics.average_trip_time(),
            max_edge_load: metrics.max_edge_load(),
        }
    }
}

/// Write `summary.json` for a finished run into `dir`.
pub fn write_json_summary(metrics: &Metrics, dir: &Path) -> SimResult<()> {
    let summary = RunSummary::from_metrics(metrics);
    let mut file = File::create(dir.join("summary.json"))?;
    file.write_all(serde_json::to_string_pretty(&summary)?.as_bytes())?;
    Ok(())
}
