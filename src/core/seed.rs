//! Default batch set used to initialize an empty tracker

use crate::core::models::{Batch, BatchStatus};

/// (id, name, sensor, total, completed, start, end, current, status, start date)
type SeedRow = (
    &'static str,
    &'static str,
    &'static str,
    u64,
    u64,
    i64,
    i64,
    i64,
    BatchStatus,
    &'static str,
);

fn seed_rows() -> Vec<SeedRow> {
    use BatchStatus::*;

    vec![
        ("1", "10000_13000", "camera1", 3000, 3000, 10000, 13000, 13000, Completed, "2025-01-10"),
        ("4", "6400_7000", "camera1", 600, 200, 6400, 7000, 6600, Running, "2025-01-15"),
        ("7", "7000_10000", "camera1", 3000, 0, 7000, 10000, 7000, NotStarting, ""),
        ("2", "10000_12000", "camera0", 2000, 2000, 10000, 12000, 12000, Completed, "2025-01-08"),
        ("5", "12000_13000", "camera0", 1000, 0, 12000, 13000, 12000, Running, "2025-01-18"),
        ("8", "6400_10000", "camera0", 3600, 0, 6400, 10000, 6400, NotStarting, ""),
        ("3", "10000_11000", "lidar", 1000, 1000, 10000, 11000, 11000, Completed, "2025-01-05"),
        ("6", "11000_12000", "lidar", 1000, 0, 11000, 12000, 11000, Running, "2025-01-17"),
        ("9", "12000_13000", "lidar", 1000, 0, 12000, 13000, 12000, NotStarting, ""),
        ("10", "7000_10000", "lidar", 3000, 0, 7000, 10000, 7000, NotStarting, ""),
    ]
}

/// The ten default batches, in table order
pub fn default_batches() -> Vec<Batch> {
    seed_rows()
        .into_iter()
        .map(
            |(id, name, sensor, total, completed, start, end, current, status, start_date)| Batch {
                id: id.to_string(),
                name: name.to_string(),
                sensor: sensor.to_string(),
                total_frames: total,
                completed,
                start_frame: start,
                end_frame: end,
                current_frame: current,
                status,
                start_date: start_date.to_string(),
                ..Default::default()
            },
        )
        .collect()
}
