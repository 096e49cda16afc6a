//! Test fixtures and data factories
//!
//! Provides factory methods for creating test data with sensible defaults.

use annotrack::core::models::log::FrameMark;
use annotrack::{Batch, BatchStatus, Log};

/// Factory for creating test batches
pub struct BatchFactory;

impl BatchFactory {
    /// A lidar batch over frames 10000..11000
    pub fn create(id: &str) -> Batch {
        Batch {
            id: id.to_string(),
            name: "10000_11000".to_string(),
            sensor: "lidar".to_string(),
            total_frames: 1000,
            start_frame: 10000,
            end_frame: 11000,
            current_frame: 10000,
            ..Default::default()
        }
    }

    /// A batch in progress
    pub fn running(id: &str, completed: u64) -> Batch {
        let mut batch = Self::create(id);
        batch.status = BatchStatus::Running;
        batch.completed = completed;
        batch.current_frame = batch.start_frame + completed as i64;
        batch.start_date = "2025-01-15".to_string();
        batch
    }

    /// A finished, delivered batch
    pub fn delivered(id: &str) -> Batch {
        let mut batch = Self::create(id);
        batch.status = BatchStatus::Completed;
        batch.completed = batch.total_frames;
        batch.current_frame = batch.end_frame;
        batch.delivered = true;
        batch.delivered_date = "2025-02-01".to_string();
        batch
    }
}

/// Factory for creating test logs
pub struct LogFactory;

impl LogFactory {
    /// A production log of 100 frames against `batch_id`
    pub fn create(id: &str, batch_id: &str) -> Log {
        Log {
            id: id.to_string(),
            date: "2025-01-16".to_string(),
            batch_id: batch_id.to_string(),
            batch_name: "10000_11000".to_string(),
            annotator: "mia".to_string(),
            frames: 100,
            start_frame: FrameMark::Frame(10000),
            end_frame: FrameMark::Frame(10100),
            ..Default::default()
        }
    }

    /// A review log without frame marks
    pub fn review(id: &str, batch_id: &str) -> Log {
        let mut log = Self::create(id, batch_id);
        log.work_type = "review".to_string();
        log.start_frame = FrameMark::Empty;
        log.end_frame = FrameMark::Empty;
        log
    }
}
