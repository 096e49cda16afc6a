//! CSV backend integration tests
//!
//! The record store over table files: values go to disk as text and come
//! back through the cell decode rule.

#[cfg(test)]
mod tests {
    use crate::common::{BatchFactory, LogFactory, csv_store};
    use annotrack::config::StorageConfig;
    use annotrack::core::models::log::FrameMark;
    use annotrack::core::store::{RecordStore, StoreOptions};
    use annotrack::storage;
    use annotrack::{Batch, Log};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_open_creates_header_rows() {
        let dir = TempDir::new().unwrap();
        let _store = csv_store(dir.path()).await;

        let batches = std::fs::read_to_string(dir.path().join("Batches.csv")).unwrap();
        assert_eq!(
            batches,
            "id,name,sensor,totalFrames,completed,startFrame,endFrame,currentFrame,status,startDate,delivered,deliveredDate,paid,paidDate\n"
        );

        let logs = std::fs::read_to_string(dir.path().join("Logs.csv")).unwrap();
        assert_eq!(
            logs,
            "id,date,batchId,batchName,annotator,workType,frames,startFrame,endFrame\n"
        );
    }

    #[tokio::test]
    async fn test_records_round_trip_through_files() {
        let dir = TempDir::new().unwrap();
        let store = csv_store(dir.path()).await;

        let batch = BatchFactory::delivered("1");
        let log = LogFactory::create("l1", "1");
        store.add(batch.clone()).await.unwrap();
        store.add(log.clone()).await.unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.batches, vec![batch]);
        assert_eq!(all.logs, vec![log]);
    }

    #[tokio::test]
    async fn test_data_survives_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = csv_store(dir.path()).await;
            store.add(BatchFactory::running("4", 200)).await.unwrap();
            store.add(LogFactory::review("l1", "4")).await.unwrap();
        }

        let store = csv_store(dir.path()).await;
        let all = store.list_all().await.unwrap();
        assert_eq!(all.batches, vec![BatchFactory::running("4", 200)]);
        assert_eq!(all.logs, vec![LogFactory::review("l1", "4")]);
    }

    #[tokio::test]
    async fn test_booleans_are_written_as_literals() {
        let dir = TempDir::new().unwrap();
        let store = csv_store(dir.path()).await;
        store.add(BatchFactory::delivered("9")).await.unwrap();

        let content = std::fs::read_to_string(dir.path().join("Batches.csv")).unwrap();
        let row = content.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "9,10000_11000,lidar,1000,1000,10000,11000,11000,completed,,TRUE,2025-02-01,FALSE,"
        );
    }

    #[tokio::test]
    async fn test_hand_edited_file_is_decoded() {
        let dir = TempDir::new().unwrap();
        let _store = csv_store(dir.path()).await;

        // as exported from a spreadsheet: numbers and flags as text, a blank
        // row, and a free-text frame mark
        std::fs::write(
            dir.path().join("Logs.csv"),
            "id,date,batchId,batchName,annotator,workType,frames,startFrame,endFrame\n\
             7,2025-01-10,3,10000_11000,ana,,250,10000,end\n\
             ,,,,,,,,\n",
        )
        .unwrap();

        let store = csv_store(dir.path()).await;
        let logs = store.list::<Log>().await.unwrap();
        assert_eq!(logs.len(), 1);

        let log = &logs[0];
        assert_eq!(log.id, "7");
        assert_eq!(log.date, "2025-01-10");
        assert_eq!(log.batch_id, "3");
        assert_eq!(log.frames, 250);
        assert_eq!(log.start_frame, FrameMark::Frame(10000));
        assert_eq!(log.end_frame, FrameMark::Text("end".to_string()));
    }

    #[tokio::test]
    async fn test_cascade_rewrites_both_files() {
        let dir = TempDir::new().unwrap();
        let store = csv_store(dir.path()).await;
        store.add(BatchFactory::create("1")).await.unwrap();
        store.add(BatchFactory::create("2")).await.unwrap();
        store.add(LogFactory::create("a", "1")).await.unwrap();
        store.add(LogFactory::create("b", "2")).await.unwrap();
        store.add(LogFactory::create("c", "1")).await.unwrap();

        store.delete_batch_cascade("1").await.unwrap();

        let store = csv_store(dir.path()).await;
        let all = store.list_all().await.unwrap();
        assert_eq!(all.batches.len(), 1);
        assert_eq!(all.logs.len(), 1);
        assert_eq!(all.logs[0].id, "b");
    }

    #[tokio::test]
    async fn test_seed_defaults_through_configured_backend() {
        let dir = TempDir::new().unwrap();
        let config = StorageConfig {
            backend: "csv".to_string(),
            data_dir: dir.path().join("tables").to_string_lossy().into_owned(),
            ..Default::default()
        };

        let sheets = storage::open(&config).await.unwrap();
        let store = RecordStore::open(sheets, StoreOptions::default())
            .await
            .unwrap();
        assert_eq!(store.seed_defaults().await.unwrap(), 10);

        let batches = store.list::<Batch>().await.unwrap();
        let ids: Vec<&str> = batches.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4", "7", "2", "5", "8", "3", "6", "9", "10"]);
        assert!(dir.path().join("tables").join("Batches.csv").exists());
    }
}
