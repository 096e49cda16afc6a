//! Configuration integration tests
//!
//! Tests configuration loading from files and the resulting storage setup.

#[cfg(test)]
mod tests {
    use annotrack::config::{Config, LogFormat, ServiceConfig};
    use annotrack::server::AppState;
    use annotrack::{Batch, TrackerError};
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_full_config_file() {
        let file = write_config(
            r#"
server:
  host: "127.0.0.1"
  port: 8181
  workers: 2
  timeout: 10
  max_body_size: 65536
  endpoint: "/macros/s/tracker/exec"
  cors:
    enabled: true
    allowed_origins: ["https://tracker.example.com"]
storage:
  backend: csv
  data_dir: "/var/lib/annotrack"
  unique_ids: false
logging:
  level: "annotrack=debug"
  format: json
  access_log: false
"#,
        );

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.server().address(), "127.0.0.1:8181");
        assert_eq!(config.server().worker_count(), 2);
        assert_eq!(config.server().endpoint, "/macros/s/tracker/exec");
        assert!(!config.server().cors.allows_all_origins());
        assert_eq!(config.storage().data_dir, "/var/lib/annotrack");
        assert!(!config.storage().unique_ids);
        assert_eq!(config.logging().format, LogFormat::Json);
        assert!(!config.logging().access_log);
    }

    #[tokio::test]
    async fn test_partial_config_fills_defaults() {
        let file = write_config("storage:\n  backend: memory\n");

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.server().port, 8080);
        assert_eq!(config.server().endpoint, "/exec");
        assert!(config.storage().unique_ids);
        assert_eq!(config.logging().level, "info");
    }

    #[tokio::test]
    async fn test_malformed_yaml_is_config_error() {
        let file = write_config("server: [unclosed\n");

        let err = Config::from_file(file.path()).await.unwrap_err();
        assert!(matches!(err, TrackerError::Config(_)));
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[tokio::test]
    async fn test_zero_port_is_rejected() {
        let file = write_config("server:\n  port: 0\n");
        let err = Config::from_file(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("Port cannot be 0"));
    }

    #[tokio::test]
    async fn test_check_config_output_reloads() {
        let file = write_config("server:\n  port: 9999\nstorage:\n  backend: memory\n");
        let config = Config::from_file(file.path()).await.unwrap();

        let yaml = config.to_yaml().unwrap();
        let reparsed: ServiceConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(reparsed, config.service);
    }

    #[test]
    fn test_shipped_example_matches_defaults() {
        let config =
            Config::from_yaml(include_str!("../../config/annotrack.yaml.example")).unwrap();
        config.validate().unwrap();
        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    async fn test_state_opens_csv_backend_from_config() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("data");
        let file = write_config(&format!(
            "storage:\n  backend: csv\n  data_dir: \"{}\"\n",
            data_dir.display()
        ));

        let config = Config::from_file(file.path()).await.unwrap();
        let state = AppState::open(config).await.unwrap();
        assert_eq!(state.store.backend_name(), "csv");

        state.store.add(Batch::new("1", "a", "lidar")).await.unwrap();
        assert!(data_dir.join("Batches.csv").exists());
        assert!(data_dir.join("Logs.csv").exists());
    }

    #[tokio::test]
    async fn test_state_honors_unique_ids_switch() {
        let file = write_config("storage:\n  backend: memory\n  unique_ids: false\n");
        let config = Config::from_file(file.path()).await.unwrap();
        let state = AppState::open(config).await.unwrap();

        state.store.add(Batch::new("1", "a", "lidar")).await.unwrap();
        state.store.add(Batch::new("1", "b", "lidar")).await.unwrap();
        assert_eq!(state.store.list::<Batch>().await.unwrap().len(), 2);
    }
}
