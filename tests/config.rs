#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use vigil::libs::config::{Config, RemoteConfig};

    struct ConfigTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext { _temp_dir: temp_dir }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn missing_file_yields_defaults(_ctx: &mut ConfigTestContext) {
        let config = Config::read().unwrap();

        assert!(config.remote.is_none());
        assert_eq!(config.tracker.tracking_interval, 30);
        assert_eq!(config.tracker.sync_interval, 300);
        assert_eq!(config.tracker.inactivity_threshold, 60);
        assert_eq!(config.tracker.default_level, 5);
        assert!(config.tracker.process_blacklist.contains(&"[PAUSE]".to_string()));
        assert_eq!(config.commands.commands, vec!["git".to_string()]);
        assert_eq!(config.commands.suppression_window, 60);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn save_and_read_round_trip(_ctx: &mut ConfigTestContext) {
        let mut config = Config::default();
        config.remote = Some(RemoteConfig {
            api_url: "https://track.example.com/api".to_string(),
            database: "productivity".to_string(),
        });
        config.tracker.tracking_interval = 10;
        config.save().unwrap();

        let loaded = Config::read().unwrap();
        assert_eq!(loaded, config);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn missing_remote_endpoint_is_a_startup_error(_ctx: &mut ConfigTestContext) {
        let config = Config::default();
        let err = config.require_remote().unwrap_err();
        assert!(err.to_string().contains("Remote endpoint"));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn partial_file_fills_in_defaults(_ctx: &mut ConfigTestContext) {
        let partial = serde_json::json!({
            "remote": { "api_url": "https://track.example.com", "database": "productivity" },
            "tracker": { "tracking_interval": 5 }
        });
        let config: Config = serde_json::from_value(partial).unwrap();

        assert_eq!(config.tracker.tracking_interval, 5);
        assert_eq!(config.tracker.sync_interval, 300);
        assert_eq!(config.commands.suppression_window, 60);
    }
}
