    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn file_values_fill_in_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("todosync.json");
        std::fs::write(&path, br#"{"base_url":"http://example.test/","user_id":3476}"#)
            .expect("write config");

        let cfg = ClientConfig::resolve_with(
            &ConfigOverrides {
                config_path: Some(path),
                ..ConfigOverrides::default()
            },
            no_env,
        )
        .expect("resolve");

        assert_eq!(cfg.base_url, "http://example.test");
        assert_eq!(cfg.user_id, UserId(3476));
        assert_eq!(cfg.notice_ttl_ms, 3_000);
        assert!(!cfg.exclusive_item_ops);
    }

    #[test]
    fn env_then_flags_override_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, br#"{"user_id":1,"notice_ttl_ms":500}"#).expect("write config");

        let env = |name: &str| match name {
            "TODOSYNC_BASE_URL" => Some("http://env.test".to_string()),
            "TODOSYNC_USER_ID" => Some("2".to_string()),
            _ => None,
        };

        let cfg = ClientConfig::resolve_with(
            &ConfigOverrides {
                config_path: Some(path.clone()),
                ..ConfigOverrides::default()
            },
            env,
        )
        .expect("resolve env");
        assert_eq!(cfg.base_url, "http://env.test");
        assert_eq!(cfg.user_id, UserId(2));
        assert_eq!(cfg.notice_ttl_ms, 500);

        let cfg = ClientConfig::resolve_with(
            &ConfigOverrides {
                config_path: Some(path),
                base_url: Some("http://flag.test".to_string()),
                user_id: Some(3),
            },
            env,
        )
        .expect("resolve flags");
        assert_eq!(cfg.base_url, "http://flag.test");
        assert_eq!(cfg.user_id, UserId(3));
    }

    #[test]
    fn missing_user_is_rejected() {
        let err = ClientConfig::resolve_with(
            &ConfigOverrides {
                base_url: Some("http://x.test".to_string()),
                ..ConfigOverrides::default()
            },
            no_env,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingUser), "{}", err);
    }

    #[test]
    fn bad_env_user_id_is_reported() {
        let env = |name: &str| (name == "TODOSYNC_USER_ID").then(|| "abc".to_string());
        let err = ClientConfig::resolve_with(
            &ConfigOverrides {
                base_url: Some("http://x.test".to_string()),
                ..ConfigOverrides::default()
            },
            env,
        )
        .unwrap_err();
        assert!(err.to_string().contains("TODOSYNC_USER_ID"), "{}", err);
    }

    #[test]
    fn unreadable_file_names_the_path() {
        let err = ClientConfig::resolve_with(
            &ConfigOverrides {
                config_path: Some(PathBuf::from("/definitely/not/here.json")),
                ..ConfigOverrides::default()
            },
            no_env,
        )
        .unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"), "{}", err);
    }
