use allot_config::AllotConfig;
use figment::Jail;

#[test]
fn env_overrides_engine_values() {
    Jail::expect_with(|jail| {
        jail.set_env("ALLOT_ENGINE__DEFAULT_QUOTA", "9");
        jail.set_env("ALLOT_ENGINE__INSTITUTION_PREFIX", "UOP");

        let config = AllotConfig::load().expect("config loads");
        assert_eq!(config.engine.default_quota, 9);
        assert_eq!(config.engine.institution_prefix, "UOP");
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".allot")?;
        jail.create_file(
            ".allot/config.toml",
            r#"
[store]
path = "from-file.db"
"#,
        )?;
        jail.set_env("ALLOT_STORE__PATH", "from-env.db");

        let config = AllotConfig::load().expect("config loads");
        assert_eq!(config.store.path, "from-env.db");
        Ok(())
    });
}

#[test]
fn zero_quota_from_env_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("ALLOT_ENGINE__DEFAULT_QUOTA", "0");
        assert!(AllotConfig::load().is_err());
        Ok(())
    });
}
