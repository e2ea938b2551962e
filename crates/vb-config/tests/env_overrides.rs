use figment::Jail;
use vb_config::{LOCAL_CONFIG_PATH, VaultConfig};
use vb_core::enums::UnavailablePolicy;

#[test]
fn env_sets_nested_values() {
    Jail::expect_with(|jail| {
        jail.set_env("VAULTBOOK_GENERAL__DB_PATH", "/tmp/env.db");
        jail.set_env("VAULTBOOK_SECURITY__UNAVAILABLE_POLICY", "allow");

        let config = VaultConfig::load().expect("config loads");
        assert_eq!(config.general.db_path, "/tmp/env.db");
        assert_eq!(config.security.unavailable_policy, UnavailablePolicy::Allow);
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(".vaultbook").expect("create config dir");
        jail.create_file(
            LOCAL_CONFIG_PATH,
            r#"
[security]
keyring_service = "from-toml"
"#,
        )?;
        jail.set_env("VAULTBOOK_SECURITY__KEYRING_SERVICE", "from-env");

        let config = VaultConfig::load().expect("config loads");
        assert_eq!(config.security.keyring_service, "from-env");
        Ok(())
    });
}
