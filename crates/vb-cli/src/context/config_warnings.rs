/// Env vars read by the binary itself rather than by figment.
const NON_CONFIG_KEYS: &[&str] = &["VAULTBOOK_LOG"];

/// Emit warnings for `VAULTBOOK_*` vars that figment will not map to a key.
pub fn warn_mistyped_env() {
    for warning in collect_env_warnings(std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_env_warnings<I>(env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut keys = env
        .into_iter()
        .map(|(key, _)| key)
        .filter(|key| key.starts_with("VAULTBOOK_"))
        .filter(|key| !NON_CONFIG_KEYS.contains(&key.as_str()))
        .filter(|key| !key.contains("__"))
        .collect::<Vec<_>>();
    keys.sort();

    keys.into_iter()
        .map(|key| {
            format!(
                "{key} is ignored. Use double underscores between section and key (example: VAULTBOOK_SECURITY__UNAVAILABLE_POLICY)."
            )
        })
        .collect()
}
