use anyhow::Context;
use serde::Deserialize;

/// Connection settings for the hosted user store.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub url: String, // postgres endpoint, without credential
    pub key: String, // access credential
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub session_idle_minutes: i64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any key lookup; both store secrets are required.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .with_context(|| format!("{name} must be set"))
        };
        let store = StoreConfig {
            url: required("STORE_URL")?,
            key: required("STORE_KEY")?,
        };
        let session_idle_minutes = lookup("SESSION_IDLE_MINUTES")
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|m| *m > 0)
            .unwrap_or(30);
        Ok(Self {
            store,
            session_idle_minutes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn reads_both_store_secrets() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("STORE_URL", "postgres://db.example.com:5432/postgres"),
            ("STORE_KEY", "s3cret"),
        ]))
        .expect("config should load");
        assert_eq!(cfg.store.url, "postgres://db.example.com:5432/postgres");
        assert_eq!(cfg.store.key, "s3cret");
        assert_eq!(cfg.session_idle_minutes, 30);
    }

    #[test]
    fn session_idle_minutes_override() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("STORE_URL", "postgres://db.example.com/postgres"),
            ("STORE_KEY", "s3cret"),
            ("SESSION_IDLE_MINUTES", "5"),
        ]))
        .unwrap();
        assert_eq!(cfg.session_idle_minutes, 5);
    }

    #[test]
    fn missing_url_is_fatal() {
        let err = AppConfig::from_lookup(lookup_from(&[("STORE_KEY", "s3cret")])).unwrap_err();
        assert!(err.to_string().contains("STORE_URL"));
    }

    #[test]
    fn missing_key_is_fatal() {
        let err = AppConfig::from_lookup(lookup_from(&[(
            "STORE_URL",
            "postgres://db.example.com/postgres",
        )]))
        .unwrap_err();
        assert!(err.to_string().contains("STORE_KEY"));
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("STORE_URL", "postgres://db.example.com/postgres"),
            ("STORE_KEY", ""),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("STORE_KEY"));
    }
}
