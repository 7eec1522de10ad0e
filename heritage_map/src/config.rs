//! Env parsing and discovery channel construction.

use std::path::Path;

use url::Url;

use crate::data::{
    init_disabled_channel, init_discovery_channel, init_fixture_channel, DiscoveryChannel,
    DiscoveryConfig,
};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const MODEL_ENV: &str = "DISCOVERY_MODEL";
pub const FIXTURE_ENV: &str = "DISCOVERY_FIXTURE";

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// generateContent endpoint for the configured (or default) model.
pub fn discovery_endpoint(model: &str) -> Url {
    let raw = format!("{API_BASE}/{model}:generateContent");
    raw.parse()
        .unwrap_or_else(|err| panic!("lefatshe: invalid discovery endpoint {raw:?}: {err}"))
}

/// Builds a discovery config from the environment, or `None` when no API
/// key is set.
pub fn discovery_config() -> Option<DiscoveryConfig> {
    let api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty())?;
    let model = std::env::var(MODEL_ENV).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
    Some(DiscoveryConfig {
        api_key,
        endpoint: discovery_endpoint(&model),
    })
}

/// Picks the discovery backend from the environment: a fixture file takes
/// priority, then Gemini when a key is present, otherwise a disabled
/// channel that answers every request with an empty batch.
pub fn discovery_channel() -> DiscoveryChannel {
    if let Ok(path) = std::env::var(FIXTURE_ENV) {
        eprintln!("lefatshe: replaying discoveries from {path}");
        return init_fixture_channel(Path::new(&path));
    }
    match discovery_config() {
        Some(config) => init_discovery_channel(config),
        None => {
            eprintln!("lefatshe: {API_KEY_ENV} not set, discovery disabled");
            init_disabled_channel()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
    }

    struct EnvGuard {
        snapshot: Vec<(&'static str, Option<String>)>,
    }

    impl EnvGuard {
        fn capture(keys: &[&'static str]) -> Self {
            let snapshot = keys
                .iter()
                .map(|&key| (key, std::env::var(key).ok()))
                .collect();
            Self { snapshot }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in &self.snapshot {
                match value {
                    Some(val) => std::env::set_var(key, val),
                    None => std::env::remove_var(key),
                }
            }
        }
    }

    const ENV_KEYS: [&str; 3] = [API_KEY_ENV, MODEL_ENV, FIXTURE_ENV];

    #[test]
    fn no_api_key_means_no_config() {
        let _lock = lock_env();
        let _guard = EnvGuard::capture(&ENV_KEYS);
        std::env::remove_var(API_KEY_ENV);

        assert!(discovery_config().is_none());
    }

    #[test]
    fn default_model_is_used_without_an_override() {
        let _lock = lock_env();
        let _guard = EnvGuard::capture(&ENV_KEYS);
        std::env::set_var(API_KEY_ENV, "test-key");
        std::env::remove_var(MODEL_ENV);

        let config = discovery_config().expect("config with key set");
        assert!(config
            .endpoint
            .as_str()
            .contains("gemini-2.5-flash:generateContent"));
        assert_eq!(config.api_key, "test-key");
    }

    #[test]
    fn model_override_lands_in_the_endpoint() {
        let _lock = lock_env();
        let _guard = EnvGuard::capture(&ENV_KEYS);
        std::env::set_var(API_KEY_ENV, "test-key");
        std::env::set_var(MODEL_ENV, "gemini-2.0-pro");

        let config = discovery_config().expect("config with key set");
        assert!(config
            .endpoint
            .as_str()
            .contains("gemini-2.0-pro:generateContent"));
    }

    #[test]
    fn empty_api_key_counts_as_unset() {
        let _lock = lock_env();
        let _guard = EnvGuard::capture(&ENV_KEYS);
        std::env::set_var(API_KEY_ENV, "");

        assert!(discovery_config().is_none());
    }
}
