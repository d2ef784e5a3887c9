//! Loader for Heron runtime configuration with YAML + environment overlays.
//!
//! Precedence, lowest to highest: built-in defaults, attached files or
//! inline YAML snippets in attachment order, then `HERON__`-prefixed
//! environment variables (`HERON__WAIT_TIMEOUT_MS=5000`). After merging,
//! `${VAR}` placeholders inside string values are expanded from the
//! process environment.
use config::{Config, ConfigError, Environment, File};
use heron_common::HeronConfig;
use serde_json::Value;
use std::path::Path;

const MAX_EXPANSION_PASSES: usize = 8;

/// Recursively expand `${VAR}` placeholders in every string of the value tree.
fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) if s.contains('$') => *s = expand_str(std::mem::take(s)),
        Value::Array(items) => items.iter_mut().for_each(expand_env_in_value),
        Value::Object(map) => map.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// One string, expanded until it stops changing. Values whose expansion
/// references an unset variable are left as written.
fn expand_str(mut current: String) -> String {
    for _ in 0..MAX_EXPANSION_PASSES {
        let next = match shellexpand::env(&current) {
            Ok(expanded) => expanded.into_owned(),
            Err(_) => break,
        };
        if next == current {
            break;
        }
        current = next;
    }
    current
}

/// Builder hiding the `config` crate wiring (YAML files + env overrides).
pub struct HeronConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for HeronConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl HeronConfigLoader {
    /// Start with the default sources: `HERON__` environment overrides only.
    ///
    /// ```
    /// use heron_config::HeronConfigLoader;
    ///
    /// let cfg = HeronConfigLoader::new().load().expect("defaults load");
    /// assert_eq!(cfg.scroll_step_px, 100);
    /// ```
    pub fn new() -> Self {
        let builder = Config::builder().add_source(
            Environment::with_prefix("HERON")
                .separator("__")
                .try_parsing(true),
        );
        Self { builder }
    }

    /// Attach a config file; the `config` crate infers the format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a config file that may be absent, for deployments that rely
    /// purely on environment variables.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Merge an inline YAML snippet (tests, CLI overrides).
    ///
    /// ```
    /// use heron_config::HeronConfigLoader;
    ///
    /// let cfg = HeronConfigLoader::new()
    ///     .with_yaml_str("wait_timeout_ms: 5000\nlog_actions: false")
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.wait_timeout_ms, 5000);
    /// assert!(!cfg.log_actions);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources.
    ///
    /// The merged tree is expanded for `${VAR}` placeholders before being
    /// materialised into a typed [`HeronConfig`]; unset fields take their
    /// defaults.
    pub fn load(self) -> Result<HeronConfig, ConfigError> {
        let cfg = self.builder.build()?;

        let mut tree: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut tree);

        serde_json::from_value(tree).map_err(|e| ConfigError::Message(e.to_string()))
    }
}
