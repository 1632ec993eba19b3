use std::path::PathBuf;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use serde_json::json;
use zenoh::{Result, Session, Wait};

use crate::{Builder, node::ZNodeBuilder};

/// Environment variable naming a Zenoh configuration file.
pub const CONFIG_FILE_ENV: &str = "POSE_MARKER_ZENOH_CONFIG";

/// Environment variable carrying `key=json5;key=json5` config overrides.
pub const CONFIG_OVERRIDE_ENV: &str = "POSE_MARKER_CONFIG_OVERRIDE";

/// Hands out entity ids unique within one context.
#[derive(Debug, Default)]
pub struct GlobalCounter(AtomicUsize);

impl GlobalCounter {
    pub fn increment(&self) -> usize {
        self.0.fetch_add(1, Ordering::AcqRel)
    }
}

#[derive(Debug, Default)]
pub struct ZContextBuilder {
    domain_id: usize,
    config_file: Option<PathBuf>,
    config_overrides: Vec<(String, serde_json::Value)>,
}

impl ZContextBuilder {
    /// Set the ROS domain ID
    pub fn with_domain_id(mut self, domain_id: usize) -> Self {
        self.domain_id = domain_id;
        self
    }

    /// Load the Zenoh configuration from a file
    pub fn with_config_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Add a JSON configuration override
    ///
    /// ```ignore
    /// let ctx = ZContextBuilder::default()
    ///     .with_json("scouting/multicast/enabled", json!(false))
    ///     .build()?;
    /// ```
    pub fn with_json<K: Into<String>>(mut self, key: K, value: serde_json::Value) -> Self {
        self.config_overrides.push((key.into(), value));
        self
    }

    pub fn disable_multicast_scouting(self) -> Self {
        self.with_json("scouting/multicast/enabled", json!(false))
    }

    pub fn with_connect_endpoints<I, S>(self, endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let endpoints: Vec<String> = endpoints.into_iter().map(Into::into).collect();
        self.with_json("connect/endpoints", json!(endpoints))
    }

    /// Session mode: `peer`, `client` or `router`
    pub fn with_mode<S: Into<String>>(self, mode: S) -> Self {
        self.with_json("mode", json!(mode.into()))
    }

    fn apply_env_overrides(mut self) -> Result<Self> {
        if let Ok(overrides) = std::env::var(CONFIG_OVERRIDE_ENV) {
            tracing::debug!("Applying config overrides from {CONFIG_OVERRIDE_ENV}: {overrides}");
            self.config_overrides.extend(parse_overrides(&overrides)?);
        }
        Ok(self)
    }
}

/// Parse `key1=value1;key2=value2` where each value is JSON5.
pub fn parse_overrides(overrides: &str) -> Result<Vec<(String, serde_json::Value)>> {
    let mut parsed = Vec::new();
    for pair in overrides.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(format!("Invalid config override '{pair}': expected 'key=value'").into());
        };
        let (key, value) = (key.trim(), value.trim());
        let value = json5::from_str::<serde_json::Value>(value).map_err(|e| {
            format!("Failed to parse config override for '{key}': {e} (value: {value})")
        })?;
        tracing::debug!("Override: {} = {}", key, value);
        parsed.push((key.to_string(), value));
    }
    Ok(parsed)
}

impl Builder for ZContextBuilder {
    type Output = ZContext;

    #[tracing::instrument(name = "context_build", skip(self), fields(domain_id = self.domain_id))]
    fn build(mut self) -> Result<ZContext> {
        // Explicit file, then the environment, then Zenoh defaults
        let mut config = if let Some(ref config_file) = self.config_file {
            zenoh::Config::from_file(config_file)?
        } else if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
            zenoh::Config::from_file(path)?
        } else {
            zenoh::Config::default()
        };

        // Builder overrides first so the environment has the last word
        self = self.apply_env_overrides()?;

        for (key, value) in &self.config_overrides {
            let value = value.to_string();
            config.insert_json5(key, &value).map_err(|e| {
                format!("Failed to apply config override '{key}' = '{value}': {e}")
            })?;
        }

        let session = zenoh::open(config).wait()?;
        tracing::info!("Zenoh session opened: zid={}", session.zid());

        Ok(ZContext {
            session: Arc::new(session),
            counter: Arc::new(GlobalCounter::default()),
            domain_id: self.domain_id,
        })
    }
}

/// Cheap to clone; clones share the session.
#[derive(Clone)]
pub struct ZContext {
    session: Arc<Session>,
    counter: Arc<GlobalCounter>,
    domain_id: usize,
}

impl ZContext {
    pub fn create_node<S: AsRef<str>>(&self, name: S) -> ZNodeBuilder {
        ZNodeBuilder {
            domain_id: self.domain_id,
            name: name.as_ref().to_owned(),
            namespace: String::new(),
            session: self.session.clone(),
            counter: self.counter.clone(),
        }
    }

    pub fn shutdown(&self) -> Result<()> {
        tracing::info!("Closing Zenoh session");
        self.session.close().wait()
    }
}
