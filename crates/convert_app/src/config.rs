use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context};
use convert_core::PollSettings;
use convert_engine::ClientSettings;
use convert_logging::convert_info;
use serde::{Deserialize, Serialize};

use crate::cli::{Args, LogTarget};

/// Static configuration; file values are overridden by command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_url: String,
    pub poll_interval_ms: u64,
    pub max_poll_ms: u64,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub upload_timeout_secs: u64,
    pub log: LogTarget,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        let poll = PollSettings::default();
        Self {
            api_url: client.api_url,
            poll_interval_ms: poll.interval.as_millis() as u64,
            max_poll_ms: poll.max_duration.as_millis() as u64,
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
            upload_timeout_secs: client.upload_timeout.as_secs(),
            log: LogTarget::default(),
        }
    }
}

impl AppConfig {
    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("reading config {}", path.display()));
            }
        };

        let config: Self = ron::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        convert_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn apply_overrides(&mut self, args: &Args) {
        if let Some(api_url) = &args.api_url {
            self.api_url = api_url.clone();
        }
        if let Some(ms) = args.poll_interval_ms {
            self.poll_interval_ms = ms;
        }
        if let Some(ms) = args.max_poll_ms {
            self.max_poll_ms = ms;
        }
        if let Some(log) = args.log {
            self.log = log;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_url.trim().is_empty() {
            bail!("api_url must not be empty");
        }
        if self.poll_interval_ms == 0 {
            bail!("poll_interval_ms must be greater than zero");
        }
        if self.max_poll_ms == 0 {
            bail!("max_poll_ms must be greater than zero");
        }
        Ok(())
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            api_url: self.api_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            upload_timeout: Duration::from_secs(self.upload_timeout_secs),
        }
    }

    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            interval: Duration::from_millis(self.poll_interval_ms),
            max_duration: Duration::from_millis(self.max_poll_ms),
        }
    }
}
