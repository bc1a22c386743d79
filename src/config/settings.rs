use std::fmt;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::output::DEFAULT_OUTPUT_FILENAME;
use crate::pipeline::{DEFAULT_MAX_FAILURES, DEFAULT_MAX_SESSIONS, PipelineLimits};

const APP_DIR_NAME: &str = "transcript-exporter";
pub const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Runtime settings for an export
///
/// Every field has a default, so a config file only needs the keys it wants to change.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Session list endpoint; transcripts live at `<base_url>/<transcriptID>`
    pub base_url: String,
    /// Sent verbatim as the `authorization` header
    pub api_key: String,
    pub max_sessions: usize,
    pub max_failures: usize,
    pub output: PathBuf,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            max_sessions: DEFAULT_MAX_SESSIONS.get(),
            max_failures: DEFAULT_MAX_FAILURES.get(),
            output: PathBuf::from(DEFAULT_OUTPUT_FILENAME),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

// The API key never ends up in logs
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("base_url", &self.base_url)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "<redacted>" })
            .field("max_sessions", &self.max_sessions)
            .field("max_failures", &self.max_failures)
            .field("output", &self.output)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Settings {
    /// Load settings from `explicit`, or from the default config file when it exists
    ///
    /// An explicit path must exist; the default location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config TOML at {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            bail!(
                "No base URL configured (use --base-url, TRANSCRIPT_API_BASE_URL or `base_url` in {})",
                CONFIG_FILE_NAME
            );
        }
        if self.api_key.trim().is_empty() {
            bail!(
                "No API key configured (use --api-key, TRANSCRIPT_API_KEY or `api_key` in {})",
                CONFIG_FILE_NAME
            );
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be at least 1");
        }
        self.limits()?;
        Ok(())
    }

    pub fn limits(&self) -> Result<PipelineLimits> {
        let max_sessions =
            NonZeroUsize::new(self.max_sessions).context("max_sessions must be at least 1")?;
        let max_failures =
            NonZeroUsize::new(self.max_failures).context("max_failures must be at least 1")?;
        Ok(PipelineLimits { max_sessions, max_failures })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// `<platform config dir>/transcript-exporter/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}
