// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Runtime settings loaded from environment variables.

use std::path::PathBuf;
use std::str::FromStr;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log format '{0}' (expected 'pretty' or 'json')")]
pub struct UnknownLogFormat(String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(UnknownLogFormat(other.to_string())),
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// Number of worker threads for parallel region layout.
    pub worker_threads: usize,
    pub log_format: LogFormat,
    /// Layout configuration file, overridden by `--config`.
    pub layout_config: Option<PathBuf>,
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unparseable values fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            worker_threads: lookup("FIXTURE_LAYOUT_THREADS")
                .and_then(|v| v.parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or_else(num_cpus::get),
            log_format: lookup("FIXTURE_LAYOUT_LOG_FORMAT")
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            layout_config: lookup("FIXTURE_LAYOUT_CONFIG")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }
}
