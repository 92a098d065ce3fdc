//! Dispatcher configuration.
//!
//! Loaded from TOML. Every field has a default, so an empty document is a valid
//! configuration:
//!
//! ```toml
//! [dispatch]
//! trace = true
//!
//! [handler]
//! queue_capacity = 32
//! warn_queue_depth = 4096
//!
//! [jobs]
//! threads = 4
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration load failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid dispatch config: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatchConfig {
	pub dispatch: DispatchSection,
	pub handler: HandlerSection,
	pub jobs: JobsSection,
}

/// `[dispatch]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatchSection {
	/// Emit a `trace` event for every dispatched action.
	pub trace: bool,
}

/// `[handler]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HandlerSection {
	/// Initial capacity of each queued handler's action queue.
	pub queue_capacity: usize,
	/// Queue length above which a drain logs a warning. `0` disables it.
	pub warn_queue_depth: usize,
}

impl Default for HandlerSection {
	fn default() -> Self {
		Self {
			queue_capacity: 16,
			warn_queue_depth: 1024,
		}
	}
}

/// `[jobs]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobsSection {
	/// Worker threads of the job pool. `0` lets rayon decide.
	pub threads: usize,
}

impl DispatchConfig {
	/// Parses a TOML document.
	pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(content)?)
	}

	/// Reads and parses a TOML file.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&content)
	}
}
