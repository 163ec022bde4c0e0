// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Environment-driven logger configuration.
//!
//! | Variable                 | Meaning                                 | Default |
//! |--------------------------|-----------------------------------------|---------|
//! | `LOG_LEVEL`              | minimum level (`critical` … `debug`)    | unset   |
//! | `LOG_CONSOLE`            | attach the default console sink         | `true`  |
//! | `LOG_CONSOLE_TIMESTAMPS` | add a timestamp segment to console lines | `false` |
//!
//! Empty values count as unset.

use tracing::debug;

use crate::error::{LogError, Result};
use crate::level::Level;

pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";
pub const LOG_CONSOLE_ENV: &str = "LOG_CONSOLE";
pub const LOG_CONSOLE_TIMESTAMPS_ENV: &str = "LOG_CONSOLE_TIMESTAMPS";

/// Settings used to build a root logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
	/// Minimum enabled level. `None` leaves every level disabled.
	pub level: Option<Level>,
	pub console: bool,
	pub console_timestamps: bool,
}

impl Default for LogConfig {
	fn default() -> Self {
		Self {
			level: None,
			console: true,
			console_timestamps: false,
		}
	}
}

impl LogConfig {
	/// Reads the configuration from the process environment.
	pub fn from_env() -> Result<Self> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Reads the configuration through `lookup`, which maps a variable name to its value.
	pub fn from_lookup<F>(lookup: F) -> Result<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let var = |name: &str| lookup(name).filter(|s| !s.is_empty());
		let defaults = Self::default();

		let level = var(LOG_LEVEL_ENV)
			.map(|v| v.parse::<Level>())
			.transpose()?;
		let console = parse_bool(LOG_CONSOLE_ENV, var(LOG_CONSOLE_ENV))?.unwrap_or(defaults.console);
		let console_timestamps = parse_bool(LOG_CONSOLE_TIMESTAMPS_ENV, var(LOG_CONSOLE_TIMESTAMPS_ENV))?
			.unwrap_or(defaults.console_timestamps);

		let config = Self {
			level,
			console,
			console_timestamps,
		};
		debug!(?config, "loaded log configuration");
		Ok(config)
	}

	pub fn with_level(mut self, level: Level) -> Self {
		self.level = Some(level);
		self
	}
}

fn parse_bool(key: &str, value: Option<String>) -> Result<Option<bool>> {
	let Some(value) = value else {
		return Ok(None);
	};
	match value.to_ascii_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Ok(Some(true)),
		"false" | "0" | "no" | "off" => Ok(Some(false)),
		_ => Err(LogError::InvalidConfig {
			key: key.to_string(),
			message: format!("invalid boolean value '{value}'"),
		}),
	}
}
