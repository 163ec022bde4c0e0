// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Process-wide root logger.
//!
//! Libraries should accept a [`Logger`] from their caller; binaries call
//! [`init_from_env`] once at startup and reach for [`global`] where passing a
//! handle around is impractical.

use std::sync::OnceLock;

use tracing::debug;

use crate::config::LogConfig;
use crate::error::{LogError, Result};
use crate::logger::Logger;

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// Installs the process-wide root logger built from `config`.
pub fn init(config: &LogConfig) -> Result<&'static Logger> {
	let mut installed = false;
	let logger = GLOBAL.get_or_init(|| {
		installed = true;
		Logger::from_config(config)
	});
	if !installed {
		return Err(LogError::AlreadyInitialized);
	}
	debug!(level = ?config.level, console = config.console, "global logger initialized");
	Ok(logger)
}

/// Installs the process-wide root logger from `LOG_LEVEL` and friends.
///
/// An invalid `LOG_LEVEL` is an error, not a silent fallback.
pub fn init_from_env() -> Result<&'static Logger> {
	let config = LogConfig::from_env()?;
	init(&config)
}

/// The process-wide root logger.
///
/// If nothing was installed yet, a default one is created: console attached,
/// every level disabled until [`Logger::set_level`] is called.
pub fn global() -> &'static Logger {
	GLOBAL.get_or_init(|| Logger::from_config(&LogConfig::default()))
}

/// The process-wide root logger, if one has been installed or created.
pub fn try_global() -> Option<&'static Logger> {
	GLOBAL.get()
}
