// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Severity levels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LogError;

/// Severity of a log call.
///
/// Variants compare by severity, so `Level::Debug < Level::Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
	Debug,
	Info,
	Warn,
	Error,
	Critical,
}

impl Level {
	/// Every level, most to least severe.
	pub const ORDER: [Level; 5] = [
		Level::Critical,
		Level::Error,
		Level::Warn,
		Level::Info,
		Level::Debug,
	];

	/// Lowercase identifier accepted by [`Level::from_str`].
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Critical => "critical",
			Self::Error => "error",
			Self::Warn => "warn",
			Self::Info => "info",
			Self::Debug => "debug",
		}
	}

	/// Uppercase token used in the console prefix.
	pub const fn label(self) -> &'static str {
		match self {
			Self::Critical => "CRITICAL",
			Self::Error => "ERROR",
			Self::Warn => "WARN",
			Self::Info => "INFO",
			Self::Debug => "DEBUG",
		}
	}

	/// Position in [`Level::ORDER`]; 0 is the most severe.
	pub const fn rank(self) -> usize {
		match self {
			Self::Critical => 0,
			Self::Error => 1,
			Self::Warn => 2,
			Self::Info => 3,
			Self::Debug => 4,
		}
	}

	/// Returns true if `self` is at least as severe as `other`.
	pub fn is_at_least(self, other: Level) -> bool {
		self >= other
	}
}

impl fmt::Display for Level {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Level {
	type Err = LogError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"critical" => Ok(Self::Critical),
			"error" => Ok(Self::Error),
			"warn" => Ok(Self::Warn),
			"info" => Ok(Self::Info),
			"debug" => Ok(Self::Debug),
			_ => Err(LogError::InvalidLevel(s.to_string())),
		}
	}
}
