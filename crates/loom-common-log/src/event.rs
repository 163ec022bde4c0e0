// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The structured record published for every accepted log call.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::level::Level;
use crate::scope::ScopeChain;

/// A single accepted log call.
///
/// Events are built once and handed to subscribers by reference; the bus
/// keeps nothing, so subscribers clone what they want to hold on to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
	pub level: Level,
	pub args: Vec<Value>,
	pub scopes: ScopeChain,
	/// Milliseconds since the Unix epoch.
	pub time: i64,
}

impl LogEvent {
	/// Creates an event stamped with the current time.
	pub fn new(level: Level, args: Vec<Value>, scopes: ScopeChain) -> Self {
		Self {
			level,
			args,
			scopes,
			time: Utc::now().timestamp_millis(),
		}
	}

	/// The first argument, if it is a string.
	pub fn message(&self) -> Option<&str> {
		self.args.first().and_then(Value::as_str)
	}
}

/// Builds a `Vec<serde_json::Value>` from heterogeneous arguments.
///
/// ```
/// use loom_common_log::log_args;
/// use serde_json::json;
///
/// let args = log_args!["started", json!({ "pid": 42 }), 7];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! log_args {
	() => {
		::std::vec::Vec::<::serde_json::Value>::new()
	};
	($($arg:expr),+ $(,)?) => {
		::std::vec![$(::serde_json::Value::from($arg)),+]
	};
}
