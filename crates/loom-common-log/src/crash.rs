// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bridge from log events to a crash/error reporter.
//!
//! | Event      | Capture                                          |
//! |------------|--------------------------------------------------|
//! | `critical` | exception from the first argument, fatal level   |
//! | `error`    | exception from the first argument, error level   |
//! | `warn`     | message from the first argument, warning level, second argument as extra data |
//! | others     | nothing                                          |

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::bus::Subscriber;
use crate::error::SubscriberError;
use crate::event::LogEvent;
use crate::level::Level;
use crate::render::render_arg;
use crate::scope::ScopeChain;

/// Severity attached to a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureLevel {
	Fatal,
	Error,
	Warning,
}

/// What the bridge asks the reporter to record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Capture {
	Exception {
		level: CaptureLevel,
		/// The logged error value, `null` if the call had no arguments.
		error: Value,
		/// Display form of `error`.
		message: String,
		scopes: ScopeChain,
	},
	Message {
		level: CaptureLevel,
		message: String,
		/// Strings and numbers are wrapped as `{"data": value}`.
		extra: Option<Value>,
		scopes: ScopeChain,
	},
}

impl Capture {
	pub fn level(&self) -> CaptureLevel {
		match self {
			Self::Exception { level, .. } | Self::Message { level, .. } => *level,
		}
	}
}

/// Receives captures produced by [`CrashBridge`].
pub trait CrashReporter: Send + Sync {
	fn capture(&self, capture: Capture) -> Result<(), SubscriberError>;
}

impl<R: CrashReporter + ?Sized> CrashReporter for Arc<R> {
	fn capture(&self, capture: Capture) -> Result<(), SubscriberError> {
		(**self).capture(capture)
	}
}

/// Subscriber turning `critical`, `error` and `warn` events into captures.
pub struct CrashBridge<R> {
	reporter: R,
}

impl<R: CrashReporter> CrashBridge<R> {
	pub fn new(reporter: R) -> Self {
		Self { reporter }
	}

	pub fn reporter(&self) -> &R {
		&self.reporter
	}

	/// The capture for `event`, or `None` for levels the bridge ignores.
	pub fn translate(event: &LogEvent) -> Option<Capture> {
		let first = event.args.first();
		let scopes = event.scopes.clone();

		match event.level {
			Level::Critical | Level::Error => {
				let level = if event.level == Level::Critical {
					CaptureLevel::Fatal
				} else {
					CaptureLevel::Error
				};
				let error = first.cloned().unwrap_or(Value::Null);
				Some(Capture::Exception {
					level,
					message: render_arg(&error),
					error,
					scopes,
				})
			}
			Level::Warn => Some(Capture::Message {
				level: CaptureLevel::Warning,
				message: first.map(render_arg).unwrap_or_default(),
				extra: event.args.get(1).map(extra_data),
				scopes,
			}),
			Level::Info | Level::Debug => None,
		}
	}
}

fn extra_data(data: &Value) -> Value {
	match data {
		Value::String(_) | Value::Number(_) => serde_json::json!({ "data": data }),
		other => other.clone(),
	}
}

impl<R: CrashReporter> Subscriber for CrashBridge<R> {
	fn on_event(&self, event: &LogEvent) -> Result<(), SubscriberError> {
		match Self::translate(event) {
			Some(capture) => self.reporter.capture(capture),
			None => Ok(()),
		}
	}
}
