// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Subscriber that forwards log events to `tracing`.

use crate::bus::Subscriber;
use crate::error::SubscriberError;
use crate::event::LogEvent;
use crate::level::Level;
use crate::render::render_args;

/// Re-emits every event as a `tracing` event under the `loom_common_log` target.
///
/// `critical` and `error` both map to `ERROR`; the event's own level is kept in
/// the `log_level` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
	pub fn new() -> Self {
		Self
	}
}

impl Subscriber for TracingSink {
	fn on_event(&self, event: &LogEvent) -> Result<(), SubscriberError> {
		let message = render_args(&event.args);
		let scopes = &event.scopes;
		let level = event.level.as_str();

		match event.level {
			Level::Critical | Level::Error => {
				tracing::error!(target: "loom_common_log", log_level = level, scopes = %scopes, "{message}")
			}
			Level::Warn => tracing::warn!(target: "loom_common_log", log_level = level, scopes = %scopes, "{message}"),
			Level::Info => tracing::info!(target: "loom_common_log", log_level = level, scopes = %scopes, "{message}"),
			Level::Debug => {
				tracing::debug!(target: "loom_common_log", log_level = level, scopes = %scopes, "{message}")
			}
		}
		Ok(())
	}
}
