// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The default console sink.

use std::io::{self, Write};
use std::sync::Arc;

use chrono::{DateTime, Local};
use parking_lot::Mutex;

use crate::bus::{EventBus, Subscriber, SubscriptionId};
use crate::error::SubscriberError;
use crate::event::LogEvent;
use crate::level::Level;
use crate::render::render_args;

/// Console stream an event is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleStream {
	/// stderr, used for `critical` and `error`.
	Error,
	/// stderr, used for `warn`.
	Warn,
	/// stdout, used for `info` and `debug`.
	Out,
}

impl ConsoleStream {
	pub fn for_level(level: Level) -> Self {
		match level {
			Level::Critical | Level::Error => Self::Error,
			Level::Warn => Self::Warn,
			Level::Info | Level::Debug => Self::Out,
		}
	}
}

/// Destination for rendered console lines.
pub trait ConsoleWriter: Send + Sync {
	fn write_line(&self, stream: ConsoleStream, line: &str) -> io::Result<()>;
}

/// Writes to the process stdout and stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdConsole;

impl ConsoleWriter for StdConsole {
	fn write_line(&self, stream: ConsoleStream, line: &str) -> io::Result<()> {
		match stream {
			ConsoleStream::Out => writeln!(io::stdout().lock(), "{line}"),
			ConsoleStream::Error | ConsoleStream::Warn => writeln!(io::stderr().lock(), "{line}"),
		}
	}
}

/// Keeps rendered lines in memory. Handy for asserting on console output.
#[derive(Debug, Clone, Default)]
pub struct RecordingConsole {
	lines: Arc<Mutex<Vec<(ConsoleStream, String)>>>,
}

impl RecordingConsole {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn lines(&self) -> Vec<(ConsoleStream, String)> {
		self.lines.lock().clone()
	}

	pub fn len(&self) -> usize {
		self.lines.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.lines.lock().is_empty()
	}

	pub fn clear(&self) {
		self.lines.lock().clear();
	}
}

impl ConsoleWriter for RecordingConsole {
	fn write_line(&self, stream: ConsoleStream, line: &str) -> io::Result<()> {
		self.lines.lock().push((stream, line.to_string()));
		Ok(())
	}
}

/// Renders events as `[LEVEL][scope]... args` lines.
pub struct ConsoleSink {
	writer: Arc<dyn ConsoleWriter>,
	timestamps: bool,
}

impl ConsoleSink {
	/// A sink writing to stdout/stderr.
	pub fn new() -> Self {
		Self::with_writer(Arc::new(StdConsole))
	}

	pub fn with_writer(writer: Arc<dyn ConsoleWriter>) -> Self {
		Self {
			writer,
			timestamps: false,
		}
	}

	/// Adds a local-time `[YYYY-MM-DD HH:MM:SS +HH:MM]` segment after the level.
	pub fn with_timestamps(mut self, enabled: bool) -> Self {
		self.timestamps = enabled;
		self
	}

	/// The line this sink writes for `event`.
	pub fn format(&self, event: &LogEvent) -> String {
		let mut line = format!("[{}]", event.level.label());
		if self.timestamps {
			if let Some(at) = DateTime::from_timestamp_millis(event.time) {
				let local = at.with_timezone(&Local);
				line.push_str(&format!("[{}]", local.format("%Y-%m-%d %H:%M:%S %:z")));
			}
		}
		line.push_str(&event.scopes.render());
		if !event.args.is_empty() {
			line.push(' ');
			line.push_str(&render_args(&event.args));
		}
		line
	}
}

impl Default for ConsoleSink {
	fn default() -> Self {
		Self::new()
	}
}

impl Subscriber for ConsoleSink {
	fn on_event(&self, event: &LogEvent) -> Result<(), SubscriberError> {
		let stream = ConsoleStream::for_level(event.level);
		self.writer.write_line(stream, &self.format(event))?;
		Ok(())
	}
}

/// Attachment state of the default console sink on its bus.
///
/// The bus is fixed at construction, so the guard always describes the one
/// subscription it owns. Attaching twice or detaching twice is a no-op.
pub struct DefaultConsole {
	sink: Arc<ConsoleSink>,
	bus: EventBus,
	subscription: Mutex<Option<SubscriptionId>>,
}

impl DefaultConsole {
	/// Creates the guard for `sink` on `bus`, initially detached.
	pub fn new(sink: ConsoleSink, bus: EventBus) -> Self {
		Self {
			sink: Arc::new(sink),
			bus,
			subscription: Mutex::new(None),
		}
	}

	/// Subscribes the sink unless it already is. Returns true if it was attached now.
	pub fn attach(&self) -> bool {
		let mut subscription = self.subscription.lock();
		if subscription.is_some() {
			return false;
		}
		*subscription = Some(self.bus.subscribe_sink(self.sink.clone()));
		true
	}

	/// Unsubscribes the sink if attached. Returns true if it was detached now.
	pub fn detach(&self) -> bool {
		match self.subscription.lock().take() {
			Some(id) => {
				self.bus.unsubscribe(id);
				true
			}
			None => false,
		}
	}

	pub fn is_attached(&self) -> bool {
		self.subscription.lock().is_some()
	}

	pub fn sink(&self) -> &ConsoleSink {
		&self.sink
	}

	pub fn bus(&self) -> &EventBus {
		&self.bus
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::scope::ScopeChain;
	use serde_json::json;

	fn recording_sink() -> (ConsoleSink, RecordingConsole) {
		let console = RecordingConsole::new();
		(ConsoleSink::with_writer(Arc::new(console.clone())), console)
	}

	#[test]
	fn stream_mapping() {
		assert_eq!(ConsoleStream::for_level(Level::Critical), ConsoleStream::Error);
		assert_eq!(ConsoleStream::for_level(Level::Error), ConsoleStream::Error);
		assert_eq!(ConsoleStream::for_level(Level::Warn), ConsoleStream::Warn);
		assert_eq!(ConsoleStream::for_level(Level::Info), ConsoleStream::Out);
		assert_eq!(ConsoleStream::for_level(Level::Debug), ConsoleStream::Out);
	}

	#[test]
	fn formats_level_scopes_and_args() {
		let (sink, console) = recording_sink();
		let event = LogEvent::new(
			Level::Info,
			vec![json!("started"), json!({ "pid": 42 })],
			ScopeChain::new(["svc", "worker"]),
		);

		sink.on_event(&event).unwrap();

		assert_eq!(
			console.lines(),
			vec![(ConsoleStream::Out, "[INFO][svc][worker] started {pid: 42}".to_string())]
		);
	}

	#[test]
	fn no_args_prints_only_the_prefix() {
		let (sink, _) = recording_sink();
		let event = LogEvent::new(Level::Warn, vec![], ScopeChain::empty());
		assert_eq!(sink.format(&event), "[WARN]");
	}

	#[test]
	fn timestamp_segment_follows_the_level() {
		let (sink, _) = recording_sink();
		let sink = sink.with_timestamps(true);
		let event = LogEvent::new(Level::Error, vec![json!("x")], ScopeChain::new(["db"]));

		let line = sink.format(&event);
		assert!(line.starts_with("[ERROR]["), "{line}");
		assert!(line.ends_with("][db] x"), "{line}");
		// "[ERROR]" + "[YYYY-MM-DD HH:MM:SS +HH:MM]" + "[db] x"
		assert_eq!(line.len(), 7 + 28 + 6);
	}

	#[test]
	fn attach_and_detach_are_idempotent() {
		let bus = EventBus::new();
		let (sink, console) = recording_sink();
		let default = DefaultConsole::new(sink, bus.clone());

		assert!(default.attach());
		assert!(!default.attach());
		assert_eq!(bus.subscriber_count(), 1);

		bus.publish(&LogEvent::new(Level::Info, vec![json!("once")], ScopeChain::empty()));
		assert_eq!(console.len(), 1);

		assert!(default.detach());
		assert!(!default.detach());
		assert_eq!(bus.subscriber_count(), 0);

		bus.publish(&LogEvent::new(Level::Info, vec![json!("dropped")], ScopeChain::empty()));
		assert_eq!(console.len(), 1);

		assert!(default.attach());
		assert!(default.is_attached());
	}

	#[test]
	fn guard_tracks_only_its_own_bus() {
		let bus = EventBus::new();
		let other = EventBus::new();
		let (sink, console) = recording_sink();
		let default = DefaultConsole::new(sink, bus.clone());

		default.attach();
		other.publish(&LogEvent::new(Level::Info, vec![json!("elsewhere")], ScopeChain::empty()));
		assert!(console.is_empty());
		assert_eq!(other.subscriber_count(), 0);

		for _ in 0..3 {
			default.detach();
			default.attach();
		}
		assert_eq!(bus.subscriber_count(), 1);

		bus.publish(&LogEvent::new(Level::Info, vec![json!("once")], ScopeChain::empty()));
		assert_eq!(console.len(), 1);
	}
}
