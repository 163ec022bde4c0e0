// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Scoped logger handles.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::bus::{EventBus, FailureReporter, Subscriber, SubscriptionId};
use crate::config::LogConfig;
use crate::console::{ConsoleSink, ConsoleWriter, DefaultConsole, StdConsole};
use crate::error::{Result, SubscriberError};
use crate::event::LogEvent;
use crate::level::Level;
use crate::registry::LevelRegistry;
use crate::scope::ScopeChain;

/// State shared by a root logger and every logger derived from it.
struct Shared {
	registry: LevelRegistry,
	bus: EventBus,
	console: DefaultConsole,
}

/// A logging handle with its own scope chain.
///
/// Loggers are cheap to clone and to derive with [`Logger::create_log`]. All
/// loggers derived from the same root share the level state, the event bus
/// and the default console sink.
///
/// ```
/// use loom_common_log::{log_args, Logger};
///
/// let log = Logger::builder().console(false).build();
/// log.set_level("info").unwrap();
///
/// let worker = log.create_log(["svc", "worker"]);
/// worker.info(log_args!["started"]);
/// assert!(!worker.debug_enabled());
/// ```
#[derive(Clone)]
pub struct Logger {
	shared: Arc<Shared>,
	scopes: ScopeChain,
}

macro_rules! level_methods {
	($($level:ident => $log:ident, $enabled:ident;)+) => {
		$(
			#[doc = concat!("Logs at `", stringify!($log), "` if that level is enabled.")]
			pub fn $log<I>(&self, args: I)
			where
				I: IntoIterator,
				I::Item: Into<Value>,
			{
				self.log(Level::$level, args)
			}

			#[doc = concat!("Whether `", stringify!($log), "` calls currently produce events.")]
			pub fn $enabled(&self) -> bool {
				self.enabled(Level::$level)
			}
		)+
	};
}

impl Logger {
	/// A root logger with its own level state and bus, printing to the console.
	///
	/// Every level starts disabled; call [`Logger::set_level`] before expecting output.
	pub fn new() -> Self {
		Self::builder().build()
	}

	pub fn builder() -> LoggerBuilder {
		LoggerBuilder::new()
	}

	/// A root logger configured from `config`.
	pub fn from_config(config: &LogConfig) -> Self {
		Self::builder()
			.minimum_level(config.level)
			.console(config.console)
			.timestamps(config.console_timestamps)
			.build()
	}

	level_methods! {
		Critical => critical, critical_enabled;
		Error => error, error_enabled;
		Warn => warn, warn_enabled;
		Info => info, info_enabled;
		Debug => debug, debug_enabled;
	}

	/// Publishes an event at `level` unless the level is disabled.
	///
	/// The level check happens before anything else; a disabled call neither
	/// converts its arguments nor touches the bus.
	pub fn log<I>(&self, level: Level, args: I)
	where
		I: IntoIterator,
		I::Item: Into<Value>,
	{
		if !self.shared.registry.is_enabled(level) {
			return;
		}
		let args = args.into_iter().map(Into::into).collect();
		let event = LogEvent::new(level, args, self.scopes.clone());
		self.shared.bus.publish(&event);
	}

	/// Reads the shared level state at call time.
	pub fn enabled(&self, level: Level) -> bool {
		self.shared.registry.is_enabled(level)
	}

	/// A logger whose scope chain is this one's extended with `labels`.
	pub fn create_log<I, S>(&self, labels: I) -> Logger
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Logger {
			shared: Arc::clone(&self.shared),
			scopes: self.scopes.extend(labels),
		}
	}

	/// Sets the minimum level for every logger sharing this one's state.
	pub fn set_level(&self, level: &str) -> Result<()> {
		self.shared.registry.set_minimum_level(level)
	}

	/// Typed form of [`Logger::set_level`].
	pub fn set_minimum(&self, level: Level) {
		self.shared.registry.set_minimum(level);
	}

	/// Subscribes an infallible handler to every accepted event.
	pub fn on<F>(&self, handler: F) -> SubscriptionId
	where
		F: Fn(&LogEvent) + Send + Sync + 'static,
	{
		self.shared.bus.subscribe(move |event: &LogEvent| {
			handler(event);
			Ok(())
		})
	}

	/// Subscribes a handler that may fail. Failures are reported, never propagated.
	pub fn try_on<F>(&self, handler: F) -> SubscriptionId
	where
		F: Fn(&LogEvent) -> std::result::Result<(), SubscriberError> + Send + Sync + 'static,
	{
		self.shared.bus.subscribe(handler)
	}

	/// Subscribes a handler to accepted events of one level.
	pub fn on_level<F>(&self, level: Level, handler: F) -> SubscriptionId
	where
		F: Fn(&LogEvent) + Send + Sync + 'static,
	{
		self.shared.bus.subscribe_level(level, move |event: &LogEvent| {
			handler(event);
			Ok(())
		})
	}

	/// Subscribes a [`Subscriber`] such as a tracing or crash bridge.
	pub fn attach(&self, subscriber: Arc<dyn Subscriber>) -> SubscriptionId {
		self.shared.bus.subscribe_sink(subscriber)
	}

	/// Removes a subscription. Returns false if it was already gone.
	pub fn off(&self, id: SubscriptionId) -> bool {
		self.shared.bus.unsubscribe(id)
	}

	/// Re-attaches the default console sink. No-op if already attached.
	pub fn enable_default_console_logger(&self) -> bool {
		self.shared.console.attach()
	}

	/// Detaches the default console sink. No-op if already detached.
	pub fn disable_default_console_logger(&self) -> bool {
		self.shared.console.detach()
	}

	pub fn default_console_enabled(&self) -> bool {
		self.shared.console.is_attached()
	}

	pub fn scopes(&self) -> &ScopeChain {
		&self.scopes
	}

	pub fn registry(&self) -> &LevelRegistry {
		&self.shared.registry
	}

	pub fn bus(&self) -> &EventBus {
		&self.shared.bus
	}
}

impl Default for Logger {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for Logger {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Logger")
			.field("scopes", &self.scopes)
			.field("minimum", &self.shared.registry.minimum())
			.field("console", &self.shared.console.is_attached())
			.finish()
	}
}

/// Builder for root loggers.
pub struct LoggerBuilder {
	level: Option<Level>,
	registry: Option<LevelRegistry>,
	scopes: ScopeChain,
	console: bool,
	timestamps: bool,
	writer: Option<Arc<dyn ConsoleWriter>>,
	reporter: Option<FailureReporter>,
}

impl LoggerBuilder {
	pub fn new() -> Self {
		Self {
			level: None,
			registry: None,
			scopes: ScopeChain::empty(),
			console: true,
			timestamps: false,
			writer: None,
			reporter: None,
		}
	}

	/// Initial minimum level. Without one every level starts disabled.
	pub fn minimum_level(mut self, level: Option<Level>) -> Self {
		self.level = level;
		self
	}

	/// Uses an existing registry instead of a fresh one.
	pub fn registry(mut self, registry: LevelRegistry) -> Self {
		self.registry = Some(registry);
		self
	}

	/// Scope labels of the root logger itself.
	pub fn scopes<I, S>(mut self, labels: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scopes = ScopeChain::new(labels);
		self
	}

	/// Whether the default console sink starts attached. Defaults to true.
	pub fn console(mut self, enabled: bool) -> Self {
		self.console = enabled;
		self
	}

	pub fn timestamps(mut self, enabled: bool) -> Self {
		self.timestamps = enabled;
		self
	}

	/// Where the default console sink writes. Defaults to stdout/stderr.
	pub fn console_writer(mut self, writer: Arc<dyn ConsoleWriter>) -> Self {
		self.writer = Some(writer);
		self
	}

	/// How subscriber failures are surfaced. Defaults to stderr and `tracing`.
	pub fn failure_reporter<F>(mut self, reporter: F) -> Self
	where
		F: Fn(SubscriptionId, &LogEvent, &SubscriberError) + Send + Sync + 'static,
	{
		self.reporter = Some(Arc::new(reporter));
		self
	}

	pub fn build(self) -> Logger {
		let registry = self.registry.unwrap_or_default();
		if let Some(level) = self.level {
			registry.set_minimum(level);
		}

		let bus = match self.reporter {
			Some(reporter) => EventBus::with_failure_reporter(move |id, event, err| reporter(id, event, err)),
			None => EventBus::new(),
		};

		let writer = self.writer.unwrap_or_else(|| Arc::new(StdConsole));
		let sink = ConsoleSink::with_writer(writer).with_timestamps(self.timestamps);
		let console = DefaultConsole::new(sink, bus.clone());
		if self.console {
			console.attach();
		}

		Logger {
			shared: Arc::new(Shared {
				registry,
				bus,
				console,
			}),
			scopes: self.scopes,
		}
	}
}

impl Default for LoggerBuilder {
	fn default() -> Self {
		Self::new()
	}
}
