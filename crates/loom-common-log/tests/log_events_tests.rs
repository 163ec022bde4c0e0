// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! End-to-end tests for the logging facility.
//!
//! **Purpose**: Exercises the public surface the way an application does: a
//! root logger with the console sink, scoped children, external subscribers
//! and the crash bridge all wired onto one bus.

use std::sync::Arc;

use loom_common_log::{
	log_args, Capture, CaptureLevel, ConsoleStream, CrashBridge, CrashReporter, Level, LogConfig,
	LogEvent, Logger, RecordingConsole, SubscriberError,
};
use parking_lot::Mutex;
use proptest::prelude::*;
use serde_json::{json, Value};

struct App {
	log: Logger,
	console: RecordingConsole,
	events: Arc<Mutex<Vec<LogEvent>>>,
}

fn app(level: Option<Level>) -> App {
	let console = RecordingConsole::new();
	let log = Logger::builder()
		.minimum_level(level)
		.console_writer(Arc::new(console.clone()))
		.failure_reporter(|_, _, _| {})
		.build();
	let events = Arc::new(Mutex::new(Vec::new()));
	let sink = Arc::clone(&events);
	log.on(move |event| sink.lock().push(event.clone()));
	App {
		log,
		console,
		events,
	}
}

#[derive(Default)]
struct Captures(Mutex<Vec<Capture>>);

impl CrashReporter for Captures {
	fn capture(&self, capture: Capture) -> Result<(), SubscriberError> {
		self.0.lock().push(capture);
		Ok(())
	}
}

// ============================================================================
// Filtering
// ============================================================================

/// Minimum `warn`, one call per level: three events, three console lines.
#[test]
fn test_warn_minimum_filters_info_and_debug() {
	let app = app(None);
	app.log.set_level("warn").unwrap();

	app.log.critical(["critical message"]);
	app.log.error(["error message"]);
	app.log.warn(["warn message"]);
	app.log.info(["info message"]);
	app.log.debug(["debug message"]);

	let levels: Vec<Level> = app.events.lock().iter().map(|e| e.level).collect();
	assert_eq!(levels, vec![Level::Critical, Level::Error, Level::Warn]);
	assert_eq!(
		app.console.lines(),
		vec![
			(ConsoleStream::Error, "[CRITICAL] critical message".to_string()),
			(ConsoleStream::Error, "[ERROR] error message".to_string()),
			(ConsoleStream::Warn, "[WARN] warn message".to_string()),
		]
	);
}

/// A fresh root drops everything until configured.
#[test]
fn test_unconfigured_logger_is_silent() {
	let app = app(None);
	app.log.critical(["nobody hears this"]);
	assert!(app.events.lock().is_empty());
	assert!(app.console.is_empty());
}

/// Configuration from the environment feeds straight into the root logger.
#[test]
fn test_logger_from_config() {
	let config = LogConfig::from_lookup(|name| match name {
		"LOG_LEVEL" => Some("error".to_string()),
		"LOG_CONSOLE" => Some("false".to_string()),
		_ => None,
	})
	.unwrap();

	let log = Logger::from_config(&config);
	assert!(log.error_enabled());
	assert!(!log.warn_enabled());
	assert!(!log.default_console_enabled());
}

// ============================================================================
// Subscribers
// ============================================================================

/// The crash bridge sees exactly the severe events, with scopes attached.
#[test]
fn test_crash_bridge_on_the_bus() {
	let app = app(Some(Level::Debug));
	let captures = Arc::new(Captures::default());
	app.log.attach(Arc::new(CrashBridge::new(Arc::clone(&captures))));

	let api = app.log.create_log(["api"]);
	api.critical(["panic in handler"]);
	api.error([json!({ "status": 502 })]);
	api.warn(log_args!["slow upstream", "payments"]);
	api.info(["ok"]);

	let captures = captures.0.lock();
	let levels: Vec<CaptureLevel> = captures.iter().map(Capture::level).collect();
	assert_eq!(
		levels,
		vec![CaptureLevel::Fatal, CaptureLevel::Error, CaptureLevel::Warning]
	);
	match &captures[2] {
		Capture::Message { message, extra, scopes, .. } => {
			assert_eq!(message, "slow upstream");
			assert_eq!(extra, &Some(json!({ "data": "payments" })));
			assert_eq!(scopes.labels(), ["api"]);
		}
		other => panic!("unexpected capture: {other:?}"),
	}
}

/// A broken subscriber neither stops the console nor later subscribers.
#[test]
fn test_subscriber_failure_is_isolated() {
	let failures = Arc::new(Mutex::new(0));
	let counter = Arc::clone(&failures);
	let console = RecordingConsole::new();
	let log = Logger::builder()
		.minimum_level(Some(Level::Info))
		.console_writer(Arc::new(console.clone()))
		.failure_reporter(move |_, _, _| *counter.lock() += 1)
		.build();

	log.try_on(|_| Err(SubscriberError::failed("offline")));
	let after = Arc::new(Mutex::new(0));
	let seen = Arc::clone(&after);
	log.on(move |_| *seen.lock() += 1);

	log.info(["one"]);
	log.info(["two"]);

	assert_eq!(console.len(), 2);
	assert_eq!(*after.lock(), 2);
	assert_eq!(*failures.lock(), 2);
}

/// Turning the console off leaves other subscribers untouched.
#[test]
fn test_console_toggle_keeps_subscribers() {
	let app = app(Some(Level::Info));

	app.log.disable_default_console_logger();
	app.log.info(["quiet"]);
	app.log.enable_default_console_logger();
	app.log.enable_default_console_logger();
	app.log.info(["loud"]);

	assert_eq!(app.events.lock().len(), 2);
	assert_eq!(
		app.console.lines(),
		vec![(ConsoleStream::Out, "[INFO] loud".to_string())]
	);
}

/// Events can be forwarded as JSON by external subscribers.
#[test]
fn test_events_serialize_for_forwarding() {
	let app = app(Some(Level::Info));
	app.log.create_log(["jobs"]).info(log_args!["done", 3]);

	let event = app.events.lock()[0].clone();
	let value = serde_json::to_value(&event).unwrap();
	assert_eq!(value["level"], "info");
	assert_eq!(value["args"], json!(["done", 3]));
	assert_eq!(value["scopes"], json!(["jobs"]));
	assert!(value["time"].is_i64());
}

// ============================================================================
// Properties
// ============================================================================

fn arg() -> impl Strategy<Value = Value> {
	prop_oneof![
		any::<i64>().prop_map(Value::from),
		any::<bool>().prop_map(Value::from),
		"[ -~]{0,16}".prop_map(Value::from),
		Just(Value::Null),
	]
}

proptest! {
	/// Disabled calls have no observable effect whatever the arguments.
	#[test]
	fn prop_disabled_levels_are_silent(args in prop::collection::vec(arg(), 0..5), minimum in 0usize..4) {
		let app = app(Some(Level::ORDER[minimum]));
		for level in &Level::ORDER[minimum + 1..] {
			app.log.log(*level, args.clone());
		}
		prop_assert!(app.events.lock().is_empty());
		prop_assert!(app.console.is_empty());
	}

	/// Enabled calls deliver the arguments and scopes verbatim, exactly once.
	#[test]
	fn prop_enabled_levels_deliver_verbatim(
		args in prop::collection::vec(arg(), 0..5),
		scopes in prop::collection::vec("[a-z]{1,8}", 0..3),
		level in 0usize..5,
	) {
		let app = app(Some(Level::Debug));
		let level = Level::ORDER[level];
		app.log.create_log(scopes.clone()).log(level, args.clone());

		let events = app.events.lock();
		prop_assert_eq!(events.len(), 1);
		prop_assert_eq!(events[0].level, level);
		prop_assert_eq!(&events[0].args, &args);
		prop_assert_eq!(events[0].scopes.labels(), scopes.as_slice());
		prop_assert_eq!(app.console.len(), 1);
	}
}
