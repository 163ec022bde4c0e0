// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Example: scoped console logging with a crash reporter attached.
//!
//! Run with:
//!   LOG_LEVEL=debug cargo run --example console -p loom-common-log

use std::sync::Arc;

use loom_common_log::{log_args, Capture, CrashBridge, CrashReporter, SubscriberError, TracingSink};
use serde_json::json;

/// Prints captures instead of sending them anywhere.
struct PrintReporter;

impl CrashReporter for PrintReporter {
	fn capture(&self, capture: Capture) -> Result<(), SubscriberError> {
		let body = serde_json::to_string(&capture).map_err(|e| SubscriberError::failed(e.to_string()))?;
		println!("  -> crash capture: {body}");
		Ok(())
	}
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_env_filter("loom_common_log=debug")
		.init();

	let log = loom_common_log::init_from_env()?;
	if log.registry().minimum().is_none() {
		println!("LOG_LEVEL not set, defaulting to info");
		log.set_level("info")?;
	}

	log.attach(Arc::new(CrashBridge::new(PrintReporter)));
	if std::env::var_os("LOG_TRACING").is_some() {
		log.attach(Arc::new(TracingSink::new()));
	}

	let worker = log.create_log(["svc", "worker"]);
	worker.info(log_args!["started", json!({ "pid": std::process::id() })]);
	worker.debug(["polling queue"]);
	worker.warn(log_args!["queue depth high", 1200]);

	let db = worker.create_log(["db"]);
	db.error(["connection reset"]);

	log.disable_default_console_logger();
	log.info(["this only reaches subscribers"]);
	log.enable_default_console_logger();

	log.critical(log_args!["shutting down", json!({ "reason": "example finished" })]);
	Ok(())
}
