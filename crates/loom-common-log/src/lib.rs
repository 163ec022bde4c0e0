// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Scoped, leveled logging for Loom.
//!
//! This crate provides:
//! - [`Logger`] - A scoped handle with one method per [`Level`]
//! - [`LevelRegistry`] - The shared minimum-level state every logger consults
//! - [`EventBus`] - Synchronous delivery of [`LogEvent`]s to subscribers
//! - [`ConsoleSink`] - The default `[LEVEL][scope] args` console output
//! - [`TracingSink`] and [`CrashBridge`] - Subscribers for `tracing` and crash reporting
//!
//! Every level is disabled until a minimum level is configured.
//!
//! # Usage
//!
//! ```
//! use loom_common_log::{log_args, Logger};
//! use serde_json::json;
//!
//! let log = Logger::new();
//! log.set_level("info").unwrap();
//!
//! log.on(|event| {
//!     if event.level.as_str() == "warn" {
//!         // forward to an alerting pipeline
//!     }
//! });
//!
//! let worker = log.create_log(["svc", "worker"]);
//! worker.info(log_args!["started", json!({ "pid": 42 })]);
//! // stdout: [INFO][svc][worker] started {pid: 42}
//! ```

mod bus;
mod config;
mod console;
mod crash;
mod error;
mod event;
mod global;
mod level;
mod logger;
mod registry;
mod render;
mod scope;
mod tracing_sink;

pub use bus::{EventBus, FailureReporter, Subscriber, SubscriptionId};
pub use config::{LogConfig, LOG_CONSOLE_ENV, LOG_CONSOLE_TIMESTAMPS_ENV, LOG_LEVEL_ENV};
pub use console::{ConsoleSink, ConsoleStream, ConsoleWriter, DefaultConsole, RecordingConsole, StdConsole};
pub use crash::{Capture, CaptureLevel, CrashBridge, CrashReporter};
pub use error::{LogError, Result, SubscriberError};
pub use event::LogEvent;
pub use global::{global, init, init_from_env, try_global};
pub use level::Level;
pub use logger::{Logger, LoggerBuilder};
pub use registry::LevelRegistry;
pub use render::{render_arg, render_args};
pub use scope::ScopeChain;
pub use tracing_sink::TracingSink;
