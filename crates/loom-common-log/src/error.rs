// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the logging facility.

use thiserror::Error;

/// Result type for logging configuration operations.
pub type Result<T> = std::result::Result<T, LogError>;

/// Errors surfaced to callers configuring the logger.
///
/// Nothing on the publish path returns one of these; subscriber failures are
/// contained by the bus and reported as [`SubscriberError`].
#[derive(Debug, Error)]
pub enum LogError {
	/// The level identifier is not one of `critical`, `error`, `warn`, `info`, `debug`.
	#[error("invalid log level: {0:?}")]
	InvalidLevel(String),

	/// An environment value could not be interpreted.
	#[error("invalid configuration value for {key}: {message}")]
	InvalidConfig { key: String, message: String },

	/// The process-wide logger was already set up.
	#[error("global logger already initialized")]
	AlreadyInitialized,
}

/// Failure raised by a subscriber while handling an event.
#[derive(Debug, Error)]
pub enum SubscriberError {
	#[error("{0}")]
	Failed(String),

	#[error("subscriber panicked: {0}")]
	Panicked(String),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

impl SubscriberError {
	pub fn failed(message: impl Into<String>) -> Self {
		Self::Failed(message.into())
	}
}
