// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared table of enabled levels.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::error::Result;
use crate::level::Level;

/// Tracks which levels are enabled.
///
/// The enabled set is always a prefix of [`Level::ORDER`]: enabling a level
/// enables every more severe one. It is stored as the least severe enabled
/// level, `None` meaning nothing is enabled. Clones share the same state.
#[derive(Clone, Default)]
pub struct LevelRegistry {
	minimum: Arc<RwLock<Option<Level>>>,
}

impl LevelRegistry {
	/// Creates a registry with every level disabled.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a registry with `level` and above enabled.
	pub fn with_minimum(level: Level) -> Self {
		Self {
			minimum: Arc::new(RwLock::new(Some(level))),
		}
	}

	/// The fixed level sequence, most to least severe.
	pub fn order(&self) -> &'static [Level] {
		&Level::ORDER
	}

	/// Enables `level` and everything more severe, disabling the rest.
	///
	/// The identifier is parsed before the state is touched, so an
	/// unrecognized value leaves the registry unchanged.
	pub fn set_minimum_level(&self, level: &str) -> Result<()> {
		let level: Level = level.parse()?;
		self.set_minimum(level);
		Ok(())
	}

	/// Typed form of [`LevelRegistry::set_minimum_level`].
	pub fn set_minimum(&self, level: Level) {
		*self.minimum.write() = Some(level);
		debug!(level = %level, "log level changed");
	}

	/// The least severe enabled level, if any level is enabled.
	pub fn minimum(&self) -> Option<Level> {
		*self.minimum.read()
	}

	pub fn is_enabled(&self, level: Level) -> bool {
		match *self.minimum.read() {
			Some(minimum) => level >= minimum,
			None => false,
		}
	}

	/// Enabled flag for every level, in [`Level::ORDER`].
	pub fn snapshot(&self) -> [(Level, bool); 5] {
		let minimum = self.minimum();
		Level::ORDER.map(|level| (level, minimum.is_some_and(|m| level >= m)))
	}
}

impl std::fmt::Debug for LevelRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LevelRegistry")
			.field("minimum", &self.minimum())
			.finish()
	}
}
