// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Nested scope labels.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered, immutable list of scope labels attached to a logger.
///
/// Cloning is cheap; the labels are shared.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct ScopeChain {
	labels: Arc<[String]>,
}

impl ScopeChain {
	pub fn new<I, S>(labels: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			labels: labels.into_iter().map(Into::into).collect(),
		}
	}

	pub fn empty() -> Self {
		Self::default()
	}

	/// Returns a new chain with `labels` appended. `self` is left untouched.
	pub fn extend<I, S>(&self, labels: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let labels: Vec<String> = self
			.labels
			.iter()
			.cloned()
			.chain(labels.into_iter().map(Into::into))
			.collect();
		Self {
			labels: labels.into(),
		}
	}

	/// Renders the chain as `[first][second]`, or `""` when empty.
	pub fn render(&self) -> String {
		self.labels.iter().map(|label| format!("[{label}]")).collect()
	}

	pub fn labels(&self) -> &[String] {
		&self.labels
	}

	pub fn len(&self) -> usize {
		self.labels.len()
	}

	pub fn is_empty(&self) -> bool {
		self.labels.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.labels.iter().map(String::as_str)
	}
}

impl fmt::Debug for ScopeChain {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.labels.iter()).finish()
	}
}

impl fmt::Display for ScopeChain {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for label in self.labels.iter() {
			write!(f, "[{label}]")?;
		}
		Ok(())
	}
}

impl<S: Into<String>> FromIterator<S> for ScopeChain {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self::new(iter)
	}
}

impl Serialize for ScopeChain {
	fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
		self.labels.serialize(serializer)
	}
}

impl<'de> Deserialize<'de> for ScopeChain {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let labels = Vec::<String>::deserialize(deserializer)?;
		Ok(Self::new(labels))
	}
}
