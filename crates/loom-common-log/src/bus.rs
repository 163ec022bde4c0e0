// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Synchronous publish/subscribe channel for log events.

use std::any::Any;
use std::fmt;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{ReentrantMutex, RwLock};
use tracing::error;

use crate::error::SubscriberError;
use crate::event::LogEvent;
use crate::level::Level;

/// Receives every event published on the bus it is subscribed to.
pub trait Subscriber: Send + Sync {
	fn on_event(&self, event: &LogEvent) -> Result<(), SubscriberError>;
}

/// Token returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "sub-{}", self.0)
	}
}

/// Called when a subscriber fails while handling an event.
pub type FailureReporter = Arc<dyn Fn(SubscriptionId, &LogEvent, &SubscriberError) + Send + Sync>;

struct FnSubscriber<F>(F);

impl<F> Subscriber for FnSubscriber<F>
where
	F: Fn(&LogEvent) -> Result<(), SubscriberError> + Send + Sync,
{
	fn on_event(&self, event: &LogEvent) -> Result<(), SubscriberError> {
		(self.0)(event)
	}
}

#[derive(Clone)]
struct Entry {
	id: SubscriptionId,
	only: Option<Level>,
	subscriber: Arc<dyn Subscriber>,
}

impl Entry {
	fn accepts(&self, level: Level) -> bool {
		self.only.is_none_or(|only| only == level)
	}
}

/// Delivers log events to subscribers, synchronously and in subscription order.
///
/// Clones share the same subscriber list. A subscriber that returns an error
/// or panics is reported through the bus's [`FailureReporter`] and the event
/// still reaches every remaining subscriber.
#[derive(Clone)]
pub struct EventBus {
	inner: Arc<EventBusInner>,
}

struct EventBusInner {
	entries: RwLock<Vec<Entry>>,
	next_id: AtomicU64,
	/// Held for the whole delivery of one event. Re-entrant so a subscriber
	/// can log on the same thread.
	delivery: ReentrantMutex<()>,
	reporter: FailureReporter,
}

impl EventBus {
	/// Creates a bus that reports subscriber failures to stderr and `tracing`.
	pub fn new() -> Self {
		Self::with_failure_reporter(report_to_stderr)
	}

	/// Creates a bus with a custom failure reporter.
	pub fn with_failure_reporter<F>(reporter: F) -> Self
	where
		F: Fn(SubscriptionId, &LogEvent, &SubscriberError) + Send + Sync + 'static,
	{
		Self {
			inner: Arc::new(EventBusInner {
				entries: RwLock::new(Vec::new()),
				next_id: AtomicU64::new(1),
				delivery: ReentrantMutex::new(()),
				reporter: Arc::new(reporter),
			}),
		}
	}

	/// Registers a closure for every future event.
	pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
	where
		F: Fn(&LogEvent) -> Result<(), SubscriberError> + Send + Sync + 'static,
	{
		self.insert(None, Arc::new(FnSubscriber(handler)))
	}

	/// Registers a closure for future events of a single level.
	pub fn subscribe_level<F>(&self, level: Level, handler: F) -> SubscriptionId
	where
		F: Fn(&LogEvent) -> Result<(), SubscriberError> + Send + Sync + 'static,
	{
		self.insert(Some(level), Arc::new(FnSubscriber(handler)))
	}

	/// Registers a [`Subscriber`] implementation for every future event.
	pub fn subscribe_sink(&self, sink: Arc<dyn Subscriber>) -> SubscriptionId {
		self.insert(None, sink)
	}

	fn insert(&self, only: Option<Level>, subscriber: Arc<dyn Subscriber>) -> SubscriptionId {
		let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
		self.inner.entries.write().push(Entry {
			id,
			only,
			subscriber,
		});
		id
	}

	/// Removes a subscription. Returns false if it was already gone.
	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		let mut entries = self.inner.entries.write();
		let before = entries.len();
		entries.retain(|entry| entry.id != id);
		entries.len() != before
	}

	pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
		self.inner.entries.read().iter().any(|entry| entry.id == id)
	}

	pub fn subscriber_count(&self) -> usize {
		self.inner.entries.read().len()
	}

	/// Delivers `event` to every current subscriber interested in its level.
	///
	/// The subscriber list is snapshotted first, so changes made during
	/// delivery apply from the next event. Returns the number of subscribers
	/// the event was handed to, failed ones included.
	pub fn publish(&self, event: &LogEvent) -> usize {
		let _delivery = self.inner.delivery.lock();
		let entries: Vec<Entry> = self.inner.entries.read().clone();

		let mut delivered = 0;
		for entry in entries.iter().filter(|entry| entry.accepts(event.level)) {
			delivered += 1;
			let outcome = panic::catch_unwind(AssertUnwindSafe(|| entry.subscriber.on_event(event)))
				.unwrap_or_else(|payload| Err(SubscriberError::Panicked(panic_message(payload.as_ref()))));

			if let Err(err) = outcome {
				let reporter = &self.inner.reporter;
				if panic::catch_unwind(AssertUnwindSafe(|| reporter(entry.id, event, &err))).is_err() {
					error!(subscription = %entry.id, "log failure reporter panicked");
				}
			}
		}
		delivered
	}
}

impl Default for EventBus {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for EventBus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EventBus")
			.field("subscribers", &self.subscriber_count())
			.finish()
	}
}

fn report_to_stderr(id: SubscriptionId, event: &LogEvent, err: &SubscriberError) {
	error!(subscription = %id, level = %event.level, error = %err, "log subscriber failed");
	// stderr may be closed or a broken pipe; losing the diagnostic is acceptable.
	let _ = writeln!(
		io::stderr().lock(),
		"[loom-common-log] subscriber {id} failed on {} event: {err}",
		event.level
	);
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(s) = payload.downcast_ref::<&str>() {
		(*s).to_string()
	} else if let Some(s) = payload.downcast_ref::<String>() {
		s.clone()
	} else {
		"unknown panic payload".to_string()
	}
}
