//! Queued subscriber that turns actions into worker tasks.
//!
//! # Role
//!
//! An [`ActionHandler`] is subscribed the moment it is attached. Every dispatch
//! pushes a duplicate of the action onto its queue; nothing else happens on the
//! dispatching thread. On its own scheduling turn the owner calls
//! [`ActionHandler::update`], which drains the queue in dispatch order and lets
//! the owner convert each action into tasks for a [`JobPool`].
//!
//! # Invariants
//!
//! - The queue is FIFO in dispatch order.
//! - Actions dispatched while `update` runs wait for the next `update`.
//! - Dropping the handler unsubscribes it, unless the bus is already gone.

use std::collections::VecDeque;
use std::sync::Arc;

use izumi_registry::{Category, Registry};
use parking_lot::Mutex;

use crate::action::DispatchAction;
use crate::bus::{SubscriptionId, WeakBus};
use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::jobs::{ActionCategory, ActionExact, ActionFlag, JobBatch, JobPool};

/// Deferred action subscriber.
pub struct ActionHandler {
	registry: Registry,
	bus: WeakBus,
	subscription: SubscriptionId,
	queue: Arc<Mutex<VecDeque<DispatchAction>>>,
	warn_queue_depth: usize,
}

impl ActionHandler {
	/// Subscribes a new handler to `dispatcher`.
	pub fn attach(dispatcher: &Dispatcher) -> Self {
		let handler_config = &dispatcher.config().handler;
		let queue = Arc::new(Mutex::new(VecDeque::with_capacity(handler_config.queue_capacity)));

		let sink = Arc::clone(&queue);
		let subscription = dispatcher.subscribe(move |action| {
			sink.lock().push_back(action.duplicate());
			Ok(())
		});

		Self {
			registry: dispatcher.registry().clone(),
			bus: dispatcher.bus().downgrade(),
			subscription,
			queue,
			warn_queue_depth: handler_config.warn_queue_depth,
		}
	}

	pub fn subscription(&self) -> SubscriptionId {
		self.subscription
	}

	/// Number of queued actions.
	pub fn pending(&self) -> usize {
		self.queue.lock().len()
	}

	/// Bakes the table of `C` for use inside tasks.
	pub fn bake_category<C: Category>(&self) -> ActionCategory<C> {
		ActionCategory::bake(&self.registry)
	}

	/// Bakes the identity of `value` for use inside tasks.
	pub fn bake_exact<C: Category>(&self, value: C) -> Result<ActionExact> {
		ActionExact::bake(&self.registry, value)
	}

	/// Bakes a flag for use inside tasks.
	pub fn bake_flag(&self, name: &str) -> ActionFlag {
		ActionFlag::bake(&self.registry, name)
	}

	/// Takes every queued action, oldest first.
	pub fn drain(&self) -> Vec<DispatchAction> {
		let drained: Vec<_> = self.queue.lock().drain(..).collect();
		if self.exceeds_warn_depth(drained.len()) {
			tracing::warn!(
				subscription = %self.subscription,
				queued = drained.len(),
				threshold = self.warn_queue_depth,
				"action queue grew past its warning depth"
			);
		}
		drained
	}

	/// True once `queued` is above the configured warning depth. A depth of 0
	/// disables the warning.
	fn exceeds_warn_depth(&self, queued: usize) -> bool {
		self.warn_queue_depth > 0 && queued > self.warn_queue_depth
	}

	/// Drains the queue, hands each action to `on_action`, and runs the
	/// resulting tasks on `pool`.
	///
	/// Returns the number of actions handled.
	pub fn update<'a, F>(&self, pool: &JobPool, mut on_action: F) -> usize
	where
		F: FnMut(&DispatchAction, &mut JobBatch<'a>),
	{
		let actions = self.drain();
		if actions.is_empty() {
			return 0;
		}

		let mut batch = JobBatch::new();
		for action in &actions {
			on_action(action, &mut batch);
		}
		let tasks = pool.run(batch);
		tracing::debug!(
			subscription = %self.subscription,
			actions = actions.len(),
			tasks,
			"drained action queue"
		);
		actions.len()
	}

	/// Unsubscribes the handler. Same as dropping it.
	pub fn detach(self) {}
}

impl Drop for ActionHandler {
	fn drop(&mut self) {
		if let Some(bus) = self.bus.upgrade() {
			bus.unsubscribe(self.subscription);
		}
	}
}

impl std::fmt::Debug for ActionHandler {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ActionHandler")
			.field("subscription", &self.subscription)
			.field("pending", &self.pending())
			.finish()
	}
}
