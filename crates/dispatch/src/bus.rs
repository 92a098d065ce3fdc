//! Synchronous multicast of dispatched actions.
//!
//! # Role
//!
//! [`DispatchBus`] keeps an ordered subscriber list and invokes every handler,
//! in subscription order, on the dispatching thread.
//!
//! # Invariants
//!
//! - Each dispatch sees the subscriber list as it was when the dispatch began;
//!   subscribing or unsubscribing from inside a handler affects the next one.
//! - The first failing handler aborts the dispatch. The bus does not retry or
//!   isolate handlers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use arc_swap::ArcSwap;

use crate::action::DispatchAction;
use crate::error::{DispatchError, HandlerError, Result};

/// Handle returned by [`DispatchBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl std::fmt::Display for SubscriptionId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "subscription#{}", self.0)
	}
}

type Handler = dyn Fn(&DispatchAction) -> Result<(), HandlerError> + Send + Sync;

#[derive(Clone)]
struct Subscriber {
	id: SubscriptionId,
	handler: Arc<Handler>,
}

#[derive(Default)]
struct BusInner {
	subscribers: ArcSwap<Vec<Subscriber>>,
	next_id: AtomicU64,
}

/// Ordered multicast of actions to subscribed handlers.
///
/// Clones share the same subscriber list.
#[derive(Clone, Default)]
pub struct DispatchBus {
	inner: Arc<BusInner>,
}

impl DispatchBus {
	/// Creates a bus without subscribers.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends `handler` to the subscriber list.
	pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
	where
		F: Fn(&DispatchAction) -> Result<(), HandlerError> + Send + Sync + 'static,
	{
		let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed) + 1);
		let subscriber = Subscriber {
			id,
			handler: Arc::new(handler),
		};
		self.inner.subscribers.rcu(|current| {
			let mut next = Vec::clone(current);
			next.push(subscriber.clone());
			next
		});
		tracing::debug!(%id, "subscribed dispatch handler");
		id
	}

	/// Removes a subscriber. Returns false if it was not subscribed.
	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		let previous = self.inner.subscribers.rcu(|current| {
			current
				.iter()
				.filter(|subscriber| subscriber.id != id)
				.cloned()
				.collect::<Vec<_>>()
		});
		let removed = previous.iter().any(|subscriber| subscriber.id == id);
		if removed {
			tracing::debug!(%id, "unsubscribed dispatch handler");
		}
		removed
	}

	/// Invokes every subscriber with `action`, in subscription order.
	pub fn dispatch(&self, action: &DispatchAction) -> Result<()> {
		let subscribers = self.inner.subscribers.load_full();
		for subscriber in subscribers.iter() {
			(subscriber.handler)(action).map_err(|source| DispatchError::Handler {
				subscription: subscriber.id,
				source,
			})?;
		}
		Ok(())
	}

	/// Number of current subscribers.
	pub fn len(&self) -> usize {
		self.inner.subscribers.load().len()
	}

	/// Returns true if nobody is subscribed.
	pub fn is_empty(&self) -> bool {
		self.inner.subscribers.load().is_empty()
	}

	pub(crate) fn downgrade(&self) -> WeakBus {
		WeakBus(Arc::downgrade(&self.inner))
	}
}

impl std::fmt::Debug for DispatchBus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DispatchBus").field("subscribers", &self.len()).finish()
	}
}

/// Non-owning bus handle; lets a subscriber outlive the bus it listens to.
#[derive(Clone)]
pub(crate) struct WeakBus(Weak<BusInner>);

impl WeakBus {
	pub(crate) fn upgrade(&self) -> Option<DispatchBus> {
		self.0.upgrade().map(|inner| DispatchBus { inner })
	}
}
