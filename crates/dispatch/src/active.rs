//! Process-wide active dispatcher.
//!
//! For callers that cannot be handed a [`Dispatcher`] (UI callbacks, debug
//! tooling). Everything else should take the dispatcher explicitly.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use izumi_registry::Category;

use crate::action::DispatchAction;
use crate::bus::SubscriptionId;
use crate::dispatcher::Dispatcher;
use crate::error::{DispatchError, HandlerError, Result};
use crate::payload::Payload;

static ACTIVE: ArcSwapOption<Dispatcher> = ArcSwapOption::const_empty();

/// Installs `dispatcher` as the active one, replacing any previous one.
pub fn install(dispatcher: Dispatcher) {
	ACTIVE.store(Some(Arc::new(dispatcher)));
	tracing::debug!("installed active dispatcher");
}

/// Removes the active dispatcher. Returns it if there was one.
pub fn clear() -> Option<Arc<Dispatcher>> {
	ACTIVE.swap(None)
}

/// Returns the active dispatcher, if any.
pub fn current() -> Option<Arc<Dispatcher>> {
	ACTIVE.load_full()
}

fn require() -> Result<Arc<Dispatcher>> {
	current().ok_or(DispatchError::NoActiveDispatchContext)
}

/// Dispatches `value` to the active dispatcher.
pub fn dispatch<C: Category>(value: C, payload: Payload) -> Result<DispatchAction> {
	require()?.dispatch(value, payload)
}

/// Dispatches a pre-created action to the active dispatcher.
pub fn dispatch_action(action: &DispatchAction) -> Result<()> {
	require()?.dispatch_action(action)
}

/// Signals a change to the active dispatcher.
pub fn signal_changed<C: Category>(value: C, payload: Payload) -> Result<DispatchAction> {
	require()?.signal_changed(value, payload)
}

/// Subscribes an out-of-band handler to the active dispatcher.
pub fn subscribe<F>(handler: F) -> Result<SubscriptionId>
where
	F: Fn(&DispatchAction) -> Result<(), HandlerError> + Send + Sync + 'static,
{
	Ok(require()?.subscribe(handler))
}

/// Unsubscribes from the active dispatcher.
///
/// Does nothing when no dispatcher is active, so it is safe during teardown.
pub fn unsubscribe(id: SubscriptionId) -> bool {
	current().is_some_and(|dispatcher| dispatcher.unsubscribe(id))
}
