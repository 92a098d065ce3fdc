use std::sync::Arc;

use izumi_registry::{Category, Registry};

use crate::action::DispatchAction;
use crate::bus::{DispatchBus, SubscriptionId};
use crate::config::DispatchConfig;
use crate::error::{HandlerError, Result};
use crate::payload::Payload;

/// Dispatch context: one registry, one bus, one configuration.
///
/// Clones share all three.
#[derive(Clone, Debug)]
pub struct Dispatcher {
	registry: Registry,
	bus: DispatchBus,
	config: Arc<DispatchConfig>,
}

impl Dispatcher {
	/// Creates a dispatcher with the default configuration.
	pub fn new(registry: Registry) -> Self {
		Self::with_config(registry, DispatchConfig::default())
	}

	pub fn with_config(registry: Registry, config: DispatchConfig) -> Self {
		Self {
			registry,
			bus: DispatchBus::new(),
			config: Arc::new(config),
		}
	}

	pub fn registry(&self) -> &Registry {
		&self.registry
	}

	pub fn bus(&self) -> &DispatchBus {
		&self.bus
	}

	pub fn config(&self) -> &DispatchConfig {
		&self.config
	}

	/// Creates an action without dispatching it.
	pub fn create<C: Category>(&self, value: C, payload: Payload) -> Result<DispatchAction> {
		DispatchAction::create(&self.registry, value, payload)
	}

	/// Creates an action for `value` and dispatches it. Returns the action.
	pub fn dispatch<C: Category>(&self, value: C, payload: Payload) -> Result<DispatchAction> {
		let action = self.create(value, payload)?;
		self.dispatch_action(&action)?;
		Ok(action)
	}

	/// Dispatches a previously created action to every subscriber.
	pub fn dispatch_action(&self, action: &DispatchAction) -> Result<()> {
		if self.config.dispatch.trace {
			tracing::trace!(
				id = %action.id(),
				kind = ?action.kind(),
				category = action.category_name().unwrap_or("<unknown>"),
				value = action.value_name().unwrap_or("<unknown>"),
				subscribers = self.bus.len(),
				"dispatch"
			);
		}
		self.bus.dispatch(action)
	}

	/// Dispatches a changed signal for `value`.
	///
	/// Stores that keep data outside the world refresh it on this signal and then
	/// react like they would to any tracked change.
	pub fn signal_changed<C: Category>(&self, value: C, payload: Payload) -> Result<DispatchAction> {
		let action = DispatchAction::create_signal(&self.registry, value, payload)?;
		self.dispatch_action(&action)?;
		Ok(action)
	}

	/// Subscribes an out-of-band handler. Remember to [`unsubscribe`](Self::unsubscribe).
	pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
	where
		F: Fn(&DispatchAction) -> Result<(), HandlerError> + Send + Sync + 'static,
	{
		self.bus.subscribe(handler)
	}

	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		self.bus.unsubscribe(id)
	}

	/// Installs this dispatcher as the process-wide active one.
	pub fn make_active(&self) {
		crate::active::install(self.clone());
	}
}
