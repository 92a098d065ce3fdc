use izumi_registry::RegistryError;

use crate::bus::SubscriptionId;
use crate::payload::PayloadKey;

/// Error raised by a subscribed handler.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dispatch-side failures.
///
/// Every variant is a local, synchronous failure of the call that raised it.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
	#[error(transparent)]
	Registry(#[from] RegistryError),

	/// The key is absent and the lookup was not optional.
	#[error("there is no payload in {action} that matches the key {key}")]
	PayloadKeyMissing { action: String, key: PayloadKey },

	/// The key is present but holds a different type.
	#[error("payload {key} in {action} holds `{stored}`, not `{requested}`")]
	PayloadTypeMismatch {
		action: String,
		key: PayloadKey,
		stored: &'static str,
		requested: &'static str,
	},

	/// A baked view was used before anything was baked into it.
	#[error("{kind} is empty; was a job scheduled without baking it first?")]
	UninitializedSnapshot { kind: &'static str },

	/// The active-context facade was used while no dispatcher is installed.
	#[error("cannot dispatch without an active dispatcher")]
	NoActiveDispatchContext,

	/// A subscribed handler failed; remaining handlers were not invoked.
	#[error("handler {subscription} failed: {source}")]
	Handler {
		subscription: SubscriptionId,
		#[source]
		source: HandlerError,
	},
}

pub type Result<T, E = DispatchError> = std::result::Result<T, E>;
