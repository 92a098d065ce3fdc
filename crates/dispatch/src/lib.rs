#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Enum-identified action dispatch.
//!
//! Producers dispatch [`DispatchAction`]s, identified by a category enum and a
//! value of it, through a [`Dispatcher`]. Subscribers either handle them on the
//! spot or queue them with an [`ActionHandler`] and later turn them into worker
//! tasks. Worker tasks only ever see [`JobDispatchAction`]s and the baked views
//! in [`jobs`], never the registry.
//!
//! ```ignore
//! let dispatcher = Dispatcher::new(Registry::new());
//! let handler = ActionHandler::attach(&dispatcher);
//! let meteo = handler.bake_exact(Magic::Meteo)?;
//!
//! dispatcher.dispatch(Magic::Meteo, payload! { Key::Crit => true })?;
//!
//! handler.update(&pool, |action, jobs| {
//!     let job = action.to_job();
//!     jobs.schedule(move || {
//!         if job.is_exactly(meteo).unwrap_or(false) {
//!             // ...
//!         }
//!     });
//! });
//! ```

mod action;
pub mod active;
mod bus;
pub mod config;
mod dispatcher;
mod error;
mod handler;
pub mod jobs;
mod payload;
mod signal;

pub use action::{ActionKind, DispatchAction};
pub use bus::{DispatchBus, SubscriptionId};
pub use config::{ConfigError, DispatchConfig};
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, HandlerError, Result};
pub use handler::ActionHandler;
pub use izumi_registry::{
	ActionId, Category, CategoryIndex, FlagIndex, FlagList, Registry, RegistryError, ValueIndex, category,
};
pub use jobs::{ActionCategory, ActionExact, ActionFlag, JobBatch, JobDispatchAction, JobPool};
pub use payload::{Payload, PayloadKey};
pub use signal::SignalAction;
