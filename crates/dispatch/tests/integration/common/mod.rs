#![allow(dead_code)]

use std::sync::Arc;

use izumi_dispatch::{DispatchAction, Dispatcher, Payload, Registry, SubscriptionId, category};
use parking_lot::Mutex;

pub const SUCKS: &str = "Sucks";
pub const ULTIMATE: &str = "Ultimate";
pub const HEALING: &str = "Healing";
pub const AOE_MAGIC: &str = "AOEMagic";

category! {
	pub enum Magic {
		Fire,
		Ice,
		Thunder => [AOE_MAGIC],
		Holy => [ULTIMATE],
		Flare => [ULTIMATE],
		Meteo => [ULTIMATE, AOE_MAGIC],
		Osmose,
		Poison => [SUCKS],
	}
}

category! {
	pub enum Items {
		Potion => [HEALING],
		HiPotion => [HEALING],
		XPotion => [HEALING],
		Elixir => [HEALING, ULTIMATE],
		Ether,
		SmokeBomb => [SUCKS],
	}
}

category! {
	pub enum Act {
		Jump,
	}
}

category! {
	pub enum PayloadKey {
		Attacker,
		Attackee,
		Crit,
		Weakness,
		HitStat,
		Comment,
		Target,
		All,
		ThrownItem,
	}
}

category! {
	/// Same variants and discriminants as [`PayloadKey`], different type.
	pub enum FakePayloadKey {
		Attacker,
		Attackee,
		Crit,
		Weakness,
		HitStat,
		Comment,
		Target,
		All,
		ThrownItem,
	}
}

/// A dispatcher plus a subscriber that remembers the last dispatched action.
pub struct Fixture {
	pub dispatcher: Dispatcher,
	last: Arc<Mutex<Option<DispatchAction>>>,
	subscription: SubscriptionId,
}

impl Fixture {
	pub fn new() -> Self {
		let _ = tracing_subscriber::fmt().with_test_writer().try_init();

		let dispatcher = Dispatcher::new(Registry::new());
		let last = Arc::new(Mutex::new(None));
		let sink = Arc::clone(&last);
		let subscription = dispatcher.subscribe(move |action| {
			*sink.lock() = Some(action.clone());
			Ok(())
		});
		Self {
			dispatcher,
			last,
			subscription,
		}
	}

	pub fn registry(&self) -> &Registry {
		self.dispatcher.registry()
	}

	/// Dispatches `value` and returns what the subscriber received.
	pub fn dispatch<C: izumi_dispatch::Category>(&self, value: C, payload: Payload) -> DispatchAction {
		self.dispatcher.dispatch(value, payload).unwrap();
		self.last.lock().clone().unwrap()
	}

	pub fn send<C: izumi_dispatch::Category>(&self, value: C) -> DispatchAction {
		self.dispatch(value, Payload::new())
	}
}

impl Drop for Fixture {
	fn drop(&mut self) {
		self.dispatcher.unsubscribe(self.subscription);
	}
}
