//! Heterogeneous, per-key typed payloads.
//!
//! Keys are values of any [`Category`] type. Two keys are the same entry only if
//! both their declaring type and their underlying integer agree, so
//! `PayloadKey::Attacker` and `FakePayloadKey::Attacker` never collide even when
//! both are `0`.
//!
//! Values are type-erased and come back out through a checked downcast. A key
//! holding the wrong type is reported as a mismatch, never as "missing".

use std::any::{Any, TypeId, type_name};
use std::hash::{Hash, Hasher};

use izumi_registry::Category;
use rustc_hash::FxHashMap;

/// Key of one payload entry.
#[derive(Clone, Copy)]
pub struct PayloadKey {
	kind: TypeId,
	kind_name: &'static str,
	raw: i32,
	name: &'static str,
}

impl PayloadKey {
	/// Builds the key for `key`.
	pub fn of<K: Category>(key: K) -> Self {
		Self {
			kind: TypeId::of::<K>(),
			kind_name: K::NAME,
			raw: key.to_raw(),
			name: key.variant_name(),
		}
	}

	/// Underlying integer of the key.
	pub fn raw(&self) -> i32 {
		self.raw
	}

	/// Display name of the key's declaring type.
	pub fn kind_name(&self) -> &'static str {
		self.kind_name
	}
}

impl<K: Category> From<K> for PayloadKey {
	fn from(key: K) -> Self {
		Self::of(key)
	}
}

impl PartialEq for PayloadKey {
	fn eq(&self, other: &Self) -> bool {
		self.kind == other.kind && self.raw == other.raw
	}
}

impl Eq for PayloadKey {}

impl Hash for PayloadKey {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.kind.hash(state);
		self.raw.hash(state);
	}
}

impl std::fmt::Debug for PayloadKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}::{}", self.kind_name, self.name)
	}
}

impl std::fmt::Display for PayloadKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}::{}", self.kind_name, self.name)
	}
}

struct PayloadValue {
	value: Box<dyn Any + Send + Sync>,
	type_name: &'static str,
}

/// Outcome of a typed payload lookup.
pub(crate) enum Lookup<'a, T> {
	Found(&'a T),
	Missing,
	Mismatch { stored: &'static str },
}

/// Payload map carried by a dispatched action.
#[derive(Default)]
pub struct Payload {
	entries: FxHashMap<PayloadKey, PayloadValue>,
}

impl Payload {
	/// Creates an empty payload.
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores `value` under `key`, replacing whatever was there.
	pub fn insert<T>(&mut self, key: impl Into<PayloadKey>, value: T)
	where
		T: Any + Send + Sync,
	{
		self.entries.insert(
			key.into(),
			PayloadValue {
				value: Box::new(value),
				type_name: type_name::<T>(),
			},
		);
	}

	/// Builder form of [`insert`](Self::insert).
	#[must_use]
	pub fn with<T>(mut self, key: impl Into<PayloadKey>, value: T) -> Self
	where
		T: Any + Send + Sync,
	{
		self.insert(key, value);
		self
	}

	/// Returns true if anything is stored under `key`, whatever its type.
	pub fn contains_key(&self, key: impl Into<PayloadKey>) -> bool {
		self.entries.contains_key(&key.into())
	}

	/// Returns the type name stored under `key`.
	pub fn type_name_of(&self, key: impl Into<PayloadKey>) -> Option<&'static str> {
		self.entries.get(&key.into()).map(|entry| entry.type_name)
	}

	/// Iterates over the stored keys in no particular order.
	pub fn keys(&self) -> impl Iterator<Item = PayloadKey> + '_ {
		self.entries.keys().copied()
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true for an empty payload.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub(crate) fn lookup<T: Any>(&self, key: PayloadKey) -> Lookup<'_, T> {
		match self.entries.get(&key) {
			None => Lookup::Missing,
			Some(entry) => match entry.value.downcast_ref::<T>() {
				Some(value) => Lookup::Found(value),
				None => Lookup::Mismatch {
					stored: entry.type_name,
				},
			},
		}
	}
}

impl std::fmt::Debug for Payload {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_map()
			.entries(self.entries.iter().map(|(key, entry)| (key, entry.type_name)))
			.finish()
	}
}

/// Builds a [`Payload`] from `key => value` pairs.
///
/// Later pairs overwrite earlier ones with the same key.
///
/// ```ignore
/// let payload = payload! {
///     PayloadKey::HitStat => (true, false),
///     PayloadKey::Comment => String::from("So hot"),
/// };
/// ```
#[macro_export]
macro_rules! payload {
	() => {
		$crate::Payload::new()
	};
	($($key:expr => $value:expr),+ $(,)?) => {{
		let mut payload = $crate::Payload::new();
		$(payload.insert($key, $value);)+
		payload
	}};
}
