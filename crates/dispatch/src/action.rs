//! The dispatched envelope.
//!
//! # Role
//!
//! A [`DispatchAction`] is one dispatched action: category index, value index,
//! the value's shared flag list, a payload, and a running id. Handlers inspect
//! it through the registry it was created with.
//!
//! # Invariants
//!
//! - `(category, value)` is resolved once at creation and never changes.
//! - Cloning an action is a duplication: the id is preserved and the flags and
//!   payload are shared, not copied. Only [`DispatchAction::create`] mints ids.

use std::any::{Any, type_name};
use std::sync::Arc;

use izumi_registry::{ActionId, Category, CategoryIndex, FlagIndex, FlagList, Registry, ValueIndex};

use crate::error::{DispatchError, Result};
use crate::jobs::JobDispatchAction;
use crate::payload::{Lookup, Payload, PayloadKey};

/// Why an action was dispatched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ActionKind {
	/// A regular action.
	#[default]
	Dispatched,
	/// A "something changed" signal: stores should refresh from their external
	/// data before reacting as usual.
	ChangedSignal,
}

/// One dispatched action.
#[derive(Clone)]
pub struct DispatchAction {
	registry: Registry,
	category: CategoryIndex,
	value: ValueIndex,
	flags: FlagList,
	payload: Arc<Payload>,
	id: ActionId,
	kind: ActionKind,
}

impl DispatchAction {
	/// Creates an action for `value`, minting a new id.
	///
	/// Actions can be created ahead of time and dispatched repeatedly; every
	/// dispatch of the same instance carries the same id.
	pub fn create<C: Category>(registry: &Registry, value: C, payload: Payload) -> Result<Self> {
		Self::create_with_kind(registry, value, payload, ActionKind::Dispatched)
	}

	/// Creates a [`ActionKind::ChangedSignal`] action for `value`.
	pub fn create_signal<C: Category>(registry: &Registry, value: C, payload: Payload) -> Result<Self> {
		Self::create_with_kind(registry, value, payload, ActionKind::ChangedSignal)
	}

	fn create_with_kind<C: Category>(registry: &Registry, value: C, payload: Payload, kind: ActionKind) -> Result<Self> {
		let cache = registry.category::<C>();
		let value_index = cache.cast_to_index(value)?;
		Ok(Self {
			registry: registry.clone(),
			category: cache.index(),
			value: value_index,
			flags: cache.flags_at(value_index)?,
			payload: Arc::new(payload),
			id: registry.next_action_id(),
			kind,
		})
	}

	/// Duplicates the action for deferred handling. Same as `clone`.
	pub fn duplicate(&self) -> Self {
		self.clone()
	}

	/// Running id of the action.
	pub fn id(&self) -> ActionId {
		self.id
	}

	pub fn kind(&self) -> ActionKind {
		self.kind
	}

	/// Returns true for actions dispatched through `signal_changed`.
	pub fn is_changed_signal(&self) -> bool {
		self.kind == ActionKind::ChangedSignal
	}

	pub fn category_index(&self) -> CategoryIndex {
		self.category
	}

	pub fn value_index(&self) -> ValueIndex {
		self.value
	}

	/// Interned flags of the action's value.
	pub fn flags(&self) -> &[FlagIndex] {
		&self.flags
	}

	pub fn payload(&self) -> &Payload {
		&self.payload
	}

	/// Registry the action was created with.
	pub fn registry(&self) -> &Registry {
		&self.registry
	}

	/// Returns the value if the action belongs to category `C`.
	///
	/// Check this before matching on the returned value. The cast only happens
	/// when the category matches.
	pub fn matches_category<C: Category>(&self) -> Result<Option<C>> {
		if self.registry.category_index::<C>() != self.category {
			return Ok(None);
		}
		Ok(Some(self.registry.category::<C>().cast_from_index(self.value)?))
	}

	/// Returns true if the action belongs to category `C`.
	pub fn in_category<C: Category>(&self) -> bool {
		self.registry.category_index::<C>() == self.category
	}

	/// Casts the value index through `C` without checking the category.
	///
	/// This is a fast path for handlers that already know every action reaching
	/// them belongs to `C`. On an action from another category it reinterprets
	/// the underlying integer as a `C`: `Magic::Fire` read as `Items` is
	/// `Items::Potion` when both are `0`. It only fails if no value of `C` has
	/// that integer.
	pub fn as_value<C: Category>(&self) -> Result<C> {
		Ok(self.registry.category::<C>().cast_from_index(self.value)?)
	}

	/// Returns true if the action is exactly `value`, category included.
	pub fn is_exactly<C: Category>(&self, value: C) -> Result<bool> {
		let cache = self.registry.category::<C>();
		Ok(cache.index() == self.category && cache.cast_to_index(value)? == self.value)
	}

	/// Compares only the value index with `value`, ignoring the category.
	///
	/// Same trade-off as [`as_value`](Self::as_value).
	pub fn has_value<C: Category>(&self, value: C) -> Result<bool> {
		Ok(self.registry.category::<C>().cast_to_index(value)? == self.value)
	}

	/// Returns true if the action's value declares `flag`.
	pub fn has_flag(&self, flag: &str) -> bool {
		self.has_flag_index(self.registry.intern_flag(flag))
	}

	/// Returns true if the action's value carries the interned `flag`.
	pub fn has_flag_index(&self, flag: FlagIndex) -> bool {
		self.flags.contains(&flag)
	}

	/// Returns the payload under `key` as a `T`.
	///
	/// A missing key fails with [`DispatchError::PayloadKeyMissing`] unless
	/// `optional` is set, in which case `T::default()` comes back. A key holding
	/// another type always fails with [`DispatchError::PayloadTypeMismatch`].
	pub fn get_payload<T>(&self, key: impl Into<PayloadKey>, optional: bool) -> Result<T>
	where
		T: Any + Clone + Default,
	{
		let key = key.into();
		match self.payload.lookup::<T>(key) {
			Lookup::Found(value) => Ok(value.clone()),
			Lookup::Missing if optional => Ok(T::default()),
			Lookup::Missing => Err(DispatchError::PayloadKeyMissing {
				action: self.to_string(),
				key,
			}),
			Lookup::Mismatch { stored } => Err(DispatchError::PayloadTypeMismatch {
				action: self.to_string(),
				key,
				stored,
				requested: type_name::<T>(),
			}),
		}
	}

	/// Two-key form of [`get_payload`](Self::get_payload).
	pub fn get_payload2<T1, T2>(
		&self,
		k1: impl Into<PayloadKey>,
		k2: impl Into<PayloadKey>,
		optionals: (bool, bool),
	) -> Result<(T1, T2)>
	where
		T1: Any + Clone + Default,
		T2: Any + Clone + Default,
	{
		Ok((self.get_payload(k1, optionals.0)?, self.get_payload(k2, optionals.1)?))
	}

	/// Three-key form of [`get_payload`](Self::get_payload).
	pub fn get_payload3<T1, T2, T3>(
		&self,
		k1: impl Into<PayloadKey>,
		k2: impl Into<PayloadKey>,
		k3: impl Into<PayloadKey>,
		optionals: (bool, bool, bool),
	) -> Result<(T1, T2, T3)>
	where
		T1: Any + Clone + Default,
		T2: Any + Clone + Default,
		T3: Any + Clone + Default,
	{
		Ok((
			self.get_payload(k1, optionals.0)?,
			self.get_payload(k2, optionals.1)?,
			self.get_payload(k3, optionals.2)?,
		))
	}

	/// Four-key form of [`get_payload`](Self::get_payload).
	pub fn get_payload4<T1, T2, T3, T4>(
		&self,
		k1: impl Into<PayloadKey>,
		k2: impl Into<PayloadKey>,
		k3: impl Into<PayloadKey>,
		k4: impl Into<PayloadKey>,
		optionals: (bool, bool, bool, bool),
	) -> Result<(T1, T2, T3, T4)>
	where
		T1: Any + Clone + Default,
		T2: Any + Clone + Default,
		T3: Any + Clone + Default,
		T4: Any + Clone + Default,
	{
		Ok((
			self.get_payload(k1, optionals.0)?,
			self.get_payload(k2, optionals.1)?,
			self.get_payload(k3, optionals.2)?,
			self.get_payload(k4, optionals.3)?,
		))
	}

	/// Returns the payload under `key` only if it is present and a `T`.
	///
	/// Never fails: a missing key and a type mismatch both give `None`.
	pub fn has_payload<T: Any>(&self, key: impl Into<PayloadKey>) -> Option<&T> {
		match self.payload.lookup::<T>(key.into()) {
			Lookup::Found(value) => Some(value),
			Lookup::Missing | Lookup::Mismatch { .. } => None,
		}
	}

	/// Display name of the action's category.
	pub fn category_name(&self) -> Result<&'static str> {
		Ok(self.registry.category_name(self.category)?)
	}

	/// Variant name of the action's value.
	pub fn value_name(&self) -> Result<&'static str> {
		Ok(self.registry.value_name(self.category, self.value)?)
	}

	/// Projects the action into its worker-side form.
	pub fn to_job(&self) -> JobDispatchAction {
		JobDispatchAction::new(self.category, self.value, self.flags.clone())
	}
}

impl PartialEq for DispatchAction {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for DispatchAction {}

impl std::hash::Hash for DispatchAction {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

impl std::fmt::Display for DispatchAction {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let category = self.category_name().unwrap_or("<unknown>");
		let value = self.value_name().unwrap_or("<unknown>");
		write!(f, "Action Category : {category} Type : {value}")
	}
}

impl std::fmt::Debug for DispatchAction {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DispatchAction")
			.field("id", &self.id)
			.field("kind", &self.kind)
			.field("category", &self.category)
			.field("value", &self.value)
			.field("flags", &self.flags)
			.field("payload", &self.payload)
			.finish()
	}
}
