//! Worker-side views of dispatched actions.
//!
//! # Role
//!
//! Worker tasks must not touch the [`Registry`](izumi_registry::Registry): no
//! lookups keyed by types or strings, no shared mutable state. Everything they
//! need is baked on the coordinating thread first:
//!
//! - [`ActionCategory`] - a category's index-to-value table
//! - [`ActionExact`] - one `(category, value)` pair
//! - [`ActionFlag`] - one interned flag
//!
//! and each action is projected into a [`JobDispatchAction`], which carries only
//! integers and a reference to the value's flag list.
//!
//! # Invariants
//!
//! - Baked views and job actions are `Send + Sync` and never reach back into the
//!   registry.
//! - A job action never releases the flag list it points at; the category cache
//!   owns it.

mod bake;
mod pool;

use izumi_registry::{Category, CategoryIndex, FlagList, RegistryError, ValueIndex};

pub use bake::{ActionCategory, ActionExact, ActionFlag};
pub use pool::{JobBatch, JobPool};

use crate::error::{DispatchError, Result};

/// A [`DispatchAction`](crate::DispatchAction) stripped down for worker tasks.
#[derive(Debug, Clone)]
pub struct JobDispatchAction {
	category: CategoryIndex,
	value: ValueIndex,
	flags: FlagList,
}

impl JobDispatchAction {
	pub(crate) fn new(category: CategoryIndex, value: ValueIndex, flags: FlagList) -> Self {
		Self { category, value, flags }
	}

	pub fn category_index(&self) -> CategoryIndex {
		self.category
	}

	pub fn value_index(&self) -> ValueIndex {
		self.value
	}

	/// Returns the value if the action belongs to the baked category.
	///
	/// An unassigned [`ActionCategory`] matches nothing.
	pub fn matches_category<C: Category>(&self, category: &ActionCategory<C>) -> Result<Option<C>> {
		if category.index() != self.category {
			return Ok(None);
		}
		self.as_value(category).map(Some)
	}

	/// Casts the value index through the baked table without checking the
	/// category. Fails only if the table has no value with that integer.
	pub fn as_value<C: Category>(&self, category: &ActionCategory<C>) -> Result<C> {
		category.get(self.value).ok_or_else(|| {
			DispatchError::Registry(RegistryError::IndexNotFound {
				category: C::NAME,
				what: format!("value index {}", self.value),
			})
		})
	}

	/// Returns true if the action is exactly the baked one.
	pub fn is_exactly(&self, exact: ActionExact) -> Result<bool> {
		if !exact.is_assigned() {
			return Err(DispatchError::UninitializedSnapshot { kind: "ActionExact" });
		}
		Ok(exact.category_index() == self.category && exact.value_index() == self.value)
	}

	/// Returns true if the action's value carries the baked flag.
	pub fn has_flag(&self, flag: ActionFlag) -> Result<bool> {
		if !flag.is_assigned() {
			return Err(DispatchError::UninitializedSnapshot { kind: "ActionFlag" });
		}
		Ok(self.flags.contains(&flag.index()))
	}
}

impl std::fmt::Display for JobDispatchAction {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "job action ({}, {})", self.category, self.value)
	}
}
