use izumi_registry::{Category, CategoryIndex, CategorySnapshot, FlagIndex, Registry, ValueIndex};

use crate::error::Result;

/// Baked category table for [`JobDispatchAction::matches_category`](super::JobDispatchAction::matches_category)
/// and [`as_value`](super::JobDispatchAction::as_value).
///
/// Owned by whoever baked it and dropped with them. The default value is
/// unassigned and matches nothing.
pub struct ActionCategory<C: Category> {
	snapshot: CategorySnapshot<C>,
}

impl<C: Category> ActionCategory<C> {
	/// Bakes the table of `C`, building its cache if needed.
	pub fn bake(registry: &Registry) -> Self {
		Self {
			snapshot: registry.bake_category::<C>(),
		}
	}

	pub fn index(&self) -> CategoryIndex {
		self.snapshot.index()
	}

	pub fn is_assigned(&self) -> bool {
		self.snapshot.index().is_assigned()
	}

	pub(crate) fn get(&self, value: ValueIndex) -> Option<C> {
		self.snapshot.get(value)
	}
}

impl<C: Category> Clone for ActionCategory<C> {
	fn clone(&self) -> Self {
		Self {
			snapshot: self.snapshot.clone(),
		}
	}
}

impl<C: Category> Default for ActionCategory<C> {
	fn default() -> Self {
		Self {
			snapshot: CategorySnapshot::default(),
		}
	}
}

impl<C: Category> std::fmt::Debug for ActionCategory<C> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("ActionCategory").field(&self.snapshot).finish()
	}
}

/// Baked `(category, value)` pair for
/// [`JobDispatchAction::is_exactly`](super::JobDispatchAction::is_exactly).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ActionExact {
	category: CategoryIndex,
	value: ValueIndex,
}

impl ActionExact {
	/// Bakes the identity of `value`.
	pub fn bake<C: Category>(registry: &Registry, value: C) -> Result<Self> {
		let cache = registry.category::<C>();
		Ok(Self {
			category: cache.index(),
			value: cache.cast_to_index(value)?,
		})
	}

	pub fn category_index(&self) -> CategoryIndex {
		self.category
	}

	pub fn value_index(&self) -> ValueIndex {
		self.value
	}

	/// False for the default, never-baked value.
	pub fn is_assigned(&self) -> bool {
		self.category.is_assigned()
	}
}

/// Baked flag for [`JobDispatchAction::has_flag`](super::JobDispatchAction::has_flag).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ActionFlag {
	flag: FlagIndex,
}

impl ActionFlag {
	/// Interns `name` and bakes its index.
	pub fn bake(registry: &Registry, name: &str) -> Self {
		Self {
			flag: registry.intern_flag(name),
		}
	}

	pub fn index(&self) -> FlagIndex {
		self.flag
	}

	/// False for the default, never-baked value.
	pub fn is_assigned(&self) -> bool {
		self.flag.is_assigned()
	}
}

impl std::fmt::Display for ActionFlag {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "baked {}", self.flag)
	}
}
