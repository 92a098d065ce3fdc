//! Per-category cast tables.
//!
//! # Role
//!
//! A [`CategoryCache`] is built once, lazily, the first time anything asks the
//! registry about its category. It owns the value/index maps and the
//! [`FlagList`] of every value. Nothing in it is mutated after the build.
//!
//! # Invariants
//!
//! - Every declared value has an entry in all three maps once the cache exists.
//! - Flag lists are allocated here exactly once and handed out by reference.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::{RegistryError, Result};
use crate::flags::FlagInterner;
use crate::{Category, CategoryIndex, FlagIndex, FlagList, ValueIndex};

/// Bidirectional value/index tables plus per-value flags for one category.
pub struct CategoryCache<C: Category> {
	index: CategoryIndex,
	from_index: FxHashMap<ValueIndex, C>,
	to_index: FxHashMap<C, ValueIndex>,
	flags: FxHashMap<ValueIndex, FlagList>,
	names: Arc<[&'static str]>,
}

impl<C: Category> CategoryCache<C> {
	/// Builds every table of `C`, interning declared flag names on the way.
	pub(crate) fn build(index: CategoryIndex, interner: &mut FlagInterner) -> Self {
		let decls = C::DECLARATIONS;
		let mut from_index = FxHashMap::with_capacity_and_hasher(decls.len(), Default::default());
		let mut to_index = FxHashMap::with_capacity_and_hasher(decls.len(), Default::default());
		let mut flags = FxHashMap::with_capacity_and_hasher(decls.len(), Default::default());

		for decl in decls {
			let raw = ValueIndex(decl.raw);
			from_index.insert(raw, decl.value);
			to_index.insert(decl.value, raw);
		}

		for decl in decls {
			let interned: Vec<FlagIndex> = decl.flags.iter().map(|name| interner.intern(name)).collect();
			flags.insert(ValueIndex(decl.raw), FlagList::from(interned));
		}

		tracing::debug!(
			category = C::NAME,
			%index,
			values = decls.len(),
			"built category cache"
		);

		Self {
			index,
			from_index,
			to_index,
			flags,
			names: decls.iter().map(|decl| decl.name).collect(),
		}
	}

	/// Registry index of the category this cache belongs to.
	pub fn index(&self) -> CategoryIndex {
		self.index
	}

	/// Returns the underlying integer of `value`.
	pub fn cast_to_index(&self, value: C) -> Result<ValueIndex> {
		self.to_index
			.get(&value)
			.copied()
			.ok_or_else(|| RegistryError::IndexNotFound {
				category: C::NAME,
				what: format!("{value:?}"),
			})
	}

	/// Returns the value whose underlying integer is `index`.
	pub fn cast_from_index(&self, index: ValueIndex) -> Result<C> {
		self.from_index
			.get(&index)
			.copied()
			.ok_or_else(|| RegistryError::IndexNotFound {
				category: C::NAME,
				what: format!("value index {index}"),
			})
	}

	/// Returns the shared flag list of `value`.
	///
	/// The list belongs to this cache; callers only ever hold another reference
	/// to the same allocation.
	pub fn flags_for(&self, value: C) -> Result<FlagList> {
		self.flags_at(self.cast_to_index(value)?)
	}

	/// Returns the shared flag list of the value with underlying integer `index`.
	pub fn flags_at(&self, index: ValueIndex) -> Result<FlagList> {
		self.flags
			.get(&index)
			.cloned()
			.ok_or_else(|| RegistryError::IndexNotFound {
				category: C::NAME,
				what: format!("flags of value index {index}"),
			})
	}

	/// Declared variant names, in declaration order.
	pub fn names(&self) -> Arc<[&'static str]> {
		self.names.clone()
	}

	/// Number of values in the category.
	pub fn len(&self) -> usize {
		self.from_index.len()
	}

	/// Returns true for a category without values.
	pub fn is_empty(&self) -> bool {
		self.from_index.is_empty()
	}

	/// Copies the index-to-value table into a snapshot with no reference back to
	/// this cache.
	pub fn bake_snapshot(&self) -> CategorySnapshot<C> {
		CategorySnapshot {
			index: self.index,
			table: Arc::new(self.from_index.clone()),
		}
	}
}

impl<C: Category> std::fmt::Debug for CategoryCache<C> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CategoryCache")
			.field("category", &C::NAME)
			.field("index", &self.index)
			.field("values", &self.from_index.len())
			.finish()
	}
}

/// Read-only copy of a category's index-to-value table.
///
/// Cloning shares the table. The snapshot never touches the registry again, so
/// it is safe to hand to worker tasks.
pub struct CategorySnapshot<C: Category> {
	index: CategoryIndex,
	table: Arc<FxHashMap<ValueIndex, C>>,
}

impl<C: Category> CategorySnapshot<C> {
	/// Registry index of the baked category.
	pub fn index(&self) -> CategoryIndex {
		self.index
	}

	/// Casts an underlying integer back to a value of `C`.
	pub fn get(&self, index: ValueIndex) -> Option<C> {
		self.table.get(&index).copied()
	}

	/// Number of values in the table.
	pub fn len(&self) -> usize {
		self.table.len()
	}

	/// Returns true for an empty table.
	pub fn is_empty(&self) -> bool {
		self.table.is_empty()
	}
}

impl<C: Category> Clone for CategorySnapshot<C> {
	fn clone(&self) -> Self {
		Self {
			index: self.index,
			table: self.table.clone(),
		}
	}
}

impl<C: Category> Default for CategorySnapshot<C> {
	/// An unassigned snapshot: matches no category and casts nothing.
	fn default() -> Self {
		Self {
			index: CategoryIndex::UNASSIGNED,
			table: Arc::default(),
		}
	}
}

impl<C: Category> std::fmt::Debug for CategorySnapshot<C> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CategorySnapshot")
			.field("category", &C::NAME)
			.field("index", &self.index)
			.field("values", &self.table.len())
			.finish()
	}
}
