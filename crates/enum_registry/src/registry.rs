//! Registry handle.
//!
//! # Role
//!
//! [`Registry`] is the one bookkeeping object per running instance. It assigns
//! category indices, interns flag names, and owns every [`CategoryCache`]. It is
//! created once and passed by handle to whatever needs it; there is no global.
//!
//! # Invariants
//!
//! - Category indices start at 1, are assigned in first-use order, and are never
//!   reused or reassigned.
//! - A category's cache is built at most once per registry.
//! - Action ids come from one process-wide counter, so they are unique across
//!   registries.
//! - Mutation is expected from the coordinating thread only. Worker tasks read
//!   baked snapshots instead of this handle.

use std::any::{Any, TypeId};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::cache::{CategoryCache, CategorySnapshot};
use crate::error::{RegistryError, Result};
use crate::flags::FlagInterner;
use crate::ids::next_dense_index;
use crate::{ActionId, Category, CategoryIndex, FlagIndex, ValueIndex};

/// Static description of a registered category.
#[derive(Debug, Clone)]
pub struct CategoryDescriptor {
	pub index: CategoryIndex,
	pub name: &'static str,
	pub type_id: TypeId,
	/// `(underlying integer, variant name)` in declaration order.
	pub values: Arc<[(ValueIndex, &'static str)]>,
}

impl CategoryDescriptor {
	fn of<C: Category>(index: CategoryIndex) -> Self {
		Self {
			index,
			name: C::NAME,
			type_id: TypeId::of::<C>(),
			values: C::DECLARATIONS
				.iter()
				.map(|decl| (ValueIndex(decl.raw), decl.name))
				.collect(),
		}
	}

	/// Variant name of the value with underlying integer `value`.
	pub fn value_name(&self, value: ValueIndex) -> Option<&'static str> {
		self.values
			.iter()
			.find(|(raw, _)| *raw == value)
			.map(|(_, name)| *name)
	}
}

static NEXT_ACTION: AtomicU64 = AtomicU64::new(0);

#[derive(Default)]
struct RegistryState {
	by_type: FxHashMap<TypeId, CategoryIndex>,
	/// `descriptors[i]` describes `CategoryIndex(i + 1)`.
	descriptors: Vec<CategoryDescriptor>,
	caches: FxHashMap<TypeId, Arc<dyn Any + Send + Sync>>,
	flags: FlagInterner,
}

impl RegistryState {
	fn index_of<C: Category>(&mut self) -> CategoryIndex {
		let type_id = TypeId::of::<C>();
		if let Some(&index) = self.by_type.get(&type_id) {
			return index;
		}

		let index = CategoryIndex(next_dense_index(self.descriptors.len(), "categories"));
		self.descriptors.push(CategoryDescriptor::of::<C>(index));
		self.by_type.insert(type_id, index);
		tracing::debug!(category = C::NAME, %index, "assigned category index");
		index
	}

	fn cached<C: Category>(&self) -> Option<Arc<CategoryCache<C>>> {
		self.caches
			.get(&TypeId::of::<C>())
			.and_then(|cache| cache.clone().downcast::<CategoryCache<C>>().ok())
	}

	fn descriptor(&self, index: CategoryIndex) -> Result<&CategoryDescriptor> {
		index
			.0
			.checked_sub(1)
			.and_then(|slot| self.descriptors.get(slot as usize))
			.ok_or(RegistryError::UnknownIndex { index })
	}
}

/// Shared handle to the category registry.
///
/// Clones are cheap and all refer to the same registry.
#[derive(Clone, Default)]
pub struct Registry {
	state: Arc<RwLock<RegistryState>>,
}

impl Registry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the index of `C`, assigning the next free one on first call.
	///
	/// Never returns [`CategoryIndex::UNASSIGNED`].
	pub fn category_index<C: Category>(&self) -> CategoryIndex {
		if let Some(&index) = self.state.read().by_type.get(&TypeId::of::<C>()) {
			return index;
		}
		self.state.write().index_of::<C>()
	}

	/// Returns the descriptor of a previously assigned index.
	pub fn descriptor(&self, index: CategoryIndex) -> Result<CategoryDescriptor> {
		self.state.read().descriptor(index).cloned()
	}

	/// Returns the cast cache of `C`, building it on first use.
	pub fn category<C: Category>(&self) -> Arc<CategoryCache<C>> {
		if let Some(cache) = self.state.read().cached::<C>() {
			return cache;
		}

		let mut state = self.state.write();
		if let Some(cache) = state.cached::<C>() {
			return cache;
		}

		let index = state.index_of::<C>();
		let cache = Arc::new(CategoryCache::<C>::build(index, &mut state.flags));
		state
			.caches
			.insert(TypeId::of::<C>(), cache.clone() as Arc<dyn Any + Send + Sync>);
		cache
	}

	/// Builds the cache of `C` ahead of its first real use.
	pub fn prebuild<C: Category>(&self) {
		self.category::<C>();
	}

	/// Bakes a read-only index-to-value table of `C`.
	pub fn bake_category<C: Category>(&self) -> CategorySnapshot<C> {
		self.category::<C>().bake_snapshot()
	}

	/// Declared variant names of `C`.
	pub fn names<C: Category>(&self) -> Arc<[&'static str]> {
		self.category::<C>().names()
	}

	/// Display name of `C`.
	pub fn full_name<C: Category>(&self) -> &'static str {
		C::NAME
	}

	/// Display name of the category at `index`.
	pub fn category_name(&self, index: CategoryIndex) -> Result<&'static str> {
		Ok(self.state.read().descriptor(index)?.name)
	}

	/// Variant name of `value` within the category at `index`.
	pub fn value_name(&self, index: CategoryIndex, value: ValueIndex) -> Result<&'static str> {
		let state = self.state.read();
		let descriptor = state.descriptor(index)?;
		descriptor
			.value_name(value)
			.ok_or_else(|| RegistryError::IndexNotFound {
				category: descriptor.name,
				what: format!("value index {value}"),
			})
	}

	/// Interns a flag name.
	pub fn intern_flag(&self, name: &str) -> FlagIndex {
		if let Some(index) = self.state.read().flags.get(name) {
			return index;
		}
		self.state.write().flags.intern(name)
	}

	/// Looks up a flag name without interning it.
	pub fn flag_index(&self, name: &str) -> Option<FlagIndex> {
		self.state.read().flags.get(name)
	}

	/// Resolves an interned flag back to its name.
	pub fn flag_name(&self, index: FlagIndex) -> Result<String> {
		self.state.read().flags.resolve(index).map(str::to_owned)
	}

	/// Mints the next action id.
	///
	/// Ids are unique for the whole process, not just this registry. The first
	/// id ever minted is 1.
	pub fn next_action_id(&self) -> ActionId {
		ActionId(NEXT_ACTION.fetch_add(1, Ordering::Relaxed) + 1)
	}

	/// Number of categories with an assigned index.
	pub fn category_count(&self) -> usize {
		self.state.read().descriptors.len()
	}

	/// Number of interned flags.
	pub fn flag_count(&self) -> usize {
		self.state.read().flags.len()
	}
}

impl std::fmt::Debug for Registry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.state.read();
		f.debug_struct("Registry")
			.field("categories", &state.descriptors.len())
			.field("caches", &state.caches.len())
			.field("flags", &state.flags.len())
			.finish()
	}
}
