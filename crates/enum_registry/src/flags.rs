//! Flag name interning.
//!
//! Flag names are shared across every category: the same name always maps to
//! the same [`FlagIndex`] no matter which category declared it first.

use rustc_hash::FxHashMap;

use crate::error::{RegistryError, Result};
use crate::FlagIndex;
use crate::ids::next_dense_index;

/// Append-only mapping between flag names and dense indices.
#[derive(Debug, Default)]
pub struct FlagInterner {
	by_name: FxHashMap<Box<str>, FlagIndex>,
	/// `names[i]` is the name of `FlagIndex(i + 1)`.
	names: Vec<Box<str>>,
}

impl FlagInterner {
	/// Creates an empty interner.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the index for `name`, assigning the next one on first sight.
	pub fn intern(&mut self, name: &str) -> FlagIndex {
		if let Some(&index) = self.by_name.get(name) {
			return index;
		}

		let index = FlagIndex(next_dense_index(self.names.len(), "flags"));
		self.names.push(name.into());
		self.by_name.insert(name.into(), index);
		tracing::debug!(flag = name, %index, "interned flag");
		index
	}

	/// Returns the index for `name` without interning it.
	pub fn get(&self, name: &str) -> Option<FlagIndex> {
		self.by_name.get(name).copied()
	}

	/// Resolves an index back to its name.
	pub fn resolve(&self, index: FlagIndex) -> Result<&str> {
		index
			.0
			.checked_sub(1)
			.and_then(|slot| self.names.get(slot as usize))
			.map(|name| &**name)
			.ok_or(RegistryError::UnknownFlag { index })
	}

	/// Number of interned flags.
	pub fn len(&self) -> usize {
		self.names.len()
	}

	/// Returns true if nothing has been interned yet.
	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}
}
