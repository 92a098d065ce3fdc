use crate::{CategoryIndex, FlagIndex};

/// Registry lookup failures.
///
/// All of these are programmer errors: the caller asked about data the registry
/// never assigned, or a cache invariant was broken.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	/// A category index that was never handed out.
	#[error("{index} is not indexed; indices must come from `Registry::category_index`")]
	UnknownIndex { index: CategoryIndex },

	/// A flag index that was never interned.
	#[error("{index} does not correspond to any interned flag")]
	UnknownFlag { index: FlagIndex },

	/// A value or raw integer outside the category's enumerated domain.
	#[error("{category}: cast cache has no entry for {what}")]
	IndexNotFound { category: &'static str, what: String },
}

pub type Result<T, E = RegistryError> = std::result::Result<T, E>;
