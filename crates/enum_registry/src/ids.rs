//! Dense identifiers handed out by the registry.
//!
//! All of these are plain integers so they can be copied into worker tasks
//! without touching the registry again.

use std::sync::Arc;

/// Registry-assigned index of a category type.
///
/// `0` is reserved for "unassigned"; the registry hands out indices starting at 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryIndex(pub(crate) u32);

impl CategoryIndex {
	/// The "never assigned" sentinel.
	pub const UNASSIGNED: Self = Self(0);

	/// Returns the raw index.
	pub const fn as_u32(self) -> u32 {
		self.0
	}

	/// Returns true if this index was handed out by a registry.
	pub const fn is_assigned(self) -> bool {
		self.0 != 0
	}
}

impl core::fmt::Display for CategoryIndex {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(f, "category#{}", self.0)
	}
}

/// Underlying integer of a category value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValueIndex(pub(crate) i32);

impl ValueIndex {
	/// Wraps a raw discriminant.
	pub const fn from_raw(raw: i32) -> Self {
		Self(raw)
	}

	/// Returns the raw discriminant.
	pub const fn as_i32(self) -> i32 {
		self.0
	}
}

impl core::fmt::Display for ValueIndex {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Interned flag name.
///
/// `0` is reserved for "unassigned"; the interner hands out indices starting at 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlagIndex(pub(crate) u32);

impl FlagIndex {
	/// The "never assigned" sentinel.
	pub const UNASSIGNED: Self = Self(0);

	/// Returns the raw index.
	pub const fn as_u32(self) -> u32 {
		self.0
	}

	/// Returns true if this index was handed out by an interner.
	pub const fn is_assigned(self) -> bool {
		self.0 != 0
	}
}

impl core::fmt::Display for FlagIndex {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(f, "flag#{}", self.0)
	}
}

/// Running number unique to every created action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActionId(pub(crate) u64);

impl ActionId {
	/// Returns the raw id.
	pub const fn as_u64(self) -> u64 {
		self.0
	}
}

impl core::fmt::Display for ActionId {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(f, "action#{}", self.0)
	}
}

/// Index for slot `len` of a dense table whose indices start at 1.
///
/// Saturates at `u32::MAX` and logs an error once the table outgrows `u32`; past
/// that point indices are no longer unique.
pub(crate) fn next_dense_index(len: usize, table: &'static str) -> u32 {
	match len.checked_add(1).and_then(|next| u32::try_from(next).ok()) {
		Some(index) => index,
		None => {
			tracing::error!(table, len, "dense index space exhausted; reusing the last index");
			u32::MAX
		}
	}
}

/// Flags attached to one value.
///
/// Owned by the value's [`CategoryCache`](crate::CategoryCache) for the life of the
/// registry. Every envelope and job view of that value points at the same
/// allocation; cloning only bumps the reference count.
pub type FlagList = Arc<[FlagIndex]>;
