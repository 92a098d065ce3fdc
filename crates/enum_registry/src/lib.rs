#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Category registry for enum-identified actions.
//!
//! Maps enumerated category types, their values, and cross-category flag names
//! to small stable integers and back. The integer forms are what envelopes and
//! worker-side snapshots carry around.
//!
//! - [`Registry`] - category index assignment, flag interning, cache ownership
//! - [`CategoryCache`] - per-category value/index tables and flag lists
//! - [`CategorySnapshot`] - registry-independent copy of a cast table
//! - [`category!`] - declares a category enum and its flag table

mod cache;
mod category;
mod error;
mod flags;
mod ids;
mod registry;

pub use cache::{CategoryCache, CategorySnapshot};
pub use category::{Category, ValueDecl};
pub use error::{RegistryError, Result};
pub use flags::FlagInterner;
pub use ids::{ActionId, CategoryIndex, FlagIndex, FlagList, ValueIndex};
pub use registry::{CategoryDescriptor, Registry};
