//! Category declarations.
//!
//! A category is an enumerated type whose values are action identifiers. The
//! registry never introspects a type at runtime; everything it learns about a
//! category comes from the static [`Category::DECLARATIONS`] table, which the
//! [`category!`](crate::category) macro generates next to the enum.

use std::fmt::Debug;
use std::hash::Hash;

/// One row of a category's declaration table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueDecl<C: 'static> {
	/// The value itself.
	pub value: C,
	/// Its underlying integer.
	pub raw: i32,
	/// Display name of the variant.
	pub name: &'static str,
	/// Flag names declared on the variant.
	pub flags: &'static [&'static str],
}

/// An enumerated type usable as an action category or payload key.
pub trait Category: Copy + Eq + Hash + Debug + Send + Sync + 'static {
	/// Fully qualified display name.
	const NAME: &'static str;

	/// Every value of the category, in declaration order.
	const DECLARATIONS: &'static [ValueDecl<Self>];

	/// Returns the underlying integer of `self`.
	fn to_raw(self) -> i32;

	/// Returns the declared variant name.
	fn variant_name(self) -> &'static str {
		Self::DECLARATIONS
			.iter()
			.find(|decl| decl.value == self)
			.map_or("<undeclared>", |decl| decl.name)
	}

	/// Returns the flag names declared on `self`.
	fn declared_flags(self) -> &'static [&'static str] {
		Self::DECLARATIONS
			.iter()
			.find(|decl| decl.value == self)
			.map(|decl| decl.flags)
			.unwrap_or(&[])
	}
}

/// Declares a category enum together with its [`Category`] impl.
///
/// Each variant may carry an explicit discriminant and a list of flag names:
///
/// ```ignore
/// pub const ULTIMATE: &str = "Ultimate";
/// pub const AOE_MAGIC: &str = "AOEMagic";
///
/// izumi_registry::category! {
///     pub enum Magic {
///         Fire,
///         Thunder => [AOE_MAGIC],
///         Meteo => [ULTIMATE, AOE_MAGIC],
///         Osmose = 40,
///     }
/// }
/// ```
#[macro_export]
macro_rules! category {
	(
		$(#[$meta:meta])*
		$vis:vis enum $name:ident {
			$(
				$(#[$vmeta:meta])*
				$variant:ident $(= $disc:expr)? $(=> [$($flag:expr),* $(,)?])?
			),* $(,)?
		}
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
		#[repr(i32)]
		$vis enum $name {
			$(
				$(#[$vmeta])*
				$variant $(= $disc)?,
			)*
		}

		impl $crate::Category for $name {
			const NAME: &'static str = concat!(module_path!(), "::", stringify!($name));

			const DECLARATIONS: &'static [$crate::ValueDecl<Self>] = &[
				$(
					$crate::ValueDecl {
						value: $name::$variant,
						raw: $name::$variant as i32,
						name: stringify!($variant),
						flags: &[$($($flag),*)?],
					},
				)*
			];

			#[inline]
			fn to_raw(self) -> i32 {
				self as i32
			}
		}
	};
}
