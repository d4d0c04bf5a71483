//! Static type information.
//!
//! ## Menu
//!
//! - [`Type`]: a [`TypeId`] plus the readable type path.
//!
//! - [`TypeInfo`]: an enum over the kinds the dispatcher distinguishes:
//!     - [`ScalarInfo`]: primitives, strings and opted-in C-like enums.
//!     - [`OptionalInfo`]: `Option<T>`, including the info link of `T`.
//!     - [`PointerInfo`]: `Box<T>` and `Arc<T>`, plus whether the pointer is shared.
//!     - [`ArrayInfo`]: `[T; N]`, `Box<[T]>` and [`NdArray`](crate::object::NdArray).
//!     - [`MapInfo`]: key and value links of map types.
//!     - [`CollectionInfo`]: element link and optional declaration of collections.
//!     - [`DynamicInfo`]: `Box<dyn Object>`, resolved per value.
//!     - [`RecordInfo`]: declared records and their [`TypeDecl`](crate::decl::TypeDecl).
//!
//! - [`TypeLink`]: a lazily followed reference to another [`TypeInfo`].
//!
//! - [`TypeKind`]: the kind of a [`TypeInfo`], without its content.
//!
//! - [`Typed`]: static access to a type's `TypeInfo`.
//!
//! - [`DynamicTyped`]: dynamic access to a value's `TypeInfo`.
//!
//! - [`NonGenericTypeInfoCell`] / [`GenericTypeInfoCell`]: static storage for manual `Typed` impls.
//!
//! [`TypeId`]: core::any::TypeId

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod kind_info;
mod ty;
mod type_info;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, NonGenericTypeInfoCell};
pub use kind_info::{ArrayInfo, CollectionInfo, DynamicInfo, MapInfo};
pub use kind_info::{OptionalInfo, PointerInfo, RecordInfo, ScalarInfo};
pub use ty::Type;
pub use type_info::{KindError, TypeInfo, TypeKind, TypeLink};
pub use typed::{DynamicTyped, Typed};
