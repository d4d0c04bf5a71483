//! Type schemas: the items, hooks and surrogates of a type.
//!
//! ## Menu
//!
//! - [`TypeSchema`]: the resolved shape of a type under one [`Options`](crate::options::Options),
//!   built once from its [`TypeDecl`](crate::decl::TypeDecl) and cached.
//!     - [`Item`]: one transferred member, sorted by its tag.
//!     - [`Predicate`]: when an item is transferred.
//!     - [`Surrogate`]: conversions to and from a stand-in type.
//!
//! - [`is_copyable`]: whether a type can be copied instead of cloned.
//!
//! ## Caching
//!
//! Schemas are cached per `(TypeId, Options)` for the rest of the process,
//! failed builds included. A build runs outside the cache lock and the first
//! finished build of a key is kept. Builds on one thread nest: requesting a
//! schema that the same thread is still building fails, classifying it answers
//! "not copyable".

// -----------------------------------------------------------------------------
// Modules

mod aliases;
mod builder;
mod cache;
mod copyable;
mod ids;
mod item;
mod surrogate;
mod type_schema;

// -----------------------------------------------------------------------------
// Exports

pub use copyable::is_copyable;
pub use item::{Item, Predicate};
pub use surrogate::Surrogate;
pub use type_schema::TypeSchema;
