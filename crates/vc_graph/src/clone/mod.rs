//! The generic clone and merge dispatcher.
//!
//! - [`Cloner`]: entry points and the per-type function caches.
//! - [`CloneFn`] / [`MergeFn`]: the erased per-type functions it hands out.
//!
//! Functions are built once per type, by case analysis over the
//! [`TypeInfo`](crate::info::TypeInfo) kind. Records go through an object
//! plan built from their [`TypeSchema`](crate::schema::TypeSchema).

// -----------------------------------------------------------------------------
// Modules

mod cloner;
mod dispatch;
mod lazy;
mod plan;

// -----------------------------------------------------------------------------
// Exports

pub use cloner::Cloner;

use alloc::boxed::Box;
use alloc::sync::Arc;

use crate::error::CloneError;
use crate::object::Object;

/// Deep clone of one type, called with the value as `&dyn Object`.
pub type CloneFn = Arc<dyn Fn(&Cloner, &dyn Object) -> Result<Box<dyn Object>, CloneError> + Send + Sync>;

/// In-place merge of one type, `dst` and `src` share the runtime type.
pub type MergeFn =
    Arc<dyn Fn(&Cloner, &mut dyn Object, &dyn Object) -> Result<(), CloneError> + Send + Sync>;
