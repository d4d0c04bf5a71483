//! The value model.
//!
//! - [`Object`]: the object-safe trait every participating value implements.
//! - [`ObjectRef`] / [`ObjectMut`]: views through the sub-trait of a value's kind.
//! - Kind sub-traits: [`Scalar`], [`Optional`], [`Pointer`], [`Array`],
//!   [`Map`] and [`Collection`].
//! - [`ArrayShape`] and [`NdArray`]: multi-dimensional arrays with lower bounds.

// -----------------------------------------------------------------------------
// Modules

mod array;
mod collection;
mod kind;
mod map;
mod nd_array;
mod object;
mod optional;
mod pointer;
mod scalar;

// -----------------------------------------------------------------------------
// Exports

pub use array::{Array, ArrayShape, Indices};
pub use collection::Collection;
pub use kind::{ObjectMut, ObjectRef};
pub use map::Map;
pub use nd_array::NdArray;
pub use object::Object;
pub use optional::Optional;
pub use pointer::Pointer;
pub use scalar::Scalar;
