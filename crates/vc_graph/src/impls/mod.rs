//! Built-in [`Object`](crate::Object) implementations.
//!
//! - Scalars: primitives, `String`, `&'static str`, `Duration` and `()`,
//!   see [`impl_scalar!`](crate::impl_scalar).
//! - `Option<T>`, `Box<T>`, `Arc<T>` and `Box<dyn Object>`.
//! - Arrays: `[T; N]`, `Box<[T]>` and [`NdArray<T>`](crate::object::NdArray).
//! - Collections: `Vec`, `VecDeque`, `BTreeSet` and both `HashSet`s.
//! - Maps: `BTreeMap` and both `HashMap`s.

// -----------------------------------------------------------------------------
// Modules

mod array;
mod collection;
mod dynamic;
mod map;
mod option;
mod pointer;
mod scalar;

// -----------------------------------------------------------------------------
// Internal API

use crate::Object;

/// Element-wise `object_eq`, `None` as soon as one pair cannot be compared.
pub(crate) fn seq_eq<'a>(
    mut a: impl Iterator<Item = &'a dyn Object>,
    mut b: impl Iterator<Item = &'a dyn Object>,
) -> Option<bool> {
    loop {
        match (a.next(), b.next()) {
            (None, None) => return Some(true),
            (Some(x), Some(y)) => {
                if !x.object_eq(y)? {
                    return Some(false);
                }
            }
            _ => return Some(false),
        }
    }
}

/// Writes a sequence of objects like `Debug` for slices.
pub(crate) fn seq_debug<'a>(
    items: impl Iterator<Item = &'a dyn Object>,
    f: &mut core::fmt::Formatter<'_>,
) -> core::fmt::Result {
    f.debug_list().entries(items).finish()
}
