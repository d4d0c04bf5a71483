//! Containers for static storage of [`TypeInfo`].
//!
//! - [`NonGenericTypeInfoCell`]: a [`OnceLock`], for non-generic types.
//! - [`GenericTypeInfoCell`]: one `static` in a generic function is shared by
//!   every instantiation, so the cell keys its entries by [`TypeId`].

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::hash::TypeIdMap;
use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// NonGenericTypeInfoCell

/// Container for the [`TypeInfo`] of a non-generic type.
pub struct NonGenericTypeInfoCell(OnceLock<TypeInfo>);

impl NonGenericTypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> TypeInfo) -> &TypeInfo {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericTypeInfoCell

/// Container for the [`TypeInfo`] of a generic type.
///
/// ```
/// use vc_graph::info::{CollectionInfo, GenericTypeInfoCell, TypeInfo, Typed};
///
/// struct Bag<T>(Vec<T>);
///
/// impl<T: Typed> Typed for Bag<T> {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
///         CELL.get_or_insert::<Self>(|| TypeInfo::Collection(CollectionInfo::new::<Self, T>()))
///     }
/// }
///
/// let a = <Bag<u8>>::type_info();
/// let b = <Bag<u16>>::type_info();
/// assert_ne!(a.type_id(), b.type_id());
/// assert!(core::ptr::eq(a, <Bag<u8>>::type_info()));
/// ```
pub struct GenericTypeInfoCell(RwLock<TypeIdMap<&'static TypeInfo>>);

impl GenericTypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the info stored for `G`, creating it with `f` if absent.
    ///
    /// `f` runs without holding the lock, so it may query other cells.
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> TypeInfo) -> &'static TypeInfo {
        let type_id = TypeId::of::<G>();

        let found = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied();
        if let Some(info) = found {
            return info;
        }

        let created = f();
        let mut guard = self.0.write().unwrap_or_else(PoisonError::into_inner);
        *guard.get_or_insert(type_id, || Box::leak(Box::new(created)))
    }
}

impl Default for NonGenericTypeInfoCell {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for GenericTypeInfoCell {
    fn default() -> Self {
        Self::new()
    }
}
