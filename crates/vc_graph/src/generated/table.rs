use alloc::boxed::Box;
use core::any::TypeId;
use core::fmt;

use crate::clone::Cloner;
use crate::error::{CloneError, DispatchError};
use crate::generated::Specialized;
use crate::hash::TypeIdMap;
use crate::info::{TypeInfo, TypeLink};
use crate::object::Object;

// -----------------------------------------------------------------------------
// GeneratedEntry

/// The erased generated functions of one type.
#[derive(Clone, Copy)]
pub struct GeneratedEntry {
    type_info: TypeLink,
    pub clone: fn(&Cloner, &dyn Object) -> Result<Box<dyn Object>, CloneError>,
    pub merge: fn(&Cloner, &mut dyn Object, &dyn Object) -> Result<(), CloneError>,
}

impl GeneratedEntry {
    /// The entry of `T`, usable in `inventory::submit!`.
    pub const fn of<T: Specialized>() -> Self {
        Self {
            type_info: T::type_info,
            clone: clone_erased::<T>,
            merge: merge_erased::<T>,
        }
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }
}

impl fmt::Debug for GeneratedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GeneratedEntry")
            .field(&self.type_info().type_path())
            .finish()
    }
}

fn mismatch<T: Specialized>(found: &dyn Object) -> CloneError {
    DispatchError::TypeMismatch {
        expected: T::type_info().type_path(),
        found: found.type_path(),
    }
    .into()
}

fn clone_erased<T: Specialized>(cloner: &Cloner, src: &dyn Object) -> Result<Box<dyn Object>, CloneError> {
    let Some(value) = src.downcast_ref::<T>() else {
        return cloner.deep(src);
    };
    Ok(Box::new(value.graph_clone(cloner)?))
}

fn merge_erased<T: Specialized>(
    cloner: &Cloner,
    dst: &mut dyn Object,
    src: &dyn Object,
) -> Result<(), CloneError> {
    let Some(src) = src.downcast_ref::<T>() else {
        return Err(mismatch::<T>(src));
    };
    let found = dst.type_path();
    match dst.downcast_mut::<T>() {
        Some(dst) => dst.graph_merge(src, cloner),
        None => Err(DispatchError::TypeMismatch {
            expected: T::type_info().type_path(),
            found,
        }
        .into()),
    }
}

#[cfg(feature = "auto_register")]
inventory::collect!(GeneratedEntry);

// -----------------------------------------------------------------------------
// GeneratedTable

/// Generated functions keyed by type.
///
/// Pass it to [`Cloner::with_generated`] to have the cloner dispatch to them.
#[derive(Default)]
pub struct GeneratedTable {
    entries: TypeIdMap<GeneratedEntry>,
}

impl GeneratedTable {
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: TypeIdMap::new(),
        }
    }

    /// Every entry submitted by `#[graph(generate)]` types in the binary.
    #[cfg(feature = "auto_register")]
    pub fn collect() -> Self {
        let mut table = Self::new();
        for entry in inventory::iter::<GeneratedEntry> {
            table.insert(*entry);
        }
        log::debug!("collected {} generated types", table.len());
        table
    }

    pub fn register<T: Specialized>(&mut self) -> &mut Self {
        self.insert(GeneratedEntry::of::<T>());
        self
    }

    /// Adds `entry`, keeping an existing entry of the same type.
    pub fn insert(&mut self, entry: GeneratedEntry) -> bool {
        self.entries.try_insert(entry.type_info().type_id(), || entry)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&GeneratedEntry> {
        self.entries.get(&type_id)
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.entries.contains(&type_id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneratedEntry> {
        self.entries.iter().map(|(_, entry)| entry)
    }
}

impl fmt::Debug for GeneratedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
