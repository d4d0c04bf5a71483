use alloc::boxed::Box;
use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;
use core::fmt;
use core::hash::{BuildHasher, Hash};

use crate::impls::{seq_debug, seq_eq};
use crate::info::{CollectionInfo, GenericTypeInfoCell, TypeInfo, Typed};
use crate::object::{Collection, ObjectMut, ObjectRef};
use crate::Object;

/// `Typed` and the kind plumbing shared by every collection,
/// `$iter` borrows the concrete element iterator.
macro_rules! impl_collection_common {
    (iter = $iter:expr) => {
        #[inline]
        fn object_ref(&self) -> ObjectRef<'_> {
            ObjectRef::Collection(self)
        }

        #[inline]
        fn object_mut(&mut self) -> ObjectMut<'_> {
            ObjectMut::Collection(self)
        }

        fn object_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            seq_debug($iter(self).map(|v| v as &dyn Object), f)
        }
    };
}

macro_rules! collection_info {
    ($elem:ty) => {
        fn type_info() -> &'static TypeInfo {
            static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
            CELL.get_or_insert::<Self>(|| TypeInfo::Collection(CollectionInfo::new::<Self, $elem>()))
        }
    };
}

// -----------------------------------------------------------------------------
// Sequences

macro_rules! impl_sequence {
    ($ty:ident, $iter:expr, $push:ident) => {
        impl<T: Object + Typed> Typed for $ty<T> {
            collection_info!(T);
        }

        impl<T: Object + Typed> Object for $ty<T> {
            impl_collection_common!(iter = $iter);

            fn object_eq(&self, other: &dyn Object) -> Option<bool> {
                let other = other.downcast_ref::<Self>()?;
                seq_eq(
                    $iter(self).map(|v| v as &dyn Object),
                    $iter(other).map(|v| v as &dyn Object),
                )
            }
        }

        impl<T: Object + Typed> Collection for $ty<T> {
            #[inline]
            fn len(&self) -> usize {
                <$ty<T>>::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = &dyn Object> + '_> {
                Box::new($iter(self).map(|v| v as &dyn Object))
            }

            fn empty(&self) -> Box<dyn Collection> {
                Box::new(<$ty<T>>::new())
            }

            fn push_boxed(&mut self, element: Box<dyn Object>) -> Result<(), Box<dyn Object>> {
                let element = element.take::<T>()?;
                self.$push(element);
                Ok(())
            }
        }
    };
}

impl_sequence!(Vec, <[T]>::iter, push);
impl_sequence!(VecDeque, VecDeque::<T>::iter, push_back);

// -----------------------------------------------------------------------------
// BTreeSet

impl<T: Object + Typed + Ord> Typed for BTreeSet<T> {
    collection_info!(T);
}

impl<T: Object + Typed + Ord> Object for BTreeSet<T> {
    impl_collection_common!(iter = BTreeSet::<T>::iter);

    fn object_eq(&self, other: &dyn Object) -> Option<bool> {
        Some(self == other.downcast_ref::<Self>()?)
    }
}

impl<T: Object + Typed + Ord> Collection for BTreeSet<T> {
    #[inline]
    fn len(&self) -> usize {
        BTreeSet::len(self)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Object> + '_> {
        Box::new(BTreeSet::iter(self).map(|v| v as &dyn Object))
    }

    fn empty(&self) -> Box<dyn Collection> {
        Box::new(BTreeSet::<T>::new())
    }

    fn push_boxed(&mut self, element: Box<dyn Object>) -> Result<(), Box<dyn Object>> {
        self.insert(element.take::<T>()?);
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// HashSet

macro_rules! impl_hash_set {
    ($($set:ident)::+) => {
        impl<T, S> Typed for $($set)::+<T, S>
        where
            T: Object + Typed + Eq + Hash,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            collection_info!(T);
        }

        impl<T, S> Object for $($set)::+<T, S>
        where
            T: Object + Typed + Eq + Hash,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            impl_collection_common!(iter = $($set)::+::<T, S>::iter);

            fn object_eq(&self, other: &dyn Object) -> Option<bool> {
                Some(self == other.downcast_ref::<Self>()?)
            }
        }

        impl<T, S> Collection for $($set)::+<T, S>
        where
            T: Object + Typed + Eq + Hash,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            #[inline]
            fn len(&self) -> usize {
                $($set)::+::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = &dyn Object> + '_> {
                Box::new($($set)::+::iter(self).map(|v| v as &dyn Object))
            }

            fn empty(&self) -> Box<dyn Collection> {
                Box::new($($set)::+::<T, S>::with_hasher(S::default()))
            }

            fn push_boxed(&mut self, element: Box<dyn Object>) -> Result<(), Box<dyn Object>> {
                self.insert(element.take::<T>()?);
                Ok(())
            }
        }
    };
}

impl_hash_set!(std::collections::HashSet);
impl_hash_set!(hashbrown::HashSet);

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::VecDeque;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::object::Collection;
    use crate::Object;

    #[test]
    fn push_checks_type() {
        let mut list: Vec<u8> = vec![1];
        assert!(list.push_boxed(Box::new(2_u8)).is_ok());
        assert!(list.push_boxed(Box::new(3_i64)).is_err());
        assert_eq!(list, [1, 2]);
    }

    #[test]
    fn empty_keeps_type() {
        let queue: VecDeque<u8> = VecDeque::from([1, 2]);
        let empty = queue.empty();
        assert_eq!(empty.len(), 0);
        let empty: Box<dyn Object> = empty;
        assert!(empty.is::<VecDeque<u8>>());
    }

    #[test]
    fn sequence_equality() {
        let a = vec![1_u8, 2];
        assert_eq!(a.object_eq(&vec![1_u8, 2]), Some(true));
        assert_eq!(a.object_eq(&vec![1_u8]), Some(false));
        assert_eq!(a.object_eq(&1_u8), None);
    }

    #[test]
    fn set_equality() {
        let a: std::collections::HashSet<u8> = [1, 2].into_iter().collect();
        let b: std::collections::HashSet<u8> = [2, 1].into_iter().collect();
        assert_eq!(a.object_eq(&b), Some(true));
    }
}
