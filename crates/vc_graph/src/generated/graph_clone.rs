use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::hash::{BuildHasher, Hash};

use crate::clone::Cloner;
use crate::error::{CloneError, DispatchError};
use crate::info::Typed;
use crate::object::{NdArray, Object};

// -----------------------------------------------------------------------------
// GraphClone

/// Statically dispatched clone and merge.
///
/// The provided methods go through the [`Cloner`]. The built-in impls below
/// and `#[graph(generate)]` records override them with direct code that
/// produces the same result.
///
/// ```
/// use vc_graph::clone::Cloner;
/// use vc_graph::generated::GraphClone;
///
/// let cloner = Cloner::default();
/// let src = vec![Some(Box::new(3_u8)), None];
/// assert_eq!(src.graph_clone(&cloner).unwrap(), src);
///
/// let mut dst = vec![None];
/// dst.graph_merge(&src, &cloner).unwrap();
/// assert_eq!(dst.len(), 3);
/// ```
pub trait GraphClone: Object + Typed + Sized {
    fn graph_clone(&self, cloner: &Cloner) -> Result<Self, CloneError> {
        cloner.deep_typed(self)
    }

    fn graph_merge(&mut self, src: &Self, cloner: &Cloner) -> Result<(), CloneError> {
        cloner.merge_typed(self, src)
    }
}

/// Types whose [`GraphClone`] impl was generated, the ones a
/// [`GeneratedTable`](crate::generated::GeneratedTable) accepts.
pub trait Specialized: GraphClone {}

// -----------------------------------------------------------------------------
// Optional and pointers

impl<T: GraphClone> GraphClone for Option<T> {
    fn graph_clone(&self, cloner: &Cloner) -> Result<Self, CloneError> {
        self.as_ref().map(|value| value.graph_clone(cloner)).transpose()
    }
}

impl<T: GraphClone> GraphClone for Box<T> {
    fn graph_clone(&self, cloner: &Cloner) -> Result<Self, CloneError> {
        Ok(Box::new((**self).graph_clone(cloner)?))
    }

    fn graph_merge(&mut self, src: &Self, cloner: &Cloner) -> Result<(), CloneError> {
        (**self).graph_merge(src, cloner)
    }
}

impl<T: GraphClone> GraphClone for Arc<T> {
    fn graph_clone(&self, cloner: &Cloner) -> Result<Self, CloneError> {
        Ok(Arc::new((**self).graph_clone(cloner)?))
    }

    fn graph_merge(&mut self, src: &Self, cloner: &Cloner) -> Result<(), CloneError> {
        match Arc::get_mut(self) {
            Some(value) => value.graph_merge(src, cloner),
            None => Err(DispatchError::SharedPointer(Self::type_info().type_path()).into()),
        }
    }
}

impl GraphClone for Box<dyn Object> {
    fn graph_clone(&self, cloner: &Cloner) -> Result<Self, CloneError> {
        cloner.deep(&**self)
    }

    fn graph_merge(&mut self, src: &Self, cloner: &Cloner) -> Result<(), CloneError> {
        cloner.merge(&mut **self, &**src)
    }
}

// -----------------------------------------------------------------------------
// Collections

macro_rules! impl_sequence {
    ($ty:ident, $push:ident) => {
        impl<T: GraphClone> GraphClone for $ty<T> {
            fn graph_clone(&self, cloner: &Cloner) -> Result<Self, CloneError> {
                self.iter().map(|value| value.graph_clone(cloner)).collect()
            }

            fn graph_merge(&mut self, src: &Self, cloner: &Cloner) -> Result<(), CloneError> {
                for value in src {
                    self.$push(value.graph_clone(cloner)?);
                }
                Ok(())
            }
        }
    };
}

impl_sequence!(Vec, push);
impl_sequence!(VecDeque, push_back);

impl<T: GraphClone + Ord> GraphClone for BTreeSet<T> {
    fn graph_clone(&self, cloner: &Cloner) -> Result<Self, CloneError> {
        self.iter().map(|value| value.graph_clone(cloner)).collect()
    }

    fn graph_merge(&mut self, src: &Self, cloner: &Cloner) -> Result<(), CloneError> {
        for value in src {
            self.insert(value.graph_clone(cloner)?);
        }
        Ok(())
    }
}

macro_rules! impl_hash_set {
    ($($set:ident)::+) => {
        impl<T, S> GraphClone for $($set)::+<T, S>
        where
            T: GraphClone + Eq + Hash,
            S: BuildHasher + Default + Send + Sync + 'static,
        {
            fn graph_clone(&self, cloner: &Cloner) -> Result<Self, CloneError> {
                self.iter().map(|value| value.graph_clone(cloner)).collect()
            }

            fn graph_merge(&mut self, src: &Self, cloner: &Cloner) -> Result<(), CloneError> {
                for value in src {
                    self.insert(value.graph_clone(cloner)?);
                }
                Ok(())
            }
        }
    };
}

impl_hash_set!(std::collections::HashSet);
impl_hash_set!(hashbrown::HashSet);

// -----------------------------------------------------------------------------
// Maps

macro_rules! impl_map {
    ($($map:ident)::+ < K, V $(, $hasher:ident)? >, where $($bounds:tt)*) => {
        impl<K, V $(, $hasher)?> GraphClone for $($map)::+<K, V $(, $hasher)?>
        where
            $($bounds)*
        {
            fn graph_clone(&self, cloner: &Cloner) -> Result<Self, CloneError> {
                self.iter()
                    .map(|(key, value)| {
                        Ok::<_, CloneError>((key.graph_clone(cloner)?, value.graph_clone(cloner)?))
                    })
                    .collect()
            }

            fn graph_merge(&mut self, src: &Self, cloner: &Cloner) -> Result<(), CloneError> {
                for (key, value) in src {
                    self.insert(key.graph_clone(cloner)?, value.graph_clone(cloner)?);
                }
                Ok(())
            }
        }
    };
}

impl_map!(BTreeMap<K, V>, where K: GraphClone + Ord, V: GraphClone);
impl_map!(
    std::collections::HashMap<K, V, S>,
    where
        K: GraphClone + Eq + Hash,
        V: GraphClone,
        S: BuildHasher + Default + Send + Sync + 'static
);
impl_map!(
    hashbrown::HashMap<K, V, S>,
    where
        K: GraphClone + Eq + Hash,
        V: GraphClone,
        S: BuildHasher + Default + Send + Sync + 'static
);

// -----------------------------------------------------------------------------
// Arrays

fn clone_all<T: GraphClone>(values: &[T], cloner: &Cloner) -> Result<Vec<T>, CloneError> {
    values.iter().map(|value| value.graph_clone(cloner)).collect()
}

impl<T: GraphClone, const N: usize> GraphClone for [T; N] {
    fn graph_clone(&self, cloner: &Cloner) -> Result<Self, CloneError> {
        let values = clone_all(self, cloner)?;
        let found = values.len();
        values.try_into().map_err(|_| {
            CloneError::from(DispatchError::ShapeMismatch {
                type_path: Self::type_info().type_path(),
                expected: N,
                found,
            })
        })
    }
}

impl<T: GraphClone> GraphClone for Box<[T]> {
    fn graph_clone(&self, cloner: &Cloner) -> Result<Self, CloneError> {
        Ok(clone_all(self, cloner)?.into_boxed_slice())
    }
}

impl<T: GraphClone> GraphClone for NdArray<T> {
    fn graph_clone(&self, cloner: &Cloner) -> Result<Self, CloneError> {
        let values = clone_all(self.as_slice(), cloner)?;
        let found = values.len();
        NdArray::from_shape(self.shape().clone(), values).ok_or_else(|| {
            CloneError::from(DispatchError::ShapeMismatch {
                type_path: Self::type_info().type_path(),
                expected: self.len(),
                found,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::{String, ToString};
    use alloc::sync::Arc;
    use alloc::vec;

    use super::GraphClone;
    use crate::clone::Cloner;
    use crate::object::NdArray;

    #[test]
    fn map_values_are_fresh() {
        let cloner = Cloner::default();
        let src = BTreeMap::from([(String::from("k"), vec![String::from("v")])]);
        let copy = src.graph_clone(&cloner).unwrap();
        assert_eq!(copy, src);
        assert_ne!(copy["k"].as_ptr(), src["k"].as_ptr());
    }

    #[test]
    fn shared_arc_rejects_merge() {
        let cloner = Cloner::default();
        let mut dst = Arc::new(vec![1_u8]);
        let other = Arc::clone(&dst);
        let err = dst.graph_merge(&Arc::new(vec![2]), &cloner).unwrap_err();
        assert!(err.to_string().starts_with("Unable to merge into shared pointer"));
        drop(other);

        dst.graph_merge(&Arc::new(vec![2]), &cloner).unwrap();
        assert_eq!(*dst, [1, 2]);
    }

    #[test]
    fn matches_interpreted_arrays() {
        let cloner = Cloner::default();
        let src = NdArray::new(&[2, 1], vec![String::from("a"), String::from("b")]).unwrap();
        assert_eq!(src.graph_clone(&cloner).unwrap(), cloner.deep_typed(&src).unwrap());

        let fixed = [[1_u8, 2], [3, 4]];
        assert_eq!(fixed.graph_clone(&cloner).unwrap(), cloner.deep_typed(&fixed).unwrap());
    }
}
