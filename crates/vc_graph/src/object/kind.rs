use crate::info::TypeKind;
use crate::object::{Array, Collection, Map, Object, Optional, Pointer, Scalar};

// -----------------------------------------------------------------------------
// ObjectRef

/// An immutable view of a value through the sub-trait of its kind.
///
/// `Dynamic` holds the boxed inner value, `Record` the value itself, records
/// are accessed through their declaration rather than a sub-trait.
#[derive(Clone, Copy)]
pub enum ObjectRef<'a> {
    Scalar(&'a dyn Scalar),
    Optional(&'a dyn Optional),
    Pointer(&'a dyn Pointer),
    Array(&'a dyn Array),
    Map(&'a dyn Map),
    Collection(&'a dyn Collection),
    Dynamic(&'a dyn Object),
    Record(&'a dyn Object),
}

// -----------------------------------------------------------------------------
// ObjectMut

/// A mutable view of a value through the sub-trait of its kind.
pub enum ObjectMut<'a> {
    Scalar(&'a mut dyn Scalar),
    Optional(&'a mut dyn Optional),
    Pointer(&'a mut dyn Pointer),
    Array(&'a mut dyn Array),
    Map(&'a mut dyn Map),
    Collection(&'a mut dyn Collection),
    Dynamic(&'a mut dyn Object),
    Record(&'a mut dyn Object),
}

macro_rules! impl_kind_fn {
    () => {
        pub fn kind(&self) -> TypeKind {
            match self {
                Self::Scalar(_) => TypeKind::Scalar,
                Self::Optional(_) => TypeKind::Optional,
                Self::Pointer(_) => TypeKind::Pointer,
                Self::Array(_) => TypeKind::Array,
                Self::Map(_) => TypeKind::Map,
                Self::Collection(_) => TypeKind::Collection,
                Self::Dynamic(_) => TypeKind::Dynamic,
                Self::Record(_) => TypeKind::Record,
            }
        }
    };
}

impl<'a> ObjectRef<'a> {
    impl_kind_fn!();

    #[inline]
    pub fn as_map(self) -> Option<&'a dyn Map> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    pub fn as_collection(self) -> Option<&'a dyn Collection> {
        match self {
            Self::Collection(collection) => Some(collection),
            _ => None,
        }
    }
}

impl<'a> ObjectMut<'a> {
    impl_kind_fn!();

    #[inline]
    pub fn as_map(self) -> Option<&'a mut dyn Map> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    pub fn as_collection(self) -> Option<&'a mut dyn Collection> {
        match self {
            Self::Collection(collection) => Some(collection),
            _ => None,
        }
    }
}
