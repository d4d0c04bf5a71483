use core::any::TypeId;
use core::fmt;

use crate::decl::TypeDecl;
use crate::info::{ArrayInfo, CollectionInfo, DynamicInfo, MapInfo};
use crate::info::{OptionalInfo, PointerInfo, RecordInfo, ScalarInfo, Type};

// -----------------------------------------------------------------------------
// TypeLink

/// A deferred reference to another type's [`TypeInfo`].
///
/// Infos never hold `&'static TypeInfo` of their element and member types
/// directly, the link is only followed when needed. This lets a type mention
/// itself, e.g. `Option<Box<Self>>`.
pub type TypeLink = fn() -> &'static TypeInfo;

// -----------------------------------------------------------------------------
// TypeKind

/// The case set a type falls into for dispatching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Scalar,
    Optional,
    Pointer,
    Array,
    Map,
    Collection,
    Dynamic,
    Record,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => f.pad("Scalar"),
            Self::Optional => f.pad("Optional"),
            Self::Pointer => f.pad("Pointer"),
            Self::Array => f.pad("Array"),
            Self::Map => f.pad("Map"),
            Self::Collection => f.pad("Collection"),
            Self::Dynamic => f.pad("Dynamic"),
            Self::Record => f.pad("Record"),
        }
    }
}

/// Returned by the `as_*` casts of [`TypeInfo`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("type kind mismatch: expected {expected}, received {received}")]
pub struct KindError {
    pub expected: TypeKind,
    pub received: TypeKind,
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Static information about a participating type.
///
/// Obtained through [`Typed::type_info`](crate::info::Typed::type_info) or,
/// for a value, [`DynamicTyped::object_type_info`](crate::info::DynamicTyped::object_type_info).
///
/// # Example
///
/// ```
/// use vc_graph::info::{TypeKind, Typed};
///
/// let info = <Vec<Option<u8>>>::type_info();
/// assert_eq!(info.kind(), TypeKind::Collection);
///
/// let element = info.as_collection().unwrap().element();
/// assert_eq!(element.kind(), TypeKind::Optional);
/// assert!(element.as_optional().unwrap().some().ty().is::<u8>());
/// ```
#[derive(Debug)]
pub enum TypeInfo {
    Scalar(ScalarInfo),
    Optional(OptionalInfo),
    Pointer(PointerInfo),
    Array(ArrayInfo),
    Map(MapInfo),
    Collection(CollectionInfo),
    Dynamic(DynamicInfo),
    Record(RecordInfo),
}

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        #[doc = concat!("Cast to [`", stringify!($info), "`].")]
        #[inline]
        pub const fn $name(&self) -> Result<&$info, KindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(KindError {
                    expected: TypeKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_scalar: Scalar => ScalarInfo);
    impl_cast_method!(as_optional: Optional => OptionalInfo);
    impl_cast_method!(as_pointer: Pointer => PointerInfo);
    impl_cast_method!(as_array: Array => ArrayInfo);
    impl_cast_method!(as_map: Map => MapInfo);
    impl_cast_method!(as_collection: Collection => CollectionInfo);
    impl_cast_method!(as_dynamic: Dynamic => DynamicInfo);
    impl_cast_method!(as_record: Record => RecordInfo);

    pub const fn ty(&self) -> &Type {
        match self {
            Self::Scalar(info) => info.ty(),
            Self::Optional(info) => info.ty(),
            Self::Pointer(info) => info.ty(),
            Self::Array(info) => info.ty(),
            Self::Map(info) => info.ty(),
            Self::Collection(info) => info.ty(),
            Self::Dynamic(info) => info.ty(),
            Self::Record(info) => info.ty(),
        }
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty().id()
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    pub const fn kind(&self) -> TypeKind {
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

    /// The declaration the schema builder reads for this type.
    ///
    /// Records always have one, collections only when they declare an
    /// element predicate or other type-level markers.
    pub fn declaration(&self) -> Option<TypeDecl> {
        match self {
            Self::Record(info) => Some(info.declare()),
            Self::Collection(info) => info.declare(),
            _ => None,
        }
    }

    /// Whether a member of this type can be merged into in place.
    pub fn is_mergeable(&self) -> bool {
        match self {
            Self::Record(_) | Self::Map(_) | Self::Collection(_) | Self::Dynamic(_) => true,
            Self::Pointer(info) => info.pointee().is_mergeable(),
            Self::Scalar(_) | Self::Optional(_) | Self::Array(_) => false,
        }
    }
}
