use crate::decl::{Declare, TypeDecl};
use crate::info::{Type, TypeInfo, TypeLink, Typed};

macro_rules! impl_type_fn {
    () => {
        #[inline(always)]
        pub const fn ty(&self) -> &Type {
            &self.ty
        }

        #[inline]
        pub const fn type_path(&self) -> &'static str {
            self.ty.path()
        }

        #[inline]
        pub fn is<T: 'static>(&self) -> bool {
            self.ty.is::<T>()
        }
    };
}

// -----------------------------------------------------------------------------
// ScalarInfo

/// Primitives, strings and other intrinsically copyable values.
#[derive(Debug, Clone)]
pub struct ScalarInfo {
    ty: Type,
}

impl ScalarInfo {
    #[inline]
    pub fn new<T: 'static>() -> Self {
        Self { ty: Type::of::<T>() }
    }

    impl_type_fn!();
}

// -----------------------------------------------------------------------------
// OptionalInfo

/// `Option<T>`-like wrappers.
#[derive(Debug, Clone)]
pub struct OptionalInfo {
    ty: Type,
    some: TypeLink,
}

impl OptionalInfo {
    #[inline]
    pub fn new<T: 'static, Inner: Typed>() -> Self {
        Self {
            ty: Type::of::<T>(),
            some: Inner::type_info,
        }
    }

    impl_type_fn!();

    /// Info of the wrapped type.
    #[inline]
    pub fn some(&self) -> &'static TypeInfo {
        (self.some)()
    }
}

// -----------------------------------------------------------------------------
// PointerInfo

/// Heap pointers: owned (`Box<T>`) or shared (`Arc<T>`).
#[derive(Debug, Clone)]
pub struct PointerInfo {
    ty: Type,
    pointee: TypeLink,
    shared: bool,
}

impl PointerInfo {
    #[inline]
    pub fn owned<T: 'static, Pointee: Typed>() -> Self {
        Self {
            ty: Type::of::<T>(),
            pointee: Pointee::type_info,
            shared: false,
        }
    }

    #[inline]
    pub fn shared<T: 'static, Pointee: Typed>() -> Self {
        Self {
            ty: Type::of::<T>(),
            pointee: Pointee::type_info,
            shared: true,
        }
    }

    impl_type_fn!();

    #[inline]
    pub fn pointee(&self) -> &'static TypeInfo {
        (self.pointee)()
    }

    /// `true` for pointers whose pointee may be aliased, e.g. `Arc<T>`.
    #[inline]
    pub const fn is_shared(&self) -> bool {
        self.shared
    }
}

// -----------------------------------------------------------------------------
// ArrayInfo

/// Fixed-shape arrays, including multi-dimensional ones.
///
/// `rank` is `None` when it is only known per value, as for
/// [`NdArray`](crate::object::NdArray).
#[derive(Debug, Clone)]
pub struct ArrayInfo {
    ty: Type,
    element: TypeLink,
    rank: Option<usize>,
    capacity: Option<usize>,
}

impl ArrayInfo {
    /// `[T; N]`.
    #[inline]
    pub fn fixed<T: 'static, E: Typed>(capacity: usize) -> Self {
        Self {
            ty: Type::of::<T>(),
            element: E::type_info,
            rank: Some(1),
            capacity: Some(capacity),
        }
    }

    /// Boxed slices, one dimension with the length known per value.
    #[inline]
    pub fn slice<T: 'static, E: Typed>() -> Self {
        Self {
            ty: Type::of::<T>(),
            element: E::type_info,
            rank: Some(1),
            capacity: None,
        }
    }

    /// Arrays whose rank is only known per value.
    #[inline]
    pub fn multi<T: 'static, E: Typed>() -> Self {
        Self {
            ty: Type::of::<T>(),
            element: E::type_info,
            rank: None,
            capacity: None,
        }
    }

    impl_type_fn!();

    #[inline]
    pub fn element(&self) -> &'static TypeInfo {
        (self.element)()
    }

    #[inline]
    pub const fn rank(&self) -> Option<usize> {
        self.rank
    }

    #[inline]
    pub const fn capacity(&self) -> Option<usize> {
        self.capacity
    }
}

// -----------------------------------------------------------------------------
// MapInfo

#[derive(Debug, Clone)]
pub struct MapInfo {
    ty: Type,
    key: TypeLink,
    value: TypeLink,
}

impl MapInfo {
    #[inline]
    pub fn new<T: 'static, K: Typed, V: Typed>() -> Self {
        Self {
            ty: Type::of::<T>(),
            key: K::type_info,
            value: V::type_info,
        }
    }

    impl_type_fn!();

    #[inline]
    pub fn key(&self) -> &'static TypeInfo {
        (self.key)()
    }

    #[inline]
    pub fn value(&self) -> &'static TypeInfo {
        (self.value)()
    }
}

// -----------------------------------------------------------------------------
// CollectionInfo

/// Single-element-type collections.
///
/// A collection may carry a declaration, which is where its element
/// predicate lives.
#[derive(Debug, Clone)]
pub struct CollectionInfo {
    ty: Type,
    element: TypeLink,
    declare: Option<fn() -> TypeDecl>,
}

impl CollectionInfo {
    #[inline]
    pub fn new<T: 'static, E: Typed>() -> Self {
        Self {
            ty: Type::of::<T>(),
            element: E::type_info,
            declare: None,
        }
    }

    /// A collection with its own declaration.
    #[inline]
    pub fn declared<T: Declare, E: Typed>() -> Self {
        Self {
            ty: Type::of::<T>(),
            element: E::type_info,
            declare: Some(T::declare),
        }
    }

    /// A declared newtype over the collection `Inner`, sharing its element type.
    #[inline]
    pub fn wrapping<T: Declare, Inner: Typed>() -> Self {
        Self {
            ty: Type::of::<T>(),
            element: inner_element::<Inner>,
            declare: Some(T::declare),
        }
    }

    impl_type_fn!();

    #[inline]
    pub fn element(&self) -> &'static TypeInfo {
        (self.element)()
    }

    #[inline]
    pub fn declare(&self) -> Option<TypeDecl> {
        self.declare.map(|declare| declare())
    }
}

fn inner_element<Inner: Typed>() -> &'static TypeInfo {
    match Inner::type_info() {
        TypeInfo::Collection(inner) => inner.element(),
        other => other,
    }
}

// -----------------------------------------------------------------------------
// DynamicInfo

/// The "recognize later" type, `Box<dyn Object>`.
#[derive(Debug, Clone)]
pub struct DynamicInfo {
    ty: Type,
}

impl DynamicInfo {
    #[inline]
    pub fn new<T: ?Sized + 'static>() -> Self {
        Self { ty: Type::of::<T>() }
    }

    impl_type_fn!();
}

// -----------------------------------------------------------------------------
// RecordInfo

/// Declared records, the general object case.
#[derive(Debug, Clone)]
pub struct RecordInfo {
    ty: Type,
    declare: fn() -> TypeDecl,
}

impl RecordInfo {
    #[inline]
    pub fn new<T: Declare>() -> Self {
        Self {
            ty: Type::of::<T>(),
            declare: T::declare,
        }
    }

    impl_type_fn!();

    #[inline]
    pub fn declare(&self) -> TypeDecl {
        (self.declare)()
    }
}
