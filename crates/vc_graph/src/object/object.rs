use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::info::DynamicTyped;
use crate::object::{ObjectMut, ObjectRef};

// -----------------------------------------------------------------------------
// Object

/// A value that takes part in object-graph cloning and merging.
///
/// Every participating type implements `Object` and [`Typed`]. The built-in
/// impls cover primitives, strings, `Option`, `Box`, `Arc`, arrays, the std
/// collections and maps, and `Box<dyn Object>`. Records get it from
/// [`#[derive(Graph)]`](crate::derive::Graph).
///
/// ## Type identification
///
/// `Box<dyn Object>` is itself an `Object` (the dynamic kind), so trait
/// methods called on a box describe the box. Dereference it first:
///
/// ```
/// use core::any::TypeId;
/// use vc_graph::Object;
///
/// let x: Box<dyn Object> = Box::new(7_u32);
/// assert_eq!(x.ty_id(), TypeId::of::<Box<dyn Object>>());
/// assert_eq!((*x).ty_id(), TypeId::of::<u32>());
/// assert!(x.is::<u32>());
/// ```
///
/// ## Kinds
///
/// [`object_ref`](Object::object_ref) and [`object_mut`](Object::object_mut)
/// expose a value through the sub-trait of its kind, which is what the
/// dispatcher walks.
///
/// [`Typed`]: crate::info::Typed
pub trait Object: DynamicTyped + Any + Send + Sync + 'static {
    #[inline(always)]
    fn as_object(&self) -> &dyn Object
    where
        Self: Sized,
    {
        self
    }

    #[inline(always)]
    fn as_object_mut(&mut self) -> &mut dyn Object
    where
        Self: Sized,
    {
        self
    }

    #[inline(always)]
    fn into_object(self: Box<Self>) -> Box<dyn Object>
    where
        Self: Sized,
    {
        self
    }

    /// The [`TypeId`] of the underlying value.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn object_ref(&self) -> ObjectRef<'_>;

    fn object_mut(&mut self) -> ObjectMut<'_>;

    /// Value equality, `None` if the type cannot be compared.
    #[inline]
    fn object_eq(&self, _other: &dyn Object) -> Option<bool> {
        None
    }

    fn object_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({})", self.object_type_info().type_path())
    }
}

impl dyn Object {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.object_type_info().type_path()
    }

    /// Downcasts the value to type `T` by reference.
    ///
    /// ```
    /// use vc_graph::Object;
    ///
    /// let x: Box<dyn Object> = Box::new(String::from("qwe"));
    /// assert_eq!(x.downcast_ref::<String>().unwrap(), "qwe");
    /// assert!(x.downcast_ref::<u8>().is_none());
    /// ```
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the value to type `T`, consuming the trait object.
    ///
    /// Returns `Err(self)` if the underlying value is not a `T`.
    #[inline]
    pub fn downcast<T: Any>(self: Box<dyn Object>) -> Result<Box<T>, Box<dyn Object>> {
        if self.is::<T>() {
            #[expect(unsafe_code, reason = "type is already checked")]
            Ok(unsafe { <Box<dyn Any>>::downcast::<T>(self).unwrap_unchecked() })
        } else {
            Err(self)
        }
    }

    /// Downcasts the value to type `T`, unboxing and consuming the trait object.
    ///
    /// ```
    /// use vc_graph::Object;
    ///
    /// let x: Box<dyn Object> = Box::new(10_i32);
    /// assert_eq!(x.take::<i32>().unwrap(), 10);
    /// ```
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Object>) -> Result<T, Box<dyn Object>> {
        self.downcast::<T>().map(|boxed| *boxed)
    }
}

impl fmt::Debug for dyn Object {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.object_debug(f)
    }
}
