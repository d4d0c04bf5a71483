use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;

use crate::info::{GenericTypeInfoCell, PointerInfo, TypeInfo, Typed};
use crate::object::{ObjectMut, ObjectRef, Pointer};
use crate::Object;

// -----------------------------------------------------------------------------
// Box<T>

impl<T: Object + Typed> Typed for Box<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Pointer(PointerInfo::owned::<Self, T>()))
    }
}

impl<T: Object + Typed> Object for Box<T> {
    #[inline]
    fn object_ref(&self) -> ObjectRef<'_> {
        ObjectRef::Pointer(self)
    }

    #[inline]
    fn object_mut(&mut self) -> ObjectMut<'_> {
        ObjectMut::Pointer(self)
    }

    fn object_eq(&self, other: &dyn Object) -> Option<bool> {
        let other: &T = other.downcast_ref::<Self>()?;
        (**self).object_eq(other)
    }

    fn object_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).object_debug(f)
    }
}

impl<T: Object + Typed> Pointer for Box<T> {
    #[inline]
    fn pointee(&self) -> &dyn Object {
        &**self
    }

    #[inline]
    fn pointee_mut(&mut self) -> Option<&mut dyn Object> {
        Some(&mut **self)
    }

    #[inline]
    fn is_shared(&self) -> bool {
        false
    }

    #[inline]
    fn share(&self) -> Option<Box<dyn Object>> {
        None
    }

    fn wrap(&self, pointee: Box<dyn Object>) -> Result<Box<dyn Object>, Box<dyn Object>> {
        let pointee = pointee.downcast::<T>()?;
        Ok(Box::new(pointee))
    }
}

// -----------------------------------------------------------------------------
// Arc<T>

impl<T: Object + Typed> Typed for Arc<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Pointer(PointerInfo::shared::<Self, T>()))
    }
}

impl<T: Object + Typed> Object for Arc<T> {
    #[inline]
    fn object_ref(&self) -> ObjectRef<'_> {
        ObjectRef::Pointer(self)
    }

    #[inline]
    fn object_mut(&mut self) -> ObjectMut<'_> {
        ObjectMut::Pointer(self)
    }

    fn object_eq(&self, other: &dyn Object) -> Option<bool> {
        let other: &T = other.downcast_ref::<Self>()?;
        (**self).object_eq(other)
    }

    fn object_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).object_debug(f)
    }
}

impl<T: Object + Typed> Pointer for Arc<T> {
    #[inline]
    fn pointee(&self) -> &dyn Object {
        &**self
    }

    /// `None` unless this is the only pointer to the value.
    #[inline]
    fn pointee_mut(&mut self) -> Option<&mut dyn Object> {
        Arc::get_mut(self).map(|value| value as &mut dyn Object)
    }

    #[inline]
    fn is_shared(&self) -> bool {
        true
    }

    #[inline]
    fn share(&self) -> Option<Box<dyn Object>> {
        Some(Box::new(Arc::clone(self)))
    }

    fn wrap(&self, pointee: Box<dyn Object>) -> Result<Box<dyn Object>, Box<dyn Object>> {
        let pointee = pointee.take::<T>()?;
        Ok(Box::new(Arc::new(pointee)))
    }
}
