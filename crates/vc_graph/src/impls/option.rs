use alloc::boxed::Box;
use core::fmt;

use crate::info::{GenericTypeInfoCell, OptionalInfo, TypeInfo, Typed};
use crate::object::{ObjectMut, ObjectRef, Optional};
use crate::Object;

impl<T: Object + Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Optional(OptionalInfo::new::<Self, T>()))
    }
}

impl<T: Object + Typed> Object for Option<T> {
    #[inline]
    fn object_ref(&self) -> ObjectRef<'_> {
        ObjectRef::Optional(self)
    }

    #[inline]
    fn object_mut(&mut self) -> ObjectMut<'_> {
        ObjectMut::Optional(self)
    }

    fn object_eq(&self, other: &dyn Object) -> Option<bool> {
        match (self, other.downcast_ref::<Self>()?) {
            (None, None) => Some(true),
            (Some(a), Some(b)) => a.object_eq(b),
            _ => Some(false),
        }
    }

    fn object_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Some(value) => {
                f.write_str("Some(")?;
                value.object_debug(f)?;
                f.write_str(")")
            }
            None => f.write_str("None"),
        }
    }
}

impl<T: Object + Typed> Optional for Option<T> {
    #[inline]
    fn value(&self) -> Option<&dyn Object> {
        self.as_ref().map(|value| value as &dyn Object)
    }

    #[inline]
    fn value_mut(&mut self) -> Option<&mut dyn Object> {
        self.as_mut().map(|value| value as &mut dyn Object)
    }

    #[inline]
    fn none(&self) -> Box<dyn Object> {
        Box::new(None::<T>)
    }

    fn some(&self, value: Box<dyn Object>) -> Result<Box<dyn Object>, Box<dyn Object>> {
        let value = value.take::<T>()?;
        Ok(Box::new(Some(value)))
    }
}
