use alloc::boxed::Box;
use core::fmt;

use crate::info::{DynamicInfo, NonGenericTypeInfoCell, TypeInfo, Typed};
use crate::object::{ObjectMut, ObjectRef};
use crate::Object;

impl Typed for Box<dyn Object> {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Dynamic(DynamicInfo::new::<Self>()))
    }
}

/// The dynamic kind: the concrete type is only known per value.
impl Object for Box<dyn Object> {
    #[inline]
    fn object_ref(&self) -> ObjectRef<'_> {
        ObjectRef::Dynamic(&**self)
    }

    #[inline]
    fn object_mut(&mut self) -> ObjectMut<'_> {
        ObjectMut::Dynamic(&mut **self)
    }

    fn object_eq(&self, other: &dyn Object) -> Option<bool> {
        match other.downcast_ref::<Self>() {
            Some(other) => (**self).object_eq(&**other),
            None => (**self).object_eq(other),
        }
    }

    fn object_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).object_debug(f)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;

    use crate::info::{TypeKind, Typed};
    use crate::object::ObjectRef;
    use crate::Object;

    #[test]
    fn dynamic_exposes_inner() {
        let value: Box<dyn Object> = Box::new(String::from("qwe"));
        assert_eq!(<Box<dyn Object>>::type_info().kind(), TypeKind::Dynamic);

        let ObjectRef::Dynamic(inner) = value.object_ref() else {
            panic!("expected a dynamic view");
        };
        assert!(inner.is::<String>());
        assert_eq!(value.object_eq(&String::from("qwe")), Some(true));
    }
}
