use alloc::string::String;
use core::time::Duration;

/// Implements [`Object`](crate::Object), [`Typed`](crate::info::Typed),
/// [`Scalar`](crate::object::Scalar) and [`GraphClone`](crate::generated::GraphClone)
/// for types copied as a whole.
///
/// Each type must be `Clone + PartialEq + Debug + Send + Sync + 'static`.
///
/// ```
/// use vc_graph::clone::Cloner;
/// use vc_graph::info::{TypeKind, Typed};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Rgb(u8, u8, u8);
///
/// vc_graph::impl_scalar!(Rgb);
///
/// assert_eq!(Rgb::type_info().kind(), TypeKind::Scalar);
/// let copy = Cloner::default().deep_typed(&Rgb(1, 2, 3)).unwrap();
/// assert_eq!(copy, Rgb(1, 2, 3));
/// ```
#[macro_export]
macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl $crate::info::Typed for $ty {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static CELL: $crate::info::NonGenericTypeInfoCell =
                    $crate::info::NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    $crate::info::TypeInfo::Scalar($crate::info::ScalarInfo::new::<Self>())
                })
            }
        }

        impl $crate::Object for $ty {
            #[inline]
            fn object_ref(&self) -> $crate::object::ObjectRef<'_> {
                $crate::object::ObjectRef::Scalar(self)
            }

            #[inline]
            fn object_mut(&mut self) -> $crate::object::ObjectMut<'_> {
                $crate::object::ObjectMut::Scalar(self)
            }

            fn object_eq(&self, other: &dyn $crate::Object) -> ::core::option::Option<bool> {
                ::core::option::Option::Some(
                    other.downcast_ref::<Self>().is_some_and(|other| self == other),
                )
            }

            fn object_debug(
                &self,
                f: &mut ::core::fmt::Formatter<'_>,
            ) -> ::core::fmt::Result {
                ::core::fmt::Debug::fmt(self, f)
            }
        }

        impl $crate::object::Scalar for $ty {
            #[inline]
            fn copy_boxed(&self) -> $crate::__macro_exports::Box<dyn $crate::Object> {
                $crate::__macro_exports::Box::new(::core::clone::Clone::clone(self))
            }
        }

        impl $crate::generated::GraphClone for $ty {
            #[inline]
            fn graph_clone(
                &self,
                _: &$crate::clone::Cloner,
            ) -> ::core::result::Result<Self, $crate::error::CloneError> {
                ::core::result::Result::Ok(::core::clone::Clone::clone(self))
            }
        }
    )*};
}

crate::impl_scalar!(
    bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
);

crate::impl_scalar!((), String, &'static str, Duration);
