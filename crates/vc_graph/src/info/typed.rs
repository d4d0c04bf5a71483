use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to the [`TypeInfo`] of a type.
///
/// Implemented by `#[derive(Graph)]` and by the built-in impls. Manual
/// implementations usually store the info in a [`NonGenericTypeInfoCell`] or,
/// for generic types, a [`GenericTypeInfoCell`].
///
/// ```
/// use vc_graph::info::{NonGenericTypeInfoCell, ScalarInfo, TypeInfo, Typed};
///
/// struct Celsius(f32);
///
/// impl Typed for Celsius {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Scalar(ScalarInfo::new::<Self>()))
///     }
/// }
///
/// assert!(Celsius::type_info().as_scalar().is_ok());
/// ```
///
/// [`NonGenericTypeInfoCell`]: crate::info::NonGenericTypeInfoCell
/// [`GenericTypeInfoCell`]: crate::info::GenericTypeInfoCell
pub trait Typed: 'static {
    fn type_info() -> &'static TypeInfo;
}

// -----------------------------------------------------------------------------
// DynamicTyped

/// The object-safe counterpart of [`Typed`].
///
/// Blanket implemented for every [`Typed`] type, do not implement it manually.
pub trait DynamicTyped {
    /// The [`TypeInfo`] of the underlying value's type.
    fn object_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn object_type_info(&self) -> &'static TypeInfo {
        T::type_info()
    }
}
