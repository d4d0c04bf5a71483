use alloc::boxed::Box;

use crate::object::Object;

/// Values copied as a whole, without looking inside.
pub trait Scalar: Object {
    /// A boxed copy of the value.
    fn copy_boxed(&self) -> Box<dyn Object>;
}
