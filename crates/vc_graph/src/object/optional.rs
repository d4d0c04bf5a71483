use alloc::boxed::Box;

use crate::object::Object;

/// `Option<T>`-like values.
pub trait Optional: Object {
    fn value(&self) -> Option<&dyn Object>;

    fn value_mut(&mut self) -> Option<&mut dyn Object>;

    /// An absent value of the same type.
    fn none(&self) -> Box<dyn Object>;

    /// Wraps `value` into a present value of the same type.
    ///
    /// Returns `Err(value)` if it is not of the wrapped type.
    fn some(&self, value: Box<dyn Object>) -> Result<Box<dyn Object>, Box<dyn Object>>;
}
