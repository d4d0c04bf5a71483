use alloc::boxed::Box;

use crate::object::Object;

/// Heap pointers to a single value.
pub trait Pointer: Object {
    fn pointee(&self) -> &dyn Object;

    /// `None` if the pointee is shared with other pointers.
    fn pointee_mut(&mut self) -> Option<&mut dyn Object>;

    fn is_shared(&self) -> bool;

    /// Another pointer to the same pointee, `None` for owning pointers.
    fn share(&self) -> Option<Box<dyn Object>>;

    /// A new pointer of the same type owning `pointee`.
    ///
    /// Returns `Err(pointee)` if it is not of the pointee type.
    fn wrap(&self, pointee: Box<dyn Object>) -> Result<Box<dyn Object>, Box<dyn Object>>;
}
