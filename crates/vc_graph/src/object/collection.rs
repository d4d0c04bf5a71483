use alloc::boxed::Box;

use crate::object::Object;

/// Containers of a single element type, in iteration order.
pub trait Collection: Object {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Object> + '_>;

    /// An empty collection of the same type.
    fn empty(&self) -> Box<dyn Collection>;

    /// Appends an element, sets insert it.
    ///
    /// Returns `Err(element)` if it is not of the element type.
    fn push_boxed(&mut self, element: Box<dyn Object>) -> Result<(), Box<dyn Object>>;
}
