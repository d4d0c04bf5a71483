use alloc::boxed::Box;

use crate::object::Object;

/// Key-value containers.
pub trait Map: Object {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Object, &dyn Object)> + '_>;

    /// An empty map of the same type.
    fn empty(&self) -> Box<dyn Map>;

    /// Inserts an entry, replacing the value of an existing key.
    ///
    /// Returns the rejected key or value if it is not of the expected type.
    fn insert_boxed(
        &mut self,
        key: Box<dyn Object>,
        value: Box<dyn Object>,
    ) -> Result<(), Box<dyn Object>>;
}
