use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::object::Object;

// -----------------------------------------------------------------------------
// UnknownStorage

/// Members read from a wire format that the schema does not know.
///
/// Codecs fill it while reading and write it back out, the clone and merge
/// paths leave it alone.
#[derive(Default)]
pub struct UnknownStorage {
    fields: Vec<(String, Box<dyn Object>)>,
}

impl UnknownStorage {
    #[inline]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn add(&mut self, name: impl Into<String>, value: Box<dyn Object>) {
        self.fields.push((name.into(), value));
    }

    #[inline]
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Object)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), &**value))
    }
}

impl core::fmt::Debug for UnknownStorage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// -----------------------------------------------------------------------------
// UnknownDecl

/// Declares the member holding a type's [`UnknownStorage`].
#[derive(Clone, Copy)]
pub struct UnknownDecl {
    pub name: &'static str,
    pub get: fn(&dyn Object) -> Option<&UnknownStorage>,
    pub get_mut: fn(&mut dyn Object) -> Option<&mut UnknownStorage>,
}
