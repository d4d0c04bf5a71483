use core::any::{Any, TypeId};
use core::fmt;
use core::hash::{Hash, Hasher};

/// The identity of a participating type: its [`TypeId`] plus a readable path.
///
/// Equality and hashing only look at the [`TypeId`].
///
/// # Example
///
/// ```
/// use vc_graph::info::Type;
///
/// let ty = Type::of::<Vec<String>>();
/// assert!(ty.is::<Vec<String>>());
/// assert_eq!(ty.name(), "Vec<alloc::string::String>");
/// ```
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    path: &'static str,
}

impl Type {
    /// Creates the identity of `T`.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: core::any::type_name::<T>(),
        }
    }

    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// The full path, as reported by [`core::any::type_name`].
    #[inline(always)]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// The path without its leading module segments.
    ///
    /// Generic arguments are kept as they are.
    pub fn name(&self) -> &'static str {
        let head = match self.path.find('<') {
            Some(lt) => &self.path[..lt],
            None => self.path,
        };
        match head.rfind("::") {
            Some(pos) => &self.path[pos + 2..],
            None => self.path,
        }
    }

    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl Hash for Type {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::Type;
    use alloc::string::String;
    use alloc::vec::Vec;

    #[test]
    fn short_names() {
        assert_eq!(Type::of::<u32>().name(), "u32");
        assert_eq!(Type::of::<String>().name(), "String");
        assert_eq!(
            Type::of::<Vec<Option<u8>>>().name(),
            "Vec<core::option::Option<u8>>"
        );
    }
}
