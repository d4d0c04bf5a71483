use alloc::boxed::Box;
use alloc::string::String;

use crate::decl::{Getter, GetterMut, ItemPredicate, Setter};
use crate::info::{TypeInfo, TypeLink};
use crate::object::Object;
use crate::options::{MemberKind, Optionality};

/// When an item is transferred.
#[derive(Clone, Copy)]
pub enum Predicate {
    /// A declared `serialize_if` function.
    Explicit(ItemPredicate),
    /// Only when the value differs from the one in the type's default instance.
    DiffersFromDefault,
}

/// One serializable member of a [`TypeSchema`](crate::schema::TypeSchema).
pub struct Item {
    pub(crate) name: &'static str,
    pub(crate) alias: &'static str,
    pub(crate) id: Option<String>,
    pub(crate) tag: String,
    pub(crate) kind: MemberKind,
    pub(crate) optionality: Optionality,
    pub(crate) compact: bool,
    pub(crate) copyable: bool,
    pub(crate) info: TypeLink,
    pub(crate) get: Getter,
    pub(crate) get_mut: Option<GetterMut>,
    pub(crate) set: Option<Setter>,
    pub(crate) predicate: Option<Predicate>,
}

impl Item {
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declared alias, or the name.
    #[inline]
    pub fn alias(&self) -> &'static str {
        self.alias
    }

    /// The generated id, only assigned under [`TagMode::Ids`](crate::options::TagMode::Ids).
    #[inline]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The wire tag under the schema's tag mode.
    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[inline]
    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    #[inline]
    pub fn optionality(&self) -> Optionality {
        self.optionality
    }

    #[inline]
    pub fn is_optional(&self) -> bool {
        self.optionality != Optionality::Required
    }

    #[inline]
    pub fn is_compact(&self) -> bool {
        self.compact
    }

    /// Whether values of the item's type are copied rather than cloned.
    #[inline]
    pub fn is_copyable(&self) -> bool {
        self.copyable
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.info)()
    }

    /// `false` for merge-only items.
    #[inline]
    pub fn has_setter(&self) -> bool {
        self.set.is_some()
    }

    #[inline]
    pub fn predicate(&self) -> Option<Predicate> {
        self.predicate
    }

    #[inline]
    pub fn get<'a>(&self, owner: &'a dyn Object) -> Option<&'a dyn Object> {
        (self.get)(owner)
    }

    #[inline]
    pub fn get_mut<'a>(&self, owner: &'a mut dyn Object) -> Option<&'a mut dyn Object> {
        self.get_mut.and_then(|get_mut| get_mut(owner))
    }

    /// Replaces the member, `Err(value)` when merge-only or on a type mismatch.
    #[inline]
    pub fn set(&self, owner: &mut dyn Object, value: Box<dyn Object>) -> Result<(), Box<dyn Object>> {
        match self.set {
            Some(set) => set(owner, value),
            None => Err(value),
        }
    }
}

impl core::fmt::Debug for Item {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Item")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("optionality", &self.optionality)
            .field("type", &self.type_info().type_path())
            .finish()
    }
}
