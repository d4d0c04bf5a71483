use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::info::{TypeInfo, TypeLink, Typed};
use crate::object::Object;
use crate::options::{MemberKind, Optionality};

// -----------------------------------------------------------------------------
// Accessors

/// Reads a member out of its owner, `None` if the owner has the wrong type.
pub type Getter = fn(&dyn Object) -> Option<&dyn Object>;

/// Mutable counterpart of [`Getter`], used for in-place merging.
pub type GetterMut = fn(&mut dyn Object) -> Option<&mut dyn Object>;

/// Replaces a member, returning the value back if either type is wrong.
pub type Setter = fn(&mut dyn Object, Box<dyn Object>) -> Result<(), Box<dyn Object>>;

/// `(owner, value) -> should the member be transferred`.
pub type ItemPredicate = fn(&dyn Object, &dyn Object) -> bool;

// -----------------------------------------------------------------------------
// MemberDecl

/// One declared member of a record.
///
/// ```
/// use vc_graph::Object;
/// use vc_graph::decl::MemberDecl;
/// use vc_graph::options::Optionality;
///
/// struct Point { x: i32 }
///
/// let x = MemberDecl::field::<i32>("x", |o| Some(&o.downcast_ref::<Point>()?.x as &dyn Object))
///     .required();
///
/// assert_eq!(x.name(), "x");
/// assert_eq!(x.markers(), &[Optionality::Required]);
/// assert!(x.setter().is_none());
/// ```
#[derive(Clone)]
pub struct MemberDecl {
    pub(crate) name: &'static str,
    pub(crate) kind: MemberKind,
    pub(crate) public: bool,
    pub(crate) markers: Vec<Optionality>,
    pub(crate) alias: Option<&'static str>,
    pub(crate) compact: bool,
    pub(crate) merge: bool,
    pub(crate) exclude: bool,
    pub(crate) serialize_if: Option<ItemPredicate>,
    pub(crate) info: TypeLink,
    pub(crate) get: Getter,
    pub(crate) get_mut: Option<GetterMut>,
    pub(crate) set: Option<Setter>,
}

impl MemberDecl {
    /// A public member of type `V` with the given getter.
    pub fn new<V: Typed>(name: &'static str, kind: MemberKind, get: Getter) -> Self {
        Self {
            name,
            kind,
            public: true,
            markers: Vec::new(),
            alias: None,
            compact: false,
            merge: false,
            exclude: false,
            serialize_if: None,
            info: V::type_info,
            get,
            get_mut: None,
            set: None,
        }
    }

    #[inline]
    pub fn field<V: Typed>(name: &'static str, get: Getter) -> Self {
        Self::new::<V>(name, MemberKind::FIELD, get)
    }

    #[inline]
    pub fn property<V: Typed>(name: &'static str, get: Getter) -> Self {
        Self::new::<V>(name, MemberKind::PROPERTY, get)
    }

    pub fn with_get_mut(mut self, get_mut: GetterMut) -> Self {
        self.get_mut = Some(get_mut);
        self
    }

    pub fn with_setter(mut self, set: Setter) -> Self {
        self.set = Some(set);
        self
    }

    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }

    /// Adds an optionality marker, more than one is reported by the builder.
    pub fn with_marker(mut self, marker: Optionality) -> Self {
        self.markers.push(marker);
        self
    }

    #[inline]
    pub fn required(self) -> Self {
        self.with_marker(Optionality::Required)
    }

    #[inline]
    pub fn optional(self) -> Self {
        self.with_marker(Optionality::Optional)
    }

    #[inline]
    pub fn member(self) -> Self {
        self.with_marker(Optionality::Member)
    }

    pub fn alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    pub fn compact(mut self) -> Self {
        self.compact = true;
        self
    }

    /// Forces merge-only semantics, the setter is ignored.
    pub fn merge(mut self) -> Self {
        self.merge = true;
        self
    }

    pub fn exclude(mut self) -> Self {
        self.exclude = true;
        self
    }

    pub fn serialize_if(mut self, predicate: ItemPredicate) -> Self {
        self.serialize_if = Some(predicate);
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    #[inline]
    pub fn is_public(&self) -> bool {
        self.public
    }

    #[inline]
    pub fn markers(&self) -> &[Optionality] {
        &self.markers
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.info)()
    }

    #[inline]
    pub fn getter(&self) -> Getter {
        self.get
    }

    #[inline]
    pub fn setter(&self) -> Option<Setter> {
        self.set
    }
}

// -----------------------------------------------------------------------------
// InterfaceDecl

/// A named group of property members shared by several types.
///
/// Interfaces are walked before the type's own members.
#[derive(Clone)]
pub struct InterfaceDecl {
    pub(crate) name: &'static str,
    pub(crate) members: Vec<MemberDecl>,
}

impl InterfaceDecl {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            members: Vec::new(),
        }
    }

    pub fn with_member(mut self, member: MemberDecl) -> Self {
        self.members.push(member);
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn members(&self) -> &[MemberDecl] {
        &self.members
    }
}
