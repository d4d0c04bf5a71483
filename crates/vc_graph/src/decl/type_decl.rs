use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::decl::{DeserializationHook, FactoryDecl, FactoryFn, InterfaceDecl, ItemIfFn};
use crate::decl::{MemberDecl, Named, SerializationHook, UnknownDecl};
use crate::decl::{SurrogateFrom, SurrogateIf, SurrogateTo};
use crate::info::{Type, TypeInfo, TypeLink, Typed};
use crate::object::Object;
use crate::options::{InclusionPolicy, MemberKind, Optionality};

// -----------------------------------------------------------------------------
// Declare

/// Produces the declaration the schema builder reads.
///
/// Implemented by `#[derive(Graph)]` for records, or by hand.
pub trait Declare: Typed {
    fn declare() -> TypeDecl;
}

// -----------------------------------------------------------------------------
// Hooks

/// The four ordered hook lists of a type.
#[derive(Clone, Default)]
pub struct HookDecls {
    pub before_serialization: Vec<Named<SerializationHook>>,
    pub after_serialization: Vec<Named<SerializationHook>>,
    pub before_deserialization: Vec<Named<DeserializationHook>>,
    pub after_deserialization: Vec<Named<DeserializationHook>>,
}

impl HookDecls {
    pub fn is_empty(&self) -> bool {
        self.before_serialization.is_empty()
            && self.after_serialization.is_empty()
            && self.before_deserialization.is_empty()
            && self.after_deserialization.is_empty()
    }
}

// -----------------------------------------------------------------------------
// TypeDecl

/// Everything declared about a type: markers, members and methods.
///
/// Duplicate method declarations are kept, so that the schema builder can
/// report them.
///
/// ```
/// use vc_graph::decl::{MemberDecl, TypeDecl};
/// use vc_graph::Object;
///
/// struct Sample { x: i32 }
///
/// let decl = TypeDecl::new::<Sample>()
///     .value()
///     .with_member(
///         MemberDecl::field::<i32>("x", |o| Some(&o.downcast_ref::<Sample>()?.x as &dyn Object))
///             .required(),
///     );
///
/// assert_eq!(decl.members().len(), 1);
/// assert!(decl.is_value());
/// ```
#[derive(Clone)]
pub struct TypeDecl {
    pub(crate) ty: Type,
    pub(crate) value: bool,
    pub(crate) compact: bool,
    pub(crate) copyable: bool,
    pub(crate) all: Option<InclusionPolicy>,
    pub(crate) must: MemberKind,
    pub(crate) ancestor: Option<TypeLink>,
    pub(crate) read_aliases: Vec<&'static str>,
    pub(crate) write_alias: Option<&'static str>,
    pub(crate) interfaces: Vec<InterfaceDecl>,
    pub(crate) members: Vec<MemberDecl>,
    pub(crate) hooks: HookDecls,
    pub(crate) constructor: Option<FactoryFn>,
    pub(crate) factories: Vec<FactoryDecl>,
    pub(crate) to_surrogates: Vec<SurrogateTo>,
    pub(crate) from_surrogates: Vec<SurrogateFrom>,
    pub(crate) surrogate_ifs: Vec<SurrogateIf>,
    pub(crate) item_ifs: Vec<Named<ItemIfFn>>,
    pub(crate) unknown: Vec<UnknownDecl>,
}

impl TypeDecl {
    /// An empty declaration for `T`.
    pub fn new<T: ?Sized + 'static>() -> Self {
        Self::of_type(Type::of::<T>())
    }

    /// An empty declaration for a type without one, such as a plain `Vec<T>`.
    pub(crate) fn of_type(ty: Type) -> Self {
        Self {
            ty,
            value: false,
            compact: false,
            copyable: false,
            all: None,
            must: MemberKind::empty(),
            ancestor: None,
            read_aliases: Vec::new(),
            write_alias: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            hooks: HookDecls::default(),
            constructor: None,
            factories: Vec::new(),
            to_surrogates: Vec::new(),
            from_surrogates: Vec::new(),
            surrogate_ifs: Vec::new(),
            item_ifs: Vec::new(),
            unknown: Vec::new(),
        }
    }

    // ---------------------------------------------------------------- markers

    /// Value semantics: the type may be copied as a whole when all its items can.
    pub fn value(mut self) -> Self {
        self.value = true;
        self
    }

    pub fn compact(mut self) -> Self {
        self.compact = true;
        self
    }

    /// Treat the type as copyable regardless of its items and hooks.
    pub fn copyable(mut self) -> Self {
        self.copyable = true;
        self
    }

    /// Include every public member of `kinds` that has no marker.
    pub fn all(mut self, optionality: Optionality, kinds: MemberKind) -> Self {
        self.all = Some(InclusionPolicy::new(optionality, kinds));
        self
    }

    /// Every public member of `kinds` must be included.
    pub fn must(mut self, kinds: MemberKind) -> Self {
        self.must = kinds;
        self
    }

    /// The type can be read as `A`, it must have as many items.
    pub fn allow_reading_from_ancestor<A: Typed>(mut self) -> Self {
        self.ancestor = Some(A::type_info);
        self
    }

    pub fn read_alias(mut self, alias: &'static str) -> Self {
        self.read_aliases.push(alias);
        self
    }

    pub fn write_alias(mut self, alias: &'static str) -> Self {
        self.write_alias = Some(alias);
        self
    }

    // ---------------------------------------------------------------- members

    pub fn with_interface(mut self, interface: InterfaceDecl) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn with_member(mut self, member: MemberDecl) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_unknown(mut self, unknown: UnknownDecl) -> Self {
        self.unknown.push(unknown);
        self
    }

    // ---------------------------------------------------------------- methods

    pub fn before_serialization(mut self, name: &'static str, hook: SerializationHook) -> Self {
        self.hooks.before_serialization.push(Named::new(name, hook));
        self
    }

    pub fn after_serialization(mut self, name: &'static str, hook: SerializationHook) -> Self {
        self.hooks.after_serialization.push(Named::new(name, hook));
        self
    }

    pub fn before_deserialization(mut self, name: &'static str, hook: DeserializationHook) -> Self {
        self.hooks.before_deserialization.push(Named::new(name, hook));
        self
    }

    pub fn after_deserialization(mut self, name: &'static str, hook: DeserializationHook) -> Self {
        self.hooks.after_deserialization.push(Named::new(name, hook));
        self
    }

    /// The default constructor, used when no factory is declared.
    pub fn with_constructor(mut self, make: FactoryFn) -> Self {
        self.constructor = Some(make);
        self
    }

    /// Uses [`Default`] as the default constructor.
    pub fn with_default<T: Default + Object>(self) -> Self {
        self.with_constructor(Arc::new(|| Box::new(T::default()) as Box<dyn Object>))
    }

    pub fn with_factory(mut self, factory: FactoryDecl) -> Self {
        self.factories.push(factory);
        self
    }

    pub fn with_to_surrogate(mut self, to: SurrogateTo) -> Self {
        self.to_surrogates.push(to);
        self
    }

    pub fn with_from_surrogate(mut self, from: SurrogateFrom) -> Self {
        self.from_surrogates.push(from);
        self
    }

    pub fn with_surrogate_if(mut self, test: SurrogateIf) -> Self {
        self.surrogate_ifs.push(test);
        self
    }

    /// Declares the element predicate of a collection type.
    pub fn with_item_if(mut self, name: &'static str, test: ItemIfFn) -> Self {
        self.item_ifs.push(Named::new(name, test));
        self
    }

    // ---------------------------------------------------------------- getters

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn is_value(&self) -> bool {
        self.value
    }

    #[inline]
    pub fn is_compact(&self) -> bool {
        self.compact
    }

    #[inline]
    pub fn is_copyable_override(&self) -> bool {
        self.copyable
    }

    #[inline]
    pub fn members(&self) -> &[MemberDecl] {
        &self.members
    }

    #[inline]
    pub fn interfaces(&self) -> &[InterfaceDecl] {
        &self.interfaces
    }

    #[inline]
    pub fn hooks(&self) -> &HookDecls {
        &self.hooks
    }

    #[inline]
    pub fn ancestor(&self) -> Option<&'static TypeInfo> {
        self.ancestor.map(|link| link())
    }

    /// Whether any member is eligible under the type's own policy or markers.
    ///
    /// Used by [`TypeSchema::collect`](crate::schema::TypeSchema::collect).
    pub fn has_items(&self) -> bool {
        let kinds = self.all.map(|policy| policy.kinds).unwrap_or_default();
        self.interfaces
            .iter()
            .flat_map(|interface| interface.members.iter())
            .chain(self.members.iter())
            .filter(|member| !member.exclude)
            .any(|member| {
                !member.markers.is_empty() || (member.public && kinds.intersects(member.kind))
            })
    }
}
