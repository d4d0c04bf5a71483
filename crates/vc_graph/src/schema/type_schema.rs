use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use std::sync::OnceLock;

use crate::decl::{FactoryDecl, FactoryFn, HookDecls, ItemIfFn, Named, UnknownDecl};
use crate::error::{CloneError, DispatchError};
use crate::info::{TypeInfo, Typed};
use crate::object::{Collection, Object, ObjectRef};
use crate::options::{InclusionPolicy, MemberKind, Options};
use crate::schema::{Item, Predicate, Surrogate, aliases, cache};

/// The resolved shape of a type under one [`Options`] value.
///
/// Built on first request from the type's [`TypeDecl`](crate::decl::TypeDecl)
/// and cached for the rest of the process, failures included.
///
/// # Examples
///
/// ```
/// use vc_graph::decl::{Declare, MemberDecl, TypeDecl};
/// use vc_graph::derive::Graph;
/// use vc_graph::options::Options;
/// use vc_graph::schema::TypeSchema;
///
/// #[derive(Graph, Default)]
/// struct Point {
///     #[graph(required)]
///     y: i32,
///     #[graph(optional, alias = "a")]
///     x: i32,
/// }
///
/// let schema = TypeSchema::of::<Point>(&Options::new()).unwrap();
/// let tags: Vec<_> = schema.items().iter().map(|item| item.tag()).collect();
/// assert_eq!(tags, ["a", "y"]);
/// assert_eq!(schema.required_count(), 1);
/// ```
pub struct TypeSchema {
    pub(crate) info: &'static TypeInfo,
    pub(crate) options: Options,
    pub(crate) items: Vec<Item>,
    pub(crate) compact: bool,
    pub(crate) copyable: bool,
    pub(crate) required_count: usize,
    pub(crate) policy: Option<InclusionPolicy>,
    pub(crate) must: MemberKind,
    pub(crate) allow_reading_from_ancestor: bool,
    pub(crate) surrogate: Option<Surrogate>,
    pub(crate) write_alias: Option<&'static str>,
    pub(crate) factory: Option<FactoryDecl>,
    pub(crate) constructor: Option<FactoryFn>,
    pub(crate) hooks: HookDecls,
    pub(crate) item_if: Option<Named<ItemIfFn>>,
    pub(crate) unknown: Option<UnknownDecl>,
    pub(crate) default: OnceLock<Option<Box<dyn Object>>>,
}

impl TypeSchema {
    /// The schema of `info` under `options`, built on first request.
    ///
    /// Requesting a schema from inside its own construction fails with
    /// [`RecursiveDefinition`](crate::error::SchemaErrorKind::RecursiveDefinition).
    #[inline]
    pub fn get(info: &'static TypeInfo, options: &Options) -> Result<Arc<TypeSchema>, CloneError> {
        cache::get_or_build(info, options)
    }

    #[inline]
    pub fn of<T: Typed>(options: &Options) -> Result<Arc<TypeSchema>, CloneError> {
        Self::get(T::type_info(), options)
    }

    /// The type registered under read alias `alias`.
    ///
    /// Aliases are registered when the owning schema is built.
    pub fn type_by_read_alias(alias: &str, options: &Options) -> Option<&'static TypeInfo> {
        aliases::lookup(alias, options)
    }

    /// Every auto-registered type that declares at least one eligible member.
    ///
    /// Sorted by type path.
    #[cfg(feature = "auto_register")]
    pub fn collect() -> Vec<&'static TypeInfo> {
        use crate::__macro_exports::DeclaredType;

        let mut types: Vec<&'static TypeInfo> = inventory::iter::<DeclaredType>
            .into_iter()
            .map(|declared| (declared.0)())
            .filter(|info| info.declaration().is_some_and(|decl| decl.has_items()))
            .collect();
        types.sort_by_key(|info| info.type_path());
        types.dedup_by_key(|info| info.type_id());
        types
    }

    /// Drops every cached schema, surrogate role and read alias.
    #[doc(hidden)]
    pub fn reset_caches() {
        cache::reset();
    }

    // ---------------------------------------------------------------- getters

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        self.info
    }

    #[inline]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Items sorted by tag.
    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item_by_tag(&self, tag: &str) -> Option<&Item> {
        self.items
            .binary_search_by(|item| item.tag.as_str().cmp(tag))
            .ok()
            .map(|index| &self.items[index])
    }

    #[inline]
    pub fn is_compact(&self) -> bool {
        self.compact
    }

    #[inline]
    pub fn is_copyable(&self) -> bool {
        self.copyable
    }

    #[inline]
    pub fn required_count(&self) -> usize {
        self.required_count
    }

    /// The `all` policy of the type, or the default policy of the options.
    #[inline]
    pub fn policy(&self) -> Option<InclusionPolicy> {
        self.policy
    }

    #[inline]
    pub fn must(&self) -> MemberKind {
        self.must
    }

    #[inline]
    pub fn allows_reading_from_ancestor(&self) -> bool {
        self.allow_reading_from_ancestor
    }

    #[inline]
    pub fn surrogate(&self) -> Option<&Surrogate> {
        self.surrogate.as_ref()
    }

    #[inline]
    pub fn write_alias(&self) -> Option<&'static str> {
        self.write_alias
    }

    #[inline]
    pub fn hooks(&self) -> &HookDecls {
        &self.hooks
    }

    #[inline]
    pub fn has_hooks(&self) -> bool {
        !self.hooks.is_empty()
    }

    /// The element predicate of a collection type.
    #[inline]
    pub fn item_if(&self) -> Option<ItemIfFn> {
        self.item_if.map(|test| test.func)
    }

    /// Accessor of the member keeping unrecognized wire data.
    #[inline]
    pub fn unknown(&self) -> Option<&UnknownDecl> {
        self.unknown.as_ref()
    }

    #[inline]
    pub fn factory(&self) -> Option<&FactoryDecl> {
        self.factory.as_ref()
    }

    // ---------------------------------------------------------------- values

    /// A new instance through the factory, or the default constructor.
    pub fn construct(&self) -> Result<Box<dyn Object>, DispatchError> {
        if let Some(factory) = &self.factory {
            return Ok((factory.func)());
        }
        match &self.constructor {
            Some(make) => Ok(make()),
            None => Err(DispatchError::NoConstructor(self.info.type_path())),
        }
    }

    /// The instance that `member` items are compared against, built once.
    pub fn default_instance(&self) -> Option<&dyn Object> {
        self.default
            .get_or_init(|| self.construct().ok())
            .as_deref()
    }

    /// Whether `item` of `owner`, currently holding `value`, should be transferred.
    pub fn should_serialize(&self, item: &Item, owner: &dyn Object, value: &dyn Object) -> bool {
        match item.predicate {
            None => true,
            Some(Predicate::Explicit(test)) => test(owner, value),
            Some(Predicate::DiffersFromDefault) => self.differs_from_default(item, value),
        }
    }

    fn differs_from_default(&self, item: &Item, value: &dyn Object) -> bool {
        let default = self.default_instance().and_then(|instance| item.get(instance));
        let differs = |default: &dyn Object| value.object_eq(default) != Some(true);

        match value.object_ref() {
            ObjectRef::Collection(collection) => {
                let test = self.element_filter(value);
                if let Some(default) = default
                    && let Some(defaults) = default.object_ref().as_collection()
                    && !defaults.is_empty()
                    && test.is_none_or(|test| any_passes(defaults, test))
                {
                    return differs(default);
                }
                match test {
                    Some(test) => any_passes(collection, test),
                    None => !collection.is_empty(),
                }
            }
            ObjectRef::Map(map) => match default {
                Some(default) if default.object_ref().as_map().is_some_and(|d| !d.is_empty()) => {
                    differs(default)
                }
                _ => !map.is_empty(),
            },
            _ => default.is_none_or(differs),
        }
    }

    fn element_filter(&self, collection: &dyn Object) -> Option<ItemIfFn> {
        if !self.options.check_for_empty_collections {
            return None;
        }
        Self::get(collection.object_type_info(), &self.options)
            .ok()?
            .item_if()
    }

    /// The number of scalars in the flattened item list, `None` unless every
    /// item is a scalar or a compact record of scalars.
    pub fn count_primitive_children(&self) -> Option<usize> {
        self.items.iter().try_fold(0, |count, item| {
            let info = item.type_info();
            match info {
                TypeInfo::Scalar(_) => Some(count + 1),
                TypeInfo::Record(_) if item.compact => {
                    let nested = Self::get(info, &self.options).ok()?;
                    Some(count + nested.count_primitive_children()?)
                }
                _ => None,
            }
        })
    }
}

fn any_passes(collection: &dyn Collection, test: ItemIfFn) -> bool {
    let owner: &dyn Object = collection;
    collection
        .iter()
        .enumerate()
        .any(|(index, element)| test(owner, index, element))
}

impl fmt::Debug for TypeSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeSchema")
            .field("type", &self.info.type_path())
            .field("items", &self.items)
            .field("compact", &self.compact)
            .field("copyable", &self.copyable)
            .field("surrogate", &self.surrogate)
            .finish_non_exhaustive()
    }
}
