//! See [`Graph`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static GRAPH_ATTRIBUTE_NAME: &str = "graph";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Graph Derivation
///
/// `#[derive(Graph)]` on a struct implements:
///
/// - `Typed`, as a record.
/// - `Object`, comparing and printing the declared fields.
/// - `Declare`, one member per field.
/// - `GraphClone`, through the cloner or generated with `generate`.
///
/// The type must implement `Default` unless a `factory` is given.
///
/// ```rust, ignore
/// #[derive(Graph, Default)]
/// #[graph(all(optional))]
/// pub struct Player {
///     pub name: String,
///     #[graph(required, alias = "hp")]
///     pub health: u32,
///     #[graph(exclude)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// ## Type Attributes
///
/// | attribute | effect |
/// |-----------|--------|
/// | `value` | fields of this type are updated in place |
/// | `compact` | marks the type compact |
/// | `copyable` | treat the type as copyable no matter its items |
/// | `all(optionality, kinds)` | include every public member of `kinds` (`fields` by default) |
/// | `must(kinds)` | every member of `kinds` must be marked |
/// | `alias(read = ["a", "b"], write = "w")` | type aliases |
/// | `ancestor = Type` | may read data written for `Type` |
/// | `interface = expr` | adds an `InterfaceDecl` |
/// | `factory = path` | `fn() -> Self`, used instead of `Default` |
/// | `before_serialization = path` | `fn(&Self)`, repeatable, same for `after_serialization` |
/// | `before_deserialization = path` | `fn(&mut Self)`, repeatable, same for `after_deserialization` |
/// | `to_surrogate = path` | `fn(&Self) -> S` |
/// | `from_surrogate = path` | `fn(S) -> Self` |
/// | `surrogate_if = path` | `fn(&Self) -> bool` |
/// | `surrogate = Type` | names `S` when it cannot be inferred |
/// | `generate` | generate `GraphClone` bodies and submit them to `GeneratedTable::collect` |
/// | `auto_register` | submit the type to `TypeSchema::collect` |
///
/// Generic types are never submitted.
///
/// ## Field Attributes
///
/// | attribute | effect |
/// |-----------|--------|
/// | `required`, `optional`, `member` | optionality marker |
/// | `alias = "tag"` | member alias |
/// | `compact` | marks the member compact |
/// | `merge` | merge into the existing value instead of assigning |
/// | `exclude` | not declared at all, the type need not implement `Object` |
/// | `unknown` | the field holding `UnknownStorage` |
/// | `serialize_if = path` | `fn(&Self, &Field) -> bool` |
///
/// Non-`pub` fields are declared private, they are only included when marked.
///
/// ## Scalars
///
/// `#[graph(scalar)]` turns a `Clone + PartialEq + Debug` type, usually a
/// C-like enum, into a scalar that is copied by value.
///
/// ```rust, ignore
/// #[derive(Graph, Clone, Copy, PartialEq, Debug)]
/// #[graph(scalar)]
/// pub enum Faction { Red, Blue }
/// ```
///
/// ## Collection Newtypes
///
/// `#[graph(collection)]` on a `Default` newtype over a collection delegates to
/// the inner collection. `item_if = path` filters elements with
/// `fn(&Self, usize, &dyn Object) -> bool`.
///
/// ```rust, ignore
/// #[derive(Graph, Default)]
/// #[graph(collection, item_if = Self::keep)]
/// pub struct Inventory(Vec<Item>);
/// ```
#[proc_macro_derive(Graph, attributes(graph))]
pub fn derive_graph(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let derive = match derive_data::GraphDerive::from_input(&ast) {
        Ok(derive) => derive,
        Err(err) => return err.into_compile_error().into(),
    };

    let vc_graph = path::vc_graph();
    impls::impl_graph(&derive, &vc_graph).into()
}
