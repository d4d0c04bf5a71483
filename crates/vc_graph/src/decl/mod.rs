//! Declarations: what a type tells the schema builder about itself.
//!
//! Rust has no runtime member introspection, so a type describes its members,
//! markers and methods in a [`TypeDecl`], through [`Declare`]. The derive
//! macro writes these, manual implementations use the same builder.

// -----------------------------------------------------------------------------
// Modules

mod member;
mod method;
mod type_decl;
mod unknown;

// -----------------------------------------------------------------------------
// Exports

pub use member::{Getter, GetterMut, InterfaceDecl, ItemPredicate, MemberDecl, Setter};
pub use method::{DeserializationHook, ItemIfFn, Named, SerializationHook};
pub use method::{FactoryDecl, SurrogateFrom, SurrogateIf, SurrogateTo};
pub use method::{FactoryFn, FromSurrogateFn, SurrogateIfFn, ToSurrogateFn};
pub use method::{MethodDecl, MethodSig, Receiver};
pub use type_decl::{Declare, HookDecls, TypeDecl};
pub use unknown::{UnknownDecl, UnknownStorage};
