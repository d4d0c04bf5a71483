//! Paths used by `#[derive(Graph)]` and [`impl_scalar!`](crate::impl_scalar).

pub use alloc::boxed::Box;

#[cfg(feature = "auto_register")]
pub use inventory;

#[cfg(feature = "auto_register")]
pub use auto_register::DeclaredType;

#[cfg(feature = "auto_register")]
mod auto_register {
    use crate::info::TypeLink;

    /// A type submitted by `#[graph(auto_register)]`, listed by
    /// [`TypeSchema::collect`](crate::schema::TypeSchema::collect).
    pub struct DeclaredType(pub TypeLink);

    inventory::collect!(DeclaredType);
}
