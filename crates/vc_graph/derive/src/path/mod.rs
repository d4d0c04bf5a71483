//! Paths emitted by the derive, kept in one place so that moving an item in
//! `vc_graph` only touches this module.
//!
//! The crate path itself is resolved by [`vc_graph`].

use proc_macro2::TokenStream;
use quote::quote;

pub(crate) mod fp;

// -----------------------------------------------------------------------------
// Crate Path

/// The path of the `vc_graph` crate as seen by the crate being built.
///
/// 1. Crates depending on `vc_graph` get `::vc_graph`.
/// 2. Crates depending on `vc_clone_kit` get `::vc_clone_kit::graph`.
/// 3. Otherwise `::vc_graph`, which may be wrong.
///
/// Reading the manifest is not free, the path is resolved once per derive
/// and passed around.
pub(crate) fn vc_graph() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_graph"))
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn object_(vc_graph: &syn::Path) -> TokenStream {
    quote! { #vc_graph::Object }
}

#[inline(always)]
pub(crate) fn typed_(vc_graph: &syn::Path) -> TokenStream {
    quote! { #vc_graph::info::Typed }
}

#[inline(always)]
pub(crate) fn info_(vc_graph: &syn::Path) -> TokenStream {
    quote! { #vc_graph::info }
}

#[inline(always)]
pub(crate) fn object_mod_(vc_graph: &syn::Path) -> TokenStream {
    quote! { #vc_graph::object }
}

#[inline(always)]
pub(crate) fn decl_(vc_graph: &syn::Path) -> TokenStream {
    quote! { #vc_graph::decl }
}

#[inline(always)]
pub(crate) fn options_(vc_graph: &syn::Path) -> TokenStream {
    quote! { #vc_graph::options }
}

#[inline(always)]
pub(crate) fn graph_clone_(vc_graph: &syn::Path) -> TokenStream {
    quote! { #vc_graph::generated::GraphClone }
}

#[inline(always)]
pub(crate) fn specialized_(vc_graph: &syn::Path) -> TokenStream {
    quote! { #vc_graph::generated::Specialized }
}

#[inline(always)]
pub(crate) fn cloner_(vc_graph: &syn::Path) -> TokenStream {
    quote! { #vc_graph::clone::Cloner }
}

#[inline(always)]
pub(crate) fn clone_error_(vc_graph: &syn::Path) -> TokenStream {
    quote! { #vc_graph::error::CloneError }
}

#[inline(always)]
pub(crate) fn macro_exports_(vc_graph: &syn::Path) -> TokenStream {
    quote! { #vc_graph::__macro_exports }
}
