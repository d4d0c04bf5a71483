//! Fully qualified std paths, immune to shadowing at the derive site.

use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn option_() -> TokenStream {
    quote! { ::core::option::Option }
}

#[inline(always)]
pub(crate) fn result_() -> TokenStream {
    quote! { ::core::result::Result }
}

#[inline(always)]
pub(crate) fn default_() -> TokenStream {
    quote! { ::core::default::Default }
}

#[inline(always)]
pub(crate) fn fmt_() -> TokenStream {
    quote! { ::core::fmt }
}
