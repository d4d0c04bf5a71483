use proc_macro2::TokenStream;

use crate::derive_data::GraphDerive;

/// Submit the type to `TypeSchema::collect`.
#[cfg(feature = "auto_register")]
pub(crate) fn impl_auto_register(derive: &GraphDerive, vc_graph: &syn::Path) -> TokenStream {
    use quote::quote_spanned;

    let Some(span) = derive.attrs.auto_register else {
        return crate::utils::empty();
    };
    // Invalid for generic types.
    if derive.is_generic() {
        return crate::utils::empty();
    }

    let exports_ = crate::path::macro_exports_(vc_graph);
    let typed_ = crate::path::typed_(vc_graph);
    let ident = derive.ident;

    quote_spanned! { span =>
        #exports_::inventory::submit! {
            #exports_::DeclaredType(<#ident as #typed_>::type_info)
        }
    }
}

#[cfg(not(feature = "auto_register"))]
pub(crate) fn impl_auto_register(_: &GraphDerive, _: &syn::Path) -> TokenStream {
    crate::utils::empty()
}

/// Submit the generated functions to `GeneratedTable::collect`.
#[cfg(feature = "auto_register")]
pub(crate) fn impl_generated_entry(derive: &GraphDerive, vc_graph: &syn::Path) -> TokenStream {
    use quote::quote;

    if derive.is_generic() {
        return crate::utils::empty();
    }

    let exports_ = crate::path::macro_exports_(vc_graph);
    let ident = derive.ident;

    quote! {
        #exports_::inventory::submit! {
            #vc_graph::generated::GeneratedEntry::of::<#ident>()
        }
    }
}

#[cfg(not(feature = "auto_register"))]
pub(crate) fn impl_generated_entry(_: &GraphDerive, _: &syn::Path) -> TokenStream {
    crate::utils::empty()
}
