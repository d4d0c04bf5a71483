use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::GraphDerive;

/// Generate `Typed`, storing the info produced by `info_tokens`.
pub(crate) fn impl_trait_typed(
    derive: &GraphDerive,
    vc_graph: &syn::Path,
    info_tokens: TokenStream,
) -> TokenStream {
    let typed_ = crate::path::typed_(vc_graph);
    let info_ = crate::path::info_(vc_graph);
    let object_ = crate::path::object_(vc_graph);

    let inner_cell_tokens = if derive.is_generic() {
        quote! {
            static CELL: #info_::GenericTypeInfoCell = #info_::GenericTypeInfoCell::new();
            CELL.get_or_insert::<Self>(|| {
                #info_tokens
            })
        }
    } else {
        quote! {
            static CELL: #info_::NonGenericTypeInfoCell = #info_::NonGenericTypeInfoCell::new();
            CELL.get_or_init(|| {
                #info_tokens
            })
        }
    };

    let ident = derive.ident;
    let (impl_generics, ty_generics, _) = derive.generics.split_for_impl();
    let where_clause = derive.where_clause(&quote! { #object_ + #typed_ }, derive.construct_bound());

    quote! {
        impl #impl_generics #typed_ for #ident #ty_generics #where_clause {
            fn type_info() -> &'static #info_::TypeInfo {
                #inner_cell_tokens
            }
        }
    }
}
