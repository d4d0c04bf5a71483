// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod graph_clone;
mod trait_declare;
mod trait_object;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

use auto_register::{impl_auto_register, impl_generated_entry};
use graph_clone::impl_graph_clone;
use trait_declare::impl_trait_declare;
use trait_object::{impl_collection_object, impl_record_object};
use trait_typed::impl_trait_typed;

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{GraphDerive, GraphKind};

/// Every impl `#[derive(Graph)]` emits for `derive`.
pub(crate) fn impl_graph(derive: &GraphDerive, vc_graph: &syn::Path) -> TokenStream {
    let info_ = crate::path::info_(vc_graph);

    match derive.kind {
        GraphKind::Scalar => {
            let ident = derive.ident;
            quote! { #vc_graph::impl_scalar!(#ident); }
        }
        GraphKind::Record => {
            let typed = impl_trait_typed(
                derive,
                vc_graph,
                quote! { #info_::TypeInfo::Record(#info_::RecordInfo::new::<Self>()) },
            );
            let object = impl_record_object(derive, vc_graph);
            let declare = impl_trait_declare(derive, vc_graph);
            let graph_clone = impl_graph_clone(derive, vc_graph);
            let auto_register = impl_auto_register(derive, vc_graph);
            quote! {
                #typed
                #object
                #declare
                #graph_clone
                #auto_register
            }
        }
        GraphKind::Collection => {
            let Some(inner) = derive.fields.first() else {
                return crate::utils::empty();
            };
            let inner_ty = inner.ty;
            let typed = impl_trait_typed(
                derive,
                vc_graph,
                quote! {
                    #info_::TypeInfo::Collection(#info_::CollectionInfo::wrapping::<Self, #inner_ty>())
                },
            );
            let object = impl_collection_object(derive, vc_graph);
            let declare = impl_trait_declare(derive, vc_graph);
            let graph_clone = impl_graph_clone(derive, vc_graph);
            let auto_register = impl_auto_register(derive, vc_graph);
            quote! {
                #typed
                #object
                #declare
                #graph_clone
                #auto_register
            }
        }
    }
}
