use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{GraphDerive, GraphKind};

/// Generate `GraphClone`.
///
/// Without `generate` the provided methods are kept and go through the
/// cloner. With it, the bodies move each field directly, asking the
/// [`GeneratedPlan`] which fields are transferred and whether they are
/// assigned or merged into.
///
/// [`GeneratedPlan`]: https://docs.rs/vc_graph/latest/vc_graph/generated/struct.GeneratedPlan.html
pub(crate) fn impl_graph_clone(derive: &GraphDerive, vc_graph: &syn::Path) -> TokenStream {
    let ident = derive.ident;
    let (impl_generics, ty_generics, _) = derive.generics.split_for_impl();
    let graph_clone_ = crate::path::graph_clone_(vc_graph);

    if derive.attrs.generate.is_none() {
        let object_ = crate::path::object_(vc_graph);
        let typed_ = crate::path::typed_(vc_graph);
        // Collection newtypes are only `Object` when they are `Default`.
        let extra = match derive.kind {
            GraphKind::Collection => {
                let default_ = crate::path::fp::default_();
                quote! { Self: #default_, }
            }
            _ => derive.construct_bound(),
        };
        let where_clause = derive.where_clause(&quote! { #object_ + #typed_ }, extra);
        return quote! {
            impl #impl_generics #graph_clone_ for #ident #ty_generics #where_clause {}
        };
    }

    let cloner_ = crate::path::cloner_(vc_graph);
    let error_ = crate::path::clone_error_(vc_graph);
    let specialized_ = crate::path::specialized_(vc_graph);
    let option_ = crate::path::fp::option_();
    let result_ = crate::path::fp::result_();
    let where_clause = derive.where_clause(&graph_clone_, derive.construct_bound());

    let names: Vec<_> = derive.fields.iter().map(|field| field.name()).collect();

    let clone_fields = derive.fields.iter().map(|field| {
        let ordinal = field.ordinal;
        let member = &field.member;
        quote! {
            if plan.transfers(#ordinal, self, &self.#member) {
                if plan.has_setter(#ordinal) {
                    out.#member = #graph_clone_::graph_clone(&self.#member, cloner)?;
                } else {
                    #graph_clone_::graph_merge(&mut out.#member, &self.#member, cloner)?;
                }
            }
        }
    });

    let merge_fields = derive.fields.iter().map(|field| {
        let ordinal = field.ordinal;
        let member = &field.member;
        quote! {
            if plan.transfers(#ordinal, src, &src.#member) {
                if plan.has_setter(#ordinal) {
                    self.#member = #graph_clone_::graph_clone(&src.#member, cloner)?;
                } else {
                    #graph_clone_::graph_merge(&mut self.#member, &src.#member, cloner)?;
                }
            }
        }
    });

    let entry = super::impl_generated_entry(derive, vc_graph);

    quote! {
        impl #impl_generics #graph_clone_ for #ident #ty_generics #where_clause {
            fn graph_clone(&self, cloner: &#cloner_) -> #result_<Self, #error_> {
                const FIELDS: &[&str] = &[#(#names),*];
                let plan = cloner.generated_plan::<Self>(FIELDS)?;
                if let #option_::Some(out) = plan.surrogate_clone(cloner, self)? {
                    return #result_::Ok(out);
                }

                plan.before_serialization(self);
                let mut out: Self = plan.construct()?;
                plan.before_deserialization(&mut out);
                #(#clone_fields)*
                plan.transfer_rest(cloner, &mut out, self)?;
                plan.after_serialization(self);
                plan.after_deserialization(&mut out);
                #result_::Ok(out)
            }

            fn graph_merge(&mut self, src: &Self, cloner: &#cloner_) -> #result_<(), #error_> {
                const FIELDS: &[&str] = &[#(#names),*];
                let plan = cloner.generated_plan::<Self>(FIELDS)?;
                if plan.is_empty() {
                    return #result_::Ok(());
                }

                plan.before_serialization(src);
                plan.before_deserialization(self);
                #(#merge_fields)*
                plan.transfer_rest(cloner, self, src)?;
                plan.after_serialization(src);
                plan.after_deserialization(self);
                #result_::Ok(())
            }
        }

        impl #impl_generics #specialized_ for #ident #ty_generics #where_clause {}

        #entry
    }
}
