use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::GraphDerive;

/// Generate `Object` for records.
///
/// Equality and debug output only look at the declared fields, excluded
/// fields and unknown storage need not implement `Object`.
pub(crate) fn impl_record_object(derive: &GraphDerive, vc_graph: &syn::Path) -> TokenStream {
    let object_ = crate::path::object_(vc_graph);
    let typed_ = crate::path::typed_(vc_graph);
    let object_mod_ = crate::path::object_mod_(vc_graph);
    let option_ = crate::path::fp::option_();
    let fmt_ = crate::path::fp::fmt_();

    let ident = derive.ident;
    let type_name = ident.to_string();
    let (impl_generics, ty_generics, _) = derive.generics.split_for_impl();
    let where_clause = derive.where_clause(&quote! { #object_ + #typed_ }, derive.construct_bound());

    let eq_terms = derive.fields.iter().map(|field| {
        let member = &field.member;
        quote! { && #object_::object_eq(&self.#member, &other.#member)? }
    });
    let debug_fields = derive.fields.iter().map(|field| {
        let member = &field.member;
        let name = field.name();
        quote! { .field(#name, &(&self.#member as &dyn #object_)) }
    });

    quote! {
        impl #impl_generics #object_ for #ident #ty_generics #where_clause {
            #[inline]
            fn object_ref(&self) -> #object_mod_::ObjectRef<'_> {
                #object_mod_::ObjectRef::Record(self)
            }

            #[inline]
            fn object_mut(&mut self) -> #object_mod_::ObjectMut<'_> {
                #object_mod_::ObjectMut::Record(self)
            }

            fn object_eq(&self, other: &dyn #object_) -> #option_<bool> {
                let other = other.downcast_ref::<Self>()?;
                #option_::Some(true #(#eq_terms)*)
            }

            fn object_debug(&self, f: &mut #fmt_::Formatter<'_>) -> #fmt_::Result {
                f.debug_struct(#type_name)
                    #(#debug_fields)*
                    .finish()
            }
        }
    }
}

/// Generate `Object` and `Collection` for newtypes over a collection.
pub(crate) fn impl_collection_object(derive: &GraphDerive, vc_graph: &syn::Path) -> TokenStream {
    let object_ = crate::path::object_(vc_graph);
    let typed_ = crate::path::typed_(vc_graph);
    let object_mod_ = crate::path::object_mod_(vc_graph);
    let exports_ = crate::path::macro_exports_(vc_graph);
    let option_ = crate::path::fp::option_();
    let result_ = crate::path::fp::result_();
    let default_ = crate::path::fp::default_();
    let fmt_ = crate::path::fp::fmt_();

    let ident = derive.ident;
    let (impl_generics, ty_generics, _) = derive.generics.split_for_impl();
    let where_clause =
        derive.where_clause(&quote! { #object_ + #typed_ }, quote! { Self: #default_, });

    let Some(inner) = derive.fields.first() else {
        return crate::utils::empty();
    };
    let member = &inner.member;

    quote! {
        impl #impl_generics #object_ for #ident #ty_generics #where_clause {
            #[inline]
            fn object_ref(&self) -> #object_mod_::ObjectRef<'_> {
                #object_mod_::ObjectRef::Collection(self)
            }

            #[inline]
            fn object_mut(&mut self) -> #object_mod_::ObjectMut<'_> {
                #object_mod_::ObjectMut::Collection(self)
            }

            fn object_eq(&self, other: &dyn #object_) -> #option_<bool> {
                let other = other.downcast_ref::<Self>()?;
                #object_::object_eq(&self.#member, &other.#member)
            }

            fn object_debug(&self, f: &mut #fmt_::Formatter<'_>) -> #fmt_::Result {
                #object_::object_debug(&self.#member, f)
            }
        }

        impl #impl_generics #object_mod_::Collection for #ident #ty_generics #where_clause {
            #[inline]
            fn len(&self) -> usize {
                #object_mod_::Collection::len(&self.#member)
            }

            fn iter(&self) -> #exports_::Box<dyn ::core::iter::Iterator<Item = &dyn #object_> + '_> {
                #object_mod_::Collection::iter(&self.#member)
            }

            fn empty(&self) -> #exports_::Box<dyn #object_mod_::Collection> {
                let empty: Self = #default_::default();
                #exports_::Box::new(empty)
            }

            fn push_boxed(
                &mut self,
                element: #exports_::Box<dyn #object_>,
            ) -> #result_<(), #exports_::Box<dyn #object_>> {
                #object_mod_::Collection::push_boxed(&mut self.#member, element)
            }
        }
    }
}
