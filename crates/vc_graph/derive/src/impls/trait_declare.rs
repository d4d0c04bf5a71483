use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{GraphDerive, GraphField, GraphKind, Kinds, Marker};
use crate::utils::path_name;

/// Generate `Declare`, the builder chain the schema reads.
pub(crate) fn impl_trait_declare(derive: &GraphDerive, vc_graph: &syn::Path) -> TokenStream {
    let object_ = crate::path::object_(vc_graph);
    let typed_ = crate::path::typed_(vc_graph);
    let decl_ = crate::path::decl_(vc_graph);

    let ident = derive.ident;
    let (impl_generics, ty_generics, _) = derive.generics.split_for_impl();

    let mut chain = Vec::new();
    chain.push(type_flags(derive, vc_graph));
    match derive.kind {
        GraphKind::Record => {
            chain.extend(derive.fields.iter().map(|field| member(field, vc_graph)));
            chain.push(unknown(derive, vc_graph));
            chain.push(hooks(derive));
            chain.push(construct(derive, vc_graph));
            chain.push(surrogate(derive, vc_graph));
        }
        GraphKind::Collection => chain.push(item_if(derive)),
        GraphKind::Scalar => return crate::utils::empty(),
    }

    let where_clause = derive.where_clause(&quote! { #object_ + #typed_ }, derive.construct_bound());

    quote! {
        impl #impl_generics #decl_::Declare for #ident #ty_generics #where_clause {
            fn declare() -> #decl_::TypeDecl {
                #decl_::TypeDecl::new::<Self>()
                    #(#chain)*
            }
        }
    }
}

fn kinds_tokens(kinds: Kinds, vc_graph: &syn::Path) -> TokenStream {
    let options_ = crate::path::options_(vc_graph);
    match kinds {
        Kinds::Fields => quote! { #options_::MemberKind::FIELD },
        Kinds::Properties => quote! { #options_::MemberKind::PROPERTY },
        Kinds::Both => quote! { #options_::MemberKind::all() },
    }
}

fn marker_tokens(marker: Marker, vc_graph: &syn::Path) -> TokenStream {
    let options_ = crate::path::options_(vc_graph);
    let variant = syn::Ident::new(marker.variant(), proc_macro2::Span::call_site());
    quote! { #options_::Optionality::#variant }
}

fn type_flags(derive: &GraphDerive, vc_graph: &syn::Path) -> TokenStream {
    let attrs = &derive.attrs;
    let mut tokens = TokenStream::new();

    if attrs.value {
        tokens.extend(quote! { .value() });
    }
    if attrs.compact {
        tokens.extend(quote! { .compact() });
    }
    if attrs.copyable {
        tokens.extend(quote! { .copyable() });
    }
    if let Some((marker, kinds)) = attrs.all {
        let marker = marker_tokens(marker, vc_graph);
        let kinds = kinds_tokens(kinds, vc_graph);
        tokens.extend(quote! { .all(#marker, #kinds) });
    }
    if let Some(kinds) = attrs.must {
        let kinds = kinds_tokens(kinds, vc_graph);
        tokens.extend(quote! { .must(#kinds) });
    }
    for alias in &attrs.read_aliases {
        tokens.extend(quote! { .read_alias(#alias) });
    }
    if let Some(alias) = &attrs.write_alias {
        tokens.extend(quote! { .write_alias(#alias) });
    }
    if let Some(ancestor) = &attrs.ancestor {
        tokens.extend(quote! { .allow_reading_from_ancestor::<#ancestor>() });
    }
    for interface in &attrs.interfaces {
        tokens.extend(quote! { .with_interface(#interface) });
    }
    tokens
}

fn member(field: &GraphField, vc_graph: &syn::Path) -> TokenStream {
    let object_ = crate::path::object_(vc_graph);
    let decl_ = crate::path::decl_(vc_graph);
    let option_ = crate::path::fp::option_();
    let result_ = crate::path::fp::result_();

    let name = field.name();
    let member = &field.member;
    let ty = field.ty;
    let attrs = &field.attrs;

    let mut modifiers = TokenStream::new();
    if !field.public {
        modifiers.extend(quote! { .private() });
    }
    for marker in &attrs.markers {
        let marker = marker_tokens(*marker, vc_graph);
        modifiers.extend(quote! { .with_marker(#marker) });
    }
    if let Some(alias) = &attrs.alias {
        modifiers.extend(quote! { .alias(#alias) });
    }
    if attrs.compact {
        modifiers.extend(quote! { .compact() });
    }
    if attrs.merge {
        modifiers.extend(quote! { .merge() });
    }
    if let Some(predicate) = &attrs.serialize_if {
        modifiers.extend(quote! {
            .serialize_if(|owner, value| {
                match (owner.downcast_ref::<Self>(), value.downcast_ref::<#ty>()) {
                    (#option_::Some(owner), #option_::Some(value)) => #predicate(owner, value),
                    _ => true,
                }
            })
        });
    }

    quote! {
        .with_member(
            #decl_::MemberDecl::field::<#ty>(#name, |o| {
                #option_::Some(&o.downcast_ref::<Self>()?.#member as &dyn #object_)
            })
            .with_get_mut(|o| {
                #option_::Some(&mut o.downcast_mut::<Self>()?.#member as &mut dyn #object_)
            })
            .with_setter(|o, value| {
                let #option_::Some(o) = o.downcast_mut::<Self>() else {
                    return #result_::Err(value);
                };
                o.#member = value.take::<#ty>()?;
                #result_::Ok(())
            })
            #modifiers
        )
    }
}

fn unknown(derive: &GraphDerive, vc_graph: &syn::Path) -> TokenStream {
    let Some(member) = &derive.unknown else {
        return crate::utils::empty();
    };
    let decl_ = crate::path::decl_(vc_graph);
    let option_ = crate::path::fp::option_();
    let name = match member {
        syn::Member::Named(ident) => ident.to_string(),
        syn::Member::Unnamed(index) => index.index.to_string(),
    };

    quote! {
        .with_unknown(#decl_::UnknownDecl {
            name: #name,
            get: |o| #option_::Some(&o.downcast_ref::<Self>()?.#member),
            get_mut: |o| #option_::Some(&mut o.downcast_mut::<Self>()?.#member),
        })
    }
}

fn hooks(derive: &GraphDerive) -> TokenStream {
    let attrs = &derive.attrs;
    let option_ = crate::path::fp::option_();
    let mut tokens = TokenStream::new();

    for path in &attrs.before_serialization {
        let name = path_name(path);
        tokens.extend(quote! {
            .before_serialization(#name, |o| {
                if let #option_::Some(o) = o.downcast_ref::<Self>() {
                    #path(o);
                }
            })
        });
    }
    for path in &attrs.after_serialization {
        let name = path_name(path);
        tokens.extend(quote! {
            .after_serialization(#name, |o| {
                if let #option_::Some(o) = o.downcast_ref::<Self>() {
                    #path(o);
                }
            })
        });
    }
    for path in &attrs.before_deserialization {
        let name = path_name(path);
        tokens.extend(quote! {
            .before_deserialization(#name, |o| {
                if let #option_::Some(o) = o.downcast_mut::<Self>() {
                    #path(o);
                }
            })
        });
    }
    for path in &attrs.after_deserialization {
        let name = path_name(path);
        tokens.extend(quote! {
            .after_deserialization(#name, |o| {
                if let #option_::Some(o) = o.downcast_mut::<Self>() {
                    #path(o);
                }
            })
        });
    }
    tokens
}

fn construct(derive: &GraphDerive, vc_graph: &syn::Path) -> TokenStream {
    let decl_ = crate::path::decl_(vc_graph);
    match &derive.attrs.factory {
        Some(path) => {
            let name = path_name(path);
            quote! { .with_factory(#decl_::FactoryDecl::new::<Self>(#name, #path)) }
        }
        None => quote! { .with_default::<Self>() },
    }
}

fn surrogate(derive: &GraphDerive, vc_graph: &syn::Path) -> TokenStream {
    let attrs = &derive.attrs;
    let decl_ = crate::path::decl_(vc_graph);
    let stand_in = match &attrs.surrogate {
        Some(ty) => quote! { #ty },
        None => quote! { _ },
    };
    let mut tokens = TokenStream::new();

    if let Some(path) = &attrs.to_surrogate {
        let name = path_name(path);
        tokens.extend(quote! {
            .with_to_surrogate(#decl_::SurrogateTo::new::<Self, #stand_in>(#name, #path))
        });
    }
    if let Some(path) = &attrs.from_surrogate {
        let name = path_name(path);
        tokens.extend(quote! {
            .with_from_surrogate(#decl_::SurrogateFrom::new::<#stand_in, Self>(#name, #path))
        });
    }
    if let Some(path) = &attrs.surrogate_if {
        let name = path_name(path);
        tokens.extend(quote! {
            .with_surrogate_if(#decl_::SurrogateIf::new::<Self>(#name, #path))
        });
    }
    tokens
}

fn item_if(derive: &GraphDerive) -> TokenStream {
    let Some(path) = &derive.attrs.item_if else {
        return crate::utils::empty();
    };
    let option_ = crate::path::fp::option_();
    let name = path_name(path);

    quote! {
        .with_item_if(#name, |owner, index, element| {
            match owner.downcast_ref::<Self>() {
                #option_::Some(owner) => #path(owner, index, element),
                #option_::None => true,
            }
        })
    }
}
