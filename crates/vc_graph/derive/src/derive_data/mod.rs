mod field_attributes;
mod type_attributes;

pub(crate) use field_attributes::FieldAttributes;
pub(crate) use type_attributes::{Kinds, Marker, TypeAttributes};

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Generics, Ident, LitStr, Member, Type, Visibility};

// -----------------------------------------------------------------------------
// GraphField

pub(crate) struct GraphField<'a> {
    /// Position among the active fields, the ordinal generated code uses.
    pub ordinal: usize,
    pub member: Member,
    pub ty: &'a Type,
    pub public: bool,
    pub attrs: FieldAttributes,
}

impl GraphField<'_> {
    /// The declared member name: the field identifier, or its index.
    pub(crate) fn name(&self) -> LitStr {
        match &self.member {
            Member::Named(ident) => LitStr::new(&ident.to_string(), ident.span()),
            Member::Unnamed(index) => LitStr::new(&index.index.to_string(), index.span),
        }
    }
}

// -----------------------------------------------------------------------------
// GraphDerive

pub(crate) enum GraphKind {
    Record,
    Collection,
    Scalar,
}

pub(crate) struct GraphDerive<'a> {
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    pub attrs: TypeAttributes,
    pub kind: GraphKind,
    /// Active fields, in declaration order.
    pub fields: Vec<GraphField<'a>>,
    /// The field holding unknown data, if any.
    pub unknown: Option<Member>,
}

impl<'a> GraphDerive<'a> {
    pub(crate) fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;

        if let Some(span) = attrs.scalar {
            if !input.generics.params.is_empty() {
                return Err(syn::Error::new(span, "generic types cannot be scalars"));
            }
            if let Some(generate) = attrs.generate {
                return Err(syn::Error::new(generate, "`generate` is only supported on records"));
            }
            return Ok(Self {
                ident: &input.ident,
                generics: &input.generics,
                attrs,
                kind: GraphKind::Scalar,
                fields: Vec::new(),
                unknown: None,
            });
        }

        let data = match &input.data {
            Data::Struct(data) => data,
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span,
                    "enums are only supported as `#[graph(scalar)]`",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(data.union_token.span, "unions are not supported"));
            }
        };

        let mut fields = Vec::new();
        let mut unknown = None;
        for (index, field) in data.fields.iter().enumerate() {
            let field_attrs = FieldAttributes::parse_attrs(&field.attrs)?;
            let member = match &field.ident {
                Some(ident) => Member::Named(ident.clone()),
                None => Member::from(index),
            };
            if field_attrs.unknown {
                if unknown.is_some() {
                    return Err(syn::Error::new(field.span(), "only one field can hold unknown data"));
                }
                unknown = Some(member);
                continue;
            }
            if field_attrs.exclude {
                continue;
            }
            fields.push(GraphField {
                ordinal: fields.len(),
                member,
                ty: &field.ty,
                public: matches!(field.vis, Visibility::Public(_)),
                attrs: field_attrs,
            });
        }

        let kind = if let Some(span) = attrs.collection {
            if fields.len() != 1 || unknown.is_some() {
                return Err(syn::Error::new(
                    span,
                    "`#[graph(collection)]` needs exactly one wrapped collection field",
                ));
            }
            GraphKind::Collection
        } else {
            GraphKind::Record
        };

        if let (Some(span), GraphKind::Collection) = (attrs.generate, &kind) {
            return Err(syn::Error::new(span, "`generate` is only supported on records"));
        }

        Ok(Self {
            ident: &input.ident,
            generics: &input.generics,
            attrs,
            kind,
            fields,
            unknown,
        })
    }

    #[inline]
    pub(crate) fn is_generic(&self) -> bool {
        !self.generics.params.is_empty()
    }

    /// `Self: Default` for generic records built without a factory.
    ///
    /// `Declare` needs it, and every other impl reaches `Declare` through
    /// `Typed`, so all of them carry it.
    pub(crate) fn construct_bound(&self) -> TokenStream {
        if matches!(self.kind, GraphKind::Record) && self.is_generic() && !self.attrs.has_factory() {
            let default_ = crate::path::fp::default_();
            quote! { Self: #default_, }
        } else {
            TokenStream::new()
        }
    }

    /// The where clause of an impl: `bounds` on every type parameter, then
    /// `extra` predicates, then the declared ones.
    pub(crate) fn where_clause(&self, bounds: &TokenStream, extra: TokenStream) -> TokenStream {
        let existing = self
            .generics
            .where_clause
            .as_ref()
            .map(|clause| clause.predicates.to_token_stream());
        let params = self.generics.type_params().map(|param| {
            let ident = &param.ident;
            quote! { #ident: #bounds, }
        });
        quote! {
            where #(#params)* #extra #existing
        }
    }
}

