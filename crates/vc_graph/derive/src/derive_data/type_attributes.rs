use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, Expr, ExprArray, Lit, LitStr, Path, Token, Type};

use crate::GRAPH_ATTRIBUTE_NAME;

/// `required`, `optional` or `member`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Marker {
    Required,
    Optional,
    Member,
}

impl Marker {
    pub(crate) fn from_ident(meta: &ParseNestedMeta) -> Option<Self> {
        if meta.path.is_ident("required") {
            Some(Self::Required)
        } else if meta.path.is_ident("optional") {
            Some(Self::Optional)
        } else if meta.path.is_ident("member") {
            Some(Self::Member)
        } else {
            None
        }
    }

    pub(crate) fn variant(self) -> &'static str {
        match self {
            Self::Required => "Required",
            Self::Optional => "Optional",
            Self::Member => "Member",
        }
    }
}

/// `fields`, `properties` or `both`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kinds {
    Fields,
    Properties,
    Both,
}

impl Kinds {
    fn parse(meta: &ParseNestedMeta) -> syn::Result<Self> {
        if meta.path.is_ident("fields") {
            Ok(Self::Fields)
        } else if meta.path.is_ident("properties") {
            Ok(Self::Properties)
        } else if meta.path.is_ident("both") {
            Ok(Self::Both)
        } else {
            Err(meta.error("expected `fields`, `properties` or `both`"))
        }
    }
}

/// Everything `#[graph(...)]` says about the type itself.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    pub value: bool,
    pub scalar: Option<Span>,
    pub collection: Option<Span>,
    pub compact: bool,
    pub copyable: bool,
    pub generate: Option<Span>,
    pub auto_register: Option<Span>,
    pub all: Option<(Marker, Kinds)>,
    pub must: Option<Kinds>,
    pub read_aliases: Vec<LitStr>,
    pub write_alias: Option<LitStr>,
    pub ancestor: Option<Type>,
    pub factory: Option<Path>,
    pub before_serialization: Vec<Path>,
    pub after_serialization: Vec<Path>,
    pub before_deserialization: Vec<Path>,
    pub after_deserialization: Vec<Path>,
    pub to_surrogate: Option<Path>,
    pub from_surrogate: Option<Path>,
    pub surrogate_if: Option<Path>,
    pub surrogate: Option<Type>,
    pub item_if: Option<Path>,
    pub interfaces: Vec<Expr>,
}

impl TypeAttributes {
    pub(crate) fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident(GRAPH_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| this.parse_meta(meta))?;
            }
        }
        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        let path = &meta.path;
        let span = path.span();

        if path.is_ident("value") {
            self.value = true;
        } else if path.is_ident("scalar") {
            self.scalar = Some(span);
        } else if path.is_ident("collection") {
            self.collection = Some(span);
        } else if path.is_ident("compact") {
            self.compact = true;
        } else if path.is_ident("copyable") {
            self.copyable = true;
        } else if path.is_ident("generate") {
            self.generate = Some(span);
        } else if path.is_ident("auto_register") {
            self.auto_register = Some(span);
        } else if path.is_ident("all") {
            self.all = Some(parse_all(&meta)?);
        } else if path.is_ident("must") {
            let mut kinds = None;
            meta.parse_nested_meta(|inner| {
                kinds = Some(Kinds::parse(&inner)?);
                Ok(())
            })?;
            self.must = Some(kinds.ok_or_else(|| meta.error("`must` needs a member kind"))?);
        } else if path.is_ident("alias") {
            meta.parse_nested_meta(|inner| {
                if inner.path.is_ident("read") {
                    self.read_aliases.extend(parse_str_list(&inner)?);
                } else if inner.path.is_ident("write") {
                    self.write_alias = Some(inner.value()?.parse()?);
                } else {
                    return Err(inner.error("expected `read` or `write`"));
                }
                Ok(())
            })?;
        } else if path.is_ident("ancestor") {
            self.ancestor = Some(meta.value()?.parse()?);
        } else if path.is_ident("factory") {
            set_once(&meta, &mut self.factory)?;
        } else if path.is_ident("before_serialization") {
            self.before_serialization.push(meta.value()?.parse()?);
        } else if path.is_ident("after_serialization") {
            self.after_serialization.push(meta.value()?.parse()?);
        } else if path.is_ident("before_deserialization") {
            self.before_deserialization.push(meta.value()?.parse()?);
        } else if path.is_ident("after_deserialization") {
            self.after_deserialization.push(meta.value()?.parse()?);
        } else if path.is_ident("to_surrogate") {
            set_once(&meta, &mut self.to_surrogate)?;
        } else if path.is_ident("from_surrogate") {
            set_once(&meta, &mut self.from_surrogate)?;
        } else if path.is_ident("surrogate_if") {
            set_once(&meta, &mut self.surrogate_if)?;
        } else if path.is_ident("surrogate") {
            self.surrogate = Some(meta.value()?.parse()?);
        } else if path.is_ident("item_if") {
            set_once(&meta, &mut self.item_if)?;
        } else if path.is_ident("interface") {
            self.interfaces.push(meta.value()?.parse()?);
        } else {
            return Err(meta.error("unknown `graph` attribute"));
        }
        Ok(())
    }

    /// Whether any construction strategy besides `Default` is declared.
    #[inline]
    pub(crate) fn has_factory(&self) -> bool {
        self.factory.is_some()
    }
}

/// `all(optional)`, `all(member, both)`.
fn parse_all(meta: &ParseNestedMeta) -> syn::Result<(Marker, Kinds)> {
    let mut marker = None;
    let mut kinds = None;
    meta.parse_nested_meta(|inner| {
        if let Some(found) = Marker::from_ident(&inner) {
            marker = Some(found);
            Ok(())
        } else {
            kinds = Some(Kinds::parse(&inner)?);
            Ok(())
        }
    })?;
    let marker = marker.ok_or_else(|| meta.error("`all` needs `required`, `optional` or `member`"))?;
    Ok((marker, kinds.unwrap_or(Kinds::Fields)))
}

/// `read = "a"` or `read = ["a", "b"]`.
fn parse_str_list(meta: &ParseNestedMeta) -> syn::Result<Vec<LitStr>> {
    let value = meta.value()?;
    if value.peek(LitStr) {
        return Ok(vec![value.parse()?]);
    }
    let array: ExprArray = value.parse()?;
    array
        .elems
        .iter()
        .map(|elem| match elem {
            Expr::Lit(lit) => match &lit.lit {
                Lit::Str(text) => Ok(text.clone()),
                other => Err(syn::Error::new(other.span(), "expected a string literal")),
            },
            other => Err(syn::Error::new(other.span(), "expected a string literal")),
        })
        .collect()
}

fn set_once(meta: &ParseNestedMeta, slot: &mut Option<Path>) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("declared more than once"));
    }
    meta.input.parse::<Token![=]>()?;
    *slot = Some(meta.input.parse()?);
    Ok(())
}
