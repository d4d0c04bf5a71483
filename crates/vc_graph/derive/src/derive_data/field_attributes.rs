use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr, Path};

use super::type_attributes::Marker;
use crate::GRAPH_ATTRIBUTE_NAME;

/// Everything `#[graph(...)]` says about one field.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    /// Kept in order so that repeated markers reach the schema builder,
    /// which reports them.
    pub markers: Vec<Marker>,
    pub alias: Option<LitStr>,
    pub compact: bool,
    pub merge: bool,
    pub exclude: bool,
    pub unknown: bool,
    pub serialize_if: Option<Path>,
}

impl FieldAttributes {
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
        if let Some(marker) = Marker::from_ident(&meta) {
            self.markers.push(marker);
        } else if meta.path.is_ident("alias") {
            self.alias = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("compact") {
            self.compact = true;
        } else if meta.path.is_ident("merge") {
            self.merge = true;
        } else if meta.path.is_ident("exclude") {
            self.exclude = true;
        } else if meta.path.is_ident("unknown") {
            self.unknown = true;
        } else if meta.path.is_ident("serialize_if") {
            self.serialize_if = Some(meta.value()?.parse()?);
        } else {
            return Err(meta.error("unknown `graph` field attribute"));
        }
        Ok(())
    }
}
