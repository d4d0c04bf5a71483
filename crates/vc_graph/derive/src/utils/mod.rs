use proc_macro2::TokenStream;
use syn::{LitStr, Path};

#[inline(always)]
pub(crate) fn empty() -> TokenStream {
    TokenStream::new()
}

/// `a::b::c` as a string literal, the name under which a method is declared.
pub(crate) fn path_name(path: &Path) -> LitStr {
    let name = path
        .segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect::<Vec<_>>()
        .join("::");
    LitStr::new(&name, path.segments.first().map_or_else(proc_macro2::Span::call_site, |s| s.ident.span()))
}

#[cfg(test)]
mod tests {
    use super::path_name;

    #[test]
    fn joins_segments() {
        let path: syn::Path = syn::parse_quote!(Self::to_raw);
        assert_eq!(path_name(&path).value(), "Self::to_raw");

        let path: syn::Path = syn::parse_quote!(::hooks::count);
        assert_eq!(path_name(&path).value(), "hooks::count");
    }
}
