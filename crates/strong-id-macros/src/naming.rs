//! Naming conventions for generated members.

use heck::ToSnakeCase;
use proc_macro2::Span;

/// Members the generator emits on every identifier. Components and value
/// properties must not reuse these names.
pub const RESERVED_MEMBERS: &[&str] =
    &["new", "unspecified", "is_unspecified", "into_parts", "check_value"];

/// Turn a property name such as `"Text"` or `"TenantId"` into a snake_case
/// identifier (`text`, `tenant_id`).
pub fn property_ident(name: &str, span: Span) -> syn::Result<syn::Ident> {
    let snake = name.to_snake_case();
    if snake.is_empty() {
        return Err(syn::Error::new(span, "property name cannot be empty"));
    }
    syn::parse_str::<syn::Ident>(&snake)
        .map(|ident| syn::Ident::new(&ident.to_string(), span))
        .map_err(|_| {
            syn::Error::new(
                span,
                format!("`{}` is not a valid Rust identifier for a property name", snake),
            )
        })
}

/// Name of the generated string adapter, e.g. `OrderIdConverter`.
pub fn converter_ident(name: &syn::Ident) -> syn::Ident {
    syn::Ident::new(&format!("{}Converter", name), name.span())
}

pub fn is_reserved(name: &str) -> bool {
    RESERVED_MEMBERS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_ident_snake_cases() {
        let span = Span::call_site();
        assert_eq!(property_ident("Text", span).unwrap(), "text");
        assert_eq!(property_ident("TenantId", span).unwrap(), "tenant_id");
        assert_eq!(property_ident("uuid", span).unwrap(), "uuid");
    }

    #[test]
    fn test_property_ident_rejects_keywords_and_empty() {
        let span = Span::call_site();
        assert!(property_ident("", span).is_err());
        assert!(property_ident("Type", span).is_err());
        assert!(property_ident("1st", span).is_err());
    }

    #[test]
    fn test_converter_ident() {
        let name = syn::Ident::new("Code", Span::call_site());
        assert_eq!(converter_ident(&name), "CodeConverter");
    }
}
