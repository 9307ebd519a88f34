//! Attribute parsing for `#[env ...]` annotations.
//!
//! This module extracts and validates binding attributes from struct fields
//! during macro expansion.

use syn::{Expr, ExprLit, Field, Lit, Meta};

/// Parsed `#[env ...]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Raw tag from `#[env = "NAME[,option...]"]`.
    ///
    /// Kept verbatim; the runtime splits it into name and options.
    pub tag: Option<String>,

    /// Promote the nested struct's fields into the parent (`#[env(flatten)]`).
    pub flatten: bool,
}

impl FieldAttrs {
    /// Extract and parse `#[env ...]` attributes from a struct field.
    ///
    /// Attributes with other paths are left alone for other macros.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            match &attr.meta {
                // #[env = "NAME,omitempty"]
                Meta::NameValue(nv) => {
                    let Expr::Lit(ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    else {
                        return Err(syn::Error::new_spanned(
                            &nv.value,
                            "env tag must be a string literal",
                        ));
                    };
                    if attrs.tag.is_some() {
                        return Err(syn::Error::new_spanned(attr, "duplicate env tag"));
                    }
                    attrs.tag = Some(s.value());
                }

                // #[env(flatten)]
                Meta::List(_) => {
                    attr.parse_nested_meta(|meta| {
                        if meta.path.is_ident("flatten") {
                            attrs.flatten = true;
                            return Ok(());
                        }

                        Err(meta.error("unsupported env attribute"))
                    })?;
                }

                Meta::Path(_) => {
                    return Err(syn::Error::new_spanned(
                        attr,
                        "expected `#[env = \"NAME\"]` or `#[env(flatten)]`",
                    ));
                }
            }
        }

        if attrs.flatten && attrs.tag.is_some() {
            return Err(syn::Error::new_spanned(
                field,
                "flattened fields cannot have an env tag; tag the nested struct's fields instead",
            ));
        }

        Ok(attrs)
    }
}
