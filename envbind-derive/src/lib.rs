//! Derive macro implementation for envbind

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

mod attrs;

use attrs::FieldAttrs;

/// `EnvBind` derive macro
///
/// Registers the fields of a struct so that `envbind::parse` can bind them.
/// Implements `envbind::EnvStruct` (field registration) and
/// `envbind::EnvField` (so the struct can be nested in another one).
///
/// # Supported Attributes
///
/// **Field-level**:
/// - `#[env = "NAME[,option...]"]`: raw tag; options are `omitempty` and `file`
/// - `#[env(flatten)]`: promote the nested struct's fields into this one
///
/// Untagged fields read the variable derived from their identifier.
///
/// Only structs with named fields can be derived:
///
/// ```compile_fail
/// use envbind::EnvBind;
///
/// #[derive(EnvBind)]
/// enum Mode {
///     Debug,
///     Release,
/// }
/// ```
///
/// ```compile_fail
/// use envbind::EnvBind;
///
/// #[derive(EnvBind)]
/// struct Port(u16);
/// ```
///
/// A flattened field is registered through the nested struct's own tags, so
/// it cannot carry one itself:
///
/// ```compile_fail
/// use envbind::EnvBind;
///
/// #[derive(Default, EnvBind)]
/// struct Database {
///     host: String,
/// }
///
/// #[derive(Default, EnvBind)]
/// struct Config {
///     #[env = "DB"]
///     #[env(flatten)]
///     database: Database,
/// }
/// ```
#[proc_macro_derive(EnvBind, attributes(env))]
pub fn derive_envbind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    // Struct name
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Extract fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(
                    &input,
                    "EnvBind only supports structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "EnvBind only supports structs")
                .to_compile_error()
                .into();
        }
    };

    // Generate one registration statement per field
    let registrations = fields.iter().map(|field| -> TokenStream2 {
        let Some(field_name) = field.ident.as_ref() else {
            return syn::Error::new_spanned(field, "EnvBind requires named fields")
                .to_compile_error();
        };

        let attrs = match FieldAttrs::from_field(field) {
            Ok(attrs) => attrs,
            Err(e) => return e.to_compile_error(),
        };

        if attrs.flatten {
            // Embedded struct: promote its fields to this level
            return quote! {
                __fields.extend(
                    ::envbind::EnvStruct::fields(&mut self.#field_name)
                        .into_iter()
                        .map(::envbind::Field::promoted),
                );
            };
        }

        let ident = field_name.unraw().to_string();
        let tag = match attrs.tag {
            Some(tag) => quote! { ::std::option::Option::Some(#tag) },
            None => quote! { ::std::option::Option::None },
        };

        quote! {
            __fields.push(::envbind::Field::new(#ident, #tag, &mut self.#field_name));
        }
    });

    let expanded = quote! {
        impl #impl_generics ::envbind::EnvStruct for #struct_name #ty_generics #where_clause {
            fn fields(&mut self) -> ::std::vec::Vec<::envbind::Field<'_>> {
                #[allow(unused_mut)]
                let mut __fields = ::std::vec::Vec::new();
                #(#registrations)*
                __fields
            }
        }

        impl #impl_generics ::envbind::EnvField for #struct_name #ty_generics #where_clause {
            fn field_ref(&mut self) -> ::envbind::FieldRef<'_> {
                ::envbind::FieldRef::Struct(self)
            }
        }
    };

    TokenStream::from(expanded)
}
