//! Procedural macros for navflow.
//!
//! This crate provides the `#[navigation_intent]` attribute, which turns a
//! fieldless enum into a closed set of navigation intents.

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Fields, ItemEnum};

/// Declare a closed set of navigation intents.
///
/// # Usage
///
/// ```ignore
/// #[navigation_intent]
/// pub enum RootIntent {
///     StationList,
///     Chromecast,
///     Settings,
/// }
///
/// /// A screen with nowhere further to go.
/// #[navigation_intent]
/// pub enum DetailIntent {}
/// ```
///
/// The macro generates:
/// - `#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]` on the enum
///   (do not derive these yourself).
/// - `impl navflow::NavigationIntent` with `ALL` listing every case in
///   declaration order and `name` returning the variant name.
/// - `impl Display` printing the variant name.
///
/// Variants carrying data and generic enums are rejected at compile time.
#[proc_macro_attribute]
pub fn navigation_intent(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "#[navigation_intent] takes no arguments",
        )
        .to_compile_error()
        .into();
    }

    let input = parse_macro_input!(item as ItemEnum);
    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: ItemEnum) -> syn::Result<proc_macro2::TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "navigation intents cannot be generic",
        ));
    }

    for variant in &input.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "navigation intents must be fieldless variants",
            ));
        }
    }

    let enum_name = &input.ident;
    let variants: Vec<_> = input.variants.iter().map(|v| &v.ident).collect();
    let labels: Vec<String> = variants.iter().map(|v| v.to_string()).collect();

    Ok(quote! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #input

        impl ::navflow::NavigationIntent for #enum_name {
            const ALL: &'static [Self] = &[#(#enum_name::#variants),*];

            fn name(&self) -> &'static str {
                match *self {
                    #(#enum_name::#variants => #labels,)*
                }
            }
        }

        impl ::std::fmt::Display for #enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(::navflow::NavigationIntent::name(self))
            }
        }
    })
}
