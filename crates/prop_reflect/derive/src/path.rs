//! Paths into `prop_reflect` used by generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// The path through which the invoking crate reaches `prop_reflect`.
///
/// 1. `::prop_reflect` for crates depending on it directly.
/// 2. `::prop_core::reflect` for crates depending on the facade.
/// 3. `::prop_reflect` otherwise, which may not resolve.
///
/// Reading the manifest is not cheap, so this is called once per derive.
pub(crate) fn prop_reflect() -> syn::Path {
    prop_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("prop_reflect"))
}

#[inline(always)]
pub(crate) fn macro_utils_(path: &syn::Path) -> TokenStream {
    quote! { #path::__macro_exports::macro_utils }
}

#[inline(always)]
pub(crate) fn reflect_(path: &syn::Path) -> TokenStream {
    quote! { #path::Reflect }
}

#[inline(always)]
pub(crate) fn from_value_(path: &syn::Path) -> TokenStream {
    quote! { #path::FromValue }
}

#[inline(always)]
pub(crate) fn value_(path: &syn::Path) -> TokenStream {
    quote! { #path::Value }
}

#[inline(always)]
pub(crate) fn typed_(path: &syn::Path) -> TokenStream {
    quote! { #path::info::Typed }
}

#[inline(always)]
pub(crate) fn info_(path: &syn::Path) -> TokenStream {
    quote! { #path::info }
}

#[inline(always)]
pub(crate) fn ops_(path: &syn::Path) -> TokenStream {
    quote! { #path::ops }
}

#[inline(always)]
pub(crate) fn option_() -> TokenStream {
    quote! { ::core::option::Option }
}

#[inline(always)]
pub(crate) fn box_() -> TokenStream {
    quote! { ::std::boxed::Box }
}

#[inline(always)]
pub(crate) fn result_() -> TokenStream {
    quote! { ::core::result::Result }
}

#[inline(always)]
pub(crate) fn default_() -> TokenStream {
    quote! { ::core::default::Default }
}
