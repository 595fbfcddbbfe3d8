use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectStruct;

/// `FromValue`: reflected fields from the map entries of the same name,
/// ignored fields from `Default`.
pub(crate) fn impl_trait_from_value(info: &ReflectStruct) -> TokenStream {
    let path = info.prop_reflect_path();
    let from_value_ = crate::path::from_value_(path);
    let value_ = crate::path::value_(path);
    let macro_utils_ = crate::path::macro_utils_(path);
    let default_ = crate::path::default_();

    let active = info.active_fields().map(|field| {
        let ident = field.ident;
        let ty = field.ty;
        let name = &field.name;
        quote! {
            #ident: <#ty as #from_value_>::from_value(#macro_utils_::take_field(&mut fields, #name)),
        }
    });
    let ignored = info.ignored_fields().map(|field| {
        let ident = field.ident;
        quote! { #ident: #default_::default(), }
    });

    let fields_binding = if info.active_fields().next().is_some() {
        quote! { let mut fields = #macro_utils_::into_fields(value); }
    } else {
        quote! { let _ = value; }
    };

    let ident = info.ident;
    let (impl_generics, ty_generics, where_clause) = info.split_generics();

    quote! {
        impl #impl_generics #from_value_ for #ident #ty_generics #where_clause {
            fn from_value(value: #value_) -> Self {
                #fields_binding
                Self {
                    #(#active)*
                    #(#ignored)*
                }
            }
        }
    }
}
