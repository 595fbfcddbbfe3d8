use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectStruct;

/// `Reflect` and `From<Self> for Value`.
pub(crate) fn impl_trait_reflect(info: &ReflectStruct) -> TokenStream {
    let path = info.prop_reflect_path();
    let reflect_ = crate::path::reflect_(path);
    let from_value_ = crate::path::from_value_(path);
    let value_ = crate::path::value_(path);
    let ops_ = crate::path::ops_(path);
    let macro_utils_ = crate::path::macro_utils_(path);
    let box_ = crate::path::box_();
    let result_ = crate::path::result_();

    // Ignored fields keep their current value on `assign`.
    let assignments = info.active_fields().map(|field| {
        let ident = field.ident;
        let ty = field.ty;
        let name = &field.name;
        quote! {
            self.#ident = <#ty as #from_value_>::from_value(
                #macro_utils_::take_field(&mut fields, #name)
            );
        }
    });
    let assign_body = if info.active_fields().next().is_some() {
        quote! {
            let mut fields = #macro_utils_::into_fields(value);
            #(#assignments)*
        }
    } else {
        quote! { let _ = value; }
    };

    let ident = info.ident;
    let (impl_generics, ty_generics, where_clause) = info.split_generics();

    quote! {
        impl #impl_generics #reflect_ for #ident #ty_generics #where_clause {
            #[inline]
            fn reflect_ref(&self) -> #ops_::ReflectRef<'_> {
                #ops_::ReflectRef::Struct(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #ops_::ReflectMut<'_> {
                #ops_::ReflectMut::Struct(self)
            }

            #[inline]
            fn reflect_value(&self) -> #value_ {
                #macro_utils_::struct_value(self)
            }

            fn assign(&mut self, value: #value_) {
                #assign_body
            }

            fn set(&mut self, value: #box_<dyn #reflect_>) -> #result_<(), #box_<dyn #reflect_>> {
                *self = value.take::<Self>()?;
                #result_::Ok(())
            }
        }

        impl #impl_generics ::core::convert::From<#ident #ty_generics> for #value_ #where_clause {
            #[inline]
            fn from(value: #ident #ty_generics) -> Self {
                #reflect_::reflect_value(&value)
            }
        }
    }
}
