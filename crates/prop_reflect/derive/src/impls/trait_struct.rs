use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectStruct;

/// `Struct`, dispatching by field name and declaration index.
pub(crate) fn impl_trait_struct(info: &ReflectStruct) -> TokenStream {
    let path = info.prop_reflect_path();
    let reflect_ = crate::path::reflect_(path);
    let ops_ = crate::path::ops_(path);
    let option_ = crate::path::option_();

    let idents: Vec<_> = info.active_fields().map(|field| field.ident).collect();
    let names: Vec<_> = info.active_fields().map(|field| field.name.as_str()).collect();
    let indices: Vec<usize> = (0..idents.len()).collect();
    let field_len = idents.len();

    let ident = info.ident;
    let (impl_generics, ty_generics, where_clause) = info.split_generics();

    quote! {
        impl #impl_generics #ops_::Struct for #ident #ty_generics #where_clause {
            fn field(&self, name: &str) -> #option_<&dyn #reflect_> {
                match name {
                    #(#names => #option_::Some(&self.#idents),)*
                    _ => #option_::None,
                }
            }

            fn field_mut(&mut self, name: &str) -> #option_<&mut dyn #reflect_> {
                match name {
                    #(#names => #option_::Some(&mut self.#idents),)*
                    _ => #option_::None,
                }
            }

            fn field_at(&self, index: usize) -> #option_<&dyn #reflect_> {
                match index {
                    #(#indices => #option_::Some(&self.#idents),)*
                    _ => #option_::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> #option_<&mut dyn #reflect_> {
                match index {
                    #(#indices => #option_::Some(&mut self.#idents),)*
                    _ => #option_::None,
                }
            }

            fn name_at(&self, index: usize) -> #option_<&str> {
                match index {
                    #(#indices => #option_::Some(#names),)*
                    _ => #option_::None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #field_len
            }
        }
    }
}
