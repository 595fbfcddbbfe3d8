use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectStruct;

/// `Typed`, backed by a static type info cell.
pub(crate) fn impl_trait_typed(info: &ReflectStruct) -> TokenStream {
    let path = info.prop_reflect_path();
    let typed_ = crate::path::typed_(path);
    let info_ = crate::path::info_(path);
    let macro_utils_ = crate::path::macro_utils_(path);

    let fields = info.active_fields().map(|field| {
        let ty = field.ty;
        let name = &field.name;
        quote! { #info_::NamedField::new::<#ty>(#name) }
    });

    let methods = info.attrs.methods.iter().map(|method| {
        let ident = &method.ident;
        let name = ident.to_string();
        if method.is_setter {
            quote! {
                #info_::MethodInfo::new(
                    #name,
                    #info_::MethodKind::Setter(|this, value| {
                        #macro_utils_::call_setter(this, value, Self::#ident)
                    }),
                    #macro_utils_::accepts(Self::#ident),
                )
            }
        } else {
            quote! {
                #info_::MethodInfo::new(
                    #name,
                    #info_::MethodKind::Getter(|this| #macro_utils_::call_getter(this, Self::#ident)),
                    #macro_utils_::returns(Self::#ident),
                )
            }
        }
    });

    let constructor = info.attrs.default.map(|span| {
        quote::quote_spanned! { span=>
            .with_constructor(#macro_utils_::boxed_default::<Self>)
        }
    });

    let type_info_tokens = quote! {
        #info_::TypeInfo::Struct(
            #info_::StructInfo::new::<Self>(&[#(#fields),*])
                .with_methods(&[#(#methods),*])
                #constructor
        )
    };

    let cell_tokens = if info.is_generic() {
        quote! {
            static CELL: #info_::GenericTypeInfoCell = #info_::GenericTypeInfoCell::new();
            CELL.get_or_insert::<Self>(|| #type_info_tokens)
        }
    } else {
        quote! {
            static CELL: #info_::NonGenericTypeInfoCell = #info_::NonGenericTypeInfoCell::new();
            CELL.get_or_init(|| #type_info_tokens)
        }
    };

    let ident = info.ident;
    let (impl_generics, ty_generics, where_clause) = info.split_generics();

    quote! {
        impl #impl_generics #typed_ for #ident #ty_generics #where_clause {
            fn type_info() -> &'static #info_::TypeInfo {
                #cell_tokens
            }
        }
    }
}
