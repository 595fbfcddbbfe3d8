// -----------------------------------------------------------------------------
// Modules

mod trait_from_value;
mod trait_reflect;
mod trait_struct;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectStruct;

/// All implementations generated for a struct.
pub(crate) fn impl_struct(info: &ReflectStruct) -> TokenStream {
    let typed = trait_typed::impl_trait_typed(info);
    let reflect = trait_reflect::impl_trait_reflect(info);
    let struct_ = trait_struct::impl_trait_struct(info);
    let from_value = trait_from_value::impl_trait_from_value(info);

    quote! {
        const _: () = {
            #typed
            #reflect
            #struct_
            #from_value
        };
    }
}
