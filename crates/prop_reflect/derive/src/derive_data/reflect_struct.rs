use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Generics, Ident, Type, WhereClause, parse_quote};

use super::{FieldAttributes, TypeAttributes};

/// A field of the derived struct.
pub(crate) struct StructField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    /// The name reflection uses, without any `r#` prefix.
    pub name: String,
    pub attrs: FieldAttributes,
}

/// The parsed derive input.
pub(crate) struct ReflectStruct<'a> {
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    pub attrs: TypeAttributes,
    pub fields: Vec<StructField<'a>>,
    prop_reflect_path: syn::Path,
}

impl<'a> ReflectStruct<'a> {
    pub fn from_ast(ast: &'a DeriveInput) -> syn::Result<Self> {
        let named = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                _ => {
                    return Err(syn::Error::new_spanned(
                        &ast.ident,
                        "`Reflect` can only be derived for structs with named fields",
                    ));
                }
            },
            _ => {
                return Err(syn::Error::new_spanned(
                    &ast.ident,
                    "`Reflect` can only be derived for structs with named fields",
                ));
            }
        };

        if let Some(lifetime) = ast.generics.lifetimes().next() {
            return Err(syn::Error::new_spanned(
                lifetime,
                "`Reflect` types must be `'static`, lifetime parameters are not supported",
            ));
        }

        let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;

        let mut fields = Vec::with_capacity(named.named.len());
        for field in &named.named {
            // Named fields always carry an ident.
            let Some(ident) = field.ident.as_ref() else {
                continue;
            };
            fields.push(StructField {
                ident,
                ty: &field.ty,
                name: ident.unraw().to_string(),
                attrs: FieldAttributes::parse_attrs(&field.attrs)?,
            });
        }

        Ok(Self {
            ident: &ast.ident,
            generics: &ast.generics,
            attrs,
            fields,
            prop_reflect_path: crate::path::prop_reflect(),
        })
    }

    #[inline]
    pub fn prop_reflect_path(&self) -> &syn::Path {
        &self.prop_reflect_path
    }

    /// Fields visible to reflection, in declaration order.
    pub fn active_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields.iter().filter(|field| !field.attrs.ignore)
    }

    pub fn ignored_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields.iter().filter(|field| field.attrs.ignore)
    }

    #[inline]
    pub fn is_generic(&self) -> bool {
        self.generics.type_params().next().is_some()
    }

    /// `(impl_generics, ty_generics, where_clause)` tokens, where every type
    /// parameter is bounded by `Reflect + Typed + FromValue`.
    pub fn split_generics(&self) -> (TokenStream, TokenStream, TokenStream) {
        let path = &self.prop_reflect_path;
        let mut generics = self.generics.clone();
        let where_clause: &mut WhereClause = generics.make_where_clause();
        for param in self.generics.type_params() {
            let ident = &param.ident;
            where_clause.predicates.push(parse_quote! {
                #ident: #path::Reflect + #path::info::Typed + #path::FromValue
            });
        }

        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
        (
            quote! { #impl_generics },
            quote! { #ty_generics },
            quote! { #where_clause },
        )
    }
}
