use proc_macro2::Span;
use syn::{Attribute, Ident};

use crate::REFLECT_ATTRIBUTE_NAME;

/// A method listed in `#[reflect(methods(...))]`.
#[derive(Debug)]
pub(crate) struct AccessorMethod {
    pub ident: Ident,
    pub is_setter: bool,
}

/// Attributes on the struct itself.
#[derive(Debug, Default)]
pub(crate) struct TypeAttributes {
    /// `#[reflect(default)]`, with the span of the flag.
    pub default: Option<Span>,
    pub methods: Vec<AccessorMethod>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("default") {
                    if result.default.is_some() {
                        return Err(meta.error("duplicate `default` flag"));
                    }
                    result.default = Some(meta.path.require_ident()?.span());
                    return Ok(());
                }

                if meta.path.is_ident("methods") {
                    return meta.parse_nested_meta(|method| {
                        let ident = method.path.require_ident()?.clone();
                        if result.methods.iter().any(|m| m.ident == ident) {
                            return Err(method.error("method is listed twice"));
                        }
                        let is_setter = ident.to_string().starts_with("set");
                        result.methods.push(AccessorMethod { ident, is_setter });
                        Ok(())
                    });
                }

                Err(meta.error("expected `default` or `methods(...)`"))
            })?;
        }

        Ok(result)
    }
}
