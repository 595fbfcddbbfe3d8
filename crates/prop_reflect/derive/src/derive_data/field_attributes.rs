use syn::Attribute;

use crate::REFLECT_ATTRIBUTE_NAME;

/// Attributes on a single field.
#[derive(Debug, Default)]
pub(crate) struct FieldAttributes {
    /// `#[reflect(ignore)]`
    pub ignore: bool,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("ignore") {
                    result.ignore = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `ignore`"))
                }
            })?;
        }

        Ok(result)
    }
}
