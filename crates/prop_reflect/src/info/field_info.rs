use crate::info::{Type, TypeInfo, Typed};

/// A named field of a reflected struct.
#[derive(Clone, Debug)]
pub struct NamedField {
    name: &'static str,
    ty: Type,
    type_info: fn() -> &'static TypeInfo,
}

impl NamedField {
    #[inline]
    pub fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            ty: Type::of::<T>(),
            type_info: T::type_info,
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// The declared type's information.
    ///
    /// Resolved lazily so that recursive types such as
    /// `struct Node { next: Option<Node> }` do not recurse at registration.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    #[inline]
    pub(crate) fn type_info_fn(&self) -> fn() -> &'static TypeInfo {
        self.type_info
    }
}
