use crate::info::{Constructor, MethodInfo, NamedField, Type, Typed};
use crate::utils::HashMap;

/// Container for compile-time named struct info.
#[derive(Clone, Debug)]
pub struct StructInfo {
    ty: Type,
    fields: Box<[NamedField]>,
    field_indices: HashMap<&'static str, usize>,
    methods: Box<[MethodInfo]>,
    constructor: Option<Constructor>,
}

impl StructInfo {
    /// Create a new [`StructInfo`].
    ///
    /// The order of fields is their declaration order.
    pub fn new<T: Typed>(fields: &[NamedField]) -> Self {
        let field_indices = fields
            .iter()
            .enumerate()
            .map(|(index, field)| (field.name(), index))
            .collect();

        Self {
            ty: Type::of::<T>(),
            fields: fields.to_vec().into_boxed_slice(),
            field_indices,
            methods: Box::new([]),
            constructor: None,
        }
    }

    pub fn with_methods(self, methods: &[MethodInfo]) -> Self {
        Self {
            methods: methods.to_vec().into_boxed_slice(),
            ..self
        }
    }

    #[inline]
    pub fn with_constructor(self, constructor: Constructor) -> Self {
        Self {
            constructor: Some(constructor),
            ..self
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn field(&self, name: &str) -> Option<&NamedField> {
        self.field_indices.get(name).map(|&index| &self.fields[index])
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&NamedField> {
        self.fields.get(index)
    }

    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.field_indices.get(name).copied()
    }

    #[inline]
    pub fn field_names(&self) -> impl ExactSizeIterator<Item = &'static str> + '_ {
        self.fields.iter().map(NamedField::name)
    }

    #[inline]
    pub fn fields(&self) -> &[NamedField] {
        &self.fields
    }

    #[inline]
    pub const fn field_len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn methods(&self) -> &[MethodInfo] {
        &self.methods
    }

    #[inline]
    pub const fn constructor(&self) -> Option<Constructor> {
        self.constructor
    }
}
