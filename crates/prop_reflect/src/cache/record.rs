use std::borrow::Cow;

use crate::info::{GetterFn, SetterFn, Type, TypeInfo};
use crate::utils::HashMap;

/// Direct access to a struct field by declaration index.
#[derive(Debug, Clone, Copy)]
pub struct FieldHandle {
    pub index: usize,
    pub type_info: fn() -> &'static TypeInfo,
}

/// Everything known about one property of one type.
///
/// Reads prefer `getter` over `field`, writes prefer `setter` over `field`.
/// Descending through a property during a write always uses `field`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessorRecord {
    pub getter: Option<GetterFn>,
    pub setter: Option<SetterFn>,
    pub field: Option<FieldHandle>,
    /// The property's declared type, used for coercion and materialization.
    pub declared: Option<fn() -> &'static TypeInfo>,
}

impl AccessorRecord {
    /// `true` if the property is neither readable nor writable.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.getter.is_none() && self.setter.is_none() && self.field.is_none()
    }

    #[inline]
    pub fn is_readable(&self) -> bool {
        self.getter.is_some() || self.field.is_some()
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.setter.is_some() || self.field.is_some()
    }

    #[inline]
    pub fn declared_type(&self) -> Option<&'static TypeInfo> {
        self.declared.map(|info| info())
    }
}

/// The accessor table of one type, in discovery order.
#[derive(Debug, Clone)]
pub struct TypeAccessors {
    ty: Type,
    names: Vec<Cow<'static, str>>,
    records: HashMap<Cow<'static, str>, AccessorRecord>,
}

impl TypeAccessors {
    #[inline]
    pub fn new(ty: Type) -> Self {
        Self {
            ty,
            names: Vec::new(),
            records: HashMap::default(),
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// The record for `name`, created empty on first use.
    pub fn record_mut(&mut self, name: impl Into<Cow<'static, str>>) -> &mut AccessorRecord {
        let name = name.into();
        if !self.records.contains_key(name.as_ref()) {
            self.names.push(name.clone());
        }
        self.records.entry(name).or_default()
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&AccessorRecord> {
        self.records.get(name)
    }

    /// Property names in discovery order: fields first, then accessor-only
    /// properties.
    #[inline]
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.names.iter().map(|name| name.as_ref())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
