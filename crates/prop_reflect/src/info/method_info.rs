use crate::info::TypeInfo;
use crate::{Reflect, Value};

/// Type-erased read accessor. The receiver must be the registering type.
pub type GetterFn = fn(&dyn Reflect) -> Value;

/// Type-erased write accessor. The argument is coerced to the parameter type.
pub type SetterFn = fn(&mut dyn Reflect, Value);

#[derive(Clone, Copy, Debug)]
pub enum MethodKind {
    Getter(GetterFn),
    Setter(SetterFn),
}

/// An accessor method registered with `#[reflect(methods(...))]`.
///
/// `type_info` is the return type of a getter or the parameter type of a
/// setter.
#[derive(Clone, Debug)]
pub struct MethodInfo {
    name: &'static str,
    kind: MethodKind,
    type_info: fn() -> &'static TypeInfo,
}

impl MethodInfo {
    #[inline]
    pub const fn new(
        name: &'static str,
        kind: MethodKind,
        type_info: fn() -> &'static TypeInfo,
    ) -> Self {
        Self {
            name,
            kind,
            type_info,
        }
    }

    /// The method name as written in the source, e.g. `get_full_name`.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn kind(&self) -> MethodKind {
        self.kind
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    #[inline]
    pub(crate) fn type_info_fn(&self) -> fn() -> &'static TypeInfo {
        self.type_info
    }

    #[inline]
    pub const fn getter(&self) -> Option<GetterFn> {
        match self.kind {
            MethodKind::Getter(f) => Some(f),
            MethodKind::Setter(_) => None,
        }
    }

    #[inline]
    pub const fn setter(&self) -> Option<SetterFn> {
        match self.kind {
            MethodKind::Setter(f) => Some(f),
            MethodKind::Getter(_) => None,
        }
    }
}
