use crate::Reflect;
use crate::info::ReflectKind;
use crate::ops::{List, Map, Optional, Set, Struct};

macro_rules! impl_reflect_kind_enum {
    ($name:ident) => {
        impl $name<'_> {
            pub fn kind(&self) -> ReflectKind {
                match self {
                    $name::Struct(_) => ReflectKind::Struct,
                    $name::List(_) => ReflectKind::List,
                    $name::Set(_) => ReflectKind::Set,
                    $name::Map(_) => ReflectKind::Map,
                    $name::Option(_) => ReflectKind::Option,
                    $name::Opaque(_) => ReflectKind::Opaque,
                }
            }
        }
    };
}

/// An immutable structural view of a reflected value.
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    List(&'a dyn List),
    Set(&'a dyn Set),
    Map(&'a dyn Map),
    Option(&'a dyn Optional),
    Opaque(&'a dyn Reflect),
}

/// A mutable structural view of a reflected value.
pub enum ReflectMut<'a> {
    Struct(&'a mut dyn Struct),
    List(&'a mut dyn List),
    Set(&'a mut dyn Set),
    Map(&'a mut dyn Map),
    Option(&'a mut dyn Optional),
    Opaque(&'a mut dyn Reflect),
}

impl_reflect_kind_enum!(ReflectRef);
impl_reflect_kind_enum!(ReflectMut);
