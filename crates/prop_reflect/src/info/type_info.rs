use core::any::TypeId;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::Reflect;
use crate::info::{DynamicInfo, ListInfo, MapInfo, OpaqueInfo, OptionInfo, SetInfo, StructInfo};

/// Builds a fresh boxed instance of a type.
pub type Constructor = fn() -> Box<dyn Reflect>;

// -----------------------------------------------------------------------------
// Type

/// Identity and path of a Rust type.
///
/// Equality and hashing only consider the [`TypeId`].
#[derive(Clone, Copy, Debug)]
pub struct Type {
    id: TypeId,
    path: &'static str,
}

impl Type {
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: core::any::type_name::<T>(),
        }
    }

    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Full path as reported by [`core::any::type_name`].
    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Last path segment without generic arguments, e.g. `Option`.
    pub fn name(&self) -> &'static str {
        let base = self.path.split('<').next().unwrap_or(self.path);
        base.rsplit("::").next().unwrap_or(base)
    }

    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl Hash for Type {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Type {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

// -----------------------------------------------------------------------------
// ReflectKind

/// The shape of a reflected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    Struct,
    List,
    Set,
    Map,
    Option,
    Opaque,
    /// [`Value`](crate::Value), whose shape is only known at runtime.
    Dynamic,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReflectKind::Struct => "struct",
            ReflectKind::List => "list",
            ReflectKind::Set => "set",
            ReflectKind::Map => "map",
            ReflectKind::Option => "option",
            ReflectKind::Opaque => "opaque",
            ReflectKind::Dynamic => "dynamic",
        })
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time information about a reflected type.
#[derive(Debug)]
pub enum TypeInfo {
    Struct(StructInfo),
    List(ListInfo),
    Set(SetInfo),
    Map(MapInfo),
    Option(OptionInfo),
    Opaque(OpaqueInfo),
    Dynamic(DynamicInfo),
}

impl TypeInfo {
    pub const fn ty(&self) -> &Type {
        match self {
            TypeInfo::Struct(info) => info.ty(),
            TypeInfo::List(info) => info.ty(),
            TypeInfo::Set(info) => info.ty(),
            TypeInfo::Map(info) => info.ty(),
            TypeInfo::Option(info) => info.ty(),
            TypeInfo::Opaque(info) => info.ty(),
            TypeInfo::Dynamic(info) => info.ty(),
        }
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty().id()
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    pub const fn kind(&self) -> ReflectKind {
        match self {
            TypeInfo::Struct(_) => ReflectKind::Struct,
            TypeInfo::List(_) => ReflectKind::List,
            TypeInfo::Set(_) => ReflectKind::Set,
            TypeInfo::Map(_) => ReflectKind::Map,
            TypeInfo::Option(_) => ReflectKind::Option,
            TypeInfo::Opaque(_) => ReflectKind::Opaque,
            TypeInfo::Dynamic(_) => ReflectKind::Dynamic,
        }
    }

    #[inline]
    pub const fn as_struct(&self) -> Option<&StructInfo> {
        match self {
            TypeInfo::Struct(info) => Some(info),
            _ => None,
        }
    }

    /// The registered no-argument constructor.
    ///
    /// Only structs deriving with `#[reflect(default)]` and the dynamic
    /// [`Value`](crate::Value) have one. Scalars and collections never do.
    pub const fn constructor(&self) -> Option<Constructor> {
        match self {
            TypeInfo::Struct(info) => info.constructor(),
            TypeInfo::Dynamic(info) => Some(info.constructor()),
            _ => None,
        }
    }
}
