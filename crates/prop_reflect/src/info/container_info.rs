use crate::Value;
use crate::info::{Constructor, Type, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// List / Set / Option

macro_rules! impl_item_info {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub struct $name {
            ty: Type,
            item_info: fn() -> &'static TypeInfo,
        }

        impl $name {
            #[inline]
            pub fn new<T: Typed, Item: Typed>() -> Self {
                Self {
                    ty: Type::of::<T>(),
                    item_info: Item::type_info,
                }
            }

            #[inline]
            pub const fn ty(&self) -> &Type {
                &self.ty
            }

            #[inline]
            pub fn item_info(&self) -> &'static TypeInfo {
                (self.item_info)()
            }
        }
    };
}

impl_item_info!(
    /// Information of an ordered, index-addressable sequence.
    ListInfo
);
impl_item_info!(
    /// Information of an unordered collection of distinct items.
    SetInfo
);
impl_item_info!(
    /// Information of an `Option<T>`; the item is `T`.
    OptionInfo
);

// -----------------------------------------------------------------------------
// Map

/// Information of a string-keyed map.
#[derive(Clone, Debug)]
pub struct MapInfo {
    ty: Type,
    value_info: fn() -> &'static TypeInfo,
}

impl MapInfo {
    #[inline]
    pub fn new<T: Typed, V: Typed>() -> Self {
        Self {
            ty: Type::of::<T>(),
            value_info: V::type_info,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.value_info)()
    }
}

// -----------------------------------------------------------------------------
// Opaque

/// Information of a type without inner structure, such as numbers or text.
#[derive(Clone, Debug)]
pub struct OpaqueInfo {
    ty: Type,
}

impl OpaqueInfo {
    #[inline]
    pub fn new<T: Typed>() -> Self {
        Self { ty: Type::of::<T>() }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }
}

// -----------------------------------------------------------------------------
// Dynamic

/// Information of [`Value`]. It is always instantiable as an empty map.
#[derive(Clone, Debug)]
pub struct DynamicInfo {
    ty: Type,
}

impl DynamicInfo {
    #[inline]
    pub fn new() -> Self {
        Self { ty: Type::of::<Value>() }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn constructor(&self) -> Constructor {
        empty_value_map
    }
}

fn empty_value_map() -> Box<dyn crate::Reflect> {
    Box::new(Value::Map(Default::default()))
}
