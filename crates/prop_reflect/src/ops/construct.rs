use thiserror::Error;

use crate::Reflect;
use crate::info::{ReflectKind, Typed};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MaterializeError {
    #[error("`{type_path}` ({kind}) has no registered constructor")]
    NotInstantiable {
        type_path: &'static str,
        kind: ReflectKind,
    },
    #[error("constructor of `{type_path}` built a different type")]
    ConstructorMismatch { type_path: &'static str },
}

/// Builds a fresh `T` through its registered no-argument constructor.
///
/// Only structs deriving with `#[reflect(default)]` and [`Value`](crate::Value)
/// are instantiable.
///
/// ```
/// use prop_reflect::derive::Reflect;
/// use prop_reflect::ops::{MaterializeError, construct};
///
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct Address {
///     city: String,
/// }
///
/// assert!(construct::<Address>().is_ok());
/// assert!(matches!(construct::<String>(), Err(MaterializeError::NotInstantiable { .. })));
/// ```
pub fn construct<T: Reflect + Typed>() -> Result<T, MaterializeError> {
    let info = T::type_info();
    let Some(constructor) = info.constructor() else {
        return Err(MaterializeError::NotInstantiable {
            type_path: info.type_path(),
            kind: info.kind(),
        });
    };
    log::trace!("materializing `{}`", info.type_path());
    constructor()
        .take::<T>()
        .map_err(|_| MaterializeError::ConstructorMismatch {
            type_path: info.type_path(),
        })
}
