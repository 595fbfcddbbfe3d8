#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use prop_proxy as proxy;
pub use prop_reflect as reflect;
pub use prop_value as value;

/// The types most programs need.
pub mod prelude {
    pub use crate::proxy::{Getter, MapProxy, PropertyError, PropertyProxy, proxy, proxy_map};
    pub use crate::reflect::derive::Reflect;
    pub use crate::reflect::{FromValue, Reflect};
    pub use crate::value::{Value, ValueMap};
}
