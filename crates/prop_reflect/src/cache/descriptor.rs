use std::borrow::Cow;

use crate::cache::{FieldHandle, TypeAccessors};
use crate::info::TypeInfo;

/// Computes the accessor table of a type.
///
/// Called at most once per type by an
/// [`AccessorCache`](crate::cache::AccessorCache).
pub trait TypeDescriptor: Send + Sync + 'static {
    fn describe(&self, info: &'static TypeInfo) -> TypeAccessors;
}

/// Bean-style discovery over the registered fields and methods.
///
/// - every named field is a property with a direct handle;
/// - a getter `get_x`/`getX` reads property `x`, a getter without the
///   prefix reads the property of its own name;
/// - a setter `set_x`/`setX` writes property `x`;
/// - the declared type comes from the field, then the setter parameter,
///   then the getter return type.
///
/// Types other than structs have no properties.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionDescriptor;

impl TypeDescriptor for ConventionDescriptor {
    fn describe(&self, info: &'static TypeInfo) -> TypeAccessors {
        let mut accessors = TypeAccessors::new(*info.ty());
        let Some(info) = info.as_struct() else {
            return accessors;
        };

        for (index, field) in info.fields().iter().enumerate() {
            let record = accessors.record_mut(field.name());
            let type_info = field.type_info_fn();
            record.field = Some(FieldHandle { index, type_info });
            record.declared = Some(type_info);
        }

        // Setters first: a setter parameter type takes precedence over a
        // getter return type.
        let setters = info.methods().iter().filter_map(|m| Some((m, m.setter()?)));
        for (method, setter) in setters {
            let record = accessors.record_mut(property_name(method.name(), "set"));
            record.setter = Some(setter);
            if record.declared.is_none() {
                record.declared = Some(method.type_info_fn());
            }
        }

        let getters = info.methods().iter().filter_map(|m| Some((m, m.getter()?)));
        for (method, getter) in getters {
            let record = accessors.record_mut(property_name(method.name(), "get"));
            record.getter = Some(getter);
            if record.declared.is_none() {
                record.declared = Some(method.type_info_fn());
            }
        }

        accessors
    }
}

/// Derives a property name from an accessor method name.
///
/// `get_x` and `getX` both name property `x`: the `prefix` is stripped
/// together with a following `_`, or the following capital is lower-cased.
/// Any other name is kept as is.
///
/// ```
/// use prop_reflect::cache::property_name;
///
/// assert_eq!(property_name("get_full_name", "get"), "full_name");
/// assert_eq!(property_name("getName", "get"), "name");
/// assert_eq!(property_name("setAge", "set"), "age");
/// assert_eq!(property_name("display", "get"), "display");
/// assert_eq!(property_name("getaway", "get"), "getaway");
/// assert_eq!(property_name("get", "get"), "get");
/// ```
pub fn property_name(method: &'static str, prefix: &str) -> Cow<'static, str> {
    let Some(rest) = method.strip_prefix(prefix) else {
        return Cow::Borrowed(method);
    };
    if let Some(snake) = rest.strip_prefix('_') {
        return Cow::Borrowed(if snake.is_empty() { method } else { snake });
    }
    let mut chars = rest.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => Cow::Owned(first.to_lowercase().chain(chars).collect()),
        _ => Cow::Borrowed(method),
    }
}
