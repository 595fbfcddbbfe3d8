//! Path walks over reflected targets.
//!
//! Reads never fail: a missing property, an absent value or an index out
//! of range ends the walk with `Null`. Writes build absent intermediate
//! objects aside and attach them once the rest of the write succeeded, so
//! a failed write leaves the target as it was.

use prop_reflect::cache::AccessorCache;
use prop_reflect::info::{ReflectKind, TypeInfo};
use prop_reflect::ops::{MaterializeError, ReflectMut, ReflectRef};
use prop_reflect::path::{PropertyPath, Segment};
use prop_reflect::{Reflect, Value};

use crate::PropertyError;

// -----------------------------------------------------------------------------
// Read

/// A step of a read: borrowed while the walk follows fields and entries,
/// owned once a getter has produced a value.
enum Node<'a> {
    Borrowed(&'a dyn Reflect),
    Owned(Value),
}

impl Node<'_> {
    fn into_value(self) -> Value {
        match self {
            Node::Borrowed(node) => node.reflect_value(),
            Node::Owned(value) => value,
        }
    }
}

pub(crate) fn read(cache: &AccessorCache, root: &dyn Reflect, path: &PropertyPath<'_>) -> Value {
    let mut node = Node::Borrowed(root);
    for segment in path.segments() {
        match read_segment(cache, node, segment) {
            Some(next) => node = next,
            None => return Value::Null,
        }
    }
    node.into_value()
}

/// Reads one top-level property, `Null` if it cannot be read.
pub(crate) fn read_property(cache: &AccessorCache, root: &dyn Reflect, name: &str) -> Value {
    property(cache, root, name).map_or(Value::Null, Node::into_value)
}

fn read_segment<'a>(
    cache: &AccessorCache,
    node: Node<'a>,
    segment: &Segment<'_>,
) -> Option<Node<'a>> {
    let named = match node {
        Node::Borrowed(node) => property(cache, node, segment.name())?,
        Node::Owned(value) => Node::Owned(value.take(segment.name())?),
    };
    match segment.index() {
        None => Some(named),
        Some(index) => element(named, index),
    }
}

/// Unwraps nested options, `None` for an absent value.
fn present(mut node: &dyn Reflect) -> Option<&dyn Reflect> {
    while let ReflectRef::Option(optional) = node.reflect_ref() {
        node = optional.value()?;
    }
    Some(node)
}

fn property<'a>(cache: &AccessorCache, node: &'a dyn Reflect, name: &str) -> Option<Node<'a>> {
    let node = present(node)?;
    match node.reflect_ref() {
        ReflectRef::Struct(fields) => {
            let record = cache.resolve(node.reflect_type_info(), name);
            if let Some(getter) = record.getter {
                return Some(Node::Owned(getter(node)));
            }
            fields.field_at(record.field?.index).map(Node::Borrowed)
        }
        ReflectRef::Map(map) => map.get(name).map(Node::Borrowed),
        _ => None,
    }
}

fn element(node: Node<'_>, index: usize) -> Option<Node<'_>> {
    match node {
        Node::Owned(value) => value.take_index(index).map(Node::Owned),
        Node::Borrowed(node) => match present(node)?.reflect_ref() {
            ReflectRef::List(list) => list.get(index).map(Node::Borrowed),
            ReflectRef::Set(set) => set.iter().nth(index).map(Node::Borrowed),
            _ => None,
        },
    }
}

// -----------------------------------------------------------------------------
// Write

/// The value carried by a write.
pub(crate) enum Assignment {
    /// Coerced into the slot's declared type.
    Value(Value),
    /// Moved into the slot when the types match, coerced from its
    /// projection otherwise.
    Reflect(Box<dyn Reflect>),
}

impl Assignment {
    fn into_value(self) -> Value {
        match self {
            Assignment::Value(value) => value,
            Assignment::Reflect(value) => value.reflect_value(),
        }
    }

    fn put(self, slot: &mut dyn Reflect) {
        match self {
            Assignment::Value(value) => slot.assign(value),
            Assignment::Reflect(value) => {
                if let Err(value) = slot.set(value) {
                    slot.assign(value.reflect_value());
                }
            }
        }
    }
}

/// One step of a write: a property name, or an index into the list
/// reached by the previous step.
#[derive(Clone, Copy)]
enum Step<'p, 'a> {
    Name(&'p Segment<'a>),
    Index(&'p Segment<'a>, usize),
}

impl<'p, 'a> Step<'p, 'a> {
    fn segment(self) -> &'p Segment<'a> {
        match self {
            Step::Name(segment) | Step::Index(segment, _) => segment,
        }
    }
}

pub(crate) fn write(
    cache: &AccessorCache,
    root: &mut dyn Reflect,
    path: &PropertyPath<'_>,
    assignment: Assignment,
) -> Result<(), PropertyError> {
    let steps: Vec<Step<'_, '_>> = path
        .segments()
        .iter()
        .flat_map(|segment| {
            let index = segment.index().map(|index| Step::Index(segment, index));
            core::iter::once(Step::Name(segment)).chain(index)
        })
        .collect();
    write_steps(cache, root, &steps, assignment)
}

fn write_steps(
    cache: &AccessorCache,
    node: &mut dyn Reflect,
    steps: &[Step<'_, '_>],
    assignment: Assignment,
) -> Result<(), PropertyError> {
    let Some((&step, rest)) = steps.split_first() else {
        assignment.put(node);
        return Ok(());
    };
    if node.reflect_ref().kind() == ReflectKind::Option {
        return write_through_option(cache, node, steps, step.segment(), assignment);
    }
    if rest.is_empty() {
        return write_leaf(cache, node, step, assignment);
    }
    match step {
        Step::Name(segment) => write_named(cache, node, segment, rest, assignment),
        Step::Index(segment, index) => {
            let item = element_mut(node, index, segment)?;
            write_steps(cache, item, rest, assignment)
        }
    }
}

/// Continues inside a present option, or builds its value aside when absent.
fn write_through_option(
    cache: &AccessorCache,
    node: &mut dyn Reflect,
    steps: &[Step<'_, '_>],
    segment: &Segment<'_>,
    assignment: Assignment,
) -> Result<(), PropertyError> {
    let ReflectMut::Option(optional) = node.reflect_mut() else {
        unreachable!("kind checked by the caller");
    };
    if let Some(inner) = optional.value_mut() {
        return write_steps(cache, inner, steps, assignment);
    }
    let fresh = detached(cache, held_info(node.reflect_type_info()), steps, segment, assignment)?;
    Assignment::Reflect(fresh).put(node);
    Ok(())
}

fn write_named(
    cache: &AccessorCache,
    node: &mut dyn Reflect,
    segment: &Segment<'_>,
    rest: &[Step<'_, '_>],
    assignment: Assignment,
) -> Result<(), PropertyError> {
    let info = node.reflect_type_info();
    let name = segment.name();
    match node.reflect_mut() {
        ReflectMut::Struct(fields) => {
            let record = cache.resolve(info, name);
            let Some(field) = record.field else {
                if record.is_empty() {
                    return Err(no_such_property(info.type_path(), segment));
                }
                let kind = record
                    .declared_type()
                    .map_or(ReflectKind::Opaque, |declared| declared.kind());
                return Err(not_traversable(segment, kind));
            };
            let child = fields
                .field_at_mut(field.index)
                .ok_or_else(|| no_such_property(info.type_path(), segment))?;
            write_steps(cache, child, rest, assignment)
        }
        ReflectMut::Map(map) => {
            if let Some(child) = map.get_mut(name) {
                return write_steps(cache, child, rest, assignment);
            }
            let fresh = detached(cache, held_info(info), rest, segment, assignment)?;
            let slot = map
                .get_or_materialize(name)
                .map_err(|source| materialize_error(segment, source))?;
            Assignment::Reflect(fresh).put(slot);
            Ok(())
        }
        other => Err(not_traversable(segment, other.kind())),
    }
}

fn write_leaf(
    cache: &AccessorCache,
    node: &mut dyn Reflect,
    step: Step<'_, '_>,
    assignment: Assignment,
) -> Result<(), PropertyError> {
    let segment = match step {
        Step::Name(segment) => segment,
        Step::Index(segment, index) => {
            assignment.put(element_mut(node, index, segment)?);
            return Ok(());
        }
    };

    let info = node.reflect_type_info();
    let name = segment.name();
    match node.reflect_ref().kind() {
        ReflectKind::Struct => {
            let record = cache.resolve(info, name);
            if let Some(setter) = record.setter {
                setter(node, assignment.into_value());
                return Ok(());
            }
            let field = record
                .field
                .ok_or_else(|| no_such_property(info.type_path(), segment))?;
            let ReflectMut::Struct(fields) = node.reflect_mut() else {
                unreachable!("`{}` is a struct", info.type_path());
            };
            let slot = fields
                .field_at_mut(field.index)
                .ok_or_else(|| no_such_property(info.type_path(), segment))?;
            assignment.put(slot);
        }
        ReflectKind::Map => {
            let ReflectMut::Map(map) = node.reflect_mut() else {
                unreachable!("`{}` is a map", info.type_path());
            };
            if let Some(slot) = map.get_mut(name) {
                assignment.put(slot);
            } else {
                map.insert_value(name, assignment.into_value());
            }
        }
        kind => return Err(not_traversable(segment, kind)),
    }
    Ok(())
}

/// Builds a fresh value of type `info` and writes `steps` into it.
fn detached(
    cache: &AccessorCache,
    info: &'static TypeInfo,
    steps: &[Step<'_, '_>],
    segment: &Segment<'_>,
    assignment: Assignment,
) -> Result<Box<dyn Reflect>, PropertyError> {
    let constructor = info.constructor().ok_or_else(|| {
        let source = MaterializeError::NotInstantiable {
            type_path: info.type_path(),
            kind: info.kind(),
        };
        materialize_error(segment, source)
    })?;
    log::trace!("materializing `{}` for `{segment}`", info.type_path());
    let mut fresh = constructor();
    write_steps(cache, &mut *fresh, steps, assignment)?;
    Ok(fresh)
}

/// Type of the value held by an absent option or a missing map entry.
///
/// A dynamic value holds values of its own type.
fn held_info(info: &'static TypeInfo) -> &'static TypeInfo {
    match info {
        TypeInfo::Option(option) => option.item_info(),
        TypeInfo::Map(map) => map.value_info(),
        other => other,
    }
}

fn element_mut<'a>(
    node: &'a mut dyn Reflect,
    index: usize,
    segment: &Segment<'_>,
) -> Result<&'a mut dyn Reflect, PropertyError> {
    match node.reflect_mut() {
        ReflectMut::List(list) => {
            let len = list.len();
            list.get_mut(index)
                .ok_or_else(|| PropertyError::IndexOutOfBounds {
                    property: segment.name().to_owned(),
                    index,
                    len,
                })
        }
        other => Err(not_traversable(segment, other.kind())),
    }
}

#[inline]
fn materialize_error(segment: &Segment<'_>, source: MaterializeError) -> PropertyError {
    PropertyError::Materialize {
        property: segment.to_string(),
        source,
    }
}

#[inline]
fn no_such_property(type_path: &'static str, segment: &Segment<'_>) -> PropertyError {
    log::debug!("`{type_path}` has no writable property `{segment}`");
    PropertyError::NoSuchProperty {
        type_path,
        property: segment.name().to_owned(),
    }
}

#[inline]
fn not_traversable(segment: &Segment<'_>, kind: ReflectKind) -> PropertyError {
    PropertyError::NotTraversable {
        property: segment.to_string(),
        kind,
    }
}
