use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::cache::{AccessorRecord, ConventionDescriptor, TypeAccessors, TypeDescriptor};
use crate::info::TypeInfo;
use crate::utils::TypeIdMap;

/// Memoized [`TypeAccessors`] keyed by type.
///
/// Lookups take a read lock; a miss takes the write lock, re-checks and
/// describes the type, so a type is described at most once per cache and no
/// partial table is ever visible.
///
/// # Examples
///
/// ```
/// use prop_reflect::cache::AccessorCache;
/// use prop_reflect::derive::Reflect;
/// use prop_reflect::info::Typed;
///
/// #[derive(Reflect, Default)]
/// struct Person {
///     name: String,
/// }
///
/// let cache = AccessorCache::new();
/// let name = cache.resolve(Person::type_info(), "name");
/// assert!(name.field.is_some());
/// assert!(cache.resolve(Person::type_info(), "age").is_empty());
/// assert_eq!(cache.len(), 1);
/// ```
pub struct AccessorCache {
    descriptor: Box<dyn TypeDescriptor>,
    types: RwLock<TypeIdMap<Arc<TypeAccessors>>>,
}

impl AccessorCache {
    /// A cache using the [`ConventionDescriptor`].
    #[inline]
    pub fn new() -> Self {
        Self::with_descriptor(ConventionDescriptor)
    }

    pub fn with_descriptor(descriptor: impl TypeDescriptor) -> Self {
        Self {
            descriptor: Box::new(descriptor),
            types: RwLock::new(TypeIdMap::new()),
        }
    }

    /// The process-wide cache.
    pub fn global() -> &'static Arc<AccessorCache> {
        static GLOBAL: OnceLock<Arc<AccessorCache>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(AccessorCache::new()))
    }

    /// The accessor table of `info`'s type, describing it on first use.
    pub fn accessors(&self, info: &'static TypeInfo) -> Arc<TypeAccessors> {
        let type_id = info.type_id();
        if let Some(found) = self
            .types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
        {
            return Arc::clone(found);
        }

        let mut types = self.types.write().unwrap_or_else(PoisonError::into_inner);
        let accessors = types.get_or_insert(type_id, || {
            let accessors = self.descriptor.describe(info);
            log::debug!(
                "described `{}`: {} properties",
                info.type_path(),
                accessors.len()
            );
            Arc::new(accessors)
        });
        Arc::clone(accessors)
    }

    /// The record of property `name`, empty if the type has no such property.
    #[inline]
    pub fn resolve(&self, info: &'static TypeInfo, name: &str) -> AccessorRecord {
        self.accessors(info).get(name).copied().unwrap_or_default()
    }

    /// Number of described types.
    pub fn len(&self) -> usize {
        self.types.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Default for AccessorCache {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for AccessorCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AccessorCache")
            .field("types", &self.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use super::*;
    use crate::derive::Reflect;
    use crate::info::{ReflectKind, Typed};

    #[derive(Reflect, Default)]
    #[reflect(methods(get_full_name, set_full_name, getNickname))]
    struct Person {
        first: String,
        last: String,
    }

    impl Person {
        fn get_full_name(&self) -> String {
            format!("{} {}", self.first, self.last)
        }

        fn set_full_name(&mut self, full: String) {
            let (first, last) = full.split_once(' ').unwrap_or((&full, ""));
            self.first = first.to_owned();
            self.last = last.to_owned();
        }

        #[allow(non_snake_case)]
        fn getNickname(&self) -> String {
            self.first.to_lowercase()
        }
    }

    #[test]
    fn fields_then_accessors() {
        let cache = AccessorCache::new();
        let accessors = cache.accessors(Person::type_info());
        let names: Vec<&str> = accessors.names().collect();
        assert_eq!(names, ["first", "last", "full_name", "nickname"]);

        let full = cache.resolve(Person::type_info(), "full_name");
        assert!(full.getter.is_some() && full.setter.is_some());
        assert!(full.field.is_none());
        assert!(full.declared_type().unwrap().ty().is::<String>());

        let first = cache.resolve(Person::type_info(), "first");
        assert_eq!(first.field.map(|f| f.index), Some(0));
        assert!(first.getter.is_none());
    }

    #[test]
    fn non_structs_have_no_properties() {
        let cache = AccessorCache::new();
        let info = <Vec<String> as Typed>::type_info();
        assert_eq!(info.kind(), ReflectKind::List);
        assert!(cache.accessors(info).is_empty());
        assert!(cache.resolve(info, "len").is_empty());
    }

    struct Counting(Arc<AtomicUsize>);

    impl TypeDescriptor for Counting {
        fn describe(&self, info: &'static TypeInfo) -> TypeAccessors {
            self.0.fetch_add(1, Ordering::SeqCst);
            ConventionDescriptor.describe(info)
        }
    }

    #[test]
    fn concurrent_lookups_describe_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = Arc::new(AccessorCache::with_descriptor(Counting(Arc::clone(&calls))));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for _ in 0..100 {
                        assert!(!cache.resolve(Person::type_info(), "last").is_empty());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }
}
