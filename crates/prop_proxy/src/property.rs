use core::fmt;
use std::sync::Arc;

use prop_reflect::cache::AccessorCache;
use prop_reflect::ops::ReflectRef;
use prop_reflect::path::PropertyPath;
use prop_reflect::{Reflect, Value};
use prop_value::ValueMap;

use crate::access::{self, Assignment};
use crate::{ChangeSupport, Getter, ListenerError, ListenerId, PropertyChangeEvent, PropertyError};

/// Reads and writes the properties of one target through textual paths.
///
/// A path is a dot-separated list of property names, each optionally
/// followed by one `[index]`, such as `address.city` or `hobbies[1]`.
///
/// - Reads never fail on content: an absent target, a missing property or
///   an index out of range reads as [`Value::Null`].
/// - Writes coerce the value into the declared type of the property and
///   create absent intermediate objects. Writing to an absent target does
///   nothing.
/// - Both fail with [`PropertyError::Parse`] on malformed paths, even on an
///   absent target.
///
/// Every write that changes the value read back at its path notifies the
/// registered listeners.
///
/// # Examples
///
/// ```
/// use prop_proxy::{Getter, proxy};
/// use prop_reflect::derive::Reflect;
/// use prop_reflect::Value;
///
/// #[derive(Reflect, Default)]
/// struct Person {
///     name: String,
///     hobbies: Vec<String>,
/// }
///
/// let mut person = proxy(Person::default());
/// person
///     .set("name", "张三")?
///     .set("hobbies", vec!["reading", "balls"])?
///     .set("hobbies[0]", "music")?;
///
/// assert_eq!(person.get("name")?, Value::from("张三"));
/// assert_eq!(person.get_string("hobbies[0]")?, "music");
/// assert!(person.get("hobbies[5]")?.is_null());
/// assert!(person.get("a..b").is_err());
/// # Ok::<(), prop_proxy::PropertyError>(())
/// ```
pub struct PropertyProxy<T> {
    target: Option<T>,
    cache: Arc<AccessorCache>,
    listeners: ChangeSupport,
}

/// Wraps `target` in a [`PropertyProxy`] using the global accessor cache.
#[inline]
pub fn proxy<T: Reflect>(target: T) -> PropertyProxy<T> {
    PropertyProxy::new(target)
}

impl<T: Reflect> PropertyProxy<T> {
    #[inline]
    pub fn new(target: T) -> Self {
        Self::from_option(Some(target))
    }

    /// A proxy without target: reads yield `Null`, writes do nothing.
    #[inline]
    pub fn empty() -> Self {
        Self::from_option(None)
    }

    pub fn from_option(target: Option<T>) -> Self {
        Self {
            target,
            cache: Arc::clone(AccessorCache::global()),
            listeners: ChangeSupport::new(),
        }
    }

    /// Uses `cache` instead of the global accessor cache.
    pub fn with_cache(mut self, cache: Arc<AccessorCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Shares `listeners` with other proxies.
    pub fn with_listeners(mut self, listeners: ChangeSupport) -> Self {
        self.listeners = listeners;
        self
    }

    /// Reads the value at `path`.
    pub fn get(&self, path: &str) -> Result<Value, PropertyError> {
        let path = PropertyPath::parse(path)?;
        Ok(match &self.target {
            Some(target) => access::read(&self.cache, target, &path),
            None => Value::Null,
        })
    }

    /// Writes `value` at `path`, coerced into the declared type.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<&mut Self, PropertyError> {
        self.write(path, Assignment::Value(value.into()))
    }

    /// Writes a reflected value at `path`.
    ///
    /// The value is moved in as is when its type matches the property,
    /// and coerced from its dynamic projection otherwise.
    pub fn set_reflect(
        &mut self,
        path: &str,
        value: impl Reflect,
    ) -> Result<&mut Self, PropertyError> {
        self.write(path, Assignment::Reflect(Box::new(value)))
    }

    fn write(&mut self, raw: &str, assignment: Assignment) -> Result<&mut Self, PropertyError> {
        let path = PropertyPath::parse(raw)?;
        let Some(target) = self.target.as_mut() else {
            log::trace!("ignoring write to `{raw}` on an empty proxy");
            return Ok(self);
        };

        if self.listeners.is_empty() {
            access::write(&self.cache, target, &path, assignment)?;
            return Ok(self);
        }

        let old_value = access::read(&self.cache, target, &path);
        access::write(&self.cache, target, &path, assignment)?;
        let new_value = access::read(&self.cache, target, &path);
        if old_value != new_value {
            let event = PropertyChangeEvent {
                property_name: raw,
                old_value: &old_value,
                new_value: &new_value,
                source: &*target,
            };
            self.listeners.fire(&event).map_err(PropertyError::Listener)?;
        }
        Ok(self)
    }

    /// Registers a listener notified after every write that changes a value.
    pub fn on_property_change<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&PropertyChangeEvent<'_>) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.listeners.add(listener)
    }

    #[inline]
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    #[inline]
    pub fn listeners(&self) -> &ChangeSupport {
        &self.listeners
    }

    /// Every readable property of the target by name.
    ///
    /// Struct targets list their fields in declaration order, then the
    /// properties only reachable through getters. Map targets are
    /// projected as is, anything else yields an empty map.
    pub fn to_map(&self) -> ValueMap {
        let Some(target) = &self.target else {
            return ValueMap::new();
        };
        let target: &dyn Reflect = target;
        match target.reflect_ref() {
            ReflectRef::Struct(_) => {
                let accessors = self.cache.accessors(target.reflect_type_info());
                accessors
                    .names()
                    .filter(|name| accessors.get(name).is_some_and(|record| record.is_readable()))
                    .map(|name| (name.to_owned(), access::read_property(&self.cache, target, name)))
                    .collect()
            }
            _ => match target.reflect_value() {
                Value::Map(map) => map,
                _ => ValueMap::new(),
            },
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.target.is_none()
    }

    #[inline]
    pub fn pojo(&self) -> Option<&T> {
        self.target.as_ref()
    }

    #[inline]
    pub fn pojo_mut(&mut self) -> Option<&mut T> {
        self.target.as_mut()
    }

    #[inline]
    pub fn into_pojo(self) -> Option<T> {
        self.target
    }

    /// Converts the target into another serde type through its
    /// dynamic projection.
    #[cfg(feature = "json")]
    pub fn to_pojo<U: serde::de::DeserializeOwned>(&self) -> Result<U, crate::CodecError> {
        let value = self.target.as_ref().map_or(Value::Null, |target| target.reflect_value());
        crate::codec::convert(&value)
    }
}

impl<T: Reflect> Getter<str> for PropertyProxy<T> {
    type Output<U> = Result<U, PropertyError>;

    fn get_with<U>(&self, path: &str, convert: impl FnOnce(&Value) -> U) -> Self::Output<U> {
        self.get(path).map(|value| convert(&value))
    }
}

impl<T: Reflect + Default> Default for PropertyProxy<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for PropertyProxy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyProxy")
            .field("target", &self.target)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

/// JSON text of the target, `null` when empty.
#[cfg(feature = "json")]
impl<T: Reflect> fmt::Display for PropertyProxy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.target.as_ref().map_or(Value::Null, |target| target.reflect_value());
        let text = crate::codec::encode(&value).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use prop_reflect::derive::Reflect;
    use prop_reflect::ops::MaterializeError;
    use prop_value::rust_decimal::Decimal;

    use super::*;

    #[derive(Reflect, Default, Debug, Clone, PartialEq)]
    #[reflect(default)]
    struct Address {
        city: String,
        zip: Option<String>,
    }

    #[derive(Reflect, Default, Debug)]
    #[reflect(default, methods(get_display, set_nick_name))]
    struct Person {
        name: String,
        age: u32,
        address: Option<Address>,
        hobbies: Vec<String>,
        scores: Option<Vec<u32>>,
        extra: HashMap<String, String>,
        balance: Decimal,
        meta: Value,
    }

    impl Person {
        fn get_display(&self) -> String {
            format!("{} ({})", self.name, self.age)
        }

        fn set_nick_name(&mut self, nick: String) {
            self.name = nick;
        }
    }

    fn zhang_san() -> Person {
        Person {
            name: "张三".to_owned(),
            age: 18,
            address: Some(Address {
                city: "上海".to_owned(),
                zip: None,
            }),
            hobbies: vec!["reading".to_owned(), "balls".to_owned()],
            ..Person::default()
        }
    }

    fn recorder(proxy: &PropertyProxy<Person>) -> Arc<Mutex<Vec<String>>> {
        let records = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&records);
        proxy.on_property_change(move |event| {
            sink.lock().unwrap().push(format!(
                "{}: from [{}] to [{}]",
                event.property_name, event.old_value, event.new_value
            ));
            Ok(())
        });
        records
    }

    #[test]
    fn nested_reads_and_clearing() {
        let mut person = proxy(zhang_san());
        assert_eq!(person.get("address.city").unwrap(), Value::from("上海"));
        assert_eq!(person.get("hobbies[1]").unwrap(), Value::from("balls"));
        assert_eq!(person.get_decimal("age").unwrap(), Decimal::from(18));
        assert_eq!(person.get_string("age").unwrap(), "18");

        person.set("address.city", Value::Null).unwrap();
        assert_eq!(person.get_string("address.city").unwrap(), "");

        person.set("address", Value::Null).unwrap();
        assert!(person.pojo().unwrap().address.is_none());
        assert_eq!(person.get_string("address.city").unwrap(), "");
        assert!(person.get("address.zip").unwrap().is_null());
    }

    #[test]
    fn listeners_see_each_change_in_order() {
        let mut person = proxy(zhang_san());
        let records = recorder(&person);

        person
            .set("name", "李四")
            .unwrap()
            .set("age", 20)
            .unwrap()
            .set("hobbies", vec!["balls"])
            .unwrap();

        assert_eq!(
            *records.lock().unwrap(),
            [
                "name: from [张三] to [李四]",
                "age: from [18] to [20]",
                "hobbies: from [[reading, balls]] to [[balls]]",
            ]
        );
    }

    #[test]
    fn unchanged_values_do_not_notify() {
        let mut person = proxy(zhang_san());
        let records = recorder(&person);

        person.set("age", "18").unwrap();
        person.set("name", "李四").unwrap().set("name", "李四").unwrap();
        assert_eq!(records.lock().unwrap().len(), 1);

        let id = person.on_property_change(|_| Err("rejected".into()));
        let err = person.set("age", 30).unwrap_err();
        assert!(matches!(err, PropertyError::Listener(_)));
        assert_eq!(person.pojo().unwrap().age, 30);

        assert!(person.remove_listener(id));
        person.set("age", 31).unwrap();
        assert_eq!(records.lock().unwrap().len(), 3);
    }

    #[test]
    fn writes_coerce_to_declared_types() {
        let mut person = proxy(Person::default());
        person
            .set("age", "20")
            .unwrap()
            .set("balance", "1,234.5")
            .unwrap()
            .set("name", 42)
            .unwrap();

        let target = person.pojo().unwrap();
        assert_eq!(target.age, 20);
        assert_eq!(target.balance, Decimal::new(12345, 1));
        assert_eq!(target.name, "42");

        person.set("age", "not a number").unwrap();
        assert_eq!(person.get_int("age").unwrap(), 0);
    }

    #[test]
    fn absent_intermediates_are_created() {
        let mut person = proxy(Person::default());
        person.set("address.city", "北京").unwrap();
        assert_eq!(person.get_string("address.city").unwrap(), "北京");

        person.set("meta.a.b", 1).unwrap();
        assert_eq!(person.get("meta.a.b").unwrap(), Value::Int(1));

        person.set("extra.color", "red").unwrap();
        assert_eq!(person.get_string("extra.color").unwrap(), "red");
        assert_eq!(person.pojo().unwrap().extra["color"], "red");
    }

    #[test]
    fn non_instantiable_intermediates_fail() {
        let mut person = proxy(Person::default());
        let err = person.set("scores[0]", 1).unwrap_err();
        assert!(matches!(
            err,
            PropertyError::Materialize {
                source: MaterializeError::NotInstantiable { .. },
                ..
            }
        ));
        assert!(person.pojo().unwrap().scores.is_none());
    }

    #[test]
    fn write_failures() {
        let mut person = proxy(zhang_san());

        assert!(person.get("nope").unwrap().is_null());
        assert!(matches!(
            person.set("nope", 1),
            Err(PropertyError::NoSuchProperty { property, .. }) if property == "nope"
        ));
        assert!(matches!(
            person.set("name.first", "x"),
            Err(PropertyError::NotTraversable { .. })
        ));
        assert!(matches!(
            person.set("display.x", "x"),
            Err(PropertyError::NotTraversable { .. })
        ));
        assert!(matches!(
            person.set("hobbies[5]", "x"),
            Err(PropertyError::IndexOutOfBounds { index: 5, len: 2, .. })
        ));
        assert!(matches!(person.set("a..b", 1), Err(PropertyError::Parse(_))));
    }

    #[test]
    fn failed_writes_leave_the_target_unchanged() {
        let mut seed = Person::default();
        seed.hobbies = vec!["reading".to_owned()];
        seed.meta = Value::from_iter([("kept", Value::Int(1))]);
        let mut person = proxy(seed);
        let records = recorder(&person);
        let before = person.pojo().unwrap().reflect_value();

        let cases = [
            ("address.nope", "no such property"),
            ("address.city.x", "not traversable"),
            ("address.zip.x", "materialize"),
            ("meta.a[0]", "not traversable"),
            ("meta.a.b[0]", "not traversable"),
            ("meta.kept.x", "not traversable"),
            ("scores[0]", "materialize"),
            ("extra.k.x", "materialize"),
            ("display.x", "not traversable"),
            ("hobbies[5]", "index out of bounds"),
            ("hobbies[0].x", "not traversable"),
        ];
        for (path, expected) in cases {
            let err = person.set(path, 1).unwrap_err();
            let kind = match err {
                PropertyError::NoSuchProperty { .. } => "no such property",
                PropertyError::NotTraversable { .. } => "not traversable",
                PropertyError::Materialize { .. } => "materialize",
                PropertyError::IndexOutOfBounds { .. } => "index out of bounds",
                other => panic!("`{path}` failed with {other}"),
            };
            assert_eq!(kind, expected, "{path}");
            assert_eq!(person.pojo().unwrap().reflect_value(), before, "{path}");
        }

        let target = person.pojo().unwrap();
        assert!(target.address.is_none());
        assert!(target.scores.is_none());
        assert!(target.extra.is_empty());
        assert!(records.lock().unwrap().is_empty());
    }

    #[test]
    fn missing_paths_read_as_defaults() {
        let person = proxy(zhang_san());
        for path in ["missing.path", "name.x", "address.city.x", "hobbies[0].x"] {
            assert!(person.get(path).unwrap().is_null(), "{path}");
            assert_eq!(person.get_string(path).unwrap(), "", "{path}");
            assert_eq!(person.get_decimal(path).unwrap(), Decimal::ZERO, "{path}");
        }
    }

    #[test]
    fn accessors_take_precedence() {
        let mut person = proxy(zhang_san());
        assert_eq!(person.get_string("display").unwrap(), "张三 (18)");

        person.set("nick_name", "小张").unwrap();
        assert_eq!(person.get_string("name").unwrap(), "小张");
        assert!(person.get("nick_name").unwrap().is_null());

        let map = person.to_map();
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["name", "age", "address", "hobbies", "scores", "extra", "balance", "meta", "display"]
        );
        assert_eq!(map["display"], Value::from("小张 (18)"));
    }

    #[test]
    fn reflected_values_move_in() {
        let mut person = proxy(Person::default());
        let address = Address {
            city: "广州".to_owned(),
            zip: Some("510000".to_owned()),
        };
        person.set_reflect("address", address.clone()).unwrap();
        assert_eq!(person.pojo().unwrap().address, Some(address));

        person.set_reflect("age", String::from("33")).unwrap();
        assert_eq!(person.get_long("age").unwrap(), 33);
    }

    #[test]
    fn empty_proxy() {
        let mut person = PropertyProxy::<Person>::empty();
        assert!(person.is_empty());
        assert!(person.get("name").unwrap().is_null());
        assert!(person.set("name", "x").is_ok());
        assert!(person.get("a..b").is_err());
        assert!(person.set("", "x").is_err());
        assert!(person.to_map().is_empty());
        assert!(person.into_pojo().is_none());
    }

    #[test]
    fn custom_cache() {
        let cache = Arc::new(AccessorCache::new());
        let person = proxy(zhang_san()).with_cache(Arc::clone(&cache));
        assert_eq!(cache.len(), 0);
        assert_eq!(person.get_string("name").unwrap(), "张三");
        assert!(cache.len() >= 1);
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_views() {
        #[derive(serde::Deserialize)]
        struct City {
            city: String,
        }

        #[derive(serde::Deserialize)]
        struct Summary {
            name: String,
            age: u8,
            address: Option<City>,
        }

        let person = proxy(zhang_san());
        let text = person.to_string();
        assert!(text.starts_with(r#"{"name":"张三","age":18,"address":{"city":"上海","zip":null}"#));

        let summary: Summary = person.to_pojo().unwrap();
        assert_eq!(summary.name, "张三");
        assert_eq!(summary.age, 18);
        assert_eq!(summary.address.map(|a| a.city).as_deref(), Some("上海"));

        assert_eq!(PropertyProxy::<Person>::empty().to_string(), "null");
    }
}
