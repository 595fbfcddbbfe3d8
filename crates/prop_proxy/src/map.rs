use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;

use prop_reflect::{Reflect, Value};
use prop_value::indexmap::IndexMap;
use prop_value::indexmap::map::{Entry, Iter, Keys, Values};

use crate::Getter;

/// A map with the typed [`Getter`] surface.
///
/// Entries keep their insertion order. Typed reads coerce the stored
/// value and never fail: a missing key reads as its type's default.
///
/// # Examples
///
/// ```
/// use prop_proxy::{Getter, MapProxy};
/// use prop_reflect::Value;
///
/// let mut map = MapProxy::new();
/// map.put("name".to_owned(), Value::from("张三"))
///     .put("age".to_owned(), Value::from(18));
///
/// assert_eq!(map.get_string("name"), "张三");
/// assert_eq!(map.put_if_absent("age".to_owned(), Value::from(20)), Some(&Value::from(18)));
/// assert_eq!(map.size(), 2);
///
/// map.remove("age");
/// assert_eq!(map.get_int_or("age", -1), -1);
/// ```
#[derive(Clone)]
pub struct MapProxy<K = String, V = Value> {
    map: IndexMap<K, V>,
}

/// Wraps `map` in a [`MapProxy`], an absent map becomes an empty one.
pub fn proxy_map<K, V>(map: Option<impl IntoIterator<Item = (K, V)>>) -> MapProxy<K, V>
where
    K: Hash + Eq,
{
    let mut proxy = MapProxy::new();
    proxy.put_all(map);
    proxy
}

impl<K, V> MapProxy<K, V> {
    #[inline]
    pub fn new() -> Self {
        Self {
            map: IndexMap::new(),
        }
    }

    #[inline]
    pub fn key_set(&self) -> Keys<'_, K, V> {
        self.map.keys()
    }

    #[inline]
    pub fn values(&self) -> Values<'_, K, V> {
        self.map.values()
    }

    #[inline]
    pub fn entry_set(&self) -> Iter<'_, K, V> {
        self.map.iter()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) -> &mut Self {
        self.map.clear();
        self
    }

    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.map.values().any(|other| other == value)
    }

    pub fn for_each(&self, mut f: impl FnMut(&K, &V)) {
        self.map.iter().for_each(|(key, value)| f(key, value));
    }

    #[inline]
    pub fn as_map(&self) -> &IndexMap<K, V> {
        &self.map
    }

    #[inline]
    pub fn as_map_mut(&mut self) -> &mut IndexMap<K, V> {
        &mut self.map
    }

    #[inline]
    pub fn into_map(self) -> IndexMap<K, V> {
        self.map
    }
}

impl<K: Hash + Eq, V> MapProxy<K, V> {
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key)
    }

    pub fn get_or_default<Q>(&self, key: &Q, default: V) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.map.get(key).cloned().unwrap_or(default)
    }

    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Inserts or replaces the entry under `key`.
    pub fn put(&mut self, key: K, value: V) -> &mut Self {
        self.map.insert(key, value);
        self
    }

    /// Inserts only if `key` is absent, returning the present value otherwise.
    pub fn put_if_absent(&mut self, key: K, value: V) -> Option<&V> {
        match self.map.entry(key) {
            Entry::Occupied(entry) => Some(&*entry.into_mut()),
            Entry::Vacant(entry) => {
                entry.insert(value);
                None
            }
        }
    }

    pub fn put_all(&mut self, entries: Option<impl IntoIterator<Item = (K, V)>>) -> &mut Self {
        if let Some(entries) = entries {
            self.map.extend(entries);
        }
        self
    }

    /// Removes the entry under `key`, keeping the order of the others.
    pub fn remove<Q>(&mut self, key: &Q) -> &mut Self
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.shift_remove(key);
        self
    }

    pub fn take<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.shift_remove(key)
    }

    /// Converts the entries into another serde type.
    #[cfg(feature = "json")]
    pub fn to_pojo<T>(&self) -> Result<T, crate::CodecError>
    where
        K: serde::Serialize,
        V: serde::Serialize,
        T: serde::de::DeserializeOwned,
    {
        crate::codec::convert(&self.map)
    }
}

impl<K, V, Q> Getter<Q> for MapProxy<K, V>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    V: Reflect,
{
    type Output<T> = T;

    fn get_with<T>(&self, key: &Q, convert: impl FnOnce(&Value) -> T) -> T {
        let Some(value) = self.map.get(key) else {
            return convert(&Value::Null);
        };
        match (value as &dyn Reflect).downcast_ref::<Value>() {
            Some(value) => convert(value),
            None => convert(&value.reflect_value()),
        }
    }
}

impl<K, V> Default for MapProxy<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> From<IndexMap<K, V>> for MapProxy<K, V> {
    #[inline]
    fn from(map: IndexMap<K, V>) -> Self {
        Self { map }
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for MapProxy<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            map: IndexMap::from_iter(iter),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for MapProxy<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.map, f)
    }
}

/// JSON text of the entries.
#[cfg(feature = "json")]
impl<K: serde::Serialize, V: serde::Serialize> fmt::Display for MapProxy<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = crate::codec::encode(&self.map).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use prop_value::rust_decimal::Decimal;

    use super::*;

    fn sample() -> MapProxy {
        proxy_map(Some([
            ("name".to_owned(), Value::from("张三")),
            ("age".to_owned(), Value::from("18")),
            ("score".to_owned(), Value::from(95.5)),
            ("tags".to_owned(), Value::from(vec!["a", "b", "a"])),
        ]))
    }

    #[test]
    fn absent_map_is_empty() {
        let map: MapProxy = proxy_map(None::<Vec<(String, Value)>>);
        assert!(map.is_empty());
        assert_eq!(map.get_string("anything"), "");
        assert_eq!(map.get_decimal("anything"), Decimal::ZERO);
    }

    #[test]
    fn typed_reads_coerce() {
        let map = sample();
        assert_eq!(map.get_int("age"), 18);
        assert_eq!(map.get_decimal("age"), Decimal::from(18));
        assert_eq!(map.get_string("score"), "95.5");
        assert_eq!(map.get_int("name"), 0);
        assert_eq!(map.get_int_or("name", 7), 7);
        assert_eq!(map.get_list("tags").len(), 3);
        assert_eq!(map.get_set("tags").len(), 2);
        assert!(map.get_date("name").is_none());
    }

    #[test]
    fn typed_reads_over_reflected_values() {
        let map: MapProxy<&str, u32> = [("count", 3_u32)].into_iter().collect();
        assert_eq!(map.get_string("count"), "3");
        assert_eq!(map.get_double("count"), 3.0);
        assert!(!map.get_bool("missing"));
    }

    #[test]
    fn fluent_updates_keep_order() {
        let mut map = sample();
        map.remove("age")
            .put("city".to_owned(), Value::from("上海"))
            .put_all(Some([("age".to_owned(), Value::from(20))]));

        let keys: Vec<_> = map.key_set().map(String::as_str).collect();
        assert_eq!(keys, ["name", "score", "tags", "city", "age"]);
        assert_eq!(map.take("city"), Some(Value::from("上海")));
        assert!(!map.contains_key("city"));
        assert!(map.contains_value(&Value::from(20)));
        assert_eq!(map.get_or_default("city", Value::from("北京")), Value::from("北京"));

        assert_eq!(map.put_if_absent("city".to_owned(), Value::from("深圳")), None);
        assert_eq!(map.get("city"), Some(&Value::from("深圳")));

        let mut visited = 0;
        map.for_each(|_, _| visited += 1);
        assert_eq!(visited, map.size());
        assert!(map.clear().is_empty());
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_views() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Person {
            name: String,
            age: u32,
        }

        let mut map = MapProxy::new();
        map.put("name".to_owned(), Value::from("张三"))
            .put("age".to_owned(), Value::from(18));

        assert_eq!(map.to_string(), r#"{"name":"张三","age":18}"#);
        let person: Person = map.to_pojo().unwrap();
        assert_eq!(
            person,
            Person {
                name: "张三".to_owned(),
                age: 18
            }
        );
    }
}
