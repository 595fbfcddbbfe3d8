use core::error::Error;
use core::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use prop_reflect::{Reflect, Value};

/// Error returned by a failing listener.
pub type ListenerError = Box<dyn Error + Send + Sync>;

type ListenerFn = dyn Fn(&PropertyChangeEvent<'_>) -> Result<(), ListenerError> + Send + Sync;

/// Identifies a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A property changed through a proxy write.
///
/// `property_name` is the full path that was written.
#[derive(Debug, Clone, Copy)]
pub struct PropertyChangeEvent<'a> {
    pub property_name: &'a str,
    pub old_value: &'a Value,
    pub new_value: &'a Value,
    pub source: &'a dyn Reflect,
}

#[derive(Default)]
struct Inner {
    next_id: AtomicU64,
    listeners: RwLock<Arc<[(ListenerId, Arc<ListenerFn>)]>>,
}

/// A copy-on-write list of property change listeners.
///
/// Clones share the same list. Firing iterates over a snapshot taken
/// without holding the lock, so listeners may register or remove
/// listeners, which only affects later events.
///
/// # Examples
///
/// ```
/// use prop_proxy::ChangeSupport;
/// use std::sync::{Arc, Mutex};
///
/// let support = ChangeSupport::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
///
/// let sink = Arc::clone(&seen);
/// let id = support.add(move |event| {
///     sink.lock().unwrap().push(event.property_name.to_owned());
///     Ok(())
/// });
/// assert_eq!(support.len(), 1);
/// assert!(support.remove(id));
/// assert!(!support.remove(id));
/// ```
#[derive(Clone, Default)]
pub struct ChangeSupport {
    inner: Arc<Inner>,
}

impl ChangeSupport {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` after all current listeners.
    pub fn add<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&PropertyChangeEvent<'_>) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        let id = ListenerId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let mut listeners = self
            .inner
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let mut next = Vec::with_capacity(listeners.len() + 1);
        next.extend(listeners.iter().cloned());
        next.push((id, Arc::new(listener) as Arc<ListenerFn>));
        *listeners = next.into();
        id
    }

    /// Unregisters a listener, `false` if it was not registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut listeners = self
            .inner
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if !listeners.iter().any(|(other, _)| *other == id) {
            return false;
        }
        *listeners = listeners
            .iter()
            .filter(|(other, _)| *other != id)
            .cloned()
            .collect();
        true
    }

    /// Notifies every listener in registration order.
    ///
    /// The first failing listener stops the notification.
    pub fn fire(&self, event: &PropertyChangeEvent<'_>) -> Result<(), ListenerError> {
        let snapshot = Arc::clone(&self.inner.listeners.read().unwrap_or_else(PoisonError::into_inner));
        log::trace!(
            "`{}` changed from {} to {}, notifying {} listeners",
            event.property_name,
            event.old_value,
            event.new_value,
            snapshot.len()
        );
        snapshot.iter().try_for_each(|(_, listener)| listener(event))
    }

    pub fn len(&self) -> usize {
        self.inner.listeners.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        *self.inner.listeners.write().unwrap_or_else(PoisonError::into_inner) = Arc::default();
    }
}

impl fmt::Debug for ChangeSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeSupport")
            .field("listeners", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    fn event<'a>(name: &'a str, old: &'a Value, new: &'a Value) -> PropertyChangeEvent<'a> {
        PropertyChangeEvent {
            property_name: name,
            old_value: old,
            new_value: new,
            source: new,
        }
    }

    #[test]
    fn fires_in_registration_order() {
        let support = ChangeSupport::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        for tag in ["a", "b", "c"] {
            let log = Arc::clone(&log);
            support.add(move |_| {
                log.lock().unwrap().push(tag);
                Ok(())
            });
        }

        let (old, new) = (Value::Int(1), Value::Int(2));
        support.fire(&event("x", &old, &new)).unwrap();
        assert_eq!(*log.lock().unwrap(), ["a", "b", "c"]);
    }

    #[test]
    fn failing_listener_stops_the_rest() {
        let support = ChangeSupport::new();
        let reached = Arc::new(Mutex::new(false));
        support.add(|_| Err("rejected".into()));
        let flag = Arc::clone(&reached);
        support.add(move |_| {
            *flag.lock().unwrap() = true;
            Ok(())
        });

        let (old, new) = (Value::Null, Value::Int(2));
        let err = support.fire(&event("x", &old, &new)).unwrap_err();
        assert_eq!(err.to_string(), "rejected");
        assert!(!*reached.lock().unwrap());
    }

    #[test]
    fn registration_during_fire_affects_next_event() {
        let support = ChangeSupport::new();
        let calls = Arc::new(Mutex::new(0));

        let handle = support.clone();
        let counter = Arc::clone(&calls);
        support.add(move |_| {
            let counter = Arc::clone(&counter);
            handle.add(move |_| {
                *counter.lock().unwrap() += 1;
                Ok(())
            });
            Ok(())
        });

        let (old, new) = (Value::Null, Value::Int(1));
        support.fire(&event("x", &old, &new)).unwrap();
        assert_eq!(*calls.lock().unwrap(), 0);
        assert_eq!(support.len(), 2);

        support.fire(&event("x", &old, &new)).unwrap();
        assert_eq!(*calls.lock().unwrap(), 1);
        assert_eq!(support.len(), 3);
    }
}
