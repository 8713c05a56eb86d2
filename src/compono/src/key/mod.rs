//! Keys identifying services registered in a container.
//!
//! A key is made of the service's target type and an optional name. Two
//! registrations of the same key are not a conflict: the one added last is
//! resolved by default, and all of them can be collected with
//! [`TypedResolver::get_all`].
//!
//! [`TypedResolver::get_all`]: crate::container::resolver::TypedResolver::get_all

use std::any::{self, TypeId};
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::container::Managed;

/// A type-erased key of a service.
#[derive(Clone, Copy)]
pub struct ServiceKey {
    target: TypeId,
    target_name: &'static str,
    name: Option<&'static str>,
}

impl ServiceKey {
    fn new<T: Managed>(name: Option<&'static str>) -> Self {
        Self {
            target: TypeId::of::<T>(),
            target_name: any::type_name::<T>(),
            name,
        }
    }

    pub fn target(&self) -> TypeId {
        self.target
    }

    pub fn target_name(&self) -> &'static str {
        self.target_name
    }

    pub fn name(&self) -> Option<&'static str> {
        self.name
    }
}

impl PartialEq for ServiceKey {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target && self.name == other.name
    }
}

impl Eq for ServiceKey {}

impl Hash for ServiceKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.target.hash(state);
        self.name.hash(state);
    }
}

impl Debug for ServiceKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(self, f)
    }
}

impl Display for ServiceKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.name {
            Some(name) => write!(f, "{}@{:?}", self.target_name, name),
            None => write!(f, "{}", self.target_name),
        }
    }
}

/// A key statically bound to its target type `T`.
pub struct Key<T: Managed> {
    erased: ServiceKey,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Managed> Key<T> {
    fn new(name: Option<&'static str>) -> Self {
        Self {
            erased: ServiceKey::new::<T>(name),
            _marker: PhantomData,
        }
    }

    pub fn erased(&self) -> &ServiceKey {
        &self.erased
    }

    pub fn name(&self) -> Option<&'static str> {
        self.erased.name
    }
}

impl<T: Managed> Clone for Key<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Managed> Copy for Key<T> {}

impl<T: Managed> PartialEq for Key<T> {
    fn eq(&self, other: &Self) -> bool {
        self.erased == other.erased
    }
}

impl<T: Managed> Eq for Key<T> {}

impl<T: Managed> Debug for Key<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.erased, f)
    }
}

impl<T: Managed> From<Key<T>> for ServiceKey {
    fn from(key: Key<T>) -> Self {
        key.erased
    }
}

/// Returns the key of the unnamed service of type `T`.
pub fn of<T: Managed>() -> Key<T> {
    Key::new(None)
}

/// Returns the key of the service of type `T` registered under `name`.
pub fn named<T: Managed>(name: &'static str) -> Key<T> {
    Key::new(Some(name))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn key_target_succeeds() {
        assert_eq!(of::<i32>().erased().target(), TypeId::of::<i32>());
        assert_eq!(named::<i32>("name").erased().target(), TypeId::of::<i32>());
        assert_eq!(of::<i32>().name(), None);
        assert_eq!(named::<i32>("name").name(), Some("name"));
    }

    #[test]
    fn key_eq_succeeds() {
        assert_eq!(of::<i32>(), of::<i32>());
        assert_eq!(named::<i32>("name"), named::<i32>("name"));
        assert_ne!(of::<i32>(), named::<i32>("name"));
        assert_ne!(named::<i32>("name1"), named::<i32>("name2"));
        assert_ne!(of::<i32>().erased(), of::<i64>().erased());
    }

    #[test]
    fn key_display_succeeds() {
        assert_eq!(of::<i32>().erased().to_string(), "i32");
        assert_eq!(named::<i32>("name").erased().to_string(), "i32@\"name\"");
        assert_eq!(
            format!("{:?}", of::<Arc<str>>()),
            "alloc::sync::Arc<str>"
        );
    }
}
