mod binding;
mod descriptor_map;

use std::error::Error;
use std::sync::Arc;

use crate::container::resolver::Resolver;
use crate::container::Managed;
use crate::factory::{Factory, TypedFactory};
use crate::key::{Key, ServiceKey};
use crate::scope::Lifetime;

pub use binding::{bind, FactoryBinding, MetadataBinding};
pub(crate) use descriptor_map::DescriptorMap;

/// A single registration: which key it serves, how long created objects
/// live, and how to create them.
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    key: ServiceKey,
    lifetime: Lifetime,
    factory: Arc<dyn Factory>,
}

impl ServiceDescriptor {
    pub fn new<T, P>(key: Key<T>, factory: P, lifetime: Lifetime) -> Self
    where
        T: Managed,
        P: TypedFactory<Output = T>,
    {
        Self {
            key: key.into(),
            lifetime,
            factory: Arc::new(factory),
        }
    }

    pub fn key(&self) -> &ServiceKey {
        &self.key
    }

    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    pub fn factory(&self) -> &dyn Factory {
        self.factory.as_ref()
    }
}

/// An ordered list of registrations that modules write into.
///
/// Registering a key twice is allowed. The later registration shadows the
/// earlier one when a single object is requested, and both are returned when
/// all objects are requested.
#[derive(Debug, Clone, Default)]
pub struct ServiceCollection {
    descriptors: Vec<ServiceDescriptor>,
}

impl ServiceCollection {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add(&mut self, descriptor: ServiceDescriptor) -> &mut Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Adds `descriptor` unless its key is already registered. Returns whether
    /// it was added.
    pub fn try_add(&mut self, descriptor: ServiceDescriptor) -> bool {
        if self.contains(descriptor.key()) {
            false
        } else {
            self.descriptors.push(descriptor);
            true
        }
    }

    pub fn add_singleton_instance<T>(&mut self, instance: T) -> &mut Self
    where
        T: Managed + Clone,
    {
        bind::<T>().to_instance(instance).add_to(self);
        self
    }

    pub fn add_singleton<T, F, E>(&mut self, factory: F) -> &mut Self
    where
        T: Managed,
        F: Fn(&dyn Resolver) -> Result<T, E> + Send + Sync + 'static,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        bind::<T>().to_factory(factory).as_singleton().add_to(self);
        self
    }

    pub fn add_scoped<T, F, E>(&mut self, factory: F) -> &mut Self
    where
        T: Managed,
        F: Fn(&dyn Resolver) -> Result<T, E> + Send + Sync + 'static,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        bind::<T>().to_factory(factory).as_scoped().add_to(self);
        self
    }

    pub fn add_transient<T, F, E>(&mut self, factory: F) -> &mut Self
    where
        T: Managed,
        F: Fn(&dyn Resolver) -> Result<T, E> + Send + Sync + 'static,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        bind::<T>().to_factory(factory).as_transient().add_to(self);
        self
    }

    pub fn contains(&self, key: &ServiceKey) -> bool {
        self.descriptors.iter().any(|d| d.key() == key)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceDescriptor> {
        self.descriptors.iter()
    }

    pub(crate) fn into_descriptor_map(self) -> DescriptorMap {
        DescriptorMap::new(self.descriptors)
    }
}
