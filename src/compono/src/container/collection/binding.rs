use std::error::Error;
use std::marker::PhantomData;

use crate::container::collection::{ServiceCollection, ServiceDescriptor};
use crate::container::resolver::Resolver;
use crate::container::Managed;
use crate::factory::closure::ClosureFactory;
use crate::factory::instance::InstanceFactory;
use crate::factory::TypedFactory;
use crate::key;
use crate::scope::Lifetime;

/// Starts a registration of a service of type `T`.
///
/// # Examples
///
/// ```rust
/// # use compono::prelude::*;
/// let mut services = ServiceCollection::new();
///
/// bind::<&'static str>()
///     .named("greeting")
///     .to_instance("hello")
///     .add_to(&mut services);
///
/// bind::<String>()
///     .to_factory(|r: &dyn Resolver| {
///         r.get_named::<&'static str>("greeting").map(|s| s.to_uppercase())
///     })
///     .as_scoped()
///     .add_to(&mut services);
/// ```
pub fn bind<T>() -> MetadataBinding<T>
where
    T: Managed,
{
    MetadataBinding::new(None)
}

/// A registration whose source of objects is not chosen yet.
pub struct MetadataBinding<T>
where
    T: Managed,
{
    name: Option<&'static str>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> MetadataBinding<T>
where
    T: Managed,
{
    fn new(name: Option<&'static str>) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub fn named(self, name: &'static str) -> Self {
        Self::new(Some(name))
    }

    /// Binds to a prebuilt instance. The binding is a singleton unless
    /// changed later.
    pub fn to_instance(self, instance: T) -> FactoryBinding<T, InstanceFactory<T>>
    where
        T: Clone,
    {
        FactoryBinding::new(InstanceFactory::new(instance), self.name, Lifetime::Singleton)
    }

    /// Binds to a factory closure. The binding is transient unless changed
    /// later.
    pub fn to_factory<F, E>(self, factory: F) -> FactoryBinding<T, ClosureFactory<T, F>>
    where
        F: Fn(&dyn Resolver) -> Result<T, E> + Send + Sync + 'static,
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        FactoryBinding::new(ClosureFactory::new(factory), self.name, Lifetime::Transient)
    }

    /// Binds to any [`TypedFactory`]. The binding is transient unless changed
    /// later.
    pub fn to<P>(self, factory: P) -> FactoryBinding<T, P>
    where
        P: TypedFactory<Output = T>,
    {
        FactoryBinding::new(factory, self.name, Lifetime::Transient)
    }
}

/// A registration with a known factory, ready to be added to a
/// [`ServiceCollection`].
pub struct FactoryBinding<T, P>
where
    T: Managed,
    P: TypedFactory<Output = T>,
{
    factory: P,
    name: Option<&'static str>,
    lifetime: Lifetime,
}

impl<T, P> FactoryBinding<T, P>
where
    T: Managed,
    P: TypedFactory<Output = T>,
{
    fn new(factory: P, name: Option<&'static str>, lifetime: Lifetime) -> Self {
        Self {
            factory,
            name,
            lifetime,
        }
    }

    pub fn named(self, name: &'static str) -> Self {
        Self::new(self.factory, Some(name), self.lifetime)
    }

    pub fn within(self, lifetime: Lifetime) -> Self {
        Self::new(self.factory, self.name, lifetime)
    }

    pub fn as_singleton(self) -> Self {
        self.within(Lifetime::Singleton)
    }

    pub fn as_scoped(self) -> Self {
        self.within(Lifetime::Scoped)
    }

    pub fn as_transient(self) -> Self {
        self.within(Lifetime::Transient)
    }

    pub fn into_descriptor(self) -> ServiceDescriptor {
        let key = match self.name {
            Some(name) => key::named::<T>(name),
            None => key::of::<T>(),
        };
        ServiceDescriptor::new(key, self.factory, self.lifetime)
    }

    /// Appends the registration. An earlier registration of the same key is
    /// kept but shadowed.
    pub fn add_to(self, services: &mut ServiceCollection) {
        services.add(self.into_descriptor());
    }

    /// Appends the registration only if the key is not registered yet.
    pub fn try_add_to(self, services: &mut ServiceCollection) -> bool {
        services.try_add(self.into_descriptor())
    }
}
