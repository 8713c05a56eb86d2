mod proxy;

use std::error::Error;
use std::sync::Arc;

use snafu::prelude::*;

use crate::container::Managed;
use crate::factory::context::CallContext;
use crate::key::{self, Key, ServiceKey};
use crate::util::any::Downcast;

pub(crate) use proxy::ContextForwardingResolverProxy;

#[cfg_attr(test, mockall::automock)]
pub trait Resolver: Send + Sync {
    fn dyn_resolve(&self, key: &ServiceKey) -> Result<Box<dyn Managed>, ResolveError>;

    fn dyn_resolve_dependency<'a>(
        &self,
        key: &ServiceKey,
        context: &'a CallContext<'a>,
    ) -> Result<Box<dyn Managed>, ResolveError>;

    fn dyn_resolve_all(&self, key: &ServiceKey) -> Result<Vec<Box<dyn Managed>>, ResolveError>;

    fn dyn_resolve_all_dependencies<'a>(
        &self,
        key: &ServiceKey,
        context: &'a CallContext<'a>,
    ) -> Result<Vec<Box<dyn Managed>>, ResolveError>;

    fn contains(&self, key: &ServiceKey) -> bool;
}

pub trait TypedResolver: Resolver {
    /// Resolves the unnamed service of type `T`. When several registrations
    /// exist, the one added last wins.
    fn get<T>(&self) -> Result<T, ResolveError>
    where
        T: Managed,
    {
        self.get_key(key::of::<T>())
    }

    fn get_named<T>(&self, name: &'static str) -> Result<T, ResolveError>
    where
        T: Managed,
    {
        self.get_key(key::named::<T>(name))
    }

    fn get_key<T>(&self, key: Key<T>) -> Result<T, ResolveError>
    where
        T: Managed,
    {
        self.dyn_resolve(key.erased()).map(downcast_managed::<T>)
    }

    /// Like [`TypedResolver::get`], but a missing registration of `T` yields
    /// `Ok(None)`. Other failures, including a missing dependency of `T`,
    /// are still reported.
    fn try_get<T>(&self) -> Result<Option<T>, ResolveError>
    where
        T: Managed,
    {
        let requested = key::of::<T>();
        match self.get_key(requested) {
            Ok(object) => Ok(Some(object)),
            Err(ResolveError::NotFound { key }) if &key == requested.erased() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Resolves every registration of the unnamed service of type `T` in
    /// registration order. Yields an empty [`Vec`] if there is none.
    fn get_all<T>(&self) -> Result<Vec<T>, ResolveError>
    where
        T: Managed,
    {
        self.get_all_key(key::of::<T>())
    }

    fn get_all_named<T>(&self, name: &'static str) -> Result<Vec<T>, ResolveError>
    where
        T: Managed,
    {
        self.get_all_key(key::named::<T>(name))
    }

    fn get_all_key<T>(&self, key: Key<T>) -> Result<Vec<T>, ResolveError>
    where
        T: Managed,
    {
        let objects = self.dyn_resolve_all(key.erased())?;
        Ok(objects.into_iter().map(downcast_managed::<T>).collect())
    }

    fn upcast_dyn(&self) -> &dyn Resolver;
}

impl<T> TypedResolver for T
where
    T: Resolver,
{
    fn upcast_dyn(&self) -> &dyn Resolver {
        self
    }
}

impl TypedResolver for dyn Resolver + '_ {
    fn upcast_dyn(&self) -> &dyn Resolver {
        self
    }
}

fn downcast_managed<T: Managed>(object: Box<dyn Managed>) -> T {
    match object.downcast::<T>() {
        Ok(object) => *object,
        Err(_) => unreachable!("the object's type should be `T`"),
    }
}

#[derive(Debug, Clone, Snafu)]
#[non_exhaustive]
pub enum ResolveError {
    #[snafu(display("could not find any service registered for {key}"))]
    #[non_exhaustive]
    NotFound { key: ServiceKey },
    #[snafu(display("could not construct the service {key} which depends on itself: {path}"))]
    #[non_exhaustive]
    CyclicDependency { key: ServiceKey, path: String },
    #[snafu(display("could not resolve the scoped service {key} from the root provider"))]
    #[non_exhaustive]
    ScopedFromRoot { key: ServiceKey },
    #[snafu(display("could not construct the service {key}"))]
    #[non_exhaustive]
    ObjectConstruction {
        key: ServiceKey,
        source: Arc<dyn Error + Send + Sync>,
    },
}

impl ResolveError {
    /// The key of the service whose resolution failed.
    pub fn key(&self) -> &ServiceKey {
        match self {
            Self::NotFound { key }
            | Self::CyclicDependency { key, .. }
            | Self::ScopedFromRoot { key }
            | Self::ObjectConstruction { key, .. } => key,
        }
    }
}
