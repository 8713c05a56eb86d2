use std::error::Error;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::container::resolver::{
    ContextForwardingResolverProxy, ResolveError, Resolver, TypedResolver,
};
use crate::container::Managed;
use crate::factory::context::CallContext;
use crate::factory::TypedFactory;

/// A closure which receives a [`Resolver`] and constructs a service.
///
/// Closures of `Fn(&dyn Resolver) -> Result<T, E> + Send + Sync + 'static`
/// are [`FactoryFn`]s. An error `E` which is itself a [`ResolveError`], such
/// as one raised by a missing dependency and forwarded with `?`, is reported
/// unchanged. Any other error becomes [`ResolveError::ObjectConstruction`].
pub trait FactoryFn
where
    Self: Fn(&dyn Resolver) -> Result<Self::Constructed, Self::Error>,
    Self: Send + Sync + 'static,
{
    type Constructed: Managed;

    type Error: Into<Box<dyn Error + Send + Sync>>;
}

impl<F, T, E> FactoryFn for F
where
    T: Managed,
    E: Into<Box<dyn Error + Send + Sync>>,
    Self: Fn(&dyn Resolver) -> Result<T, E>,
    Self: Send + Sync + 'static,
{
    type Constructed = T;

    type Error = E;
}

/// A [`Factory`] which constructs services by calling a [`FactoryFn`].
///
/// # Examples
///
/// ```rust
/// # use std::convert::Infallible;
/// # use compono::container::resolver::Resolver;
/// # use compono::factory::closure::ClosureFactory;
/// let factory = ClosureFactory::new(|_: &dyn Resolver| Ok::<_, Infallible>(42i32));
/// ```
///
/// [`Factory`]: crate::factory::Factory
pub struct ClosureFactory<T, F>
where
    T: Managed,
    F: FactoryFn<Constructed = T>,
{
    closure: F,
    _marker: PhantomData<fn() -> T>,
}

impl<T, F> ClosureFactory<T, F>
where
    T: Managed,
    F: FactoryFn<Constructed = T>,
{
    pub fn new(closure: F) -> Self {
        Self {
            closure,
            _marker: PhantomData,
        }
    }
}

impl<T, F> Debug for ClosureFactory<T, F>
where
    T: Managed,
    F: FactoryFn<Constructed = T>,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ClosureFactory<T, F>").finish_non_exhaustive()
    }
}

impl<T, F> TypedFactory for ClosureFactory<T, F>
where
    T: Managed,
    F: FactoryFn<Constructed = T>,
{
    type Output = T;

    fn create<R>(
        &self,
        resolver: &R,
        context: &CallContext<'_>,
    ) -> Result<Self::Output, ResolveError>
    where
        R: TypedResolver + ?Sized,
    {
        let resolver = ContextForwardingResolverProxy::new(resolver, context);
        (self.closure)(&resolver).map_err(|err| {
            let err: Box<dyn Error + Send + Sync> = err.into();
            match err.downcast::<ResolveError>() {
                Ok(err) => *err,
                Err(err) => ResolveError::ObjectConstruction {
                    key: *context.key(),
                    source: Arc::from(err),
                },
            }
        })
    }
}
