pub mod closure;
pub mod context;
pub mod instance;

use std::fmt::Debug;

use crate::container::resolver::{ResolveError, Resolver, TypedResolver};
use crate::container::Managed;
use crate::factory::context::CallContext;

/// A universal factory which constructs services of one type.
///
/// A [`Factory`] is asked for a new object whenever a provider has no cached
/// instance to hand out, and fetches the dependencies of that object from the
/// given [`Resolver`]. Whether the object is cached afterwards is decided by
/// the [`Lifetime`] of the registration, not by the factory.
///
/// Usually, you don't need to implement [`Factory`] manually, since this is
/// automatically done by [`TypedFactory`]'s blanket implementation.
///
/// [`Lifetime`]: crate::scope::Lifetime
pub trait Factory: Debug + Send + Sync + 'static {
    /// Creates a new type-erased object.
    ///
    /// # Errors
    ///
    /// Returns an error if a dependency can't be resolved or the object
    /// construction fails.
    fn dyn_create(
        &self,
        resolver: &dyn Resolver,
        context: &CallContext<'_>,
    ) -> Result<Box<dyn Managed>, ResolveError>;
}

/// A static variant of the [`Factory`] trait.
pub trait TypedFactory: Factory {
    type Output: Managed;

    /// Creates a new object of type [`TypedFactory::Output`].
    ///
    /// # Errors
    ///
    /// Returns an error if a dependency can't be resolved or the object
    /// construction fails.
    fn create<R>(
        &self,
        resolver: &R,
        context: &CallContext<'_>,
    ) -> Result<Self::Output, ResolveError>
    where
        R: TypedResolver + ?Sized;
}

impl<T: TypedFactory> Factory for T {
    fn dyn_create(
        &self,
        resolver: &dyn Resolver,
        context: &CallContext<'_>,
    ) -> Result<Box<dyn Managed>, ResolveError> {
        self.create(resolver, context)
            .map(|obj| -> Box<dyn Managed> { Box::new(obj) })
    }
}
