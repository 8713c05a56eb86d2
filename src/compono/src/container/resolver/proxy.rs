use crate::container::resolver::{ResolveError, Resolver, TypedResolver};
use crate::container::Managed;
use crate::factory::context::CallContext;
use crate::key::ServiceKey;

/// A [`Resolver`] handed to factories, which records every request as a
/// dependency of the service being constructed.
pub struct ContextForwardingResolverProxy<'a, R>
where
    R: TypedResolver + ?Sized,
{
    inner: &'a R,
    context: &'a CallContext<'a>,
}

impl<'a, R> ContextForwardingResolverProxy<'a, R>
where
    R: TypedResolver + ?Sized,
{
    pub fn new(inner: &'a R, context: &'a CallContext<'a>) -> Self {
        Self { inner, context }
    }
}

impl<R> Resolver for ContextForwardingResolverProxy<'_, R>
where
    R: TypedResolver + ?Sized,
{
    fn dyn_resolve(&self, key: &ServiceKey) -> Result<Box<dyn Managed>, ResolveError> {
        self.dyn_resolve_dependency(key, self.context)
    }

    fn dyn_resolve_dependency<'a>(
        &self,
        key: &ServiceKey,
        context: &'a CallContext<'a>,
    ) -> Result<Box<dyn Managed>, ResolveError> {
        self.inner.dyn_resolve_dependency(key, context)
    }

    fn dyn_resolve_all(&self, key: &ServiceKey) -> Result<Vec<Box<dyn Managed>>, ResolveError> {
        self.dyn_resolve_all_dependencies(key, self.context)
    }

    fn dyn_resolve_all_dependencies<'a>(
        &self,
        key: &ServiceKey,
        context: &'a CallContext<'a>,
    ) -> Result<Vec<Box<dyn Managed>>, ResolveError> {
        self.inner.dyn_resolve_all_dependencies(key, context)
    }

    fn contains(&self, key: &ServiceKey) -> bool {
        self.inner.contains(key)
    }
}
