use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::container::resolver::{ResolveError, TypedResolver};
use crate::container::Managed;
use crate::factory::context::CallContext;
use crate::factory::TypedFactory;

/// A [`Factory`] handing out clones of a prebuilt instance.
///
/// [`Factory`]: crate::factory::Factory
pub struct InstanceFactory<T>
where
    T: Managed + Clone,
{
    instance: T,
}

impl<T> InstanceFactory<T>
where
    T: Managed + Clone,
{
    pub fn new(instance: T) -> Self {
        Self { instance }
    }
}

impl<T> Debug for InstanceFactory<T>
where
    T: Managed + Clone,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("InstanceFactory<T>").finish_non_exhaustive()
    }
}

impl<T> TypedFactory for InstanceFactory<T>
where
    T: Managed + Clone,
{
    type Output = T;

    fn create<R>(
        &self,
        _resolver: &R,
        _context: &CallContext<'_>,
    ) -> Result<Self::Output, ResolveError>
    where
        R: TypedResolver + ?Sized,
    {
        Ok(self.instance.clone())
    }
}
