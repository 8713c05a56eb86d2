pub mod collection;
pub mod resolver;

mod core;
mod handle;

use crate::util::any::AsAny;

pub use collection::{ServiceCollection, ServiceDescriptor};
pub use handle::{ProviderError, ProviderOptions, ServiceProvider, ServiceScope};

/// A value a container can hand out.
///
/// Cached instances are cloned on every request, so services meant to be
/// shared are usually registered as `Arc<T>` or `Arc<dyn Trait>`.
pub trait Managed: AsAny + Send + Sync + 'static {
    fn dyn_clone(&self) -> Box<dyn Managed>;
}

impl<T> Managed for T
where
    T: Clone + Send + Sync + 'static,
{
    fn dyn_clone(&self) -> Box<dyn Managed> {
        Box::new(self.clone())
    }
}
