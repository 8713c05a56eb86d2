use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::container::resolver::TypedResolver;
use crate::container::{Managed, ProviderOptions, ServiceCollection, ServiceProvider};
use crate::error::Error;
use crate::module::{BoxError, Module};

/// An ordered list of modules, as produced by
/// [`ComponentBuilder::build`](crate::builder::ComponentBuilder::build).
///
/// A component is itself a [`Module`] whose nested modules are its members,
/// so components can be nested into other builders.
#[derive(Default)]
pub struct Component {
    modules: Vec<Box<dyn Module>>,
}

impl Component {
    pub fn new() -> Self {
        Default::default()
    }

    pub(crate) fn from_modules(modules: Vec<Box<dyn Module>>) -> Self {
        Self { modules }
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Module> {
        self.modules.iter().map(|module| -> &dyn Module { &**module })
    }

    pub fn into_modules(self) -> Vec<Box<dyn Module>> {
        self.modules
    }

    pub fn build_service_provider(&self) -> Result<ServiceProvider, Error> {
        self.build_service_provider_into(ServiceCollection::new())
    }

    /// Loads every module into `services` after whatever it already holds,
    /// then builds a provider from the result.
    pub fn build_service_provider_into(
        &self,
        services: ServiceCollection,
    ) -> Result<ServiceProvider, Error> {
        self.build_service_provider_with(services, ProviderOptions::default())
    }

    pub fn build_service_provider_with(
        &self,
        mut services: ServiceCollection,
        options: ProviderOptions,
    ) -> Result<ServiceProvider, Error> {
        self.load(&mut services)?;
        Ok(ServiceProvider::build_with(services, options)?)
    }

    /// Builds a throwaway provider and resolves one `T` from it.
    pub fn resolve<T: Managed>(&self) -> Result<T, Error> {
        let provider = self.build_service_provider()?;
        Ok(provider.get::<T>()?)
    }
}

impl Module for Component {
    fn configure(&self, _services: &mut ServiceCollection) -> Result<(), BoxError> {
        Ok(())
    }

    fn nested_modules(&self) -> &[Box<dyn Module>] {
        &self.modules
    }
}

impl Debug for Component {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_list()
            .entries(self.modules.iter().map(|module| module.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::container::resolver::ResolveError;

    use super::*;

    struct Answer(i32);

    impl Module for Answer {
        fn name(&self) -> &'static str {
            "answer"
        }

        fn configure(&self, services: &mut ServiceCollection) -> Result<(), BoxError> {
            services.add_singleton_instance(self.0);
            Ok(())
        }
    }

    #[test]
    fn component_resolve_succeeds() {
        let component =
            Component::from_modules(vec![Box::new(Answer(1)), Box::new(Answer(42))]);
        assert_eq!(component.len(), 2);
        assert_eq!(format!("{component:?}"), r#"["answer", "answer"]"#);
        assert_eq!(component.resolve::<i32>().unwrap(), 42);
    }

    #[test]
    fn component_resolve_fails_when_empty() {
        let component = Component::new();
        assert!(component.is_empty());
        assert!(matches!(
            component.resolve::<i32>(),
            Err(Error::Resolution {
                source: ResolveError::NotFound { .. },
                ..
            })
        ));
    }

    #[test]
    fn component_build_service_provider_into_succeeds_when_collection_is_not_empty() {
        let mut services = ServiceCollection::new();
        services.add_singleton_instance(7i64);

        let inner = Component::from_modules(vec![Box::new(Answer(1))]);
        let outer = Component::from_modules(vec![Box::new(inner)]);
        let provider = outer.build_service_provider_into(services).unwrap();
        assert_eq!(provider.get::<i64>().unwrap(), 7);
        assert_eq!(provider.get::<i32>().unwrap(), 1);
    }
}
