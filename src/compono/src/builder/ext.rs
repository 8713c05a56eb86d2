use crate::builder::{ComponentBuilder, ModuleConfigurationBuilder};
use crate::component::Component;
use crate::container::{Managed, ServiceCollection, ServiceProvider};
use crate::error::Error;
use crate::module::{ConfigurableModule, Module};

/// Continues a build from a component that may have failed to build.
///
/// An upstream error is returned as is, and nothing is loaded or built.
pub trait ComponentResultExt {
    fn build_service_provider(self) -> Result<ServiceProvider, Error>;

    fn build_service_provider_into(
        self,
        services: ServiceCollection,
    ) -> Result<ServiceProvider, Error>;

    fn resolve<T: Managed>(self) -> Result<T, Error>;
}

impl ComponentResultExt for Result<Component, Error> {
    fn build_service_provider(self) -> Result<ServiceProvider, Error> {
        self.and_then(|component| component.build_service_provider())
    }

    fn build_service_provider_into(
        self,
        services: ServiceCollection,
    ) -> Result<ServiceProvider, Error> {
        self.and_then(|component| component.build_service_provider_into(services))
    }

    fn resolve<T: Managed>(self) -> Result<T, Error> {
        self.and_then(|component| component.resolve::<T>())
    }
}

/// Chains [`ComponentBuilder`] calls over the [`Result`] the fallible ones
/// return.
pub trait BuilderResultExt: Sized {
    fn with_module<M>(
        self,
        configure: impl FnOnce(&mut M::Configuration),
    ) -> Result<ComponentBuilder, Error>
    where
        M: ConfigurableModule;

    fn with_nested_module<M>(
        self,
        configure: impl FnOnce(&mut M::Configuration),
        nested: Component,
    ) -> Result<ComponentBuilder, Error>
    where
        M: ConfigurableModule;

    fn with_module_from_builder<M>(
        self,
        configure: impl FnOnce(ModuleConfigurationBuilder<M>) -> ModuleConfigurationBuilder<M>,
    ) -> Result<ComponentBuilder, Error>
    where
        M: ConfigurableModule;

    fn with_module_instance<M: Module>(self, module: M) -> Result<ComponentBuilder, Error>;

    fn build(self) -> Result<Component, Error>;

    fn build_service_provider(self) -> Result<ServiceProvider, Error>;

    fn build_service_provider_into(
        self,
        services: ServiceCollection,
    ) -> Result<ServiceProvider, Error>;

    fn build_service<T: Managed>(self) -> Result<T, Error>;
}

impl BuilderResultExt for Result<ComponentBuilder, Error> {
    fn with_module<M>(
        self,
        configure: impl FnOnce(&mut M::Configuration),
    ) -> Result<ComponentBuilder, Error>
    where
        M: ConfigurableModule,
    {
        self.and_then(|builder| builder.with_module::<M>(configure))
    }

    fn with_nested_module<M>(
        self,
        configure: impl FnOnce(&mut M::Configuration),
        nested: Component,
    ) -> Result<ComponentBuilder, Error>
    where
        M: ConfigurableModule,
    {
        self.and_then(|builder| builder.with_nested_module::<M>(configure, nested))
    }

    fn with_module_from_builder<M>(
        self,
        configure: impl FnOnce(ModuleConfigurationBuilder<M>) -> ModuleConfigurationBuilder<M>,
    ) -> Result<ComponentBuilder, Error>
    where
        M: ConfigurableModule,
    {
        self.and_then(|builder| builder.with_module_from_builder::<M>(configure))
    }

    fn with_module_instance<M: Module>(self, module: M) -> Result<ComponentBuilder, Error> {
        self.map(|builder| builder.with_module_instance(module))
    }

    fn build(self) -> Result<Component, Error> {
        self.and_then(ComponentBuilder::build)
    }

    fn build_service_provider(self) -> Result<ServiceProvider, Error> {
        self.and_then(ComponentBuilder::build_service_provider)
    }

    fn build_service_provider_into(
        self,
        services: ServiceCollection,
    ) -> Result<ServiceProvider, Error> {
        self.and_then(|builder| builder.build_service_provider_into(services))
    }

    fn build_service<T: Managed>(self) -> Result<T, Error> {
        self.and_then(ComponentBuilder::build_service::<T>)
    }
}

/// Loads modules straight into an existing [`ServiceCollection`]. Whatever
/// the collection already holds is kept, and the module's registrations
/// follow it.
pub trait ServiceCollectionExt {
    fn add_module<M>(
        &mut self,
        configure: impl FnOnce(&mut M::Configuration),
    ) -> Result<&mut Self, Error>
    where
        M: ConfigurableModule;

    fn add_module_from_builder<M>(
        &mut self,
        configure: impl FnOnce(ModuleConfigurationBuilder<M>) -> ModuleConfigurationBuilder<M>,
    ) -> Result<&mut Self, Error>
    where
        M: ConfigurableModule;
}

impl ServiceCollectionExt for ServiceCollection {
    fn add_module<M>(
        &mut self,
        configure: impl FnOnce(&mut M::Configuration),
    ) -> Result<&mut Self, Error>
    where
        M: ConfigurableModule,
    {
        let component = ComponentBuilder::new().with_module::<M>(configure).build()?;
        component.load(self)?;
        Ok(self)
    }

    fn add_module_from_builder<M>(
        &mut self,
        configure: impl FnOnce(ModuleConfigurationBuilder<M>) -> ModuleConfigurationBuilder<M>,
    ) -> Result<&mut Self, Error>
    where
        M: ConfigurableModule,
    {
        let component = ComponentBuilder::new()
            .with_module_from_builder::<M>(configure)
            .build()?;
        component.load(self)?;
        Ok(self)
    }
}
