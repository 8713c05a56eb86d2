mod ext;

use std::any;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use snafu::prelude::*;

use crate::component::Component;
use crate::configuration::ConfigurationBuilder;
use crate::container::{Managed, ProviderOptions, ServiceCollection, ServiceProvider};
use crate::error::{ConfigurationSnafu, Error, ModuleConstructionSnafu};
use crate::module::{ConfigurableModule, Module};

pub use ext::{BuilderResultExt, ComponentResultExt, ServiceCollectionExt};

/// The [`ConfigurationBuilder`] for the configuration of module `M`.
pub type ModuleConfigurationBuilder<M> =
    ConfigurationBuilder<<M as ConfigurableModule>::Configuration>;

/// Fluent composition of modules into a [`Component`].
///
/// Modules are kept in the order they are added, and a later module's
/// registration of a service shadows an earlier one. Every build operation
/// consumes the builder, so it cannot be built twice:
///
/// ```compile_fail
/// use compono::builder::ComponentBuilder;
///
/// let builder = ComponentBuilder::new();
/// let first = builder.build();
/// let second = builder.build();
/// ```
#[derive(Default)]
pub struct ComponentBuilder {
    modules: Vec<Box<dyn Module>>,
}

impl ComponentBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds `M` built from its default configuration after `configure` has
    /// adjusted it.
    pub fn with_module<M>(
        self,
        configure: impl FnOnce(&mut M::Configuration),
    ) -> Result<Self, Error>
    where
        M: ConfigurableModule,
    {
        self.with_nested_module::<M>(configure, Component::new())
    }

    /// Like [`ComponentBuilder::with_module`], but `M` also receives the
    /// modules of `nested`, which it loads after its own registrations.
    pub fn with_nested_module<M>(
        self,
        configure: impl FnOnce(&mut M::Configuration),
        nested: Component,
    ) -> Result<Self, Error>
    where
        M: ConfigurableModule,
    {
        let mut configuration = M::Configuration::default();
        configure(&mut configuration);
        self.with_configured::<M>(configuration, nested)
    }

    /// Adds `M` with a configuration merged from the sources `configure`
    /// registers on the [`ConfigurationBuilder`].
    pub fn with_module_from_builder<M>(
        self,
        configure: impl FnOnce(ModuleConfigurationBuilder<M>) -> ModuleConfigurationBuilder<M>,
    ) -> Result<Self, Error>
    where
        M: ConfigurableModule,
    {
        let configuration = configure(ConfigurationBuilder::new())
            .build()
            .context(ConfigurationSnafu {
                module: any::type_name::<M>(),
            })
            .inspect_err(|err| tracing::debug!(%err, "module configuration failed"))?;
        self.with_configured::<M>(configuration, Component::new())
    }

    pub fn with_module_instance<M: Module>(mut self, module: M) -> Self {
        tracing::debug!(module = module.name(), position = self.modules.len(), "adding module");
        self.modules.push(Box::new(module));
        self
    }

    fn with_configured<M>(
        self,
        configuration: M::Configuration,
        nested: Component,
    ) -> Result<Self, Error>
    where
        M: ConfigurableModule,
    {
        let module = M::from_configuration(configuration, nested.into_modules())
            .context(ModuleConstructionSnafu {
                module: any::type_name::<M>(),
            })
            .inspect_err(|err| tracing::debug!(%err, "module construction failed"))?;
        Ok(self.with_module_instance(module))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn build(self) -> Result<Component, Error> {
        Ok(Component::from_modules(self.modules))
    }

    pub fn build_service_provider(self) -> Result<ServiceProvider, Error> {
        self.build()?.build_service_provider()
    }

    /// Loads every module into `services` after whatever it already holds,
    /// then builds a provider from the result.
    pub fn build_service_provider_into(
        self,
        services: ServiceCollection,
    ) -> Result<ServiceProvider, Error> {
        self.build()?.build_service_provider_into(services)
    }

    pub fn build_service_provider_with(
        self,
        options: ProviderOptions,
    ) -> Result<ServiceProvider, Error> {
        self.build()?
            .build_service_provider_with(Default::default(), options)
    }

    /// Builds a provider, resolves one `T` from it and drops the provider.
    pub fn build_service<T: Managed>(self) -> Result<T, Error> {
        self.build()?.resolve::<T>()
    }
}

impl Debug for ComponentBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ComponentBuilder")
            .field("modules", &self.modules.iter().map(|m| m.name()).collect::<Vec<_>>())
            .finish()
    }
}
