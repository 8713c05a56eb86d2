use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use snafu::prelude::*;

use crate::container::collection::ServiceCollection;
use crate::container::core::ProviderCore;
use crate::container::resolver::{ResolveError, Resolver};
use crate::container::Managed;
use crate::error::AggregatedDisplayer;
use crate::factory::context::CallContext;
use crate::key::ServiceKey;
use crate::scope::Lifetime;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProviderOptions {
    /// Rejects scoped services requested from the root provider, including
    /// those captured by singletons.
    pub validate_scopes: bool,
    /// Resolves every registration once while building.
    pub validate_on_build: bool,
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ProviderError {
    #[snafu(display("service provider validation failed:\n{}", AggregatedDisplayer::new(errors)))]
    #[non_exhaustive]
    Validation { errors: Vec<ResolveError> },
}

/// The root resolver built from a [`ServiceCollection`].
///
/// Cloning is cheap and every clone shares the same singleton cache. The
/// cache is released once the last clone and every [`ServiceScope`] created
/// from it are dropped.
#[derive(Clone)]
pub struct ServiceProvider {
    core: Arc<ProviderCore>,
}

impl ServiceProvider {
    pub fn build(services: ServiceCollection) -> Result<Self, ProviderError> {
        Self::build_with(services, ProviderOptions::default())
    }

    pub fn build_with(
        services: ServiceCollection,
        options: ProviderOptions,
    ) -> Result<Self, ProviderError> {
        let descriptors = Arc::new(services.into_descriptor_map());
        tracing::debug!(services = descriptors.len(), ?options, "building service provider");

        let core = Arc::new(ProviderCore::new_root(descriptors, options));
        if options.validate_on_build {
            let errors = ProviderCore::validate(&core);
            if !errors.is_empty() {
                tracing::debug!(errors = errors.len(), "service provider validation failed");
                return ValidationSnafu { errors }.fail();
            }
        }
        Ok(Self { core })
    }

    pub fn create_scope(&self) -> ServiceScope {
        ServiceScope {
            core: Arc::new(ProviderCore::new_scope(&self.core)),
        }
    }

    pub fn options(&self) -> ProviderOptions {
        self.core.options()
    }

    pub fn service_count(&self) -> usize {
        self.core.service_count()
    }
}

impl Debug for ServiceProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ServiceProvider")
            .field("services", &self.core.service_count())
            .field("options", &self.core.options())
            .finish_non_exhaustive()
    }
}

/// A resolver with its own cache of scoped services. Singletons are still
/// shared with the provider the scope was created from.
#[derive(Clone)]
pub struct ServiceScope {
    core: Arc<ProviderCore>,
}

impl ServiceScope {
    /// Creates a sibling scope. Scopes do not nest.
    pub fn create_scope(&self) -> ServiceScope {
        ServiceScope {
            core: Arc::new(ProviderCore::new_scope(&self.core)),
        }
    }

    pub fn current_scope(&self) -> Lifetime {
        self.core.current_scope()
    }
}

impl Debug for ServiceScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ServiceScope")
            .field("services", &self.core.service_count())
            .finish_non_exhaustive()
    }
}

macro_rules! forward_resolver {
    ($handle:ty) => {
        impl Resolver for $handle {
            fn dyn_resolve(&self, key: &ServiceKey) -> Result<Box<dyn Managed>, ResolveError> {
                self.core.dyn_resolve(key)
            }

            fn dyn_resolve_dependency<'a>(
                &self,
                key: &ServiceKey,
                context: &'a CallContext<'a>,
            ) -> Result<Box<dyn Managed>, ResolveError> {
                self.core.dyn_resolve_dependency(key, context)
            }

            fn dyn_resolve_all(
                &self,
                key: &ServiceKey,
            ) -> Result<Vec<Box<dyn Managed>>, ResolveError> {
                self.core.dyn_resolve_all(key)
            }

            fn dyn_resolve_all_dependencies<'a>(
                &self,
                key: &ServiceKey,
                context: &'a CallContext<'a>,
            ) -> Result<Vec<Box<dyn Managed>>, ResolveError> {
                self.core.dyn_resolve_all_dependencies(key, context)
            }

            fn contains(&self, key: &ServiceKey) -> bool {
                self.core.contains(key)
            }
        }
    };
}

forward_resolver!(ServiceProvider);
forward_resolver!(ServiceScope);
