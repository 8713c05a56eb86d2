#![allow(dead_code)]

use std::sync::Arc;

use compono::prelude::*;
use serde::Deserialize;

pub trait TestService: Send + Sync {
    fn value(&self) -> &str;
}

pub trait DependencyService: Send + Sync {
    fn dependency_value(&self) -> &str;
}

struct FixedTestService(String);

impl TestService for FixedTestService {
    fn value(&self) -> &str {
        &self.0
    }
}

struct FixedDependencyService(String);

impl DependencyService for FixedDependencyService {
    fn dependency_value(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TestConfiguration {
    pub value: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DependencyConfiguration {
    pub dependency_value: String,
}

/// Registers `Arc<dyn TestService>` holding the configured value.
pub struct TestModule {
    configuration: TestConfiguration,
    nested: Vec<Box<dyn Module>>,
}

impl Module for TestModule {
    fn configure(&self, services: &mut ServiceCollection) -> Result<(), BoxError> {
        let service: Arc<dyn TestService> =
            Arc::new(FixedTestService(self.configuration.value.clone()));
        services.add_singleton_instance(service);
        Ok(())
    }

    fn nested_modules(&self) -> &[Box<dyn Module>] {
        &self.nested
    }
}

impl ConfigurableModule for TestModule {
    type Configuration = TestConfiguration;

    fn from_configuration(
        configuration: Self::Configuration,
        nested: Vec<Box<dyn Module>>,
    ) -> Result<Self, BoxError> {
        Ok(Self {
            configuration,
            nested,
        })
    }
}

/// Registers `Arc<dyn DependencyService>` holding the configured value.
pub struct DependencyModule {
    configuration: DependencyConfiguration,
}

impl Module for DependencyModule {
    fn configure(&self, services: &mut ServiceCollection) -> Result<(), BoxError> {
        let service: Arc<dyn DependencyService> = Arc::new(FixedDependencyService(
            self.configuration.dependency_value.clone(),
        ));
        services.add_singleton_instance(service);
        Ok(())
    }
}

impl ConfigurableModule for DependencyModule {
    type Configuration = DependencyConfiguration;

    fn from_configuration(
        configuration: Self::Configuration,
        _nested: Vec<Box<dyn Module>>,
    ) -> Result<Self, BoxError> {
        Ok(Self { configuration })
    }
}
