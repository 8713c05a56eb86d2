mod common;

use std::sync::Arc;

use compono::key::ServiceKey;
use compono::prelude::*;

use common::{DependencyModule, DependencyService, TestConfiguration, TestModule, TestService};

#[test]
fn build_service_succeeds_with_valid_module() {
    let service = ComponentBuilder::new()
        .with_module::<TestModule>(|c| c.value = String::from("TestValue"))
        .build_service::<Arc<dyn TestService>>()
        .unwrap();

    assert_eq!(service.value(), "TestValue");
}

#[test]
fn build_service_fails_when_no_module_registers_the_service() {
    let result = ComponentBuilder::new().build_service::<Arc<dyn TestService>>();

    assert!(matches!(
        result,
        Err(Error::Resolution {
            source: ResolveError::NotFound { .. },
            ..
        })
    ));
}

#[test]
fn build_succeeds_and_loads_every_module() {
    let component = ComponentBuilder::new()
        .with_module::<DependencyModule>(|c| c.dependency_value = String::from("DependencyData"))
        .with_module::<TestModule>(|c| c.value = String::from("MainValue"))
        .build()
        .unwrap();
    assert_eq!(component.len(), 2);

    let provider = component.build_service_provider().unwrap();
    let service: Arc<dyn TestService> = provider.get().unwrap();
    let dependency: Arc<dyn DependencyService> = provider.get().unwrap();
    assert_eq!(service.value(), "MainValue");
    assert_eq!(dependency.dependency_value(), "DependencyData");
}

#[test]
fn build_service_succeeds_and_prefers_the_last_module() {
    let service = ComponentBuilder::new()
        .with_module::<TestModule>(|c| c.value = String::from("First"))
        .with_module::<TestModule>(|c| c.value = String::from("Second"))
        .build_service::<Arc<dyn TestService>>()
        .unwrap();

    assert_eq!(service.value(), "Second");
}

#[test]
fn build_service_provider_succeeds_with_nested_modules() {
    let nested = ComponentBuilder::new()
        .with_module::<DependencyModule>(|c| c.dependency_value = String::from("Nested"))
        .build()
        .unwrap();

    let provider = ComponentBuilder::new()
        .with_nested_module::<TestModule>(|c| c.value = String::from("Parent"), nested)
        .build_service_provider()
        .unwrap();

    let dependency: Arc<dyn DependencyService> = provider.get().unwrap();
    assert_eq!(dependency.dependency_value(), "Nested");
}

#[test]
fn build_service_succeeds_with_configuration_from_raw_json() {
    let service = ComponentBuilder::new()
        .with_module_from_builder::<TestModule>(|b| {
            b.with_raw_json_strings([r#"{"value": "Ignored"}"#, r#"{"value": "BuilderValue"}"#])
        })
        .build_service::<Arc<dyn TestService>>()
        .unwrap();

    assert_eq!(service.value(), "BuilderValue");
}

#[test]
fn build_service_succeeds_when_module_is_loaded_twice() {
    let once = ComponentBuilder::new()
        .with_module::<TestModule>(|c| c.value = String::from("Same"))
        .build_service::<Arc<dyn TestService>>()
        .unwrap();
    let twice = ComponentBuilder::new()
        .with_module::<TestModule>(|c| c.value = String::from("Same"))
        .with_module::<TestModule>(|c| c.value = String::from("Same"))
        .build_service::<Arc<dyn TestService>>()
        .unwrap();

    assert_eq!(once.value(), twice.value());
}

#[test]
fn load_succeeds_with_the_same_registrations_when_called_twice() {
    let configuration = TestConfiguration {
        value: String::from("Same"),
    };
    let module = TestModule::from_configuration(configuration, Vec::new())
        .unwrap_or_else(|err| panic!("module construction failed: {err}"));
    let registrations = |services: &ServiceCollection| -> Vec<(ServiceKey, Lifetime)> {
        services
            .iter()
            .map(|descriptor| (*descriptor.key(), descriptor.lifetime()))
            .collect()
    };

    let mut services = ServiceCollection::new();
    module.load(&mut services).unwrap();
    let first = registrations(&services);
    assert!(!first.is_empty());

    module.load(&mut services).unwrap();
    let both = registrations(&services);
    assert_eq!(both.len(), 2 * first.len());
    assert_eq!(&both[..first.len()], first.as_slice());
    assert_eq!(&both[first.len()..], first.as_slice());

    let provider = ServiceProvider::build(services).unwrap();
    let service: Arc<dyn TestService> = provider.get().unwrap();
    assert_eq!(service.value(), "Same");
}

#[test]
fn with_module_from_builder_fails_when_json_is_malformed() {
    let err = ComponentBuilder::new()
        .with_module_from_builder::<TestModule>(|b| b.with_raw_json_string("{\"value\":"))
        .with_module::<DependencyModule>(|_| {})
        .build_service::<Arc<dyn TestService>>()
        .err().unwrap();

    assert!(matches!(err, Error::Configuration { .. }));
    assert!(err.messages().len() >= 2);
}
