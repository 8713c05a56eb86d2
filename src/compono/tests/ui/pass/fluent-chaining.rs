use std::sync::Arc;

use compono::prelude::*;
use serde::Deserialize;

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct GreetingConfiguration {
    pub greeting: String,
}

pub struct GreetingModule {
    greeting: String,
}

impl Module for GreetingModule {
    fn configure(&self, services: &mut ServiceCollection) -> Result<(), BoxError> {
        services.add_singleton_instance(Arc::new(self.greeting.clone()));
        Ok(())
    }
}

impl ConfigurableModule for GreetingModule {
    type Configuration = GreetingConfiguration;

    fn from_configuration(
        configuration: Self::Configuration,
        _nested: Vec<Box<dyn Module>>,
    ) -> Result<Self, BoxError> {
        Ok(Self {
            greeting: configuration.greeting,
        })
    }
}

fn by_closure() -> Result<Arc<String>, Error> {
    ComponentBuilder::new()
        .with_module::<GreetingModule>(|c| c.greeting = String::from("hello"))
        .with_module_from_builder::<GreetingModule>(|b| b.with_raw_json_string("{}"))
        .build_service::<Arc<String>>()
}

fn by_question_mark() -> Result<ServiceProvider, Error> {
    let component = ComponentBuilder::new()
        .with_module::<GreetingModule>(|_| {})?
        .build()?;
    component.build_service_provider()
}

fn into_collection(services: &mut ServiceCollection) -> Result<&mut ServiceCollection, Error> {
    services
        .add_module::<GreetingModule>(|c| c.greeting = String::from("hi"))?
        .add_module_from_builder::<GreetingModule>(|b| b.with_raw_json_strings(["{}", "{}"]))
}

fn main() {
    let _ = by_closure();
    let _ = by_question_mark();
    let _ = into_collection(&mut ServiceCollection::new());
}
