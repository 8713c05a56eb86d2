use std::sync::Arc;

use compono::prelude::*;
use serde::Deserialize;

fn main() -> Result<(), Error> {
    let app = ComponentBuilder::new()
        .with_module::<LoggingModule>(|c| c.app_name = String::from("greeter"))
        .with_module_from_builder::<GreetingModule>(|b| {
            b.with_raw_json_strings([
                r#"{"language": "english", "repeat": 1}"#,
                r#"{"repeat": 2}"#,
            ])
        })
        .build_service::<Arc<App>>()?;
    app.run();
    Ok(())
}

trait Logger: Send + Sync + 'static {
    fn log(&self, message: &str);
}

struct ConsoleLogger {
    app_name: String,
}

impl Logger for ConsoleLogger {
    fn log(&self, message: &str) {
        eprintln!("[{}] {}", self.app_name, message);
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct LoggingConfiguration {
    app_name: String,
}

struct LoggingModule {
    configuration: LoggingConfiguration,
}

impl Module for LoggingModule {
    fn configure(&self, services: &mut ServiceCollection) -> Result<(), BoxError> {
        let logger: Arc<dyn Logger> = Arc::new(ConsoleLogger {
            app_name: self.configuration.app_name.clone(),
        });
        services.add_singleton_instance(logger);
        Ok(())
    }
}

impl ConfigurableModule for LoggingModule {
    type Configuration = LoggingConfiguration;

    fn from_configuration(
        configuration: Self::Configuration,
        _nested: Vec<Box<dyn Module>>,
    ) -> Result<Self, BoxError> {
        Ok(Self { configuration })
    }
}

trait Greeter: Send + Sync + 'static {
    fn greet(&self);
}

struct EnglishGreeter {
    logger: Arc<dyn Logger>,
}

impl Greeter for EnglishGreeter {
    fn greet(&self) {
        self.logger.log("Hello World!");
    }
}

struct ChineseGreeter {
    logger: Arc<dyn Logger>,
}

impl Greeter for ChineseGreeter {
    fn greet(&self) {
        self.logger.log("你好世界!");
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum Language {
    English,
    Chinese,
}

#[derive(Deserialize)]
#[serde(default)]
struct GreetingConfiguration {
    language: Language,
    repeat: usize,
}

impl Default for GreetingConfiguration {
    fn default() -> Self {
        Self {
            language: Language::English,
            repeat: 1,
        }
    }
}

struct GreetingModule {
    configuration: GreetingConfiguration,
}

impl Module for GreetingModule {
    fn configure(&self, services: &mut ServiceCollection) -> Result<(), BoxError> {
        match self.configuration.language {
            Language::English => services.add_singleton(|r: &dyn Resolver| {
                let logger = r.get::<Arc<dyn Logger>>()?;
                Ok::<_, ResolveError>(Arc::new(EnglishGreeter { logger }) as Arc<dyn Greeter>)
            }),
            Language::Chinese => services.add_singleton(|r: &dyn Resolver| {
                let logger = r.get::<Arc<dyn Logger>>()?;
                Ok::<_, ResolveError>(Arc::new(ChineseGreeter { logger }) as Arc<dyn Greeter>)
            }),
        };

        let repeat = self.configuration.repeat;
        services.add_singleton(move |r: &dyn Resolver| {
            Ok::<_, ResolveError>(Arc::new(App {
                logger: r.get()?,
                greeter: r.get()?,
                repeat,
            }))
        });
        Ok(())
    }
}

impl ConfigurableModule for GreetingModule {
    type Configuration = GreetingConfiguration;

    fn from_configuration(
        configuration: Self::Configuration,
        _nested: Vec<Box<dyn Module>>,
    ) -> Result<Self, BoxError> {
        Ok(Self { configuration })
    }
}

struct App {
    logger: Arc<dyn Logger>,
    greeter: Arc<dyn Greeter>,
    repeat: usize,
}

impl App {
    fn run(&self) {
        self.logger.log("Greeting from compono managed services:");
        for _ in 0..self.repeat {
            self.greeter.greet();
        }
    }
}
