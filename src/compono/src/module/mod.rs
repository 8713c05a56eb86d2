use std::any;
use std::error::Error;

use snafu::prelude::*;

use crate::configuration::Configuration;
use crate::container::ServiceCollection;

pub type BoxError = Box<dyn Error + Send + Sync>;

/// A unit of service registration.
///
/// Loading a module runs its own [`Module::configure`] first and then loads
/// its nested modules depth-first in the order they were given.
pub trait Module: Send + Sync + 'static {
    fn name(&self) -> &'static str {
        any::type_name::<Self>()
    }

    fn configure(&self, services: &mut ServiceCollection) -> Result<(), BoxError>;

    fn nested_modules(&self) -> &[Box<dyn Module>] {
        &[]
    }

    fn load(&self, services: &mut ServiceCollection) -> Result<(), ModuleError> {
        let module = self.name();
        tracing::debug!(module, "loading module");
        self.configure(services).context(ConfigureSnafu { module })?;
        self.nested_modules()
            .iter()
            .try_for_each(|nested| nested.load(services))
    }
}

/// A module built from a typed configuration and a list of nested modules.
pub trait ConfigurableModule: Module + Sized {
    type Configuration: Configuration;

    fn from_configuration(
        configuration: Self::Configuration,
        nested: Vec<Box<dyn Module>>,
    ) -> Result<Self, BoxError>;
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ModuleError {
    #[snafu(display("module {module} fails to register its services"))]
    #[non_exhaustive]
    Configure {
        module: &'static str,
        source: BoxError,
    },
}

impl ModuleError {
    /// Name of the module that failed.
    pub fn module(&self) -> &'static str {
        match self {
            Self::Configure { module, .. } => module,
        }
    }
}
