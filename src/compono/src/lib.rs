pub mod builder;
pub mod component;
pub mod configuration;
pub mod container;
pub mod error;
pub mod factory;
pub mod key;
pub mod module;
pub mod scope;
mod util;

pub use error::Error;

pub mod prelude {
    pub use crate::builder::{
        BuilderResultExt, ComponentBuilder, ComponentResultExt, ServiceCollectionExt,
    };
    pub use crate::component::Component;
    pub use crate::configuration::{Configuration, ConfigurationBuilder};
    pub use crate::container::collection::bind;
    pub use crate::container::resolver::{ResolveError, Resolver, TypedResolver};
    pub use crate::container::{ProviderOptions, ServiceCollection, ServiceProvider};
    pub use crate::key;
    pub use crate::module::{BoxError, ConfigurableModule, Module};
    pub use crate::scope::Lifetime;
    pub use crate::Error;
}
