use std::error::Error as StdError;
use std::fmt::{Display, Formatter, Result as FmtResult};

use snafu::prelude::*;

use crate::configuration::ConfigurationError;
use crate::container::resolver::ResolveError;
use crate::container::ProviderError;
use crate::module::{BoxError, ModuleError};

/// Everything that can go wrong while composing modules and resolving from
/// the result.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("could not construct module {module}"))]
    #[non_exhaustive]
    ModuleConstruction {
        module: &'static str,
        source: BoxError,
    },
    #[snafu(display("could not build the configuration of module {module}"))]
    #[non_exhaustive]
    Configuration {
        module: &'static str,
        source: ConfigurationError,
    },
    #[snafu(display("could not load modules into the service collection"))]
    #[non_exhaustive]
    ModuleLoad { source: ModuleError },
    #[snafu(display("could not resolve a service"))]
    #[non_exhaustive]
    Resolution { source: ResolveError },
    #[snafu(display("could not build the service provider"))]
    #[non_exhaustive]
    ProviderBuild { source: ProviderError },
    #[snafu(display("{message}"))]
    #[non_exhaustive]
    Message { message: String },
    #[snafu(display("aggregated errors:\n{}", AggregatedDisplayer::new(errors)))]
    #[non_exhaustive]
    Aggregated { errors: Vec<Error> },
}

impl Error {
    /// A plain failure carrying only a message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }

    pub fn aggregate(errors: impl IntoIterator<Item = Error>) -> Self {
        Self::Aggregated {
            errors: errors.into_iter().collect(),
        }
    }

    /// Flattens the error into its messages, outermost first. An aggregated
    /// error contributes the messages of each member in order.
    pub fn messages(&self) -> Vec<String> {
        let mut messages = Vec::new();
        self.collect_messages(&mut messages);
        messages
    }

    fn collect_messages(&self, messages: &mut Vec<String>) {
        if let Self::Aggregated { errors } = self {
            for error in errors {
                error.collect_messages(messages);
            }
            return;
        }

        messages.push(self.to_string());
        let mut source = self.source();
        while let Some(err) = source {
            messages.push(err.to_string());
            source = err.source();
        }
    }
}

impl From<ResolveError> for Error {
    fn from(source: ResolveError) -> Self {
        Self::Resolution { source }
    }
}

impl From<ModuleError> for Error {
    fn from(source: ModuleError) -> Self {
        Self::ModuleLoad { source }
    }
}

impl From<ProviderError> for Error {
    fn from(source: ProviderError) -> Self {
        Self::ProviderBuild { source }
    }
}

pub(crate) struct AggregatedDisplayer<'a, E> {
    errors: &'a [E],
}

impl<'a, E> AggregatedDisplayer<'a, E> {
    pub(crate) fn new(errors: &'a [E]) -> Self {
        Self { errors }
    }
}

impl<E: Display> Display for AggregatedDisplayer<'_, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "{:4}: {}", i + 1, error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::key;

    use super::*;

    #[test]
    fn error_messages_succeeds() {
        let err = Error::from(ResolveError::NotFound {
            key: *key::of::<i32>().erased(),
        });
        assert_eq!(
            err.messages(),
            vec![
                "could not resolve a service",
                "could not find any service registered for i32",
            ]
        );
    }

    #[test]
    fn error_messages_succeeds_when_aggregated() {
        let err = Error::aggregate([Error::msg("first"), Error::msg("second")]);
        assert_eq!(err.messages(), vec!["first", "second"]);
        assert_eq!(
            err.to_string(),
            "aggregated errors:\n   1: first\n   2: second\n"
        );
    }
}
