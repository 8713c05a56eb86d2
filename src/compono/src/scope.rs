use std::fmt::{Display, Formatter, Result as FmtResult};

/// How long a service instance created by a provider lives.
///
/// - [`Lifetime::Singleton`] instances are created once per root
///   [`ServiceProvider`] and shared by every scope created from it.
/// - [`Lifetime::Scoped`] instances are created once per [`ServiceScope`].
/// - [`Lifetime::Transient`] instances are created on every request and are
///   never cached.
///
/// The ordering follows how long an instance lives, so
/// `Transient < Scoped < Singleton`.
///
/// [`ServiceProvider`]: crate::container::ServiceProvider
/// [`ServiceScope`]: crate::container::ServiceScope
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lifetime {
    Transient = 1,
    Scoped = 2,
    Singleton = 3,
}

impl Lifetime {
    /// Returns true if instances of this lifetime are cached by a provider.
    pub fn is_cached(self) -> bool {
        !matches!(self, Self::Transient)
    }

    /// Returns true if `self` lives at least as long as `other`.
    pub fn outlives(self, other: Self) -> bool {
        self >= other
    }

    pub fn to_str(self) -> &'static str {
        match self {
            Self::Transient => "Transient",
            Self::Scoped => "Scoped",
            Self::Singleton => "Singleton",
        }
    }
}

impl Display for Lifetime {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_str())
    }
}
