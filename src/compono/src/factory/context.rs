use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::key::ServiceKey;

/// Information about the resolution a factory is running for.
#[derive(Clone)]
pub struct CallContext<'a> {
    trace: ResolutionTrace<'a>,
}

impl<'a> CallContext<'a> {
    pub fn new(key: &'a ServiceKey) -> Self {
        Self {
            trace: ResolutionTrace::new(key),
        }
    }

    pub fn append<'b>(&'b self, key: &'b ServiceKey) -> CallContext<'b> {
        CallContext {
            trace: self.trace.append(key),
        }
    }

    pub fn key(&self) -> &ServiceKey {
        self.trace.key()
    }

    pub fn trace(&self) -> &ResolutionTrace<'_> {
        &self.trace
    }
}

/// The chain of keys being resolved, from the innermost request back to the
/// one issued by the caller.
#[derive(Clone)]
pub struct ResolutionTrace<'a> {
    key: &'a ServiceKey,
    previous: Option<&'a ResolutionTrace<'a>>,
}

impl<'a> ResolutionTrace<'a> {
    pub fn new(key: &'a ServiceKey) -> Self {
        Self {
            key,
            previous: None,
        }
    }

    pub fn append<'b>(&'b self, key: &'b ServiceKey) -> ResolutionTrace<'b> {
        ResolutionTrace {
            key,
            previous: Some(self),
        }
    }

    pub fn key(&self) -> &ServiceKey {
        self.key
    }

    pub fn previous(&self) -> Option<&ResolutionTrace<'a>> {
        self.previous
    }

    pub fn previous_exist_key(&self, key: &ServiceKey) -> bool {
        let mut this = self;
        while let Some(previous) = this.previous() {
            if previous.key() == key {
                return true;
            }
            this = previous;
        }
        false
    }

    fn keys(&self) -> Vec<&ServiceKey> {
        let mut keys = vec![self.key];
        let mut this = self;
        while let Some(previous) = this.previous() {
            keys.push(previous.key());
            this = previous;
        }
        keys.reverse();
        keys
    }
}

/// Renders the trace from the outermost request, e.g. `A -> B -> A`.
impl Display for ResolutionTrace<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, key) in self.keys().into_iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}
