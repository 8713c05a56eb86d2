use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::container::collection::{DescriptorMap, ServiceDescriptor};
use crate::container::handle::ProviderOptions;
use crate::container::resolver::{ResolveError, Resolver};
use crate::container::Managed;
use crate::factory::context::CallContext;
use crate::key::ServiceKey;
use crate::scope::Lifetime;

pub struct ProviderCore {
    root: Option<Arc<Self>>,
    descriptors: Arc<DescriptorMap>,
    options: ProviderOptions,
    managed: Mutex<HashMap<usize, Box<dyn Managed>>>,
    scope: Lifetime,
}

impl ProviderCore {
    pub fn new_root(descriptors: Arc<DescriptorMap>, options: ProviderOptions) -> Self {
        Self::new_impl(None, descriptors, options, Lifetime::Singleton)
    }

    /// Creates a scope below the root of `core`. Scopes never nest, so a
    /// scope created from another scope is a sibling of it.
    pub fn new_scope(core: &Arc<Self>) -> Self {
        let root = core.root.clone().unwrap_or_else(|| Arc::clone(core));
        let descriptors = Arc::clone(&root.descriptors);
        let options = root.options;
        Self::new_impl(Some(root), descriptors, options, Lifetime::Scoped)
    }

    fn new_impl(
        root: Option<Arc<Self>>,
        descriptors: Arc<DescriptorMap>,
        options: ProviderOptions,
        scope: Lifetime,
    ) -> Self {
        Self {
            root,
            descriptors,
            options,
            managed: Mutex::new(HashMap::new()),
            scope,
        }
    }

    pub fn current_scope(&self) -> Lifetime {
        self.scope
    }

    pub fn options(&self) -> ProviderOptions {
        self.options
    }

    pub fn service_count(&self) -> usize {
        self.descriptors.len()
    }

    /// Resolves every registration once inside a throwaway scope and returns
    /// the failures.
    pub fn validate(core: &Arc<Self>) -> Vec<ResolveError> {
        let scope = Self::new_scope(core);
        scope
            .descriptors
            .iter()
            .filter_map(|(index, descriptor)| {
                let context = CallContext::new(descriptor.key());
                scope
                    .resolve_descriptor(index, descriptor, &context)
                    .err()
            })
            .collect()
    }

    fn get_object(&self, context: &CallContext<'_>) -> Result<Box<dyn Managed>, ResolveError> {
        let key = context.key();
        self.check_cyclic_dependency(context)?;

        match self.descriptors.last(key) {
            Some((index, descriptor)) => self.resolve_descriptor(index, descriptor, context),
            None => Err(ResolveError::NotFound { key: *key }),
        }
    }

    fn get_all_objects(
        &self,
        context: &CallContext<'_>,
    ) -> Result<Vec<Box<dyn Managed>>, ResolveError> {
        self.check_cyclic_dependency(context)?;

        self.descriptors
            .all(context.key())
            .into_iter()
            .map(|(index, descriptor)| self.resolve_descriptor(index, descriptor, context))
            .collect()
    }

    fn check_cyclic_dependency(&self, context: &CallContext<'_>) -> Result<(), ResolveError> {
        let key = context.key();
        if context.trace().previous_exist_key(key) {
            Err(ResolveError::CyclicDependency {
                key: *key,
                path: context.trace().to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn resolve_descriptor(
        &self,
        index: usize,
        descriptor: &ServiceDescriptor,
        context: &CallContext<'_>,
    ) -> Result<Box<dyn Managed>, ResolveError> {
        let lifetime = descriptor.lifetime();
        tracing::trace!(
            key = %descriptor.key(),
            %lifetime,
            scope = %self.scope,
            "resolving service"
        );

        if !lifetime.is_cached() {
            self.get_unbounded_object_from_self(descriptor, context)
        } else if self.should_forward_request_to_root(lifetime) {
            self.get_object_from_root(index, descriptor, context)
        } else if lifetime == self.scope {
            self.get_shared_object_from_self(index, descriptor, context)
        } else if self.options.validate_scopes {
            // Only a root can be asked for an object shorter-lived than itself.
            Err(ResolveError::ScopedFromRoot {
                key: *descriptor.key(),
            })
        } else {
            self.get_shared_object_from_self(index, descriptor, context)
        }
    }

    fn should_forward_request_to_root(&self, lifetime: Lifetime) -> bool {
        // The object's lifetime strictly outlives the current scope.
        lifetime.outlives(self.scope) && lifetime != self.scope
    }

    fn get_object_from_root(
        &self,
        index: usize,
        descriptor: &ServiceDescriptor,
        context: &CallContext<'_>,
    ) -> Result<Box<dyn Managed>, ResolveError> {
        if let Some(root) = self.root.as_ref() {
            root.resolve_descriptor(index, descriptor, context)
        } else {
            // A root has the singleton scope, which nothing strictly outlives.
            unreachable!("Root should exist")
        }
    }

    fn get_shared_object_from_self(
        &self,
        index: usize,
        descriptor: &ServiceDescriptor,
        context: &CallContext<'_>,
    ) -> Result<Box<dyn Managed>, ResolveError> {
        let cached = self
            .managed
            .lock()
            .get(&index)
            .map(|object| (**object).dyn_clone());
        if let Some(object) = cached {
            return Ok(object);
        }

        // The lock is released while constructing, since the factory may
        // resolve other cached objects from this provider.
        let object = descriptor.factory().dyn_create(self, context)?;
        let mut managed = self.managed.lock();
        let object = managed.entry(index).or_insert(object);
        Ok((**object).dyn_clone())
    }

    fn get_unbounded_object_from_self(
        &self,
        descriptor: &ServiceDescriptor,
        context: &CallContext<'_>,
    ) -> Result<Box<dyn Managed>, ResolveError> {
        descriptor.factory().dyn_create(self, context)
    }
}

impl Resolver for ProviderCore {
    fn dyn_resolve(&self, key: &ServiceKey) -> Result<Box<dyn Managed>, ResolveError> {
        let context = CallContext::new(key);
        self.get_object(&context)
    }

    fn dyn_resolve_dependency<'a>(
        &self,
        key: &ServiceKey,
        context: &'a CallContext<'a>,
    ) -> Result<Box<dyn Managed>, ResolveError> {
        let context = context.append(key);
        self.get_object(&context)
    }

    fn dyn_resolve_all(&self, key: &ServiceKey) -> Result<Vec<Box<dyn Managed>>, ResolveError> {
        let context = CallContext::new(key);
        self.get_all_objects(&context)
    }

    fn dyn_resolve_all_dependencies<'a>(
        &self,
        key: &ServiceKey,
        context: &'a CallContext<'a>,
    ) -> Result<Vec<Box<dyn Managed>>, ResolveError> {
        let context = context.append(key);
        self.get_all_objects(&context)
    }

    fn contains(&self, key: &ServiceKey) -> bool {
        self.descriptors.contains(key)
    }
}
