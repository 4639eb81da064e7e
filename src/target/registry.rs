//! Name-keyed registry of target functions.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{Multimodal, Polynomial, Quadratic, TargetFunction};
use crate::error::ConfigError;

/// Targets available for selection by name.
///
/// Names are kept in sorted order so listings are stable.
#[derive(Clone, Default)]
pub struct TargetRegistry {
    targets: BTreeMap<String, Arc<dyn TargetFunction>>,
}

impl TargetRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding [`Quadratic`], [`Polynomial`] and
    /// [`Multimodal`] with their default dimensions.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(Multimodal::default()));
        registry.register(Arc::new(Quadratic::default()));
        registry.register(Arc::new(Polynomial));
        registry
    }

    /// Registers a target under its own name, replacing any previous entry.
    pub fn register(&mut self, target: Arc<dyn TargetFunction>) {
        self.targets.insert(target.name().to_string(), target);
    }

    /// Looks up a target by name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn TargetFunction>, ConfigError> {
        self.targets
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownTarget {
                name: name.to_string(),
                available: self.names(),
            })
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.targets.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl std::fmt::Debug for TargetRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.targets.keys()).finish()
    }
}
