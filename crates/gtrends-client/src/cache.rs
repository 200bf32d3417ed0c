//! Process-lifetime cache for the category and location picker trees.
//!
//! Each slot has its own lock and the two are never held together. A cold
//! cache can be populated twice by concurrent callers; the later store wins,
//! which is harmless for immutable reference data.

use std::sync::{Arc, PoisonError, RwLock};

use crate::types::{CategoryNode, LocationNode};

#[derive(Debug, Default)]
pub struct ReferenceTreeCache {
    categories: RwLock<Option<Arc<CategoryNode>>>,
    locations: RwLock<Option<Arc<LocationNode>>>,
}

impl ReferenceTreeCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn categories(&self) -> Option<Arc<CategoryNode>> {
        self.categories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_categories(&self, tree: Arc<CategoryNode>) {
        *self
            .categories
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(tree);
    }

    #[must_use]
    pub fn locations(&self) -> Option<Arc<LocationNode>> {
        self.locations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_locations(&self, tree: Arc<LocationNode>) {
        *self
            .locations
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(tree);
    }

    /// Empties both slots so the next lookup refetches.
    pub fn clear(&self) {
        *self
            .categories
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
        *self
            .locations
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }
}
