//! Memoizing style factory evaluator
//!
//! Results are cached per `(factory id, theme key, breakpoint)`. Themes are
//! immutable once registered, so entries never go stale and are only dropped
//! by an explicit [`StyleEvaluator::clear`]. Factories that do not depend on
//! the breakpoint share one entry across all breakpoints.
//!
//! Each entry remembers the factory that produced it. A lookup only hits when
//! the caller's factory runs the same function, so two factories that happen
//! to share an id never see each other's descriptors; the later one replaces
//! the entry.

use app_ui::style::{FactoryId, StyleDescriptor, StyleFactory};
use app_ui::theme::{Theme, ThemeKey};
use app_ui::tokens::{Breakpoint, BreakpointName};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    factory: FactoryId,
    theme: ThemeKey,
    breakpoint: Option<BreakpointName>,
}

impl CacheKey {
    fn new(factory: &StyleFactory, theme: &Theme, breakpoint: &Breakpoint) -> Self {
        Self {
            factory: factory.id().clone(),
            theme: theme.key.clone(),
            breakpoint: factory
                .depends_on_breakpoint()
                .then(|| breakpoint.name.clone()),
        }
    }
}

/// Cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that ran the factory
    pub misses: u64,
    /// Cached descriptors
    pub entries: usize,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    factory: StyleFactory,
    descriptor: Arc<StyleDescriptor>,
}

/// Evaluates style factories and memoizes the results
#[derive(Debug, Default)]
pub struct StyleEvaluator {
    cache: RwLock<HashMap<CacheKey, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl StyleEvaluator {
    /// Create an empty evaluator
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate `factory` for a theme and breakpoint, reusing a cached result
    pub fn evaluate(
        &self,
        factory: &StyleFactory,
        theme: &Theme,
        breakpoint: &Breakpoint,
    ) -> Arc<StyleDescriptor> {
        let key = CacheKey::new(factory, theme, breakpoint);
        if let Some(entry) = self.cache.read().get(&key) {
            if entry.factory.same_function(factory) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return entry.descriptor.clone();
            }
            tracing::debug!(
                factory = %factory.id(),
                "factory id reused by a different function, replacing cached style"
            );
        }

        // run the factory without holding the lock; factories may be slow
        let descriptor = Arc::new(factory.apply(theme, breakpoint));
        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(
            factory = %factory.id(),
            theme = %theme.key,
            breakpoint = %breakpoint.name,
            "style evaluated"
        );

        let mut cache = self.cache.write();
        match cache.get(&key) {
            // another thread cached the same factory meanwhile
            Some(entry) if entry.factory.same_function(factory) => entry.descriptor.clone(),
            _ => {
                cache.insert(
                    key,
                    CacheEntry {
                        factory: factory.clone(),
                        descriptor: descriptor.clone(),
                    },
                );
                descriptor
            }
        }
    }

    /// Whether a result is cached for these arguments
    pub fn is_cached(&self, factory: &StyleFactory, theme: &Theme, breakpoint: &Breakpoint) -> bool {
        self.cache
            .read()
            .get(&CacheKey::new(factory, theme, breakpoint))
            .is_some_and(|entry| entry.factory.same_function(factory))
    }

    /// Current counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.read().len(),
        }
    }

    /// Drop all cached results and reset counters
    pub fn clear(&self) {
        self.cache.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}
