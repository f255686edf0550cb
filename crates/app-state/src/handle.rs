//! Style handles
//!
//! A [`StyleHandle`] is what a screen component keeps between renders: it
//! binds one style factory to the runtime, listens for events that can change
//! the factory's output, and re-evaluates lazily on the next read.

use crate::bus::{ConsumerId, StyleEvent};
use crate::runtime::StyleRuntime;
use app_ui::style::{StyleDescriptor, StyleFactory};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

#[derive(Debug)]
struct Slot {
    current: Arc<StyleDescriptor>,
    dirty: bool,
    revision: u64,
}

/// Live binding of a style factory to a [`StyleRuntime`]
///
/// Breakpoint events only invalidate responsive factories; theme and frame
/// events invalidate every handle. Dropping the handle unsubscribes it.
pub struct StyleHandle {
    runtime: Arc<StyleRuntime>,
    factory: StyleFactory,
    id: ConsumerId,
    slot: Arc<Mutex<Slot>>,
}

impl StyleHandle {
    pub(crate) fn new(runtime: Arc<StyleRuntime>, factory: StyleFactory) -> Self {
        let id = ConsumerId::next();
        let slot = Arc::new(Mutex::new(Slot {
            current: runtime.evaluate(&factory),
            dirty: false,
            revision: 0,
        }));

        let responsive = factory.depends_on_breakpoint();
        let watched = Arc::downgrade(&slot);
        runtime.subscribe(id, move |event: &StyleEvent| {
            let relevant = match event {
                StyleEvent::BreakpointChanged { .. } => responsive,
                StyleEvent::ThemeChanged { .. } | StyleEvent::Frame(_) => true,
            };
            if !relevant {
                return;
            }
            if let Some(slot) = watched.upgrade() {
                let mut slot = slot.lock();
                slot.dirty = true;
                slot.revision += 1;
            }
        });

        tracing::trace!(consumer = %id, factory = %factory.id(), "style handle created");

        Self {
            runtime,
            factory,
            id,
            slot,
        }
    }

    /// Current style, re-evaluated if an event invalidated it
    pub fn current(&self) -> Arc<StyleDescriptor> {
        let seen = {
            let slot = self.slot.lock();
            if !slot.dirty {
                return slot.current.clone();
            }
            slot.revision
        };

        let fresh = self.runtime.evaluate(&self.factory);

        let mut slot = self.slot.lock();
        slot.current = fresh.clone();
        // an event that arrived while evaluating keeps the handle dirty
        if slot.revision == seen {
            slot.dirty = false;
        }
        fresh
    }

    /// Whether the next [`current`](Self::current) call re-evaluates
    pub fn is_dirty(&self) -> bool {
        self.slot.lock().dirty
    }

    /// Number of relevant events seen so far
    pub fn revision(&self) -> u64 {
        self.slot.lock().revision
    }

    /// The bound factory
    pub fn factory(&self) -> &StyleFactory {
        &self.factory
    }

    /// Bus subscriber id of this handle
    pub fn id(&self) -> ConsumerId {
        self.id
    }
}

impl Drop for StyleHandle {
    fn drop(&mut self) {
        self.runtime.unsubscribe(self.id);
    }
}

impl fmt::Debug for StyleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleHandle")
            .field("id", &self.id)
            .field("factory", &self.factory)
            .field("slot", &*self.slot.lock())
            .finish()
    }
}
