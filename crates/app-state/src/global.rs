//! Process-wide style runtime
//!
//! Screens that cannot thread a runtime through their constructors read it
//! from here. Nothing is installed implicitly: the host calls [`init`] once at
//! startup, and tests call [`reset`] between cases.

use crate::clock::{FrameClock, MonotonicClock};
use crate::error::{Result, StyleError};
use crate::runtime::{RuntimeConfig, StyleRuntime};
use parking_lot::RwLock;
use std::sync::Arc;

static RUNTIME: RwLock<Option<Arc<StyleRuntime>>> = parking_lot::const_rwlock(None);

/// Build and install the global runtime
pub fn init(config: RuntimeConfig) -> Result<Arc<StyleRuntime>> {
    init_with_clock(config, Arc::new(MonotonicClock::new()))
}

/// Build and install the global runtime with a specific clock
pub fn init_with_clock(
    config: RuntimeConfig,
    clock: Arc<dyn FrameClock>,
) -> Result<Arc<StyleRuntime>> {
    let mut slot = RUNTIME.write();
    if slot.is_some() {
        return Err(StyleError::AlreadyInitialized);
    }

    let runtime = Arc::new(StyleRuntime::with_clock(config, clock)?);
    *slot = Some(runtime.clone());
    tracing::info!(theme = %runtime.active_key(), "style runtime initialized");
    Ok(runtime)
}

/// The installed runtime
pub fn get() -> Result<Arc<StyleRuntime>> {
    try_get().ok_or(StyleError::NotInitialized)
}

/// The installed runtime, if any
pub fn try_get() -> Option<Arc<StyleRuntime>> {
    RUNTIME.read().clone()
}

/// Remove the installed runtime; returns whether one was installed.
///
/// Handles that still hold the old runtime keep working against it.
pub fn reset() -> bool {
    let previous = RUNTIME.write().take();
    if previous.is_some() {
        tracing::debug!("style runtime reset");
    }
    previous.is_some()
}
