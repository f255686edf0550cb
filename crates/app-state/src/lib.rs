//! Styling runtime state for the podcast client
//!
//! This crate owns everything about styling that changes over time: the
//! active theme, the viewport breakpoint, running theme transitions, the
//! memoized style cache and the bus that tells consumers when to re-read.
//!
//! All operations are synchronous. Frame production is driven by the host
//! calling [`StyleRuntime::tick`] on its render clock.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bus;
pub mod clock;
pub mod error;
pub mod evaluator;
pub mod global;
pub mod handle;
pub mod registry;
pub mod runtime;
pub mod transition;
pub mod viewport;

pub use bus::{ConsumerId, StyleEvent, StyleSubscriber, SubscriptionBus};
pub use clock::{FrameClock, ManualClock, MonotonicClock};
pub use error::{Result, StyleError};
pub use evaluator::{CacheStats, StyleEvaluator};
pub use handle::StyleHandle;
pub use registry::ThemeRegistry;
pub use runtime::{RuntimeConfig, StyleRuntime};
pub use transition::{ColorFrame, TransitionAnimator, TransitionConfig};
pub use viewport::{BreakpointChange, ViewportState};
