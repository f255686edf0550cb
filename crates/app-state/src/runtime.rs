//! Styling runtime
//!
//! [`StyleRuntime`] ties the pieces together: the theme registry and
//! transition animator (behind one lock, so the active key and the
//! transition never disagree), the viewport state, the memoizing evaluator
//! and the subscription bus.
//!
//! State changes are computed under the lock and published after it is
//! released. Subscribers may therefore call back into the runtime, including
//! `switch` from inside a frame callback.
//!
//! # Example
//!
//! ```rust
//! use app_state::{ManualClock, RuntimeConfig, StyleRuntime};
//! use app_ui::components::custom_link;
//! use app_ui::theme::tokens;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let clock = Arc::new(ManualClock::new());
//! let runtime = StyleRuntime::with_clock(RuntimeConfig::default(), clock.clone()).unwrap();
//!
//! runtime.switch("dark").unwrap();
//! clock.advance(Duration::from_millis(200));
//! runtime.tick();
//!
//! let style = runtime.evaluate(&custom_link());
//! assert_eq!(
//!     style.get_color("borderColor"),
//!     runtime.active().color(tokens::PRIMARY)
//! );
//! ```

use crate::bus::{ConsumerId, StyleEvent, StyleSubscriber, SubscriptionBus};
use crate::clock::{FrameClock, MonotonicClock};
use crate::error::{Result, StyleError};
use crate::evaluator::{CacheStats, StyleEvaluator};
use crate::handle::StyleHandle;
use crate::registry::ThemeRegistry;
use crate::transition::{ColorFrame, TransitionAnimator, TransitionConfig};
use crate::viewport::ViewportState;
use app_ui::style::{StyleDescriptor, StyleFactory};
use app_ui::theme::{default_themes, SharedTheme, Theme, ThemeKey, LIGHT};
use app_ui::tokens::{breakpoints, Breakpoint, BreakpointTable};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Everything needed to start the runtime
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Fixed theme set
    pub themes: Vec<Theme>,
    /// Key of the theme active at startup
    pub initial_theme: String,
    /// Breakpoint table entries, narrowest first
    pub breakpoints: Vec<Breakpoint>,
    /// Theme transition settings
    pub transition: TransitionConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            themes: default_themes(),
            initial_theme: LIGHT.to_string(),
            breakpoints: breakpoints::defaults(),
            transition: TransitionConfig::default(),
        }
    }
}

#[derive(Debug)]
struct RuntimeState {
    registry: ThemeRegistry,
    animator: TransitionAnimator,
    viewport: ViewportState,
}

/// Themed styling runtime
pub struct StyleRuntime {
    state: RwLock<RuntimeState>,
    breakpoints: BreakpointTable,
    evaluator: StyleEvaluator,
    bus: SubscriptionBus,
    clock: Arc<dyn FrameClock>,
}

impl StyleRuntime {
    /// Validate `config` and build a runtime driven by a [`MonotonicClock`]
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(MonotonicClock::new()))
    }

    /// Validate `config` and build a runtime driven by `clock`
    pub fn with_clock(config: RuntimeConfig, clock: Arc<dyn FrameClock>) -> Result<Self> {
        let breakpoints = BreakpointTable::new(config.breakpoints)?;
        let registry = ThemeRegistry::new(config.themes, &config.initial_theme)?;
        let viewport = ViewportState::new(&breakpoints);

        tracing::debug!(
            themes = registry.keys().count(),
            breakpoints = breakpoints.entries().len(),
            initial = %registry.active_key(),
            "style runtime created"
        );

        Ok(Self {
            state: RwLock::new(RuntimeState {
                registry,
                animator: TransitionAnimator::new(config.transition),
                viewport,
            }),
            breakpoints,
            evaluator: StyleEvaluator::new(),
            bus: SubscriptionBus::new(),
            clock,
        })
    }

    // =========================================================================
    // Themes
    // =========================================================================

    /// Look up a registered theme
    pub fn get(&self, key: &str) -> Result<SharedTheme> {
        self.state.read().registry.get(key)
    }

    /// The active theme
    pub fn active(&self) -> SharedTheme {
        self.state.read().registry.active()
    }

    /// Key of the active theme
    pub fn active_key(&self) -> ThemeKey {
        self.state.read().registry.active_key().clone()
    }

    /// Registered theme keys in sorted order
    pub fn theme_keys(&self) -> Vec<ThemeKey> {
        self.state.read().registry.keys().cloned().collect()
    }

    /// Make `key` the active theme and start a color transition.
    ///
    /// Publishes a theme-changed event followed by the transition's first
    /// frame. Switching to the already active theme does nothing and
    /// publishes nothing: events go out exactly once per switch that changes
    /// the active key, so no consumer repaints for a no-op.
    pub fn switch(&self, key: &str) -> Result<()> {
        let events = {
            let mut guard = self.state.write();
            let state = &mut *guard;

            if state.registry.active_key().as_str() == key {
                tracing::debug!(theme = key, "theme already active");
                return Ok(());
            }

            let previous = state.registry.set_active(key)?;
            let current = state.registry.active();
            let frame = state
                .animator
                .begin(&previous, current.clone(), self.clock.now());

            tracing::info!(from = %previous.key, to = %current.key, "theme switched");

            [
                StyleEvent::ThemeChanged {
                    previous: previous.key.clone(),
                    current: current.key.clone(),
                },
                StyleEvent::Frame(frame),
            ]
        };

        self.bus.publish_all(events);
        Ok(())
    }

    // =========================================================================
    // Viewport
    // =========================================================================

    /// Report a new viewport width.
    ///
    /// Publishes a breakpoint-changed event only when the resolved
    /// breakpoint differs from the previous one.
    pub fn on_viewport_resize(&self, width: f32) {
        let change = self
            .state
            .write()
            .viewport
            .update(&self.breakpoints, width);

        if let Some(change) = change {
            tracing::debug!(
                from = %change.previous.name,
                to = %change.current.name,
                width,
                "breakpoint changed"
            );
            self.bus.publish(StyleEvent::BreakpointChanged {
                previous: change.previous,
                current: change.current,
                width,
            });
        }
    }

    /// Snapshot of the viewport state
    pub fn viewport(&self) -> ViewportState {
        self.state.read().viewport.clone()
    }

    /// Current breakpoint
    pub fn breakpoint(&self) -> Breakpoint {
        self.state.read().viewport.breakpoint().clone()
    }

    /// The validated breakpoint table
    pub fn breakpoints(&self) -> &BreakpointTable {
        &self.breakpoints
    }

    // =========================================================================
    // Animation
    // =========================================================================

    /// Advance the running transition to the clock's current time.
    ///
    /// Call once per rendered frame. Returns whether a transition is still
    /// running afterwards; the host can stop its frame loop once this is
    /// `false`.
    pub fn tick(&self) -> bool {
        let now = self.clock.now();
        let frame = self.state.write().animator.tick(now);
        if let Some(frame) = frame {
            self.bus.publish(StyleEvent::Frame(frame));
        }
        self.is_transitioning()
    }

    /// Whether a theme transition is running
    pub fn is_transitioning(&self) -> bool {
        self.state.read().animator.is_running()
    }

    /// Last frame of the running transition
    pub fn current_frame(&self) -> Option<Arc<ColorFrame>> {
        self.state.read().animator.current_frame()
    }

    /// Transition settings
    pub fn transition_config(&self) -> TransitionConfig {
        self.state.read().animator.config()
    }

    // =========================================================================
    // Styles
    // =========================================================================

    /// Evaluate `factory` for the active theme and current breakpoint.
    ///
    /// While a transition runs, theme-bound colors carry the latest frame's
    /// values; everything else comes from the new theme.
    pub fn evaluate(&self, factory: &StyleFactory) -> Arc<StyleDescriptor> {
        let (theme, breakpoint, frame) = self.snapshot();
        let base = self.evaluator.evaluate(factory, &theme, &breakpoint);
        match frame {
            Some(frame) => Arc::new(base.with_color_overrides(&frame.colors)),
            None => base,
        }
    }

    /// Evaluate `factory` ignoring any running transition
    pub fn evaluate_static(&self, factory: &StyleFactory) -> Arc<StyleDescriptor> {
        let (theme, breakpoint, _) = self.snapshot();
        self.evaluator.evaluate(factory, &theme, &breakpoint)
    }

    /// Evaluate `factory` for an explicit theme and breakpoint
    pub fn evaluate_for(
        &self,
        factory: &StyleFactory,
        theme: &str,
        breakpoint: &str,
    ) -> Result<Arc<StyleDescriptor>> {
        let theme = self.get(theme)?;
        let breakpoint = self
            .breakpoints
            .get(breakpoint)
            .ok_or_else(|| StyleError::UnknownBreakpoint(breakpoint.to_string()))?;
        Ok(self.evaluator.evaluate(factory, &theme, breakpoint))
    }

    fn snapshot(&self) -> (SharedTheme, Breakpoint, Option<Arc<ColorFrame>>) {
        let state = self.state.read();
        (
            state.registry.active(),
            state.viewport.breakpoint().clone(),
            state.animator.current_frame(),
        )
    }

    /// Evaluator counters
    pub fn cache_stats(&self) -> CacheStats {
        self.evaluator.stats()
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Register a callback subscriber
    pub fn subscribe<S>(&self, id: ConsumerId, subscriber: S)
    where
        S: StyleSubscriber + 'static,
    {
        self.bus.subscribe(id, subscriber);
    }

    /// Register a channel subscriber
    pub fn subscribe_channel(&self, id: ConsumerId) -> mpsc::UnboundedReceiver<StyleEvent> {
        self.bus.subscribe_channel(id)
    }

    /// Remove a subscriber
    pub fn unsubscribe(&self, id: ConsumerId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.bus.subscriber_count()
    }

    /// Bind `factory` to this runtime for repeated reads
    pub fn use_style(self: &Arc<Self>, factory: StyleFactory) -> StyleHandle {
        StyleHandle::new(self.clone(), factory)
    }
}

impl fmt::Debug for StyleRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleRuntime")
            .field("state", &*self.state.read())
            .field("breakpoints", &self.breakpoints)
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}
