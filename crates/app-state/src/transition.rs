//! Theme transition animator
//!
//! When the active theme changes, color tokens are interpolated from the old
//! values to the new ones over a fixed duration. The animator is a small
//! state machine (`Idle -> Running -> Idle`) driven by [`FrameClock`] time
//! passed in by the caller; it never spawns timers of its own.
//!
//! Only color tokens present in both the starting colors and the target
//! theme are interpolated. Everything else snaps to the target immediately.
//!
//! [`FrameClock`]: crate::clock::FrameClock

use app_ui::color::Color;
use app_ui::theme::{SharedTheme, Theme, ThemeKey};
use app_ui::tokens::{duration, Easing};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Duration and easing shared by every theme transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionConfig {
    /// Time from switch to final frame
    pub duration: Duration,
    /// Curve applied to linear progress
    pub easing: Easing,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(duration::THEME_TRANSITION_MS),
            easing: Easing::Linear,
        }
    }
}

/// One animation frame of color values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorFrame {
    /// Theme being transitioned to
    pub target: ThemeKey,
    /// Linear progress in `[0, 1]` (before easing)
    pub progress: f32,
    /// Color token values for this frame
    pub colors: BTreeMap<String, Color>,
    /// Whether this is the final frame of the transition
    pub finished: bool,
}

#[derive(Debug)]
struct Running {
    from: BTreeMap<String, Color>,
    to: SharedTheme,
    started_at: Duration,
    last: Arc<ColorFrame>,
}

#[derive(Debug)]
enum Phase {
    Idle,
    Running(Running),
}

/// Drives color interpolation between themes
#[derive(Debug)]
pub struct TransitionAnimator {
    config: TransitionConfig,
    phase: Phase,
}

impl TransitionAnimator {
    /// Create an idle animator
    pub fn new(config: TransitionConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
        }
    }

    /// Transition settings
    pub fn config(&self) -> TransitionConfig {
        self.config
    }

    /// Whether a transition is in progress
    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running(_))
    }

    /// Theme the running transition heads to
    pub fn target(&self) -> Option<&ThemeKey> {
        match &self.phase {
            Phase::Running(running) => Some(&running.to.key),
            Phase::Idle => None,
        }
    }

    /// Last frame emitted by the running transition
    pub fn current_frame(&self) -> Option<Arc<ColorFrame>> {
        match &self.phase {
            Phase::Running(running) => Some(running.last.clone()),
            Phase::Idle => None,
        }
    }

    /// Start a transition from `from` to `to` at time `now`.
    ///
    /// If a transition is already running it is preempted: its last emitted
    /// colors become the new starting point, so the returned progress-0
    /// frame matches what was on screen.
    pub fn begin(&mut self, from: &Theme, to: SharedTheme, now: Duration) -> Arc<ColorFrame> {
        let mut start_colors = from.colors.clone();
        if let Phase::Running(previous) = &self.phase {
            tracing::debug!(
                from = %previous.to.key,
                to = %to.key,
                progress = previous.last.progress,
                "preempting theme transition"
            );
            start_colors.extend(
                previous
                    .last
                    .colors
                    .iter()
                    .map(|(token, color)| (token.clone(), *color)),
            );
        }

        let interpolable: BTreeMap<String, Color> = start_colors
            .into_iter()
            .filter(|(token, _)| to.colors.contains_key(token))
            .collect();

        if self.config.duration.is_zero() {
            self.phase = Phase::Idle;
            return Arc::new(final_frame(&to));
        }

        tracing::debug!(
            to = %to.key,
            duration_ms = self.config.duration.as_millis() as u64,
            tokens = interpolable.len(),
            "theme transition started"
        );

        let first = Arc::new(ColorFrame {
            target: to.key.clone(),
            progress: 0.0,
            colors: interpolable.clone(),
            finished: false,
        });
        self.phase = Phase::Running(Running {
            from: interpolable,
            to,
            started_at: now,
            last: first.clone(),
        });
        first
    }

    /// Advance to time `now`.
    ///
    /// Returns the frame to publish, or `None` when idle. The frame at
    /// progress 1 carries the target theme's exact colors and returns the
    /// animator to idle.
    pub fn tick(&mut self, now: Duration) -> Option<Arc<ColorFrame>> {
        let Phase::Running(running) = &mut self.phase else {
            return None;
        };

        let elapsed = now.saturating_sub(running.started_at);
        let progress = (elapsed.as_secs_f64() / self.config.duration.as_secs_f64()).min(1.0);

        if progress >= 1.0 {
            let frame = Arc::new(final_frame(&running.to));
            tracing::debug!(to = %running.to.key, "theme transition finished");
            self.phase = Phase::Idle;
            return Some(frame);
        }

        let eased = self.config.easing.apply(progress as f32);
        let colors = running
            .from
            .iter()
            .filter_map(|(token, from)| {
                let to = running.to.color(token)?;
                Some((token.clone(), from.lerp(to, eased)))
            })
            .collect();

        let frame = Arc::new(ColorFrame {
            target: running.to.key.clone(),
            progress: progress as f32,
            colors,
            finished: false,
        });
        tracing::trace!(to = %running.to.key, progress, "theme transition frame");
        running.last = frame.clone();
        Some(frame)
    }
}

impl Default for TransitionAnimator {
    fn default() -> Self {
        Self::new(TransitionConfig::default())
    }
}

fn final_frame(to: &Theme) -> ColorFrame {
    ColorFrame {
        target: to.key.clone(),
        progress: 1.0,
        colors: to.colors.clone(),
        finished: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_ui::theme::{dark_theme, light_theme, tokens};

    fn mono(key: &str, primary: Color) -> SharedTheme {
        Arc::new(Theme::builder(key).color(tokens::PRIMARY, primary).build())
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_begin_emits_starting_colors() {
        let mut animator = TransitionAnimator::default();
        let light = mono("light", Color::BLACK);
        let frame = animator.begin(&light, mono("dark", Color::WHITE), ms(0));

        assert!(animator.is_running());
        assert_eq!(animator.target().map(ThemeKey::as_str), Some("dark"));
        assert_eq!(frame.progress, 0.0);
        assert!(!frame.finished);
        assert_eq!(frame.colors.get(tokens::PRIMARY), Some(&Color::BLACK));
    }

    #[test]
    fn test_midpoint_and_exact_end() {
        let mut animator = TransitionAnimator::default();
        let light = mono("light", Color::BLACK);
        animator.begin(&light, mono("dark", Color::WHITE), ms(0));

        let mid = animator.tick(ms(100)).unwrap();
        assert_eq!(mid.progress, 0.5);
        assert_eq!(
            mid.colors.get(tokens::PRIMARY),
            Some(&Color::rgb(0x7F, 0x7F, 0x7F))
        );

        let end = animator.tick(ms(200)).unwrap();
        assert!(end.finished);
        assert_eq!(end.colors.get(tokens::PRIMARY), Some(&Color::WHITE));
        assert!(!animator.is_running());
        assert!(animator.tick(ms(300)).is_none());
    }

    #[test]
    fn test_late_tick_finishes() {
        let mut animator = TransitionAnimator::default();
        animator.begin(&light_theme(), Arc::new(dark_theme()), ms(50));
        let frame = animator.tick(ms(10_000)).unwrap();
        assert!(frame.finished);
        assert_eq!(frame.colors, dark_theme().colors);
    }

    #[test]
    fn test_tick_before_start_holds_progress_zero() {
        let mut animator = TransitionAnimator::default();
        let light = mono("light", Color::BLACK);
        animator.begin(&light, mono("dark", Color::WHITE), ms(100));
        let frame = animator.tick(ms(40)).unwrap();
        assert_eq!(frame.progress, 0.0);
        assert_eq!(frame.colors.get(tokens::PRIMARY), Some(&Color::BLACK));
    }

    #[test]
    fn test_preemption_starts_from_last_emitted() {
        let mut animator = TransitionAnimator::default();
        let light = mono("light", Color::BLACK);
        let dark = mono("dark", Color::WHITE);

        animator.begin(&light, dark.clone(), ms(0));
        let before = animator.tick(ms(50)).unwrap();

        // switch back to light while a quarter of the way to dark
        let after = animator.begin(&dark, light.clone(), ms(50));
        assert_eq!(after.colors, before.colors);
        assert_eq!(after.target.as_str(), "light");

        let end = animator.tick(ms(250)).unwrap();
        assert!(end.finished);
        assert_eq!(end.colors.get(tokens::PRIMARY), Some(&Color::BLACK));
    }

    #[test]
    fn test_missing_tokens_are_not_interpolated() {
        let mut animator = TransitionAnimator::default();
        let from = Theme::builder("a")
            .color(tokens::PRIMARY, Color::BLACK)
            .color(tokens::SURFACE, Color::BLACK)
            .build();
        let to = Arc::new(
            Theme::builder("b")
                .color(tokens::PRIMARY, Color::WHITE)
                .color(tokens::TEXT, Color::WHITE)
                .build(),
        );

        let first = animator.begin(&from, to, ms(0));
        assert_eq!(first.colors.keys().collect::<Vec<_>>(), vec![tokens::PRIMARY]);

        let mid = animator.tick(ms(100)).unwrap();
        assert_eq!(mid.colors.len(), 1);

        // the final frame carries every target color
        let end = animator.tick(ms(200)).unwrap();
        assert_eq!(end.colors.len(), 2);
        assert_eq!(end.colors.get(tokens::TEXT), Some(&Color::WHITE));
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut animator = TransitionAnimator::new(TransitionConfig {
            duration: Duration::ZERO,
            easing: Easing::Linear,
        });
        let frame = animator.begin(&light_theme(), Arc::new(dark_theme()), ms(0));
        assert!(frame.finished);
        assert!(!animator.is_running());
        assert!(animator.current_frame().is_none());
    }

    #[test]
    fn test_frames_are_reproducible() {
        let run = |easing| {
            let mut animator = TransitionAnimator::new(TransitionConfig {
                duration: ms(200),
                easing,
            });
            animator.begin(&light_theme(), Arc::new(dark_theme()), ms(0));
            (1..=12)
                .filter_map(|i| animator.tick(ms(i * 16)))
                .collect::<Vec<_>>()
        };
        for easing in [Easing::Linear, Easing::EaseOut, Easing::EaseInOut] {
            assert_eq!(run(easing), run(easing));
        }
    }

    #[test]
    fn test_ease_out_leads_linear() {
        let mut linear = TransitionAnimator::default();
        let mut eased = TransitionAnimator::new(TransitionConfig {
            duration: ms(200),
            easing: Easing::EaseOut,
        });
        let light = mono("light", Color::BLACK);
        linear.begin(&light, mono("dark", Color::WHITE), ms(0));
        eased.begin(&light, mono("dark", Color::WHITE), ms(0));

        let linear_mid = linear.tick(ms(100)).unwrap();
        let eased_mid = eased.tick(ms(100)).unwrap();
        assert!(eased_mid.colors[tokens::PRIMARY].r > linear_mid.colors[tokens::PRIMARY].r);
    }
}
