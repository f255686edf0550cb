//! Viewport width and the breakpoint derived from it

use app_ui::tokens::{Breakpoint, BreakpointTable};
use serde::Serialize;

/// Current viewport width and its resolved breakpoint
///
/// The breakpoint is always `table.resolve(width)`; there is no override.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewportState {
    width: f32,
    breakpoint: Breakpoint,
}

/// A breakpoint transition caused by a viewport resize
#[derive(Debug, Clone, PartialEq)]
pub struct BreakpointChange {
    /// Breakpoint before the resize
    pub previous: Breakpoint,
    /// Breakpoint after the resize
    pub current: Breakpoint,
}

impl ViewportState {
    /// Initial state for a zero-width viewport
    pub fn new(table: &BreakpointTable) -> Self {
        Self {
            width: 0.0,
            breakpoint: table.resolve(0.0).clone(),
        }
    }

    /// Record a new width.
    ///
    /// Returns the change only when the resolved breakpoint differs.
    pub fn update(&mut self, table: &BreakpointTable, width: f32) -> Option<BreakpointChange> {
        self.width = width;
        let resolved = table.resolve(width);
        if resolved.name == self.breakpoint.name {
            return None;
        }

        let previous = std::mem::replace(&mut self.breakpoint, resolved.clone());
        Some(BreakpointChange {
            previous,
            current: self.breakpoint.clone(),
        })
    }

    /// Last reported width
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Current breakpoint
    pub fn breakpoint(&self) -> &Breakpoint {
        &self.breakpoint
    }
}
