//! Focus coordination for the composite widget.
//!
//! This module provides [`FocusCoordinator`], which reports the picker as
//! focused or blurred as a single unit even though keyboard focus moves
//! between the text field, the buttons and the popup contents.
//!
//! # Deferred blur check
//!
//! Moving focus from the text field to a popup element produces a focus-out
//! followed by a focus-in. Deciding on the focus-out alone would briefly mark
//! the widget blurred. Instead a focus-out posts a [`BlurCheck`] to a
//! [`DeferredQueue`] stamped with the current generation. Any focus-in bumps
//! the generation and cancels the pending check. When the host drains the
//! queue after the dispatch cycle, a check whose generation is still current
//! means focus really left the widget.
//!
//! ```
//! use chronopick::widget::events::CompositePart;
//! use chronopick::widget::focus::{FocusChange, FocusCoordinator};
//!
//! let mut focus = FocusCoordinator::new();
//! assert_eq!(focus.focus_in(CompositePart::Input), Some(FocusChange::Gained));
//!
//! // Internal move: out of the input, into the time list.
//! focus.focus_out(CompositePart::Input);
//! focus.focus_in(CompositePart::TimeList);
//! assert_eq!(focus.process_deferred(), None);
//! assert!(focus.is_focused());
//!
//! // Focus leaves the composite.
//! focus.focus_out(CompositePart::TimeList);
//! assert_eq!(focus.process_deferred(), Some(FocusChange::Lost));
//! assert!(!focus.is_focused());
//! ```

use chronopick_core::logging::targets;
use chronopick_core::{DeferredQueue, TaskId};

use super::events::CompositePart;

/// A scheduled check of whether focus left the composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlurCheck {
    /// Generation at the time of the focus-out.
    pub generation: u64,
}

/// A change of the logical focused state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusChange {
    /// The widget became focused.
    Gained,
    /// Focus left the widget entirely.
    Lost,
}

/// Tracks one logical `focused` flag across all parts of the composite.
#[derive(Debug, Default)]
pub struct FocusCoordinator {
    /// The logical focused state.
    focused: bool,
    /// The part holding keyboard focus right now, if any.
    focused_part: Option<CompositePart>,
    /// Bumped on every focus event; stale checks carry an older value.
    generation: u64,
    /// Handle of the outstanding blur check.
    pending: Option<TaskId>,
    queue: DeferredQueue<BlurCheck>,
}

impl FocusCoordinator {
    /// Create a coordinator in the blurred state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the widget is logically focused.
    #[inline]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// The part currently holding keyboard focus.
    #[inline]
    pub fn focused_part(&self) -> Option<CompositePart> {
        self.focused_part
    }

    /// The current generation.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a blur check is waiting to run.
    pub fn has_pending_check(&self) -> bool {
        self.queue.has_pending()
    }

    /// Record focus entering `part`.
    ///
    /// Supersedes any pending blur check. Returns [`FocusChange::Gained`]
    /// when the widget was not focused before.
    pub fn focus_in(&mut self, part: CompositePart) -> Option<FocusChange> {
        self.generation += 1;
        self.cancel_pending();
        self.focused_part = Some(part);

        if self.focused {
            tracing::trace!(target: targets::FOCUS, ?part, "focus moved within widget");
            return None;
        }
        self.focused = true;
        tracing::debug!(target: targets::FOCUS, ?part, "widget focused");
        Some(FocusChange::Gained)
    }

    /// Record focus leaving `part` and schedule a blur check.
    pub fn focus_out(&mut self, part: CompositePart) {
        if self.focused_part == Some(part) {
            self.focused_part = None;
        }
        self.generation += 1;
        self.cancel_pending();
        let id = self.queue.post(BlurCheck {
            generation: self.generation,
        });
        self.pending = Some(id);
        tracing::trace!(
            target: targets::FOCUS,
            ?part,
            generation = self.generation,
            "scheduled blur check"
        );
    }

    /// Run the scheduled blur checks.
    ///
    /// Returns [`FocusChange::Lost`] when a current check finds that no part
    /// of the composite holds focus.
    pub fn process_deferred(&mut self) -> Option<FocusChange> {
        self.pending = None;
        let mut change = None;

        for (_, check) in self.queue.drain() {
            if check.generation != self.generation {
                tracing::trace!(
                    target: targets::FOCUS,
                    stale = check.generation,
                    current = self.generation,
                    "ignoring stale blur check"
                );
                continue;
            }
            if self.focused && self.focused_part.is_none() {
                self.focused = false;
                tracing::debug!(target: targets::FOCUS, "widget blurred");
                change = Some(FocusChange::Lost);
            }
        }
        change
    }

    fn cancel_pending(&mut self) {
        if let Some(id) = self.pending.take() {
            self.queue.cancel(id);
        }
    }
}
