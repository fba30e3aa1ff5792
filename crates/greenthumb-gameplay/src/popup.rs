//! Popups raised by plant growth.
//!
//! Transition popups auto-hide after the display duration; showing a new
//! one replaces the old one and its pending hide. The fact popup shown on
//! completion stays until dismissed, and dismissing removes the dismiss
//! control for the rest of the session.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

use crate::timer::{DeferredTimer, TimerToken};
use crate::view::PopupView;

/// Default seconds a transition popup stays up.
pub const DEFAULT_POPUP_DURATION: f32 = 3.0;

/// Content of a popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Popup {
    /// Shown when a plant reaches an intermediate stage
    Transition {
        /// Sprite asset to display
        sprite: String,
    },
    /// Shown when a plant is fully grown
    Fact {
        /// Fact text
        text: String,
        /// Whether the dismiss control is still offered
        dismissable: bool,
    },
}

/// One target's popup slot.
pub struct PopupController {
    display_duration: f32,
    current: Option<Popup>,
    timer: DeferredTimer,
    dismiss_available: bool,
    view: Option<Box<dyn PopupView>>,
}

impl PopupController {
    /// Creates a controller with nothing shown.
    #[must_use]
    pub fn new(display_duration: f32, view: Option<Box<dyn PopupView>>) -> Self {
        Self {
            display_duration: display_duration.max(0.0),
            current: None,
            timer: DeferredTimer::new(),
            dismiss_available: true,
            view,
        }
    }

    /// Popup currently shown.
    #[must_use]
    pub fn current(&self) -> Option<&Popup> {
        self.current.as_ref()
    }

    /// Whether anything is shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }

    /// Whether the fact popup still offers its dismiss control.
    #[must_use]
    pub const fn dismiss_available(&self) -> bool {
        self.dismiss_available
    }

    /// Token of the pending auto-hide.
    #[must_use]
    pub fn pending_hide(&self) -> Option<TimerToken> {
        self.timer.pending()
    }

    /// Seconds a transition popup stays up.
    #[must_use]
    pub const fn display_duration(&self) -> f32 {
        self.display_duration
    }

    /// Shows a transition popup and schedules its hide.
    pub fn show_transition(&mut self, sprite: &str) -> TimerToken {
        let popup = Popup::Transition {
            sprite: sprite.to_string(),
        };
        self.show(popup);
        let token = self.timer.schedule(self.display_duration);
        trace!("Popup hide {:?} scheduled", token);
        token
    }

    /// Shows the completion fact. It stays until dismissed or reset.
    pub fn show_fact(&mut self, text: &str) {
        self.timer.cancel();
        let popup = Popup::Fact {
            text: text.to_string(),
            dismissable: self.dismiss_available,
        };
        self.show(popup);
    }

    /// Dismisses the fact popup. Returns false if there was nothing to
    /// dismiss or the control is gone.
    pub fn dismiss(&mut self) -> bool {
        let showing_fact = matches!(self.current, Some(Popup::Fact { .. }));
        if !showing_fact || !self.dismiss_available {
            return false;
        }
        self.hide();
        self.dismiss_available = false;
        if let Some(view) = self.view.as_mut() {
            view.remove_dismiss();
        }
        true
    }

    /// Advances the auto-hide. Returns the token that fired.
    pub fn tick(&mut self, dt: f32) -> Option<TimerToken> {
        let fired = self.timer.tick(dt)?;
        trace!("Popup hide {:?} fired", fired);
        self.hide();
        Some(fired)
    }

    /// Hides everything and cancels the pending hide.
    pub fn hide_all(&mut self) {
        self.timer.cancel();
        self.hide();
    }

    /// Cancels the pending hide without touching what is shown.
    pub fn cancel_pending(&mut self) -> Option<TimerToken> {
        self.timer.cancel()
    }

    fn show(&mut self, popup: Popup) {
        if let Some(view) = self.view.as_mut() {
            view.show(&popup);
        }
        self.current = Some(popup);
    }

    fn hide(&mut self) {
        self.current = None;
        if let Some(view) = self.view.as_mut() {
            view.hide();
        }
    }
}

impl fmt::Debug for PopupController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopupController")
            .field("display_duration", &self.display_duration)
            .field("current", &self.current)
            .field("timer", &self.timer)
            .field("dismiss_available", &self.dismiss_available)
            .field("has_view", &self.view.is_some())
            .finish()
    }
}

impl Drop for PopupController {
    fn drop(&mut self) {
        if let Some(token) = self.timer.cancel() {
            trace!("Popup hide {:?} cancelled on drop", token);
        }
    }
}
