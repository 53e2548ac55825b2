//! Gesture signal types and the collapsed/expanded state machine.
//!
//! The machine itself is pure: it maps a signal to an optional
//! [`Transition`] and leaves side effects (mode publication, phrase selection)
//! to the caller, so classifier-driven and manual paths share one table.

use crate::transition::TargetMode;

/// Coarse hand state reported by the classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GestureSignal {
    Open,
    Closed,
    #[default]
    None,
}

impl GestureSignal {
    /// Parse a classifier label. Unknown labels map to `None`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "open" | "open_palm" | "open-palm" | "palm" => GestureSignal::Open,
            "closed" | "closed_fist" | "closed-fist" | "fist" => GestureSignal::Closed,
            _ => GestureSignal::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GestureSignal::Open => "open",
            GestureSignal::Closed => "closed",
            GestureSignal::None => "none",
        }
    }
}

/// Raw reply from a gesture classifier.
///
/// Both fields are optional so partially filled replies still parse; a
/// missing or unknown `gesture` counts as [`GestureSignal::None`]. The
/// `confidence` is informational only.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassifierReply {
    pub gesture: Option<String>,
    pub confidence: Option<f32>,
}

impl ClassifierReply {
    pub fn new(gesture: &str, confidence: f32) -> Self {
        Self {
            gesture: Some(gesture.to_string()),
            confidence: Some(confidence),
        }
    }

    pub fn signal(&self) -> GestureSignal {
        self.gesture
            .as_deref()
            .map(GestureSignal::from_label)
            .unwrap_or_default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Collapsed,
    Expanded,
}

impl GestureState {
    /// Mode the frame loop should converge to while in this state.
    pub fn target_mode(self) -> TargetMode {
        match self {
            GestureState::Collapsed => TargetMode::Compact,
            GestureState::Expanded => TargetMode::Dispersed,
        }
    }
}

/// A state change produced by the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Collapsed -> Expanded; the caller selects a phrase.
    Expanded,
    /// Expanded -> Collapsed.
    Collapsed,
}

impl Transition {
    pub fn state(self) -> GestureState {
        match self {
            Transition::Expanded => GestureState::Expanded,
            Transition::Collapsed => GestureState::Collapsed,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct GestureMachine {
    state: GestureState,
}

impl GestureMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Apply a signal. `None` and repeats of the current state are no-ops.
    pub fn apply(&mut self, signal: GestureSignal) -> Option<Transition> {
        let transition = match (self.state, signal) {
            (GestureState::Collapsed, GestureSignal::Open) => Transition::Expanded,
            (GestureState::Expanded, GestureSignal::Closed) => Transition::Collapsed,
            _ => return None,
        };
        self.state = transition.state();
        Some(transition)
    }

    /// Flip the state: the transition an opposite signal would have produced.
    pub fn toggle(&mut self) -> Transition {
        let transition = match self.state {
            GestureState::Collapsed => Transition::Expanded,
            GestureState::Expanded => Transition::Collapsed,
        };
        self.state = transition.state();
        transition
    }
}
