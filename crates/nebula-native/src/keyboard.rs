//! Keyboard stand-in for the camera + remote classifier.
//!
//! | Key | Effect |
//! |---|---|
//! | `O` | camera now shows an open hand |
//! | `C` | camera now shows a closed fist |
//! | `N` | camera shows no hand |
//! | `Space` | manual toggle, bypassing the classifier |
//! | `Escape` / `Q` | quit |
//!
//! `O`/`C`/`N` only latch what the simulated camera sees; the change takes
//! effect at the next poll, exactly like a real classifier round trip.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use nebula_core::{ClassifierError, ClassifierReply, GestureClassifier, GestureSignal};
use winit::keyboard::{Key, NamedKey};

/// What a key press means to the app.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Show(GestureSignal),
    Toggle,
    Quit,
}

pub fn action_for_key(key: &Key) -> Option<KeyAction> {
    match key {
        Key::Named(NamedKey::Space) => Some(KeyAction::Toggle),
        Key::Named(NamedKey::Escape) => Some(KeyAction::Quit),
        Key::Character(c) => match c.as_str() {
            "o" | "O" => Some(KeyAction::Show(GestureSignal::Open)),
            "c" | "C" => Some(KeyAction::Show(GestureSignal::Closed)),
            "n" | "N" => Some(KeyAction::Show(GestureSignal::None)),
            "q" | "Q" => Some(KeyAction::Quit),
            _ => None,
        },
        _ => None,
    }
}

/// Classifier that reports the latched keyboard gesture after a fixed latency.
pub struct KeyboardClassifier {
    latched: AtomicU8,
    latency: Duration,
}

impl KeyboardClassifier {
    pub fn new(latency: Duration) -> Arc<Self> {
        Arc::new(Self {
            latched: AtomicU8::new(encode(GestureSignal::None)),
            latency,
        })
    }

    pub fn show(&self, signal: GestureSignal) {
        log::debug!("[keyboard] camera now sees: {}", signal.as_str());
        self.latched.store(encode(signal), Ordering::Release);
    }
}

impl GestureClassifier for KeyboardClassifier {
    fn classify(&self) -> Result<ClassifierReply, ClassifierError> {
        thread::sleep(self.latency);
        let signal = decode(self.latched.load(Ordering::Acquire));
        Ok(ClassifierReply::new(signal.as_str(), 1.0))
    }
}

fn encode(signal: GestureSignal) -> u8 {
    match signal {
        GestureSignal::None => 0,
        GestureSignal::Open => 1,
        GestureSignal::Closed => 2,
    }
}

fn decode(raw: u8) -> GestureSignal {
    match raw {
        1 => GestureSignal::Open,
        2 => GestureSignal::Closed,
        _ => GestureSignal::None,
    }
}
