//! Scene context: the explicit owner of everything that lives while a scene runs.
//!
//! A [`Scene`] is created by [`Scene::start`] and split into two halves that
//! run at different cadences:
//!
//! - [`FrameLoop`] is ticked once per display frame. It is the only writer of
//!   the blend coefficient and the particle buffers.
//! - [`GestureController`] is driven by the polling task (or manual input).
//!   It owns the state machine and phrase selector and is the only writer of
//!   the shared mode.
//!
//! The halves meet in [`SceneShared`]: an atomic mode that the frame loop
//! reads every tick, plus the currently published phrase. Nothing is
//! acknowledged; the frame loop simply picks up whatever mode is current.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use instant::Instant;

use crate::config::SceneConfig;
use crate::constants::MAX_FRAME_DT_SEC;
use crate::error::{ClassifierError, ConfigError};
use crate::frame::{FrameProducer, RenderFrame};
use crate::gesture::{ClassifierReply, GestureMachine, GestureSignal, GestureState, Transition};
use crate::particles::ParticleField;
use crate::phrases::PhraseSelector;
use crate::transition::{TargetMode, TransitionDriver};

const MODE_COMPACT: u8 = 0;
const MODE_DISPERSED: u8 = 1;

/// State shared between the frame loop and the gesture side.
pub struct SceneShared {
    mode: AtomicU8,
    running: AtomicBool,
    phrase: Mutex<Option<Arc<str>>>,
    phrase_serial: AtomicU64,
}

impl SceneShared {
    fn new() -> Self {
        Self {
            mode: AtomicU8::new(MODE_COMPACT),
            running: AtomicBool::new(true),
            phrase: Mutex::new(None),
            phrase_serial: AtomicU64::new(0),
        }
    }

    pub fn target_mode(&self) -> TargetMode {
        match self.mode.load(Ordering::Acquire) {
            MODE_DISPERSED => TargetMode::Dispersed,
            _ => TargetMode::Compact,
        }
    }

    fn set_target_mode(&self, mode: TargetMode) {
        let raw = match mode {
            TargetMode::Compact => MODE_COMPACT,
            TargetMode::Dispersed => MODE_DISPERSED,
        };
        self.mode.store(raw, Ordering::Release);
    }

    /// Phrase shown for the current expansion, if any.
    pub fn current_phrase(&self) -> Option<Arc<str>> {
        self.phrase
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Bumped on every phrase publication; lets a renderer poll for changes
    /// without taking the lock each frame.
    pub fn phrase_serial(&self) -> u64 {
        self.phrase_serial.load(Ordering::Acquire)
    }

    fn publish_phrase(&self, phrase: Option<&str>) {
        *self.phrase.lock().unwrap_or_else(PoisonError::into_inner) = phrase.map(Arc::from);
        self.phrase_serial.fetch_add(1, Ordering::AcqRel);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Mark the scene finished. The poller exits on its next wake-up.
    pub fn end(&self) {
        if self.running.swap(false, Ordering::AcqRel) {
            log::info!("[scene] ended");
        }
    }
}

/// A running scene, ready to be split between the render and polling sides.
pub struct Scene {
    shared: Arc<SceneShared>,
    frames: FrameLoop,
    controller: GestureController,
}

impl Scene {
    /// Validate `config`, generate the particle field and set up both halves.
    pub fn start(config: SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let field = ParticleField::generate(&config.field);
        let shared = Arc::new(SceneShared::new());
        // Phrase order is seeded from the field seed but must not mirror it.
        let phrase_seed = config.field.seed ^ 0x9E37_79B9_7F4A_7C15;
        let phrases = PhraseSelector::new(config.phrases, phrase_seed)?;

        log::info!(
            "[scene] started: particles={} body={} ring={} phrases={}",
            field.len(),
            field.body_count(),
            field.ring_count(),
            phrases.len()
        );

        let producer = FrameProducer::new(&field, config.motion);
        let frames = FrameLoop {
            shared: Arc::clone(&shared),
            field,
            driver: TransitionDriver::new(config.transition),
            producer,
            elapsed: 0.0,
        };
        let controller = GestureController::new(
            Arc::clone(&shared),
            phrases,
            config.polling.request_timeout,
        );
        Ok(Self {
            shared,
            frames,
            controller,
        })
    }

    pub fn shared(&self) -> Arc<SceneShared> {
        Arc::clone(&self.shared)
    }

    pub fn frames(&mut self) -> &mut FrameLoop {
        &mut self.frames
    }

    pub fn controller(&mut self) -> &mut GestureController {
        &mut self.controller
    }

    pub fn into_parts(self) -> (FrameLoop, GestureController) {
        (self.frames, self.controller)
    }
}

/// Per-frame half of a scene.
pub struct FrameLoop {
    shared: Arc<SceneShared>,
    field: ParticleField,
    driver: TransitionDriver,
    producer: FrameProducer,
    elapsed: f32,
}

impl FrameLoop {
    /// Advance by `dt` and produce the frame. Long stalls are clamped so a
    /// hidden window does not snap the morph on return.
    pub fn tick(&mut self, dt: Duration) -> &RenderFrame {
        let dt_sec = dt.as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.driver.set_mode(self.shared.target_mode());
        let blend = self.driver.step_secs(dt_sec);
        self.elapsed += dt_sec;
        self.producer.produce(&self.field, blend, self.elapsed)
    }

    pub fn blend(&self) -> f32 {
        self.driver.blend()
    }

    pub fn mode(&self) -> TargetMode {
        self.driver.mode()
    }

    /// Scene time in seconds, as accumulated from clamped ticks.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn frame(&self) -> &RenderFrame {
        self.producer.frame()
    }

    pub fn shared(&self) -> &Arc<SceneShared> {
        &self.shared
    }
}

/// Identifies one classifier request.
#[derive(Clone, Copy, Debug)]
pub struct RequestTicket {
    pub seq: u64,
    pub dispatched_at: Instant,
}

/// Gesture half of a scene: applies signals and publishes their effects.
///
/// Requests are numbered at dispatch. A reply is discarded when it was
/// dispatched before the latest manual override, when a newer reply has
/// already been applied, or when it arrives after the request timeout.
/// Debouncing happens when the reply is applied, so a late reply that repeats
/// the current state is a no-op.
pub struct GestureController {
    shared: Arc<SceneShared>,
    machine: GestureMachine,
    phrases: PhraseSelector,
    request_timeout: Duration,
    next_seq: u64,
    barrier: u64,
    last_applied: Option<u64>,
}

impl GestureController {
    fn new(shared: Arc<SceneShared>, phrases: PhraseSelector, request_timeout: Duration) -> Self {
        Self {
            shared,
            machine: GestureMachine::new(),
            phrases,
            request_timeout,
            next_seq: 0,
            barrier: 0,
            last_applied: None,
        }
    }

    pub fn state(&self) -> GestureState {
        self.machine.state()
    }

    pub fn phrases(&self) -> &PhraseSelector {
        &self.phrases
    }

    pub fn shared(&self) -> &Arc<SceneShared> {
        &self.shared
    }

    /// Number a new classifier request.
    pub fn dispatch(&mut self) -> RequestTicket {
        let ticket = RequestTicket {
            seq: self.next_seq,
            dispatched_at: Instant::now(),
        };
        self.next_seq += 1;
        ticket
    }

    /// Apply the reply for `ticket`, unless it has gone stale.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: Result<ClassifierReply, ClassifierError>,
    ) -> Option<Transition> {
        if ticket.seq < self.barrier {
            log::debug!("[gesture] drop reply #{}: predates manual override", ticket.seq);
            return None;
        }
        if self.last_applied.is_some_and(|seq| ticket.seq < seq) {
            log::debug!("[gesture] drop reply #{}: newer reply already applied", ticket.seq);
            return None;
        }
        let elapsed = ticket.dispatched_at.elapsed();
        if elapsed > self.request_timeout {
            let err = ClassifierError::TimedOut {
                elapsed_ms: elapsed.as_millis(),
                limit_ms: self.request_timeout.as_millis(),
            };
            log::warn!("[gesture] drop reply #{}: {}", ticket.seq, err);
            return None;
        }
        self.last_applied = Some(ticket.seq);

        let signal = match result {
            Ok(reply) => {
                let signal = reply.signal();
                log::debug!(
                    "[gesture] reply #{} gesture={} confidence={:?}",
                    ticket.seq,
                    signal.as_str(),
                    reply.confidence
                );
                signal
            }
            Err(err) => {
                log::warn!("[gesture] classifier failed, treating as none: {}", err);
                GestureSignal::None
            }
        };
        self.apply_signal(signal)
    }

    /// Run `signal` through the state machine and publish any transition.
    pub fn apply_signal(&mut self, signal: GestureSignal) -> Option<Transition> {
        let transition = self.machine.apply(signal)?;
        self.publish(transition);
        Some(transition)
    }

    /// Operator toggle, bypassing the classifier. In-flight requests become stale.
    pub fn manual_toggle(&mut self) -> Transition {
        self.barrier = self.next_seq;
        let transition = self.machine.toggle();
        self.publish(transition);
        transition
    }

    /// Operator-supplied signal, bypassing the classifier. In-flight requests
    /// become stale even when the signal itself is a no-op.
    pub fn manual_signal(&mut self, signal: GestureSignal) -> Option<Transition> {
        self.barrier = self.next_seq;
        self.apply_signal(signal)
    }

    fn publish(&mut self, transition: Transition) {
        self.shared
            .set_target_mode(transition.state().target_mode());
        match transition {
            Transition::Expanded => {
                let phrase = self.phrases.select();
                log::info!("[gesture] collapsed -> expanded: \"{}\"", phrase);
                self.shared.publish_phrase(Some(phrase));
            }
            Transition::Collapsed => {
                log::info!("[gesture] expanded -> collapsed");
                self.shared.publish_phrase(None);
            }
        }
    }
}
