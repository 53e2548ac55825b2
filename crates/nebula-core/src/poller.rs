//! Periodic gesture polling.
//!
//! The poller owns the [`GestureController`] on its own thread. Every
//! interval it numbers a request and hands the classifier call to a short-lived
//! worker thread, so a slow classifier never delays the next tick or the frame
//! loop. Replies and manual commands arrive on one channel, which keeps the
//! controller single-writer.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use instant::Instant;
use smallvec::SmallVec;

use crate::config::PollParams;
use crate::error::ClassifierError;
use crate::gesture::{ClassifierReply, GestureSignal};
use crate::scene::{GestureController, RequestTicket};

// Upper bound on how long the loop sleeps before rechecking the running flag.
const WAKE_INTERVAL: Duration = Duration::from_millis(100);

/// Anything that can look at the current camera frame and name the gesture.
///
/// Calls may block for a long time and may run concurrently with each other.
pub trait GestureClassifier: Send + Sync + 'static {
    fn classify(&self) -> Result<ClassifierReply, ClassifierError>;
}

/// Operator input routed through the poller thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollerCommand {
    Toggle,
    Signal(GestureSignal),
    Shutdown,
}

enum Message {
    Reply {
        ticket: RequestTicket,
        result: Result<ClassifierReply, ClassifierError>,
    },
    Command(PollerCommand),
}

/// Cloneable sender for manual commands.
#[derive(Clone)]
pub struct PollerHandle {
    tx: Sender<Message>,
}

impl PollerHandle {
    /// Returns false once the poller has exited.
    pub fn send(&self, command: PollerCommand) -> bool {
        self.tx.send(Message::Command(command)).is_ok()
    }

    pub fn toggle(&self) -> bool {
        self.send(PollerCommand::Toggle)
    }
}

pub struct GesturePoller {
    handle: PollerHandle,
    thread: Option<JoinHandle<GestureController>>,
}

impl GesturePoller {
    /// Start polling `classifier` on a dedicated thread.
    pub fn spawn(
        controller: GestureController,
        classifier: Arc<dyn GestureClassifier>,
        params: PollParams,
    ) -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let loop_tx = tx.clone();
        let thread = thread::Builder::new()
            .name("gesture-poller".into())
            .spawn(move || run(controller, classifier, params, loop_tx, rx))?;
        Ok(Self {
            handle: PollerHandle { tx },
            thread: Some(thread),
        })
    }

    pub fn handle(&self) -> PollerHandle {
        self.handle.clone()
    }

    pub fn toggle(&self) -> bool {
        self.handle.toggle()
    }

    /// Stop the poller and hand back the controller. In-flight classifier
    /// calls are left to finish on their own; their replies are discarded.
    pub fn shutdown(mut self) -> Option<GestureController> {
        self.stop()
    }

    fn stop(&mut self) -> Option<GestureController> {
        let thread = self.thread.take()?;
        self.handle.send(PollerCommand::Shutdown);
        match thread.join() {
            Ok(controller) => Some(controller),
            Err(_) => {
                log::error!("[poller] thread panicked");
                None
            }
        }
    }
}

impl Drop for GesturePoller {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run(
    mut controller: GestureController,
    classifier: Arc<dyn GestureClassifier>,
    params: PollParams,
    tx: Sender<Message>,
    rx: Receiver<Message>,
) -> GestureController {
    let shared = Arc::clone(controller.shared());
    let mut pending: SmallVec<[RequestTicket; 4]> = SmallVec::new();
    let mut next_tick = Instant::now();
    log::info!(
        "[poller] started: interval={}ms timeout={}ms max_in_flight={}",
        params.interval.as_millis(),
        params.request_timeout.as_millis(),
        params.max_in_flight
    );

    while shared.is_running() {
        let now = Instant::now();
        if now >= next_tick {
            expire_pending(&mut pending, params.request_timeout);
            if pending.len() < params.max_in_flight {
                let ticket = controller.dispatch();
                if spawn_request(ticket, &classifier, &tx) {
                    pending.push(ticket);
                }
            } else {
                log::debug!("[poller] skip tick: {} requests in flight", pending.len());
            }
            next_tick += params.interval;
            if next_tick <= now {
                next_tick = now + params.interval;
            }
        }

        let wait = next_tick.saturating_duration_since(Instant::now());
        match rx.recv_timeout(wait.min(WAKE_INTERVAL)) {
            Ok(Message::Reply { ticket, result }) => {
                // An expired ticket already gave its slot back.
                if let Some(slot) = pending.iter().position(|t| t.seq == ticket.seq) {
                    pending.swap_remove(slot);
                }
                controller.complete(ticket, result);
            }
            Ok(Message::Command(PollerCommand::Toggle)) => {
                controller.manual_toggle();
            }
            Ok(Message::Command(PollerCommand::Signal(signal))) => {
                controller.manual_signal(signal);
            }
            Ok(Message::Command(PollerCommand::Shutdown)) => break,
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    log::info!("[poller] stopped with {} requests in flight", pending.len());
    controller
}

/// Release the slots of requests older than `timeout`. Their replies, if they
/// ever arrive, are rejected by the controller.
fn expire_pending(pending: &mut SmallVec<[RequestTicket; 4]>, timeout: Duration) {
    pending.retain(|ticket| {
        let elapsed = ticket.dispatched_at.elapsed();
        if elapsed > timeout {
            log::warn!(
                "[poller] request #{} unanswered after {}ms, releasing its slot",
                ticket.seq,
                elapsed.as_millis()
            );
            false
        } else {
            true
        }
    });
}

fn spawn_request(
    ticket: RequestTicket,
    classifier: &Arc<dyn GestureClassifier>,
    tx: &Sender<Message>,
) -> bool {
    let classifier = Arc::clone(classifier);
    let tx = tx.clone();
    let spawned = thread::Builder::new()
        .name(format!("gesture-classify-{}", ticket.seq))
        .spawn(move || {
            let result = classifier.classify();
            // The poller may already be gone; the reply is simply dropped.
            let _ = tx.send(Message::Reply { ticket, result });
        });
    match spawned {
        Ok(_) => true,
        Err(e) => {
            log::error!("[poller] could not spawn classifier request: {}", e);
            false
        }
    }
}

/// Classifier that replays a fixed list of replies.
///
/// Once the list is exhausted it answers "no hand" (or starts over when
/// built with [`ScriptedClassifier::cycling`]). Useful for demos and tests.
pub struct ScriptedClassifier {
    replies: Vec<Result<ClassifierReply, ClassifierError>>,
    cursor: AtomicUsize,
    latency: Duration,
    cycle: bool,
}

impl ScriptedClassifier {
    pub fn new(replies: Vec<Result<ClassifierReply, ClassifierError>>) -> Self {
        Self {
            replies,
            cursor: AtomicUsize::new(0),
            latency: Duration::ZERO,
            cycle: false,
        }
    }

    pub fn from_signals(signals: &[GestureSignal]) -> Self {
        Self::new(
            signals
                .iter()
                .map(|s| Ok(ClassifierReply::new(s.as_str(), 1.0)))
                .collect(),
        )
    }

    /// Sleep for `latency` inside every call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn cycling(mut self) -> Self {
        self.cycle = true;
        self
    }

    /// Number of calls made so far.
    pub fn calls(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }
}

impl GestureClassifier for ScriptedClassifier {
    fn classify(&self) -> Result<ClassifierReply, ClassifierError> {
        let index = self.cursor.fetch_add(1, Ordering::AcqRel);
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        if self.replies.is_empty() {
            return Ok(ClassifierReply::default());
        }
        let index = if self.cycle {
            index % self.replies.len()
        } else {
            index
        };
        self.replies
            .get(index)
            .cloned()
            .unwrap_or_else(|| Ok(ClassifierReply::default()))
    }
}
