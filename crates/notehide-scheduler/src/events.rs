//! Scheduler event queue. Store listeners and hosts push from any thread;
//! the pipeline drains on its own thread at the next tick.

use notehide_core::models::SettingsChange;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::trace;

use crate::timers::TimerKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerEvent {
    /// Begin processing (hosts that cannot call `Pipeline::start` directly).
    Start,
    /// The host reports structural mutations it observed itself.
    Mutations { count: usize },
    SettingsChanged(SettingsChange),
    /// Fire a timer now, regardless of its deadline.
    Timer(TimerKind),
}

/// Cloneable producer side of the queue.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: UnboundedSender<SchedulerEvent>,
}

impl EventSender {
    /// Enqueue. Returns false once the pipeline is gone.
    pub fn send(&self, event: SchedulerEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

pub struct EventQueue {
    tx: UnboundedSender<SchedulerEvent>,
    rx: UnboundedReceiver<SchedulerEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    pub fn sender(&self) -> EventSender {
        EventSender {
            tx: self.tx.clone(),
        }
    }

    pub fn push(&self, event: SchedulerEvent) {
        // The queue owns a receiver, so sending cannot fail here.
        let _ = self.tx.send(event);
    }

    /// Everything queued so far, in arrival order.
    pub fn drain(&mut self) -> Vec<SchedulerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        if !events.is_empty() {
            trace!(count = events.len(), "drained scheduler events");
        }
        events
    }

    /// Wait for the next event.
    pub async fn recv(&mut self) -> Option<SchedulerEvent> {
        self.rx.recv().await
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
