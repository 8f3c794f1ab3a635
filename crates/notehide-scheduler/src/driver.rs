//! Async host loop: waits on host signals, queued scheduler events, and the
//! next timer deadline, then ticks the pipeline.

use std::sync::Arc;
use std::time::Duration;

use notehide_core::traits::{IHostDocument, ISettingsStore};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::events::SchedulerEvent;
use crate::pipeline::Pipeline;

/// Upper bound on how long the loop sleeps with nothing scheduled.
const IDLE_WAIT: Duration = Duration::from_secs(60);

/// Wake-ups a host can send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// The document changed; pending mutations are read on the next tick.
    DocumentChanged,
    /// Forward an event straight into the scheduler.
    Scheduler(SchedulerEvent),
}

/// What the loop did before it stopped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverReport {
    pub ticks: u64,
    pub passes: u64,
    pub hidden: u64,
    pub unhidden: u64,
}

enum Wake {
    Cancelled,
    Host(Option<HostEvent>),
    Queued(Option<SchedulerEvent>),
    Timer,
}

/// Run `pipeline` against `doc` until `cancel` fires.
///
/// The document lock is held only while the pipeline is working, so the host
/// may mutate the document between ticks. A closed host channel is not fatal;
/// timers and settings changes keep driving the pipeline.
pub async fn run<D>(
    mut pipeline: Pipeline,
    doc: Arc<Mutex<D>>,
    store: Arc<dyn ISettingsStore>,
    mut host_events: UnboundedReceiver<HostEvent>,
    cancel: CancellationToken,
) -> DriverReport
where
    D: IHostDocument + Send,
{
    let mut report = DriverReport::default();
    {
        let mut doc = doc.lock().await;
        let passes = pipeline.start(&mut *doc, store.as_ref());
        tally(&mut report, &passes);
    }
    info!("driver running");

    let mut host_open = true;
    loop {
        let wait = pipeline
            .time_until_next_deadline()
            .unwrap_or(IDLE_WAIT)
            .min(IDLE_WAIT);

        let wake = tokio::select! {
            _ = cancel.cancelled() => Wake::Cancelled,
            event = host_events.recv(), if host_open => Wake::Host(event),
            event = pipeline.next_event() => Wake::Queued(event),
            _ = tokio::time::sleep(wait) => Wake::Timer,
        };

        let mut doc = doc.lock().await;
        let mut passes = Vec::new();
        match wake {
            Wake::Cancelled => break,
            Wake::Host(None) => {
                debug!("host channel closed");
                host_open = false;
            }
            Wake::Host(Some(HostEvent::DocumentChanged)) | Wake::Timer | Wake::Queued(None) => {}
            Wake::Host(Some(HostEvent::Scheduler(event))) | Wake::Queued(Some(event)) => {
                passes.extend(pipeline.handle_event(&mut *doc, store.as_ref(), event));
            }
        }
        passes.extend(pipeline.tick(&mut *doc, store.as_ref()));
        report.ticks += 1;
        tally(&mut report, &passes);
    }

    info!(
        ticks = report.ticks,
        passes = report.passes,
        hidden = report.hidden,
        unhidden = report.unhidden,
        "driver stopped"
    );
    report
}

fn tally(report: &mut DriverReport, passes: &[crate::pass::PassReport]) {
    for pass in passes.iter().filter(|p| !p.deferred) {
        report.passes += 1;
        report.hidden += pass.hidden as u64;
        report.unhidden += pass.unhidden as u64;
    }
}
