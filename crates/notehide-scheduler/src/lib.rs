//! # notehide-scheduler
//!
//! Decides when items are (re)evaluated and drives them through
//! classify → resolve → decide → apply.
//!
//! Triggers: pipeline start and its follow-up sweeps, debounced structural
//! mutations plus a delayed second pass, a short recheck window, a long
//! periodic sweep, and settings-change reconciliation. All of them funnel
//! into [`Pipeline::run_pass`].

pub mod clock;
pub mod driver;
pub mod events;
pub mod pass;
pub mod pipeline;
pub mod settings_cache;
pub mod timers;

pub use clock::{ManualClock, TokioClock};
pub use driver::{run, DriverReport, HostEvent};
pub use events::{EventQueue, EventSender, SchedulerEvent};
pub use pass::{PassKind, PassReport};
pub use pipeline::Pipeline;
pub use settings_cache::{SettingsCache, SettingsSnapshot};
pub use timers::{TimerKind, TimerSet};
