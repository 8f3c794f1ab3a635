//! Pipeline: owns every stage and decides which items a pass examines.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use notehide_core::config::NotehideConfig;
use notehide_core::errors::NotehideResult;
use notehide_core::models::{
    MutationKind, NodeHandle, ObserverOptions, Settings, SettingsChange, StorageScope,
};
use notehide_core::traits::{IClock, IHostDocument, ISettingsStore, SystemClock};
use notehide_detect::{AccountResolver, Classifier};
use notehide_observability::{classify_span, pass_span, reconcile_span, PipelineMetrics};
use notehide_policy::PolicyEngine;
use notehide_tracker::{Applied, StateTracker};
use tracing::{debug, info, warn};

use crate::events::{EventQueue, EventSender, SchedulerEvent};
use crate::pass::{PassKind, PassReport};
use crate::settings_cache::{SettingsCache, SettingsSnapshot};
use crate::timers::{TimerKind, TimerSet};

fn ms(value: u64) -> Duration {
    Duration::milliseconds(i64::try_from(value).unwrap_or(i64::MAX))
}

/// The note-hiding pipeline for one host document.
///
/// Single-threaded by construction: every entry point takes `&mut self` and
/// the document. Store listeners only enqueue events, which are drained by
/// [`Pipeline::tick`].
pub struct Pipeline {
    config: NotehideConfig,
    classifier: Classifier,
    resolver: AccountResolver,
    tracker: StateTracker,
    cache: SettingsCache,
    timers: TimerSet,
    events: EventQueue,
    clock: Arc<dyn IClock>,
    metrics: PipelineMetrics,
    started: bool,
    /// A sync-scope change arrived but its reload has not succeeded yet.
    reload_pending: bool,
    /// Already-decided visible items whose subtree changed since the last
    /// delayed recheck.
    touched: BTreeSet<NodeHandle>,
}

impl Pipeline {
    pub fn new(config: NotehideConfig) -> NotehideResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: NotehideConfig, clock: Arc<dyn IClock>) -> NotehideResult<Self> {
        config.validate()?;
        Ok(Self {
            classifier: Classifier::new(&config.detection),
            resolver: AccountResolver::new(&config.detection),
            tracker: StateTracker::new(config.markers.clone()),
            cache: SettingsCache::new(),
            timers: TimerSet::new(),
            events: EventQueue::new(),
            clock,
            metrics: PipelineMetrics::new(),
            started: false,
            reload_pending: false,
            touched: BTreeSet::new(),
            config,
        })
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// Subscribe to the store, start observing, arm the recurring timers,
    /// and run the first sweep if settings load. Idempotent.
    pub fn start(
        &mut self,
        doc: &mut dyn IHostDocument,
        store: &dyn ISettingsStore,
    ) -> Vec<PassReport> {
        if self.started {
            return Vec::new();
        }
        self.started = true;

        let sender = self.events.sender();
        store.subscribe(Box::new(move |change: &SettingsChange| {
            sender.send(SchedulerEvent::SettingsChanged(change.clone()));
        }));
        doc.observe(self.observer_options());

        let now = self.clock.now();
        let s = &self.config.scheduler;
        for (n, delay) in s.initial_followups_ms.iter().enumerate() {
            self.timers.arm(TimerKind::InitialFollowUp(n), now + ms(*delay));
        }
        self.timers
            .arm(TimerKind::ShortWindow, now + ms(s.short_window_interval_ms));
        self.timers
            .arm(TimerKind::LongPeriod, now + ms(s.long_period_ms));
        info!(
            version = notehide_core::constants::VERSION,
            followups = s.initial_followups_ms.len(),
            "pipeline started"
        );

        let mut reports = Vec::new();
        if self.load_settings(store) {
            reports.push(self.sweep(doc, PassKind::InitialSweep));
        }
        reports
    }

    /// Drain queued events and document mutations, then fire due timers.
    pub fn tick(
        &mut self,
        doc: &mut dyn IHostDocument,
        store: &dyn ISettingsStore,
    ) -> Vec<PassReport> {
        let mut reports = Vec::new();

        let targets: Vec<NodeHandle> = doc
            .take_mutations()
            .into_iter()
            .filter(|r| r.adds_nodes() || matches!(r.kind, MutationKind::Attribute { .. }))
            .map(|r| r.target)
            .collect();
        if !targets.is_empty() {
            self.touch_items(doc, &targets);
            self.on_mutations(targets.len());
        }

        for event in self.events.drain() {
            reports.extend(self.handle_event(doc, store, event));
        }

        let load_due = self.reload_pending || !self.cache.is_loaded();
        if self.started && load_due && self.load_settings(store) {
            if std::mem::take(&mut self.reload_pending) {
                reports.push(self.reconcile(doc));
            } else {
                reports.push(self.sweep(doc, PassKind::InitialSweep));
            }
        }

        let now = self.clock.now();
        for timer in self.timers.take_due(now) {
            reports.extend(self.fire(doc, timer));
        }
        reports
    }

    /// Apply one event immediately.
    pub fn handle_event(
        &mut self,
        doc: &mut dyn IHostDocument,
        store: &dyn ISettingsStore,
        event: SchedulerEvent,
    ) -> Vec<PassReport> {
        match event {
            SchedulerEvent::Start => self.start(doc, store),
            SchedulerEvent::Mutations { count } => {
                self.on_mutations(count);
                Vec::new()
            }
            SchedulerEvent::SettingsChanged(change) => {
                self.on_settings_changed(doc, store, &change)
            }
            SchedulerEvent::Timer(kind) => {
                self.timers.cancel(kind);
                self.fire(doc, kind)
            }
        }
    }

    /// Coalesce a mutation burst into one debounced sweep plus a delayed recheck.
    fn on_mutations(&mut self, count: usize) {
        let now = self.clock.now();
        let s = &self.config.scheduler;
        self.timers.arm(TimerKind::Debounce, now + ms(s.debounce_ms));
        self.timers
            .arm(TimerKind::DelayedRecheck, now + ms(s.delayed_recheck_ms));
        debug!(count, "mutations observed, passes scheduled");
    }

    /// Remember decided, visible items enclosing any of `targets` so the
    /// delayed recheck looks at them again whatever their recheck budget.
    fn touch_items(&mut self, doc: &dyn IHostDocument, targets: &[NodeHandle]) {
        let items: HashSet<NodeHandle> = self.feed_items(doc).into_iter().collect();
        for &target in targets {
            let mut node = Some(target);
            while let Some(current) = node {
                if items.contains(&current) {
                    let decided = self
                        .tracker
                        .state(current)
                        .is_some_and(|st| st.seen && !st.hidden);
                    if decided {
                        self.touched.insert(current);
                    }
                    break;
                }
                node = doc.parent(current);
            }
        }
    }

    fn on_settings_changed(
        &mut self,
        doc: &mut dyn IHostDocument,
        store: &dyn ISettingsStore,
        change: &SettingsChange,
    ) -> Vec<PassReport> {
        if change.scope != StorageScope::Sync {
            debug!(scope = change.scope.as_str(), "ignoring settings change outside sync scope");
            return Vec::new();
        }
        self.reload_pending = true;
        if !self.load_settings(store) {
            return Vec::new();
        }
        self.reload_pending = false;
        vec![self.reconcile(doc)]
    }

    fn fire(&mut self, doc: &mut dyn IHostDocument, timer: TimerKind) -> Vec<PassReport> {
        let now = self.clock.now();
        let s = &self.config.scheduler;
        match timer {
            TimerKind::Debounce | TimerKind::InitialFollowUp(_) => {
                vec![self.sweep(doc, PassKind::InitialSweep)]
            }
            TimerKind::DelayedRecheck => {
                let initial = self.sweep(doc, PassKind::InitialSweep);
                let mut items = self.candidates(doc, PassKind::ShortRecheck);
                for item in std::mem::take(&mut self.touched) {
                    let decided = self
                        .tracker
                        .state(item)
                        .is_some_and(|st| st.seen && !st.hidden);
                    if decided && doc.contains(item) && !items.contains(&item) {
                        items.push(item);
                    }
                }
                vec![initial, self.run_pass(doc, &items, PassKind::ShortRecheck)]
            }
            TimerKind::ShortWindow => {
                self.timers
                    .arm(TimerKind::ShortWindow, now + ms(s.short_window_interval_ms));
                vec![
                    self.sweep(doc, PassKind::InitialSweep),
                    self.sweep(doc, PassKind::ShortRecheck),
                ]
            }
            TimerKind::LongPeriod => {
                self.timers
                    .arm(TimerKind::LongPeriod, now + ms(s.long_period_ms));
                let pruned = self.tracker.prune(doc);
                self.metrics.record_pruned(pruned);
                vec![self.sweep(doc, PassKind::LongSweep)]
            }
        }
    }

    // ── Settings ─────────────────────────────────────────────────────────

    /// Load settings into the cache. On failure the previous snapshot (if
    /// any) stays in place and [`Pipeline::tick`] retries until a load
    /// succeeds.
    pub fn load_settings(&mut self, store: &dyn ISettingsStore) -> bool {
        match store.get(&Settings::default()) {
            Ok(settings) => {
                let version = self.cache.replace(settings);
                debug!(version, "settings loaded");
                true
            }
            Err(e) => {
                warn!(error = %e, "settings load failed, classification deferred");
                false
            }
        }
    }

    /// Reset every tracked item and re-run it under the current settings.
    ///
    /// Hidden markers are kept through the reset and only cleared when the
    /// new decision says show, so a still-hidden item never flickers.
    pub fn reconcile(&mut self, doc: &mut dyn IHostDocument) -> PassReport {
        let version = self.cache.load().map_or(0, |s| s.version);
        let span = reconcile_span!(version, self.tracker.len());
        let _guard = span.enter();

        for item in self.tracker.select(|s| s.seen || s.hidden) {
            if let Err(e) = self.tracker.reset(doc, item, false) {
                debug!(%item, error = %e, "reset failed, item likely detached");
            }
        }
        self.sweep(doc, PassKind::Reconcile)
    }

    // ── Passes ───────────────────────────────────────────────────────────

    /// Candidates for `kind` as of now.
    pub fn candidates(&self, doc: &dyn IHostDocument, kind: PassKind) -> Vec<NodeHandle> {
        let now = self.clock.now();
        let s = &self.config.scheduler;
        match kind {
            PassKind::InitialSweep | PassKind::Reconcile => self
                .feed_items(doc)
                .into_iter()
                .filter(|item| self.tracker.state(*item).map_or(true, |st| !st.seen))
                .collect(),
            PassKind::ShortRecheck => {
                let (min, max) = (s.short_recheck_min_age_ms, s.short_recheck_max_age_ms);
                let limit = s.max_short_rechecks;
                self.tracker
                    .select(|st| {
                        st.seen
                            && !st.hidden
                            && st.recheck_count < limit
                            && st.age_ms(now).is_some_and(|age| {
                                let age = u64::try_from(age).unwrap_or(0);
                                age >= min && age <= max
                            })
                    })
                    .into_iter()
                    .filter(|item| doc.contains(*item))
                    .collect()
            }
            PassKind::LongSweep => self
                .tracker
                .select(|st| st.seen && !st.hidden)
                .into_iter()
                .filter(|item| doc.contains(*item))
                .collect(),
        }
    }

    /// Select candidates for `kind` and run a pass over them.
    pub fn sweep(&mut self, doc: &mut dyn IHostDocument, kind: PassKind) -> PassReport {
        let items = self.candidates(doc, kind);
        self.run_pass(doc, &items, kind)
    }

    /// Classify, decide, and apply for each of `items`.
    ///
    /// A no-op while settings are pending. Claiming kinds skip items another
    /// pass already claimed; re-check kinds process whatever they are given.
    pub fn run_pass(
        &mut self,
        doc: &mut dyn IHostDocument,
        items: &[NodeHandle],
        kind: PassKind,
    ) -> PassReport {
        let Some(snapshot) = self.cache.load() else {
            self.metrics.record_deferred();
            debug!(%kind, candidates = items.len(), "settings pending, pass deferred");
            return PassReport::deferred(kind, items.len());
        };

        let span = pass_span!(kind, items.len());
        let _guard = span.enter();
        let now = self.clock.now();
        self.metrics.record_pass(kind.as_str(), now);
        self.metrics.record_examined(items.len());

        let mut report = PassReport::new(kind, items.len());
        for &item in items {
            let ready = if kind.claims() {
                self.tracker.try_claim(doc, item)
            } else {
                if kind == PassKind::LongSweep {
                    self.tracker.mark_stale(item);
                } else {
                    self.tracker.record_recheck(item);
                }
                doc.contains(item)
            };
            if !ready {
                report.skipped += 1;
                self.metrics.record_skipped();
                continue;
            }

            match self.process(doc, item, &snapshot, now) {
                Some(applied) => {
                    report.classified += 1;
                    match applied {
                        Applied::Hidden => {
                            report.hidden += 1;
                            self.metrics.record_hide();
                        }
                        Applied::Unhidden => {
                            report.unhidden += 1;
                            self.metrics.record_unhide();
                        }
                        Applied::Unchanged => {}
                    }
                }
                None => report.skipped += 1,
            }
        }

        if report.changed_visibility() || report.classified > 0 {
            debug!(
                %kind,
                examined = report.examined,
                classified = report.classified,
                hidden = report.hidden,
                unhidden = report.unhidden,
                skipped = report.skipped,
                "pass complete"
            );
        }
        report
    }

    fn process(
        &mut self,
        doc: &mut dyn IHostDocument,
        item: NodeHandle,
        snapshot: &SettingsSnapshot,
        now: DateTime<Utc>,
    ) -> Option<Applied> {
        let span = classify_span!(item);
        let _guard = span.enter();

        let classification = self.classifier.classify(doc, item);
        self.metrics.record_classification(&classification);
        let account = self.resolver.resolve(doc, item);
        let decision =
            PolicyEngine::decide(item, &classification, account.as_ref(), &snapshot.settings);

        match self.tracker.apply(doc, item, &decision, now) {
            Ok(applied) => Some(applied),
            Err(e) => {
                warn!(%item, error = %e, "could not apply decision");
                None
            }
        }
    }

    fn feed_items(&self, doc: &dyn IHostDocument) -> Vec<NodeHandle> {
        match doc.query_all(doc.root(), &self.config.detection.item_selector) {
            Ok(items) => items,
            Err(e) => {
                warn!(
                    selector = %self.config.detection.item_selector,
                    error = %e,
                    "item selector rejected by host"
                );
                Vec::new()
            }
        }
    }

    fn observer_options(&self) -> ObserverOptions {
        let mut options = ObserverOptions::default();
        for attribute in &self.config.detection.identifier_attributes {
            let attribute = attribute.to_ascii_lowercase();
            if !options.attribute_filter.contains(&attribute) {
                options.attribute_filter.push(attribute);
            }
        }
        options
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn config(&self) -> &NotehideConfig {
        &self.config
    }

    pub fn tracker(&self) -> &StateTracker {
        &self.tracker
    }

    pub fn timers(&self) -> &TimerSet {
        &self.timers
    }

    /// Current settings, `None` while pending.
    pub fn settings(&self) -> Option<Arc<SettingsSnapshot>> {
        self.cache.load()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn event_sender(&self) -> EventSender {
        self.events.sender()
    }

    /// Wait for the next queued event. Used by the async driver.
    pub async fn next_event(&mut self) -> Option<SchedulerEvent> {
        self.events.recv().await
    }

    /// Earliest timer deadline.
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.timers.next_deadline()
    }

    /// Time from now until the earliest deadline; zero when one is overdue.
    pub fn time_until_next_deadline(&self) -> Option<std::time::Duration> {
        let deadline = self.next_deadline()?;
        Some((deadline - self.clock.now()).to_std().unwrap_or_default())
    }

    pub fn metrics(&self) -> &PipelineMetrics {
        &self.metrics
    }

    /// Metrics as JSON.
    pub fn metrics_snapshot(&self) -> NotehideResult<String> {
        self.metrics.to_json()
    }
}
