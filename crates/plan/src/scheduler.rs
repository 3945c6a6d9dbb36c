use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::{PlanStore, SessionGate, UserContext, WeekPlan};

/// Debounce windows per mutation kind. Removal persists faster than
/// addition.
#[derive(Debug, Clone, Copy)]
pub struct SaveWindows {
    pub assign: Duration,
    pub remove: Duration,
}

impl Default for SaveWindows {
    fn default() -> Self {
        Self {
            assign: Duration::from_secs(2),
            remove: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTrigger {
    Assign,
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    Idle,
    Pending,
    Saving,
}

struct Inner {
    state: SaveState,
    /// Bumped on every (re)arm and cancel; a sleeping timer task whose
    /// epoch no longer matches has been superseded and exits.
    epoch: u64,
    /// Latest grid snapshot; the save that eventually fires carries this.
    snapshot: Option<WeekPlan>,
    /// Window for the save owed after the in-flight one completes.
    follow_up: Option<Duration>,
}

/// Debounces and coalesces plan saves.
///
/// State machine: idle -> pending (timer armed) -> saving -> idle. Every
/// scheduling request while pending re-arms the timer, so a burst of
/// mutations inside the window produces exactly one outbound save carrying
/// the latest snapshot. A request while a save is in flight records a
/// follow-up; the machine re-enters pending once the call completes.
///
/// Must be used from within a tokio runtime.
#[derive(Clone)]
pub struct SaveScheduler {
    user: UserContext,
    windows: SaveWindows,
    store: Arc<dyn PlanStore>,
    gate: Arc<dyn SessionGate>,
    inner: Arc<Mutex<Inner>>,
}

impl SaveScheduler {
    pub fn new(
        user: UserContext,
        windows: SaveWindows,
        store: Arc<dyn PlanStore>,
        gate: Arc<dyn SessionGate>,
    ) -> Self {
        Self {
            user,
            windows,
            store,
            gate,
            inner: Arc::new(Mutex::new(Inner {
                state: SaveState::Idle,
                epoch: 0,
                snapshot: None,
                follow_up: None,
            })),
        }
    }

    pub fn state(&self) -> SaveState {
        self.lock().state
    }

    /// Request a debounced save of the given snapshot.
    pub fn schedule(&self, trigger: SaveTrigger, snapshot: WeekPlan) {
        let window = match trigger {
            SaveTrigger::Assign => self.windows.assign,
            SaveTrigger::Remove => self.windows.remove,
        };

        let mut inner = self.lock();
        inner.snapshot = Some(snapshot);

        match inner.state {
            SaveState::Idle | SaveState::Pending => {
                inner.state = SaveState::Pending;
                inner.epoch += 1;
                let epoch = inner.epoch;
                drop(inner);
                self.arm(epoch, window);
            }
            SaveState::Saving => {
                inner.follow_up = Some(window);
            }
        }
    }

    /// Save the given snapshot immediately, bypassing the debounce window.
    /// While a save is in flight, records an immediate follow-up instead.
    pub async fn flush_now(&self, snapshot: WeekPlan) {
        let plan = {
            let mut inner = self.lock();
            if inner.state == SaveState::Saving {
                inner.snapshot = Some(snapshot);
                inner.follow_up = Some(Duration::ZERO);
                return;
            }
            inner.state = SaveState::Saving;
            inner.epoch += 1;
            inner.snapshot = None;
            inner.follow_up = None;
            snapshot
        };

        self.persist(plan).await;
        self.complete();
    }

    /// Invalidate any pending un-fired timer and drop the snapshot. An
    /// in-flight save is left to complete fire-and-forget.
    pub fn cancel(&self) {
        let mut inner = self.lock();
        inner.epoch += 1;
        inner.snapshot = None;
        inner.follow_up = None;
        if inner.state == SaveState::Pending {
            inner.state = SaveState::Idle;
        }
    }

    fn arm(&self, epoch: u64, window: Duration) {
        let scheduler = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            scheduler.fire(epoch).await;
        });
    }

    async fn fire(&self, epoch: u64) {
        let plan = {
            let mut inner = self.lock();
            if inner.epoch != epoch || inner.state != SaveState::Pending {
                return;
            }
            inner.state = SaveState::Saving;
            inner.snapshot.take()
        };

        if let Some(plan) = plan {
            self.persist(plan).await;
        }
        self.complete();
    }

    async fn persist(&self, plan: WeekPlan) {
        if !self.gate.is_authenticated() {
            tracing::debug!(week = %plan.week(), "no authenticated session, skipping save");
            return;
        }

        if let Err(err) = self.store.save_plan(&self.user, plan.week(), &plan).await {
            // The in-memory grid stays the source of truth; the next
            // mutation schedules the next attempt.
            tracing::warn!(err = %err, week = %plan.week(), "failed to persist week plan");
        }
    }

    fn complete(&self) {
        let mut inner = self.lock();
        match inner.follow_up.take() {
            Some(window) => {
                inner.state = SaveState::Pending;
                inner.epoch += 1;
                let epoch = inner.epoch;
                drop(inner);
                self.arm(epoch, window);
            }
            None => {
                inner.state = SaveState::Idle;
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
