use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use reqwest::StatusCode;

use crate::telemetry::refresh::RefreshTelemetry;

/// Settled result of one refresh call, shared by every caller that waited on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    Renewed,
    Rejected(StatusCode),
    Unreachable(String),
}

impl RefreshOutcome {
    pub fn is_renewed(&self) -> bool {
        matches!(self, RefreshOutcome::Renewed)
    }
}

type PendingRefresh = Shared<BoxFuture<'static, RefreshOutcome>>;

struct InFlight {
    pending: PendingRefresh,
    telemetry: RefreshTelemetry,
}

/// Collapses concurrent session refreshes into a single upstream call.
///
/// The slot holds the pending refresh while it runs and is emptied by the
/// refresh future itself once it settles, so a later auth failure starts a
/// fresh cycle. Because the pending refresh is a shared future, whichever
/// waiter is still alive keeps driving it.
#[derive(Default)]
pub struct RefreshLock {
    in_flight: Arc<Mutex<Option<InFlight>>>,
    cycles: AtomicU64,
}

impl RefreshLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Joins the in-flight refresh, or starts one with `refresh` when none is running.
    pub async fn refresh_or_join<F, Fut>(&self, refresh: F) -> RefreshOutcome
    where
        F: FnOnce(RefreshTelemetry) -> Fut,
        Fut: Future<Output = RefreshOutcome> + Send + 'static,
    {
        let pending = {
            let mut slot = lock_slot(&self.in_flight);
            match slot.as_ref() {
                Some(in_flight) => {
                    in_flight.telemetry.emit_join();
                    in_flight.pending.clone()
                }
                None => {
                    let telemetry = RefreshTelemetry::new("session.refresh");
                    self.cycles.fetch_add(1, Ordering::SeqCst);
                    let call = refresh(telemetry.clone());
                    let handle = Arc::clone(&self.in_flight);
                    let pending = async move {
                        let outcome = call.await;
                        lock_slot(&handle).take();
                        outcome
                    }
                    .boxed()
                    .shared();
                    *slot = Some(InFlight {
                        pending: pending.clone(),
                        telemetry,
                    });
                    pending
                }
            }
        };
        pending.await
    }

    pub fn is_in_flight(&self) -> bool {
        lock_slot(&self.in_flight).is_some()
    }

    /// Number of refresh calls started through this lock.
    pub fn cycles(&self) -> u64 {
        self.cycles.load(Ordering::SeqCst)
    }
}

fn lock_slot(slot: &Mutex<Option<InFlight>>) -> MutexGuard<'_, Option<InFlight>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
