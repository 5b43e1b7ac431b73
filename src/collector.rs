use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use crate::data::model::Point;
use crate::error::{AnalysisError, Result};

// ---------------------------------------------------------------------------
// Shared completion slot between a collector and its request
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Slot {
    points: Option<Vec<Point>>,
    waker: Option<Waker>,
}

/// The selection currently being filled by clicks.
struct Pending {
    target: usize,
    points: Vec<Point>,
    slot: Rc<RefCell<Slot>>,
}

impl Pending {
    /// The request side was dropped before completion.
    fn is_abandoned(&self) -> bool {
        Rc::strong_count(&self.slot) == 1
    }
}

// ---------------------------------------------------------------------------
// PointCollector
// ---------------------------------------------------------------------------

/// Gathers a fixed number of clicks from the plot canvas.
///
/// Clones share the same state: the canvas keeps one handle to feed clicks
/// through [`offer`](Self::offer), the session keeps another to start
/// requests. Single-threaded; at most one selection is outstanding.
#[derive(Clone, Default)]
pub struct PointCollector {
    pending: Rc<RefCell<Option<Pending>>>,
}

impl PointCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start collecting `n` clicks. The returned request resolves with the
    /// points in click order once the `n`-th valid click arrives.
    pub fn collect(&self, n: usize) -> Result<PointRequest> {
        let mut pending = self.pending.borrow_mut();
        if pending.as_ref().is_some_and(|p| !p.is_abandoned()) {
            return Err(AnalysisError::SelectionInProgress);
        }

        let slot = Rc::new(RefCell::new(Slot::default()));
        if n == 0 {
            slot.borrow_mut().points = Some(Vec::new());
            *pending = None;
        } else {
            *pending = Some(Pending {
                target: n,
                points: Vec::with_capacity(n),
                slot: Rc::clone(&slot),
            });
        }

        Ok(PointRequest { slot })
    }

    /// Feed one click. `None` means the click landed outside the axes.
    ///
    /// Returns `true` when the click was counted toward the current request.
    pub fn offer(&self, click: Option<Point>) -> bool {
        let Some(point) = click else {
            return false;
        };

        let mut guard = self.pending.borrow_mut();
        let Some(pending) = guard.as_mut() else {
            return false;
        };
        if pending.is_abandoned() {
            log::debug!("Dropping abandoned point selection");
            *guard = None;
            return false;
        }

        pending.points.push(point);
        log::debug!(
            "Collected point {} of {}: {point}",
            pending.points.len(),
            pending.target
        );

        let finished = if pending.points.len() == pending.target {
            guard.take()
        } else {
            None
        };
        drop(guard);

        if let Some(done) = finished {
            let waker = {
                let mut slot = done.slot.borrow_mut();
                slot.points = Some(done.points);
                slot.waker.take()
            };
            if let Some(waker) = waker {
                waker.wake();
            }
        }
        true
    }

    /// Whether a live request is waiting for clicks.
    pub fn is_collecting(&self) -> bool {
        self.pending
            .borrow()
            .as_ref()
            .is_some_and(|p| !p.is_abandoned())
    }

    /// Points gathered so far for the outstanding request.
    pub fn collected(&self) -> Vec<Point> {
        match self.pending.borrow().as_ref() {
            Some(p) if !p.is_abandoned() => p.points.clone(),
            _ => Vec::new(),
        }
    }

    /// Clicks still needed, zero when idle.
    pub fn remaining(&self) -> usize {
        match self.pending.borrow().as_ref() {
            Some(p) if !p.is_abandoned() => p.target - p.points.len(),
            _ => 0,
        }
    }
}

// ---------------------------------------------------------------------------
// PointRequest – the caller's side
// ---------------------------------------------------------------------------

/// Resolves to the collected points. Dropping it abandons the selection.
pub struct PointRequest {
    slot: Rc<RefCell<Slot>>,
}

impl PointRequest {
    /// Non-blocking check for immediate-mode callers polling once per frame.
    pub fn try_take(&mut self) -> Option<Vec<Point>> {
        self.slot.borrow_mut().points.take()
    }

    pub fn is_ready(&self) -> bool {
        self.slot.borrow().points.is_some()
    }
}

impl Future for PointRequest {
    type Output = Vec<Point>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut slot = self.slot.borrow_mut();
        match slot.points.take() {
            Some(points) => Poll::Ready(points),
            None => {
                slot.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}
