//! Scheduled Tasks
//!
//! One slot per timer purpose. Scheduling into a slot always cancels the
//! task it held, so two fades or two countdown ticks never overlap.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use leptos::prelude::request_animation_frame;

/// A pending task that can be called off
pub trait Cancel {
    fn cancel(self);
}

impl Cancel for Timeout {
    fn cancel(self) {
        let _ = Timeout::cancel(self);
    }
}

impl Cancel for Interval {
    fn cancel(self) {
        let _ = Interval::cancel(self);
    }
}

/// Holds at most one task of a kind
pub struct TaskSlot<T: Cancel> {
    task: Option<T>,
}

impl<T: Cancel> Default for TaskSlot<T> {
    fn default() -> Self {
        Self { task: None }
    }
}

impl<T: Cancel> TaskSlot<T> {
    /// Cancel the held task, then hold `task`
    pub fn replace(&mut self, task: T) {
        self.clear();
        self.task = Some(task);
    }

    pub fn clear(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.task.is_some()
    }
}

/// Repeating timer. The tick returns false to stop itself.
#[derive(Clone, Default)]
pub struct Repeating {
    slot: Rc<RefCell<TaskSlot<Interval>>>,
}

impl Repeating {
    pub fn start(&self, period_ms: u32, mut tick: impl FnMut() -> bool + 'static) {
        self.stop();
        let slot = Rc::downgrade(&self.slot);
        let interval = Interval::new(period_ms, move || {
            if !tick() {
                if let Some(slot) = slot.upgrade() {
                    slot.borrow_mut().clear();
                }
            }
        });
        self.slot.borrow_mut().replace(interval);
    }

    pub fn stop(&self) {
        self.slot.borrow_mut().clear();
    }

    pub fn is_running(&self) -> bool {
        self.slot.borrow().is_active()
    }
}

/// Something that calls a tick on a fixed period until told to stop
pub trait Ticker {
    fn start<F: FnMut() -> bool + 'static>(&self, period_ms: u32, tick: F);
    fn stop(&self);
    fn is_running(&self) -> bool;
}

impl Ticker for Repeating {
    fn start<F: FnMut() -> bool + 'static>(&self, period_ms: u32, tick: F) {
        Repeating::start(self, period_ms, tick);
    }

    fn stop(&self) {
        Repeating::stop(self);
    }

    fn is_running(&self) -> bool {
        Repeating::is_running(self)
    }
}

/// One-shot timer
#[derive(Clone, Default)]
pub struct Delayed {
    slot: Rc<RefCell<TaskSlot<Timeout>>>,
}

impl Delayed {
    pub fn schedule(&self, delay_ms: u32, f: impl FnOnce() + 'static) {
        self.cancel();
        let timeout = Timeout::new(delay_ms, f);
        self.slot.borrow_mut().replace(timeout);
    }

    pub fn cancel(&self) {
        self.slot.borrow_mut().clear();
    }
}

/// Coalesces a high-frequency event stream to one update per animation frame
#[derive(Clone, Default)]
pub struct FrameGate {
    scheduled: Rc<Cell<bool>>,
}

impl FrameGate {
    /// Claim the next frame. False while an update is already scheduled.
    pub fn claim(&self) -> bool {
        !self.scheduled.replace(true)
    }

    pub fn release(&self) {
        self.scheduled.set(false);
    }

    pub fn schedule(&self, update: impl FnOnce() + 'static) {
        if !self.claim() {
            return;
        }
        let gate = self.clone();
        request_animation_frame(move || {
            gate.release();
            update();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingTask(Rc<Cell<u32>>);

    impl Cancel for CountingTask {
        fn cancel(self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_replace_cancels_previous_task() {
        let cancelled = Rc::new(Cell::new(0));
        let mut slot = TaskSlot::default();
        slot.replace(CountingTask(cancelled.clone()));
        assert_eq!(cancelled.get(), 0);
        slot.replace(CountingTask(cancelled.clone()));
        assert_eq!(cancelled.get(), 1);
        assert!(slot.is_active());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let cancelled = Rc::new(Cell::new(0));
        let mut slot = TaskSlot::default();
        slot.replace(CountingTask(cancelled.clone()));
        slot.clear();
        slot.clear();
        assert_eq!(cancelled.get(), 1);
        assert!(!slot.is_active());
    }

    #[test]
    fn test_frame_gate_claims_once_until_released() {
        let gate = FrameGate::default();
        assert!(gate.claim());
        assert!(!gate.claim());
        gate.release();
        assert!(gate.claim());
    }
}
