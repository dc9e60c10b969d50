use std::time::Duration;

use leptos::logging::warn;
use leptos::prelude::{set_timeout_with_handle, TimeoutHandle};

pub trait DeferredTasks {
    type Handle: 'static;

    /// Runs `task` once after `delay`. `None` if the host refused the timer.
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Option<Self::Handle>;

    /// Drops a task that has not fired yet. Cancelling a fired task is a no-op.
    fn cancel(&self, handle: Self::Handle);
}

/// `setTimeout`/`clearTimeout` on the page's window.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimers;

impl DeferredTasks for BrowserTimers {
    type Handle = TimeoutHandle;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Option<TimeoutHandle> {
        match set_timeout_with_handle(task, delay) {
            Ok(handle) => Some(handle),
            Err(err) => {
                warn!("note-preview: could not schedule preview render: {err:?}");
                None
            }
        }
    }

    fn cancel(&self, handle: TimeoutHandle) {
        handle.clear();
    }
}


#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::manual::ManualTimers;
    use super::*;

    #[test]
    fn fires_only_once_due() {
        let timers = ManualTimers::default();
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        timers.schedule(
            Duration::from_millis(100),
            Box::new(move || counter.set(counter.get() + 1)),
        );

        timers.advance(Duration::from_millis(99));
        assert_eq!(fired.get(), 0);
        timers.advance(Duration::from_millis(1));
        assert_eq!(fired.get(), 1);
        timers.advance(Duration::from_secs(5));
        assert_eq!(fired.get(), 1);
        assert_eq!(timers.live(), 0);
    }

    #[test]
    fn cancelled_tasks_never_fire() {
        let timers = ManualTimers::default();
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let handle = timers
            .schedule(Duration::from_millis(10), Box::new(move || flag.set(true)))
            .unwrap();
        timers.cancel(handle);
        timers.cancel(handle);

        timers.advance(Duration::from_secs(1));
        assert!(!fired.get());
        assert_eq!(timers.cancelled(), 1);
    }
}
