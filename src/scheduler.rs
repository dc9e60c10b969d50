//! Debounced live preview of the note being composed.
//!
//! Every edit cancels the pending render and schedules a new one, so a burst
//! of keystrokes produces a single render of the text from the last edit.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use web_time::Instant;

use crate::render::MarkdownRenderer;
use crate::surface::{HtmlTarget, Region, TextField};
use crate::timer::DeferredTasks;

/// What the server asked the page to do with the pre-filled note.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadAction {
    /// Editing an existing note: preview it straight away.
    Update,
    Other,
}

impl LoadAction {
    pub fn parse(value: &str) -> Self {
        if value == "update" {
            LoadAction::Update
        } else {
            LoadAction::Other
        }
    }
}

/// Delay grows linearly with the text's UTF-16 length and caps at `base`
/// once the length reaches `length_scale`.
pub fn debounce_delay(base: Duration, length_scale: usize, text: &str) -> Duration {
    let len = text.encode_utf16().count();
    if length_scale == 0 || len >= length_scale {
        return base;
    }
    let nanos = base.as_nanos() * len as u128 / length_scale as u128;
    Duration::from_nanos(nanos as u64)
}

/// Where a finished render lands.
pub struct PreviewTargets {
    pub separator: Box<dyn Region>,
    pub controls: Box<dyn Region>,
    pub preview: Box<dyn HtmlTarget>,
    pub renderer: Rc<dyn MarkdownRenderer>,
}

impl PreviewTargets {
    fn show(&self, markdown: &str) {
        self.separator.reveal();
        self.controls.reveal();
        self.preview.set_html(&self.renderer.render(markdown));
    }
}

#[derive(Debug)]
pub struct PendingRender<H> {
    pub scheduled_at: Instant,
    pub delay: Duration,
    handle: H,
}

pub struct PreviewScheduler<T: DeferredTasks> {
    timers: T,
    base_delay: Duration,
    length_scale: usize,
    targets: Rc<PreviewTargets>,
    pending: Rc<RefCell<Option<PendingRender<T::Handle>>>>,
}

impl<T: DeferredTasks> PreviewScheduler<T> {
    pub fn new(
        timers: T,
        base_delay: Duration,
        length_scale: usize,
        targets: PreviewTargets,
    ) -> Self {
        Self {
            timers,
            base_delay,
            length_scale,
            targets: Rc::new(targets),
            pending: Rc::new(RefCell::new(None)),
        }
    }

    /// When the pending render was scheduled, if one is pending.
    pub fn pending_since(&self) -> Option<Instant> {
        self.pending.borrow().as_ref().map(|p| p.scheduled_at)
    }

    pub fn delay_for(&self, text: &str) -> Duration {
        debounce_delay(self.base_delay, self.length_scale, text)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }

    pub fn pending_delay(&self) -> Option<Duration> {
        self.pending.borrow().as_ref().map(|p| p.delay)
    }

    pub fn cancel_pending(&self) {
        let previous = self.pending.borrow_mut().take();
        if let Some(previous) = previous {
            self.timers.cancel(previous.handle);
        }
    }

    /// Supersedes any pending render with one of `current_text`.
    pub fn on_text_changed(&self, current_text: &str) {
        self.cancel_pending();

        let delay = self.delay_for(current_text);
        let snapshot = current_text.to_owned();
        let targets = Rc::clone(&self.targets);
        let pending = Rc::clone(&self.pending);
        let task = Box::new(move || {
            pending.borrow_mut().take();
            targets.show(&snapshot);
        });

        if let Some(handle) = self.timers.schedule(delay, task) {
            *self.pending.borrow_mut() = Some(PendingRender {
                scheduled_at: Instant::now(),
                delay,
                handle,
            });
        }
    }

    /// Initial preview for the page as served: an existing note is previewed
    /// without waiting for a keystroke, anything else starts from an empty
    /// editor.
    pub fn prime(&self, action: LoadAction, note: &dyn TextField) {
        match action {
            LoadAction::Update => self.on_text_changed(&note.value()),
            LoadAction::Other => note.set_value(""),
        }
    }
}

impl<T: DeferredTasks> Drop for PreviewScheduler<T> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
