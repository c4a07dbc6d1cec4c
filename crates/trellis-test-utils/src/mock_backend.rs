//! Mock window backend and platform.

use parking_lot::Mutex;
use std::rc::Rc;
use std::time::Duration;
use trellis_core::geometry::{Rect, Size};
use trellis_ui::cursor::Cursor;
use trellis_ui::error::{UiError, UiResult};
use trellis_ui::tree::WidgetTree;
use trellis_ui::window::{Platform, Task, WindowBackend, WindowStyle};

/// A task queued through [`WindowBackend::invoke`] or
/// [`WindowBackend::invoke_after`].
struct PendingTask {
    delay: Duration,
    task: Task,
}

#[derive(Default)]
struct Recorded {
    repaints: Vec<Rect>,
    flushes: usize,
    tooltips: Vec<Option<String>>,
    cursors: Vec<Cursor>,
    minimized: usize,
    zoomed: usize,
    brought_to_front: usize,
}

/// A [`WindowBackend`] that records outbound requests and holds deferred
/// tasks until [`MockBackend::run_pending`] is called.
pub struct MockBackend {
    frame: Mutex<Rect>,
    content_size: Mutex<Size>,
    recorded: Mutex<Recorded>,
    tasks: Mutex<Vec<PendingTask>>,
}

impl MockBackend {
    /// A backend whose content area is the size of `frame`.
    pub fn new(frame: Rect) -> Self {
        Self {
            frame: Mutex::new(frame),
            content_size: Mutex::new(frame.size()),
            recorded: Mutex::new(Recorded::default()),
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Every rect passed to `request_repaint`, in order.
    pub fn repaint_requests(&self) -> Vec<Rect> {
        self.recorded.lock().repaints.clone()
    }

    pub fn clear_repaint_requests(&self) {
        self.recorded.lock().repaints.clear();
    }

    pub fn flush_count(&self) -> usize {
        self.recorded.lock().flushes
    }

    /// Every tooltip change, in order. `None` means the tooltip was hidden.
    pub fn tooltips(&self) -> Vec<Option<String>> {
        self.recorded.lock().tooltips.clone()
    }

    /// Every cursor change, in order.
    pub fn cursors(&self) -> Vec<Cursor> {
        self.recorded.lock().cursors.clone()
    }

    pub fn minimize_count(&self) -> usize {
        self.recorded.lock().minimized
    }

    pub fn zoom_count(&self) -> usize {
        self.recorded.lock().zoomed
    }

    pub fn bring_to_front_count(&self) -> usize {
        self.recorded.lock().brought_to_front
    }

    pub fn pending_tasks(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Delays of the queued tasks, in queue order.
    pub fn pending_delays(&self) -> Vec<Duration> {
        self.tasks.lock().iter().map(|pending| pending.delay).collect()
    }

    /// Run every task queued so far, as if their delays had elapsed. Tasks
    /// queued while running wait for the next call. Returns how many ran.
    pub fn run_pending(&self, tree: &mut WidgetTree) -> usize {
        let tasks = std::mem::take(&mut *self.tasks.lock());
        let count = tasks.len();
        for pending in tasks {
            (pending.task)(tree);
        }
        count
    }

    /// Drop every queued task without running it.
    pub fn discard_pending(&self) {
        self.tasks.lock().clear();
    }
}

impl WindowBackend for MockBackend {
    fn request_repaint(&self, rect: Rect) {
        self.recorded.lock().repaints.push(rect);
    }

    fn flush_painting(&self) {
        self.recorded.lock().flushes += 1;
    }

    fn frame(&self) -> Rect {
        *self.frame.lock()
    }

    fn set_frame(&self, frame: Rect) {
        *self.frame.lock() = frame;
        *self.content_size.lock() = frame.size();
    }

    fn content_size(&self) -> Size {
        *self.content_size.lock()
    }

    fn set_content_size(&self, size: Size) {
        *self.content_size.lock() = size;
        let mut frame = self.frame.lock();
        *frame = frame.with_size(size);
    }

    fn minimize(&self) {
        self.recorded.lock().minimized += 1;
    }

    fn zoom(&self) {
        self.recorded.lock().zoomed += 1;
    }

    fn bring_to_front(&self) {
        self.recorded.lock().brought_to_front += 1;
    }

    fn set_cursor(&self, cursor: Cursor) {
        self.recorded.lock().cursors.push(cursor);
    }

    fn set_tooltip(&self, text: Option<&str>) {
        self.recorded.lock().tooltips.push(text.map(str::to_string));
    }

    fn invoke(&self, task: Task) {
        self.invoke_after(Duration::ZERO, task);
    }

    fn invoke_after(&self, delay: Duration, task: Task) {
        self.tasks.lock().push(PendingTask { delay, task });
    }
}

/// A [`Platform`] handing out [`MockBackend`]s, or failing on demand.
#[derive(Default)]
pub struct MockPlatform {
    failure: Option<String>,
    created: Mutex<Vec<(Rc<MockBackend>, WindowStyle)>>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// A platform whose every `create_window` fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            created: Mutex::new(Vec::new()),
        }
    }

    /// The backends created so far, with the style each was requested with.
    pub fn created(&self) -> Vec<(Rc<MockBackend>, WindowStyle)> {
        self.created.lock().clone()
    }
}

impl Platform for MockPlatform {
    fn create_window(&self, frame: Rect, style: WindowStyle) -> UiResult<Rc<dyn WindowBackend>> {
        if let Some(reason) = &self.failure {
            return Err(UiError::WindowCreation(reason.clone()));
        }
        let backend = Rc::new(MockBackend::new(frame));
        self.created.lock().push((Rc::clone(&backend), style));
        Ok(backend as Rc<dyn WindowBackend>)
    }
}
