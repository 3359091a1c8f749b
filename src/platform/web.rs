//! Browser timers via `setInterval`/`setTimeout`
//!
//! Fired timers are handed to a dispatcher installed by the host after the
//! game exists, which breaks the game <-> scheduler ownership cycle.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use super::{PlatformError, Scheduler, TaskId, Timer};

type Dispatch = Rc<dyn Fn(TaskId, Timer)>;

/// Shared slot holding the timer dispatcher
#[derive(Clone, Default)]
pub struct DispatchSlot(Rc<RefCell<Option<Dispatch>>>);

impl DispatchSlot {
    /// Install the function that receives fired timers
    pub fn install(&self, dispatch: impl Fn(TaskId, Timer) + 'static) {
        *self.0.borrow_mut() = Some(Rc::new(dispatch));
    }

    fn fire(&self, task: TaskId, timer: Timer) {
        // Clone out so the slot isn't borrowed while the game runs
        let dispatch = self.0.borrow().clone();
        match dispatch {
            Some(dispatch) => dispatch(task, timer),
            None => log::warn!("Timer {:?} fired before a dispatcher was installed", timer),
        }
    }
}

/// Scheduler backed by the window's timer functions
pub struct BrowserScheduler {
    window: Window,
    slot: DispatchSlot,
    next_id: u64,
    intervals: HashMap<TaskId, (i32, Closure<dyn FnMut()>)>,
    timeouts: Rc<RefCell<HashMap<TaskId, i32>>>,
    /// Interval closures cancelled from inside their own callback; freed on
    /// the next `every` call once they can no longer be running
    retired: Vec<Closure<dyn FnMut()>>,
}

impl BrowserScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            slot: DispatchSlot::default(),
            next_id: 0,
            intervals: HashMap::new(),
            timeouts: Rc::new(RefCell::new(HashMap::new())),
            retired: Vec::new(),
        }
    }

    pub fn dispatcher(&self) -> DispatchSlot {
        self.slot.clone()
    }

    fn allocate(&mut self) -> TaskId {
        self.next_id += 1;
        TaskId(self.next_id)
    }
}

fn millis(duration: Duration) -> i32 {
    duration.as_millis().min(i32::MAX as u128) as i32
}

impl Scheduler for BrowserScheduler {
    fn every(&mut self, period: Duration, timer: Timer) -> TaskId {
        self.retired.clear();
        let task = self.allocate();
        let slot = self.slot.clone();
        let closure = Closure::<dyn FnMut()>::new(move || slot.fire(task, timer));

        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis(period),
            ) {
            Ok(handle) => {
                self.intervals.insert(task, (handle, closure));
            }
            Err(e) => log::error!("setInterval failed: {:?}", e),
        }
        task
    }

    fn after(&mut self, delay: Duration, timer: Timer) -> TaskId {
        let task = self.allocate();
        let slot = self.slot.clone();
        let timeouts = self.timeouts.clone();
        let callback = Closure::once_into_js(move || {
            timeouts.borrow_mut().remove(&task);
            slot.fire(task, timer);
        });

        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                millis(delay),
            ) {
            Ok(handle) => {
                self.timeouts.borrow_mut().insert(task, handle);
            }
            Err(e) => log::error!("setTimeout failed: {:?}", e),
        }
        task
    }

    fn cancel(&mut self, task: TaskId) {
        if let Some((handle, closure)) = self.intervals.remove(&task) {
            self.window.clear_interval_with_handle(handle);
            self.retired.push(closure);
        }
        if let Some(handle) = self.timeouts.borrow_mut().remove(&task) {
            self.window.clear_timeout_with_handle(handle);
        }
    }
}

/// Global window and document
pub fn window_and_document() -> Result<(Window, Document), PlatformError> {
    let window = web_sys::window().ok_or(PlatformError::NoWindow)?;
    let document = window.document().ok_or(PlatformError::NoDocument)?;
    Ok((window, document))
}

/// Look up an element by id and cast it
pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, PlatformError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| PlatformError::MissingElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| PlatformError::Js(format!("#{} has an unexpected element type", id)))
}

/// Run `f` once after `ms` milliseconds (fire-and-forget)
pub fn defer(ms: i32, f: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::once_into_js(f);
    if let Err(e) =
        window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), ms)
    {
        log::warn!("setTimeout failed: {:?}", e);
    }
}
