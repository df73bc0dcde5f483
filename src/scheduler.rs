// Per-frame callback scheduling. The network asks for one frame at a time and
// keeps the returned handle so it can cancel it on teardown.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

pub type FrameHandle = i32;

pub trait FrameScheduler {
    // Requests the next frame, `None` when the platform refused.
    fn request(&mut self) -> Option<FrameHandle>;
    fn cancel(&mut self, handle: FrameHandle);
}

// Shared slot for the frame closure, filled in once the network it drives exists.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub struct AnimationFrameScheduler {
    window: Window,
    callback: FrameCallback,
}

impl AnimationFrameScheduler {
    pub fn new(window: Window, callback: FrameCallback) -> Self {
        AnimationFrameScheduler { window, callback }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request(&mut self) -> Option<FrameHandle> {
        let callback = self.callback.borrow();
        let closure = callback.as_ref()?;
        self.window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .ok()
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if self.window.cancel_animation_frame(handle).is_err() {
            log::debug!("failed to cancel animation frame {}", handle);
        }
    }
}
