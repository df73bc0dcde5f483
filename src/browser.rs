// Wires the network into the page: canvas lookup, the requestAnimationFrame
// loop, and a window resize listener woken up by setTimeout once the debounce
// window has passed.

use crate::app::Teardown;
use crate::config::NetworkConfig;
use crate::network::{LoopState, NeuralNetwork};
use crate::renderer::CanvasRenderer;
use crate::scheduler::{AnimationFrameScheduler, FrameCallback};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, Window};

pub type CanvasNetwork = NeuralNetwork<CanvasRenderer, AnimationFrameScheduler>;

type WakeCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub struct BrowserNetwork {
    window: Window,
    network: Rc<RefCell<CanvasNetwork>>,
    frame_callback: FrameCallback,
    resize_listener: Option<Closure<dyn FnMut(Event)>>,
    resize_wake: WakeCallback,
    resize_timeout: Rc<Cell<Option<i32>>>,
}

pub fn viewport_size(window: &Window) -> (u32, u32) {
    let dimension = |value: Result<JsValue, JsValue>| {
        value
            .ok()
            .and_then(|v| v.as_f64())
            .map(|v| v.max(0.0) as u32)
            .unwrap_or(0)
    };
    (dimension(window.inner_width()), dimension(window.inner_height()))
}

// Monotonic milliseconds; wall clock only when the Performance API is missing
pub fn now_ms(window: &Window) -> f64 {
    match window.performance() {
        Some(performance) => performance.now(),
        None => js_sys::Date::now(),
    }
}

// Replaces any pending wake-up with one firing after `delay_ms`
fn arm_wake(window: &Window, wake: &WakeCallback, timeout: &Cell<Option<i32>>, delay_ms: f64) {
    if let Some(id) = timeout.take() {
        window.clear_timeout_with_handle(id);
    }
    if let Some(callback) = wake.borrow().as_ref() {
        let id = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay_ms.max(0.0).ceil() as i32,
            )
            .ok();
        timeout.set(id);
    }
}

impl BrowserNetwork {
    // Mounts the network on the configured canvas and starts the loop.
    // Returns `None` only when there is no window at all; a missing canvas
    // gives back an inert network.
    pub fn mount(config: &NetworkConfig) -> Option<BrowserNetwork> {
        let window = web_sys::window()?;
        let renderer = match CanvasRenderer::from_document(&config.canvas_id) {
            Ok(renderer) => Some(renderer),
            Err(e) => {
                log::debug!("neural network disabled: {}", e);
                None
            }
        };
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
        let scheduler = AnimationFrameScheduler::new(window.clone(), Rc::clone(&frame_callback));
        let network = Rc::new(RefCell::new(NeuralNetwork::new(
            renderer,
            scheduler,
            viewport_size(&window),
            config,
            rng,
        )));

        let mut mounted = BrowserNetwork {
            window,
            network,
            frame_callback,
            resize_listener: None,
            resize_wake: Rc::new(RefCell::new(None)),
            resize_timeout: Rc::new(Cell::new(None)),
        };
        if mounted.network.borrow().state() == LoopState::Inert {
            return Some(mounted);
        }

        {
            let network = Rc::clone(&mounted.network);
            *mounted.frame_callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                network.borrow_mut().frame();
            }) as Box<dyn FnMut()>));
        }
        mounted.install_resize_wake();
        if let Err(e) = mounted.listen_for_resize(config.resize_debounce_ms) {
            log::warn!("resize listener not installed: {:?}", e);
        }

        mounted.network.borrow_mut().start();
        log::info!(
            "neural network running with {} particles",
            mounted.network.borrow().field().len()
        );
        Some(mounted)
    }

    pub fn network(&self) -> &Rc<RefCell<CanvasNetwork>> {
        &self.network
    }

    pub fn has_pending_resize_timeout(&self) -> bool {
        self.resize_timeout.get().is_some()
    }

    // A timer may fire ahead of the debounce deadline; the wake then sleeps
    // for the remainder instead of dropping the last size of the burst.
    fn install_resize_wake(&mut self) {
        let window = self.window.clone();
        let network = Rc::clone(&self.network);
        let wake = Rc::clone(&self.resize_wake);
        let timeout = Rc::clone(&self.resize_timeout);
        *self.resize_wake.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            timeout.set(None);
            let now = now_ms(&window);
            let remaining = {
                let mut network = network.borrow_mut();
                if network.poll_resize(now) {
                    None
                } else {
                    network.resize_remaining(now)
                }
            };
            if let Some(delay) = remaining {
                arm_wake(&window, &wake, &timeout, delay.max(1.0));
            }
        }) as Box<dyn FnMut()>));
    }

    fn listen_for_resize(&mut self, wait_ms: f64) -> Result<(), JsValue> {
        let window = self.window.clone();
        let network = Rc::clone(&self.network);
        let wake = Rc::clone(&self.resize_wake);
        let timeout = Rc::clone(&self.resize_timeout);
        let listener = Closure::wrap(Box::new(move |_event: Event| {
            let (width, height) = viewport_size(&window);
            network
                .borrow_mut()
                .on_resize(now_ms(&window), width, height);
            arm_wake(&window, &wake, &timeout, wait_ms);
        }) as Box<dyn FnMut(Event)>);

        self.window
            .add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())?;
        self.resize_listener = Some(listener);
        Ok(())
    }
}

impl Teardown for BrowserNetwork {
    fn teardown(&mut self) {
        self.network.borrow_mut().destroy();
        if let Some(listener) = self.resize_listener.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
        }
        if let Some(id) = self.resize_timeout.take() {
            self.window.clear_timeout_with_handle(id);
        }
        // the closures hold the network alive; dropping them breaks the cycle
        self.frame_callback.borrow_mut().take();
        self.resize_wake.borrow_mut().take();
    }
}
