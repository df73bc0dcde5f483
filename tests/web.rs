// Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use neural_canvas::app::Teardown;
use neural_canvas::browser::{viewport_size, BrowserNetwork};
use neural_canvas::scheduler::{AnimationFrameScheduler, FrameCallback};
use neural_canvas::{
    start_portfolio, CanvasRenderer, Color, LoopState, NetworkConfig, NeuralNetwork, Renderer,
    ResizePolicy,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlCanvasElement};

wasm_bindgen_test_configure!(run_in_browser);

fn detached_canvas() -> HtmlCanvasElement {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.create_element("canvas").ok())
        .and_then(|e| e.dyn_into::<HtmlCanvasElement>().ok())
        .expect("canvas element")
}

fn attached_canvas(id: &str) -> HtmlCanvasElement {
    let canvas = detached_canvas();
    canvas.set_id(id);
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
        .expect("document body")
        .append_child(&canvas)
        .expect("append canvas");
    canvas
}

fn config_for(id: &str) -> NetworkConfig {
    NetworkConfig {
        canvas_id: id.to_owned(),
        particle_count: 20,
        seed: Some(17),
        ..NetworkConfig::default()
    }
}

fn fire_resize() {
    let window = web_sys::window().expect("window");
    let event = Event::new("resize").expect("resize event");
    window.dispatch_event(&event).expect("dispatch resize");
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .expect("window")
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .expect("set timeout");
    });
    JsFuture::from(promise).await.expect("sleep");
}

#[wasm_bindgen_test]
fn missing_canvas_mounts_inert() {
    let config = NetworkConfig {
        canvas_id: "no-such-canvas".to_owned(),
        ..NetworkConfig::default()
    };
    let mut mounted = BrowserNetwork::mount(&config).expect("window present");
    assert_eq!(mounted.network().borrow().state(), LoopState::Inert);
    assert_eq!(mounted.network().borrow().pending_frame(), None);
    mounted.teardown();
    mounted.teardown();
    assert_eq!(mounted.network().borrow().state(), LoopState::Inert);
}

#[wasm_bindgen_test]
fn canvas_renderer_resizes_backing_store() {
    let mut renderer = CanvasRenderer::new(detached_canvas(), "test").expect("2d context");
    renderer.resize(320, 200);
    assert_eq!((renderer.canvas.width(), renderer.canvas.height()), (320, 200));
    renderer.clear(320.0, 200.0);
}

#[wasm_bindgen_test]
fn canvas_renderer_applies_css_styles() {
    let mut renderer = CanvasRenderer::new(detached_canvas(), "test").expect("2d context");
    let style = |renderer: &CanvasRenderer, key: &str| {
        js_sys::Reflect::get(&renderer.context, &JsValue::from_str(key))
            .ok()
            .and_then(|v| v.as_string())
    };

    renderer.stroke_line([0.0, 0.0], [10.0, 0.0], Color::ROSE_PINK, 0.5, 1.0);
    assert_eq!(
        style(&renderer, "strokeStyle").as_deref(),
        Some("rgba(255, 79, 145, 0.5)")
    );
    renderer.fill_circle([5.0, 5.0], 2.0, Color::from_u32(0x102030ff));
    assert_eq!(style(&renderer, "fillStyle").as_deref(), Some("#102030"));
}

#[wasm_bindgen_test]
fn frames_run_and_stop_on_a_real_canvas() {
    let window = web_sys::window().expect("window");
    let renderer = CanvasRenderer::new(detached_canvas(), "test").expect("2d context");
    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let scheduler = AnimationFrameScheduler::new(window, Rc::clone(&callback));
    let mut network = NeuralNetwork::new(
        Some(renderer),
        scheduler,
        (640, 480),
        &NetworkConfig::default(),
        StdRng::seed_from_u64(3),
    );

    // no frame closure installed yet: the frame draws but nothing is scheduled
    assert!(network.frame());
    assert_eq!(network.pending_frame(), None);

    *callback.borrow_mut() = Some(wasm_bindgen::closure::Closure::wrap(
        Box::new(|| {}) as Box<dyn FnMut()>
    ));
    assert!(network.frame());
    assert!(network.pending_frame().is_some());

    network.destroy();
    assert_eq!(network.state(), LoopState::Stopped);
    assert!(!network.frame());
    assert_eq!(network.field().len(), 70);
}

#[wasm_bindgen_test]
async fn resize_burst_resizes_canvas_once() {
    let canvas = attached_canvas("resize-burst-canvas");
    let mut mounted = BrowserNetwork::mount(&config_for("resize-burst-canvas")).expect("window");
    assert_eq!(mounted.network().borrow().state(), LoopState::Running);

    canvas.set_width(1);
    fire_resize();
    fire_resize();
    fire_resize();
    assert!(mounted.has_pending_resize_timeout());
    sleep(400).await;

    let window = web_sys::window().expect("window");
    assert_eq!(mounted.network().borrow().resizes_applied(), 1);
    assert_eq!(canvas.width(), viewport_size(&window).0);
    assert!(!mounted.has_pending_resize_timeout());

    mounted.teardown();
    canvas.remove();
}

#[wasm_bindgen_test]
async fn teardown_drops_pending_resize_and_listener() {
    let canvas = attached_canvas("resize-teardown-canvas");
    let mut mounted =
        BrowserNetwork::mount(&config_for("resize-teardown-canvas")).expect("window");

    canvas.set_width(1);
    fire_resize();
    assert!(mounted.has_pending_resize_timeout());
    mounted.teardown();
    assert!(!mounted.has_pending_resize_timeout());
    assert_eq!(mounted.network().borrow().state(), LoopState::Stopped);

    // listener is gone: later events are not recorded either
    fire_resize();
    sleep(400).await;
    assert!(!mounted.has_pending_resize_timeout());
    assert_eq!(mounted.network().borrow().resizes_applied(), 0);
    assert_eq!(mounted.network().borrow().resize_deadline(), None);
    assert_eq!(canvas.width(), 1);

    canvas.remove();
}

#[wasm_bindgen_test]
fn portfolio_destroy_runs_teardown_once() {
    let mut handle = start_portfolio(JsValue::UNDEFINED).expect("portfolio");
    assert_eq!(handle.module_count(), 1);
    assert_eq!(handle.destroy(), 1);
    assert_eq!(handle.destroy(), 0);
}

#[wasm_bindgen_test]
fn options_use_camel_case_keys() {
    let options = js_sys::Object::new();
    let set = |key: &str, value: JsValue| {
        js_sys::Reflect::set(&options, &JsValue::from_str(key), &value).expect("set option");
    };
    set("canvasId", JsValue::from_str("camel-canvas"));
    set("particleCount", JsValue::from_f64(5.0));
    set("maxLinkDistance", JsValue::from_f64(90.0));
    set("resizePolicy", JsValue::from_str("regenerate"));

    let config: NetworkConfig =
        serde_wasm_bindgen::from_value(options.clone().into()).expect("config");
    assert_eq!(config.canvas_id, "camel-canvas");
    assert_eq!(config.particle_count, 5);
    assert_eq!(config.max_link_distance, 90.0);
    assert_eq!(config.resize_policy, ResizePolicy::Regenerate);
    assert_eq!(config.resize_debounce_ms, 250.0);

    let mut handle = start_portfolio(options.into()).expect("portfolio");
    assert_eq!(handle.destroy(), 1);
}
