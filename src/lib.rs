// Animated "neural network" background for a single-page portfolio.
//
// A fixed set of drifting particles is drawn onto a full-viewport canvas and
// every pair closer than a link distance is joined by a line that fades with
// distance. The core (`NeuralNetwork`) is platform independent; the browser
// glue in `browser` drives it with `requestAnimationFrame`.

mod utils;

pub mod app;
pub mod browser;
pub mod color;
pub mod config;
pub mod debounce;
pub mod error;
pub mod field;
pub mod network;
pub mod particle;
pub mod renderer;
pub mod scheduler;

pub use app::{PortfolioApp, Teardown};
pub use color::Color;
pub use config::{NetworkConfig, ResizePolicy};
pub use debounce::Debouncer;
pub use error::{ConfigError, SurfaceError};
pub use field::{Link, ParticleField};
pub use network::{LoopState, NeuralNetwork};
pub use particle::Particle;
pub use renderer::{CanvasRenderer, Renderer};
pub use scheduler::{FrameHandle, FrameScheduler};

use browser::BrowserNetwork;
use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    utils::init_logger(log::LevelFilter::Info);
}

#[wasm_bindgen]
pub struct PortfolioHandle {
    app: PortfolioApp,
}

#[wasm_bindgen]
impl PortfolioHandle {
    pub fn module_count(&self) -> usize {
        self.app.len()
    }

    // Tears down every page module. Safe to call more than once.
    pub fn destroy(&mut self) -> usize {
        self.app.destroy()
    }
}

// Starts the page modules. `options` may be undefined or an object with any of
// `canvasId`, `particleCount`, `maxLinkDistance`, `particleColor` (RRGGBBAA),
// `linkWidth`, `resizeDebounceMs`, `resizePolicy` ("keepPositions" or
// "regenerate"), `seed` and `profile`. Invalid values fall back to the defaults.
#[wasm_bindgen]
pub fn start_portfolio(options: JsValue) -> Result<PortfolioHandle, JsValue> {
    let config = if options.is_undefined() || options.is_null() {
        NetworkConfig::default()
    } else {
        serde_wasm_bindgen::from_value::<NetworkConfig>(options)?.or_default()
    };

    let mut app = PortfolioApp::new();
    match BrowserNetwork::mount(&config) {
        Some(network) => app.register("neural-network", Some(Box::new(network))),
        None => app.register("neural-network", None),
    }
    log::info!("portfolio initialized with {} module(s)", app.len());
    Ok(PortfolioHandle { app })
}

#[wasm_bindgen]
pub fn default_options() -> Result<JsValue, JsValue> {
    Ok(serde_wasm_bindgen::to_value(&NetworkConfig::default())?)
}
