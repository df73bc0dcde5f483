// The background "neural network": a particle field animated once per frame,
// drawn as dots joined by distance-faded lines.
//
// The component is platform independent. Drawing goes through a `Renderer`,
// frame requests through a `FrameScheduler`, and resize timing through a
// `Debouncer` fed with caller-supplied timestamps.

use crate::color::Color;
use crate::config::{NetworkConfig, ResizePolicy};
use crate::debounce::Debouncer;
use crate::field::{ParticleField, RECOMMENDED_MAX_PARTICLES};
use crate::renderer::Renderer;
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::utils::Timer;
use rand::rngs::StdRng;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoopState {
    // No drawing surface was available at mount. Terminal.
    Inert,
    Running,
    // Torn down by `destroy`. Terminal.
    Stopped,
}

pub struct NeuralNetwork<R: Renderer, S: FrameScheduler> {
    renderer: Option<R>,
    scheduler: S,
    field: ParticleField,
    color: Color,
    link_width: f64,
    resize_policy: ResizePolicy,
    resize: Debouncer<(u32, u32)>,
    rng: StdRng,
    state: LoopState,
    pending_frame: Option<FrameHandle>,
    frames_drawn: u64,
    resizes_applied: u64,
    profile: bool,
}

impl<R: Renderer, S: FrameScheduler> NeuralNetwork<R, S> {
    // Builds the network over `renderer`, sized to the viewport.
    //
    // A missing renderer yields an inert network: no particles, no frames,
    // every other call a no-op. Nothing is scheduled until `start`.
    pub fn new(
        renderer: Option<R>,
        scheduler: S,
        viewport: (u32, u32),
        config: &NetworkConfig,
        mut rng: StdRng,
    ) -> Self {
        let (width, height) = viewport;
        let mut renderer = renderer;
        let (state, count) = match renderer.as_mut() {
            Some(r) => {
                r.resize(width, height);
                (LoopState::Running, config.particle_count)
            }
            None => (LoopState::Inert, 0),
        };
        if count > RECOMMENDED_MAX_PARTICLES {
            log::warn!(
                "{} particles exceeds the recommended {}; the link pass is quadratic",
                count,
                RECOMMENDED_MAX_PARTICLES
            );
        }
        let field = ParticleField::new(
            &mut rng,
            width as f64,
            height as f64,
            count,
            config.max_link_distance,
        );

        NeuralNetwork {
            renderer,
            scheduler,
            field,
            color: config.color(),
            link_width: config.link_width,
            resize_policy: config.resize_policy,
            resize: Debouncer::new(config.resize_debounce_ms),
            rng,
            state,
            pending_frame: None,
            frames_drawn: 0,
            resizes_applied: 0,
            profile: config.profile,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending_frame
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    // Draws the first frame right away and starts the loop.
    pub fn start(&mut self) {
        if self.state == LoopState::Running && self.pending_frame.is_none() {
            self.frame();
        }
    }

    // Body of the frame callback: step, draw, link, then request the next
    // frame. Returns whether a frame was drawn.
    pub fn frame(&mut self) -> bool {
        self.pending_frame = None;
        if self.state != LoopState::Running {
            return false;
        }
        let renderer = match self.renderer.as_mut() {
            Some(r) => r,
            None => return false,
        };
        let _timer = if self.profile {
            Some(Timer::new("NeuralNetwork::frame"))
        } else {
            None
        };

        renderer.clear(self.field.width(), self.field.height());
        self.field.update();
        for p in self.field.particles() {
            renderer.fill_circle(p.pos, p.radius, self.color);
        }
        let particles = self.field.particles();
        for link in self.field.links() {
            renderer.stroke_line(
                particles[link.from].pos,
                particles[link.to].pos,
                self.color,
                link.alpha,
                self.link_width,
            );
        }
        self.frames_drawn += 1;

        self.pending_frame = self.scheduler.request();
        if self.pending_frame.is_none() {
            log::warn!("next frame could not be scheduled; animation halted");
        }
        true
    }

    // Records a viewport resize. The change applies once the debounce window
    // passes without another resize; see `poll_resize`.
    pub fn on_resize(&mut self, now_ms: f64, width: u32, height: u32) {
        if self.state == LoopState::Running {
            self.resize.call(now_ms, (width, height));
        }
    }

    pub fn resize_deadline(&self) -> Option<f64> {
        self.resize.deadline()
    }

    // Time left before the pending resize is due. A wake-up that finds the
    // resize not yet due uses this to sleep again instead of dropping it.
    pub fn resize_remaining(&self, now_ms: f64) -> Option<f64> {
        self.resize.remaining(now_ms)
    }

    pub fn resizes_applied(&self) -> u64 {
        self.resizes_applied
    }

    // Applies the latest recorded size when its quiet period has elapsed.
    pub fn poll_resize(&mut self, now_ms: f64) -> bool {
        if self.state != LoopState::Running {
            return false;
        }
        let (width, height) = match self.resize.poll(now_ms) {
            Some(size) => size,
            None => return false,
        };
        if let Some(r) = self.renderer.as_mut() {
            r.resize(width, height);
        }
        self.field.resize(width as f64, height as f64);
        if self.resize_policy == ResizePolicy::Regenerate {
            self.field.regenerate(&mut self.rng);
        }
        self.resizes_applied += 1;
        log::debug!("surface resized to {}x{}", width, height);
        true
    }

    // Cancels the pending frame and stops the loop for good. Idempotent.
    pub fn destroy(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel(handle);
        }
        self.resize.cancel();
        if self.state == LoopState::Running {
            self.state = LoopState::Stopped;
        }
    }
}
