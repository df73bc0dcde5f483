// Drawing seam for the network. The browser implementation wraps a 2d canvas
// context found on the page; tests swap in a recorder.

use crate::color::Color;
use crate::error::SurfaceError;
use std::f64::consts::PI;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub trait Renderer {
    fn clear(&mut self, width: f64, height: f64);
    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color);
    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, alpha: f64, width: f64);
    // Sets the backing store size of the surface.
    fn resize(&mut self, width: u32, height: u32);
}

pub struct CanvasRenderer {
    pub canvas: HtmlCanvasElement,
    pub context: CanvasRenderingContext2d,
    // last fillStyle set on the context; resizing the canvas resets it
    fill_color: Option<Color>,
}

impl CanvasRenderer {
    // Grabs the canvas with the given id from the DOM along with its 2d context
    pub fn from_document(canvas_id: &str) -> Result<Self, SurfaceError> {
        let window = web_sys::window().ok_or(SurfaceError::NoWindow)?;
        let document = window.document().ok_or(SurfaceError::NoDocument)?;
        let element = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| SurfaceError::MissingElement(canvas_id.to_owned()))?;
        let canvas = element
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SurfaceError::NotACanvas(canvas_id.to_owned()))?;
        Self::new(canvas, canvas_id)
    }

    pub fn new(canvas: HtmlCanvasElement, canvas_id: &str) -> Result<Self, SurfaceError> {
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(|| SurfaceError::NoContext(canvas_id.to_owned()))?;
        Ok(CanvasRenderer {
            canvas,
            context,
            fill_color: None,
        })
    }

    fn set_fill(&mut self, color: Color) {
        if self.fill_color != Some(color) {
            self.context.set_fill_style_str(&color.to_string());
            self.fill_color = Some(color);
        }
    }
}

impl Renderer for CanvasRenderer {
    fn clear(&mut self, width: f64, height: f64) {
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color) {
        self.context.begin_path();
        if self
            .context
            .arc(center[0], center[1], radius, 0.0, PI * 2.0)
            .is_err()
        {
            return;
        }
        self.set_fill(color);
        self.context.fill();
    }

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, alpha: f64, width: f64) {
        self.context.begin_path();
        self.context
            .set_stroke_style_str(&color.css_with_alpha(alpha));
        self.context.set_line_width(width);
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.stroke();
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.fill_color = None;
    }
}
