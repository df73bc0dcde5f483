// Configuration for the background network, readable from a plain JS object
// with camelCase keys (`particleCount`, `maxLinkDistance`, ...). Every field is
// optional on the JS side; missing ones take the defaults.

use crate::color::Color;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ResizePolicy {
    // Only the bounds change; particles outside drift back in.
    KeepPositions,
    // Every position is re-seeded inside the new bounds.
    Regenerate,
}

impl Default for ResizePolicy {
    fn default() -> Self {
        ResizePolicy::KeepPositions
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkConfig {
    pub canvas_id: String,
    pub particle_count: usize,
    pub max_link_distance: f64,
    // Packed RRGGBBAA.
    pub particle_color: u32,
    pub link_width: f64,
    pub resize_debounce_ms: f64,
    pub resize_policy: ResizePolicy,
    // Fixed seed for particle placement, entropy when absent.
    pub seed: Option<u64>,
    // Wraps every frame in console.time/timeEnd.
    pub profile: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            canvas_id: "neuralCanvas".to_owned(),
            particle_count: 70,
            max_link_distance: 150.0,
            particle_color: Color::ROSE_PINK.to_u32(),
            link_width: 1.0,
            resize_debounce_ms: 250.0,
            resize_policy: ResizePolicy::default(),
            seed: None,
            profile: false,
        }
    }
}

impl NetworkConfig {
    pub fn color(&self) -> Color {
        Color::from_u32(self.particle_color)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_link_distance.is_finite() || self.max_link_distance < 0.0 {
            return Err(ConfigError::InvalidLinkDistance(self.max_link_distance));
        }
        if !self.link_width.is_finite() || self.link_width <= 0.0 {
            return Err(ConfigError::InvalidLinkWidth(self.link_width));
        }
        if self.canvas_id.is_empty() {
            return Err(ConfigError::EmptyCanvasId);
        }
        Ok(())
    }

    pub fn or_default(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                log::warn!("invalid network config ({}), using defaults", e);
                NetworkConfig::default()
            }
        }
    }
}
