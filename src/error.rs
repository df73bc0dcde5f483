// Error types for mounting the visualization.
//
// None of these ever reach the page: a `SurfaceError` turns the component
// inert and a `ConfigError` falls back to the default configuration.

use thiserror::Error;

// Reasons the drawing surface could not be acquired.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("no global window")]
    NoWindow,
    #[error("no document on window")]
    NoDocument,
    #[error("no element with id '{0}'")]
    MissingElement(String),
    #[error("element '{0}' is not a canvas")]
    NotACanvas(String),
    #[error("canvas '{0}' has no 2d context")]
    NoContext(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("max link distance must be finite and non-negative, got {0}")]
    InvalidLinkDistance(f64),
    #[error("link width must be finite and positive, got {0}")]
    InvalidLinkWidth(f64),
    #[error("canvas id must not be empty")]
    EmptyCanvasId,
}
