//! The drawing surface abstraction.
//!
//! All coordinates and lengths handed to a [`Canvas`] are in device pixels.
//! Colors are palette names or hex strings and never fail: anything the
//! backend cannot resolve is drawn black. Stroke widths go through
//! [`stroke_width`](super::color::stroke_width) in every backend.

use glam::DVec2;

use super::path_builder::{PathBuilder, PathSink};

pub use crate::reticle::TextAnchor;

/// A rendering backend.
pub trait Canvas {
    /// Sink type collecting the commands of one path.
    type Path: PathSink;

    /// False when the backing surface cannot be drawn on right now.
    fn is_available(&self) -> bool {
        true
    }

    fn clear(&mut self);

    fn circle(&mut self, center: DVec2, radius: f64, width: f64, fill: bool, color: &str);

    fn line(&mut self, from: DVec2, to: DVec2, width: f64, color: &str);

    /// Axis-aligned rectangle between two opposite corners, in either order.
    fn rectangle(&mut self, corner1: DVec2, corner2: DVec2, width: f64, fill: bool, color: &str);

    /// Text on the baseline through `at`; `anchor` picks which end of the
    /// run (or its middle) lands on `at.x`.
    fn text(&mut self, at: DVec2, height: f64, text: &str, color: &str, anchor: TextAnchor);

    /// Start a new, empty path for this backend.
    fn create_path(&mut self) -> PathBuilder<Self::Path>;

    /// Stroke or fill a finished path.
    fn path(&mut self, path: PathBuilder<Self::Path>, width: f64, fill: bool, color: &str);
}
