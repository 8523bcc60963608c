//! Reticle geometry and rendering.
//!
//! A reticle is designed in angular space: every position, radius and line
//! width is a [`Measurement`] such as `2.5mil` or `1moa`. Rendering maps that
//! space onto a pixel surface, letterboxed to keep the aspect ratio, and
//! issues calls against any [`Canvas`](render::Canvas) implementation.
//!
//! ```
//! use graticule::{Measurement, Position, ReticleCircle, ReticleDefinition};
//!
//! let reticle = ReticleDefinition::new("dot")
//!     .with_size(Position::mil(10.0, 10.0))
//!     .with_zero(Position::mil(5.0, 5.0))
//!     .with_element(ReticleCircle::new(Position::mil(0.0, 0.0), Measurement::mil(0.5)));
//!
//! let svg = graticule::render_svg(&reticle, 200.0, 200.0);
//! assert!(svg.contains("<circle"));
//! ```

pub mod editor;
pub mod errors;
pub mod log;
pub mod overlay;
pub mod parse;
pub mod render;
pub mod reticle;
pub mod types;

pub use editor::EditSession;
pub use errors::{EditError, ParseError, RenderError};
pub use parse::{parse_measurement, parse_position};
pub use render::{Canvas, RecordingCanvas, RenderOptions, RenderOutcome, ReticleRenderer, SvgCanvas};
pub use reticle::{
    BdcPoint, Element, PathSegment, ReticleCircle, ReticleDefinition, ReticleElement, ReticleLine, ReticlePath,
    ReticleRectangle, ReticleText, TextAnchor,
};
pub use types::{AngularUnit, Measurement, Position};

/// Render a reticle on its own to an SVG string of the given pixel size.
///
/// A reticle without a usable size yields an SVG holding only the background.
pub fn render_svg(reticle: &ReticleDefinition, width: f64, height: f64) -> String {
    let mut canvas = SvgCanvas::new(width, height);
    ReticleRenderer::new(width, height).render(&mut canvas, reticle, &[], &[]);
    canvas.to_svg_string()
}
