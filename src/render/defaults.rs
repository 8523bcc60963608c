//! Rendering policy constants (pixel space unless noted)

/// Arc endpoints closer than this on both axes, or radii smaller than this,
/// count as degenerate.
pub const DEGENERATE_EPSILON: f64 = 0.5;

/// Stroke widths below this threshold are drawn at [`MIN_STROKE_WIDTH`].
pub const MIN_STROKE_THRESHOLD: f64 = 0.5;
pub const MIN_STROKE_WIDTH: f64 = 1.0;

/// Text heights below this threshold are drawn at [`MIN_FONT_SIZE`].
pub const MIN_FONT_THRESHOLD: f64 = 0.5;
pub const MIN_FONT_SIZE: f64 = 1.0;

pub const PAINT_CACHE_LIMIT: usize = 1000;
pub const FONT_CACHE_LIMIT: usize = 100;

pub const FONT_FAMILY: &str = "Verdana";
pub const BACKGROUND: &str = "white";

/// Color given to new elements.
pub const COLOR: &str = "black";

/// BDC marker radius as a fraction of the reticle width.
pub const BDC_MARKER_RATIO: f64 = 1.0 / 50.0;
pub const SELECTED_COLOR: &str = "blue";
pub const BDC_COLOR: &str = "darkblue";
