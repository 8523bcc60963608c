//! Reticle data model.
//!
//! A [`ReticleDefinition`] is a named angular extent, an optional zero point,
//! and an ordered list of [`ReticleElement`]s drawn in list order. Bullet-drop
//! calibration marks ([`BdcPoint`]) ride along beside the elements; they are
//! not drawn as part of the reticle itself, only through editor overlays.

use enum_dispatch::enum_dispatch;

use crate::render::arc::center_arc;
use crate::render::defaults;
use crate::types::{AngularBox, AngularUnit, Measurement, Position};

/// Horizontal alignment of text relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Left,
    Center,
    Right,
}

/// Behavior shared by every reticle element.
#[enum_dispatch]
pub trait Element {
    /// Human-readable element kind, used in editor listings.
    fn kind(&self) -> &'static str;

    /// Color name or hex string.
    fn color(&self) -> &str;

    fn set_color(&mut self, color: &str);

    /// Angular bounds in `unit`, or `None` when the element covers nothing.
    fn bounds(&self, unit: AngularUnit) -> Option<AngularBox>;
}

/// One drawable item of a reticle.
#[enum_dispatch(Element)]
#[derive(Debug, Clone, PartialEq)]
pub enum ReticleElement {
    Line(ReticleLine),
    Circle(ReticleCircle),
    Rectangle(ReticleRectangle),
    Text(ReticleText),
    Path(ReticlePath),
}

fn finish_bounds(mut bounds: AngularBox, line_width: Option<Measurement>) -> Option<AngularBox> {
    if bounds.is_empty() {
        return None;
    }
    if let Some(width) = line_width {
        bounds.inflate(width / 2.0);
    }
    Some(bounds)
}

// ============================================================================
// Line
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ReticleLine {
    pub start: Position,
    pub end: Position,
    pub line_width: Option<Measurement>,
    pub color: String,
}

impl ReticleLine {
    pub fn new(start: Position, end: Position) -> Self {
        Self {
            start,
            end,
            line_width: None,
            color: defaults::COLOR.to_string(),
        }
    }
}

impl Element for ReticleLine {
    fn kind(&self) -> &'static str {
        "line"
    }

    fn color(&self) -> &str {
        &self.color
    }

    fn set_color(&mut self, color: &str) {
        self.color = color.to_string();
    }

    fn bounds(&self, unit: AngularUnit) -> Option<AngularBox> {
        let mut b = AngularBox::new(unit);
        b.expand_point(self.start);
        b.expand_point(self.end);
        finish_bounds(b, self.line_width)
    }
}

// ============================================================================
// Circle
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ReticleCircle {
    pub center: Position,
    pub radius: Measurement,
    pub line_width: Option<Measurement>,
    pub color: String,
    pub fill: bool,
}

impl ReticleCircle {
    pub fn new(center: Position, radius: Measurement) -> Self {
        Self {
            center,
            radius,
            line_width: None,
            color: defaults::COLOR.to_string(),
            fill: false,
        }
    }
}

impl Element for ReticleCircle {
    fn kind(&self) -> &'static str {
        "circle"
    }

    fn color(&self) -> &str {
        &self.color
    }

    fn set_color(&mut self, color: &str) {
        self.color = color.to_string();
    }

    fn bounds(&self, unit: AngularUnit) -> Option<AngularBox> {
        let mut b = AngularBox::new(unit);
        b.expand_circle(self.center, self.radius);
        finish_bounds(b, self.line_width)
    }
}

// ============================================================================
// Rectangle
// ============================================================================

/// Rectangle anchored at its top-left corner. Angular Y grows upward, so the
/// rectangle extends right by `size.x` and down by `size.y`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReticleRectangle {
    pub top_left: Position,
    pub size: Position,
    pub line_width: Option<Measurement>,
    pub color: String,
    pub fill: bool,
}

impl ReticleRectangle {
    pub fn new(top_left: Position, size: Position) -> Self {
        Self {
            top_left,
            size,
            line_width: None,
            color: defaults::COLOR.to_string(),
            fill: false,
        }
    }

    /// The corner diagonally opposite `top_left`.
    pub fn bottom_right(&self) -> Position {
        Position::new(self.top_left.x + self.size.x, self.top_left.y - self.size.y)
    }
}

impl Element for ReticleRectangle {
    fn kind(&self) -> &'static str {
        "rectangle"
    }

    fn color(&self) -> &str {
        &self.color
    }

    fn set_color(&mut self, color: &str) {
        self.color = color.to_string();
    }

    fn bounds(&self, unit: AngularUnit) -> Option<AngularBox> {
        let mut b = AngularBox::new(unit);
        b.expand_point(self.top_left);
        b.expand_point(self.bottom_right());
        finish_bounds(b, self.line_width)
    }
}

// ============================================================================
// Text
// ============================================================================

/// Proportional character widths, in hundredths of an average glyph width,
/// for printable ASCII starting at space.
#[rustfmt::skip]
const CHAR_WIDTHS: [u8; 95] = [
    45,  55,  62, 115,  90, 132, 125,  40,
    55,  55,  71, 115,  45,  48,  45,  50,
    91,  91,  91,  91,  91,  91,  91,  91,
    91,  91,  50,  50, 120, 120, 120,  78,
   142, 102, 105, 110, 115, 105,  98, 105,
   125,  58,  58, 107,  95, 145, 125, 115,
    95, 115, 107,  95,  97, 118, 102, 150,
   100,  93, 100,  58,  50,  58, 119,  72,
    72,  86,  92,  80,  92,  85,  52,  92,
    92,  47,  47,  88,  48, 135,  92,  86,
    92,  92,  69,  75,  58,  92,  80, 121,
    81,  80,  76,  91,  49,  91, 118,
];

/// Average glyph width as a fraction of the text height.
const GLYPH_ASPECT: f64 = 0.57;

/// Estimated advance width of `text` at the given height.
pub fn estimate_text_width(text: &str, height: f64) -> f64 {
    let hundredths: u32 = text
        .chars()
        .map(|c| match c {
            ' '..='~' => u32::from(CHAR_WIDTHS[(c as usize) - 0x20]),
            _ => 100,
        })
        .sum();
    f64::from(hundredths) * 0.01 * GLYPH_ASPECT * height
}

/// Text whose baseline starts (or centers, or ends) at `position`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReticleText {
    pub position: Position,
    pub text_height: Measurement,
    pub text: String,
    pub color: String,
    pub anchor: TextAnchor,
}

impl ReticleText {
    pub fn new(position: Position, text_height: Measurement, text: impl Into<String>) -> Self {
        Self {
            position,
            text_height,
            text: text.into(),
            color: defaults::COLOR.to_string(),
            anchor: TextAnchor::Left,
        }
    }
}

impl Element for ReticleText {
    fn kind(&self) -> &'static str {
        "text"
    }

    fn color(&self) -> &str {
        &self.color
    }

    fn set_color(&mut self, color: &str) {
        self.color = color.to_string();
    }

    fn bounds(&self, unit: AngularUnit) -> Option<AngularBox> {
        if self.text.is_empty() {
            return None;
        }
        let (x, y) = self.position.in_unit(unit);
        let height = self.text_height.in_unit(unit).abs();
        let width = estimate_text_width(&self.text, height);
        let left = match self.anchor {
            TextAnchor::Left => x,
            TextAnchor::Center => x - width / 2.0,
            TextAnchor::Right => x - width,
        };
        let mut b = AngularBox::new(unit);
        b.expand_raw(left, y);
        b.expand_raw(left + width, y + height);
        Some(b)
    }
}

// ============================================================================
// Path
// ============================================================================

/// One step of a reticle path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo {
        position: Position,
    },
    LineTo {
        position: Position,
    },
    /// SVG-style endpoint arc from the current point to `position`.
    ArcTo {
        radius: Measurement,
        position: Position,
        large_arc: bool,
        clockwise: bool,
    },
}

impl PathSegment {
    pub fn position(&self) -> Position {
        match *self {
            PathSegment::MoveTo { position }
            | PathSegment::LineTo { position }
            | PathSegment::ArcTo { position, .. } => position,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PathSegment::MoveTo { .. } => "move-to",
            PathSegment::LineTo { .. } => "line-to",
            PathSegment::ArcTo { .. } => "arc",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReticlePath {
    pub line_width: Option<Measurement>,
    pub color: String,
    pub fill: bool,
    pub segments: Vec<PathSegment>,
}

impl Default for ReticlePath {
    fn default() -> Self {
        Self {
            line_width: None,
            color: defaults::COLOR.to_string(),
            fill: false,
            segments: Vec::new(),
        }
    }
}

impl ReticlePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, position: Position) -> Self {
        self.segments.push(PathSegment::MoveTo { position });
        self
    }

    pub fn line_to(mut self, position: Position) -> Self {
        self.segments.push(PathSegment::LineTo { position });
        self
    }

    pub fn arc_to(mut self, radius: Measurement, position: Position, large_arc: bool, clockwise: bool) -> Self {
        self.segments.push(PathSegment::ArcTo {
            radius,
            position,
            large_arc,
            clockwise,
        });
        self
    }
}

impl Element for ReticlePath {
    fn kind(&self) -> &'static str {
        "path"
    }

    fn color(&self) -> &str {
        &self.color
    }

    fn set_color(&mut self, color: &str) {
        self.color = color.to_string();
    }

    /// Conservative bounds: every vertex plus the full circle of every arc.
    fn bounds(&self, unit: AngularUnit) -> Option<AngularBox> {
        let mut b = AngularBox::new(unit);
        let mut current = Position::zero(unit);
        for segment in &self.segments {
            let target = segment.position();
            if let PathSegment::ArcTo {
                radius,
                large_arc,
                clockwise,
                ..
            } = *segment
            {
                let r = radius.in_unit(unit);
                if r > 0.0 {
                    let (x1, y1) = current.in_unit(unit);
                    let (x2, y2) = target.in_unit(unit);
                    let arc = center_arc(r, glam::dvec2(x1, y1), glam::dvec2(x2, y2), large_arc, clockwise);
                    b.expand_raw(arc.center.x - arc.radii.x, arc.center.y - arc.radii.y);
                    b.expand_raw(arc.center.x + arc.radii.x, arc.center.y + arc.radii.y);
                }
            }
            b.expand_point(target);
            current = target;
        }
        finish_bounds(b, self.line_width)
    }
}

// ============================================================================
// BDC points
// ============================================================================

/// A bullet-drop calibration mark: a labelled aiming offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BdcPoint {
    pub position: Position,
    /// Horizontal distance from the mark to its label.
    pub text_offset: Measurement,
    pub text_height: Measurement,
}

impl BdcPoint {
    pub fn new(position: Position, text_offset: Measurement, text_height: Measurement) -> Self {
        Self {
            position,
            text_offset,
            text_height,
        }
    }
}

// ============================================================================
// Definition
// ============================================================================

/// A complete reticle design.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReticleDefinition {
    pub name: String,
    /// Full visible angular extent; `None` until the design has geometry.
    pub size: Option<Position>,
    /// Where the angular origin sits, measured from the top-left corner of
    /// the extent with Y growing downward. Defaults to `(0, 0)`.
    pub zero: Option<Position>,
    pub elements: Vec<ReticleElement>,
    pub bdc_points: Vec<BdcPoint>,
}

impl ReticleDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_size(mut self, size: Position) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_zero(mut self, zero: Position) -> Self {
        self.zero = Some(zero);
        self
    }

    pub fn with_element(mut self, element: impl Into<ReticleElement>) -> Self {
        self.elements.push(element.into());
        self
    }

    /// The unit all geometry is normalized to: the unit of the size's X axis.
    pub fn unit(&self) -> AngularUnit {
        self.size.map_or(AngularUnit::default(), |s| s.x.unit())
    }

    /// The zero offset, defaulting to `(0, 0)` in the reticle unit.
    pub fn zero_or_origin(&self) -> Position {
        self.zero.unwrap_or_else(|| Position::zero(self.unit()))
    }

    /// Angular coordinates of the middle of the extent.
    pub fn center(&self) -> Option<Position> {
        let unit = self.unit();
        let (sx, sy) = self.size?.in_unit(unit);
        let (zx, zy) = self.zero_or_origin().in_unit(unit);
        Some(Position::of(sx / 2.0 - zx, zy - sy / 2.0, unit))
    }

    /// True when the size is present and both components are non-zero.
    pub fn has_geometry(&self) -> bool {
        self.size.is_some_and(|s| !s.has_zero_component())
    }

    /// Index of the topmost element whose bounds contain `position`.
    pub fn element_at(&self, position: Position) -> Option<usize> {
        let unit = self.unit();
        self.elements
            .iter()
            .rposition(|e| e.bounds(unit).is_some_and(|b| b.contains(position)))
    }
}
