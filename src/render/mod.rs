//! Reticle rendering
//!
//! This module is organized into submodules:
//! - `arc`: SVG endpoint arc to center-form conversion
//! - `path_builder`: Path state machine and replayable command lists
//! - `canvas`: The backend trait every renderer implements
//! - `color`: Palette, hex parsing and stroke policy
//! - `translator`: Angular to pixel mapping with letterboxing
//! - `recording`: Call-recording canvas
//! - `svg`: SVG canvas
//! - `defaults`: Policy constants
//!
//! [`ReticleRenderer`] ties them together: it clears the canvas, then draws
//! the underlay, the reticle's own elements and the overlay, in that order,
//! translating every coordinate right before the canvas call that uses it.

pub mod arc;
pub mod canvas;
pub mod color;
pub mod defaults;
pub mod path_builder;
pub mod recording;
pub mod svg;
pub mod translator;

pub use canvas::{Canvas, TextAnchor};
pub use path_builder::{PathBuilder, PathCommand, PathCommands, PathSink};
pub use recording::{DrawCall, RecordingCanvas};
pub use self::svg::SvgCanvas;
pub use translator::{CoordinateTranslator, Letterbox, angular_to_pixel, pixel_to_angular};

use glam::{DVec2, dvec2};

use crate::reticle::{PathSegment, ReticleElement, ReticleDefinition, ReticlePath};
use crate::types::Measurement;

/// Per-canvas presentation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Color the canvas is cleared to.
    pub background: String,
    pub font_family: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            background: defaults::BACKGROUND.to_string(),
            font_family: defaults::FONT_FAMILY.to_string(),
        }
    }
}

/// Why a render pass drew nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The canvas had no drawing surface; not even cleared.
    SurfaceUnavailable,
    /// The reticle has no usable size; the canvas was cleared only.
    NoReticleSize,
}

/// Result of one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Elements drawn, counting underlay and overlay.
    Drawn { elements: usize },
    Skipped(SkipReason),
}

/// Draws reticle definitions onto a canvas of fixed pixel bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReticleRenderer {
    bounds: DVec2,
}

impl ReticleRenderer {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            bounds: dvec2(width, height),
        }
    }

    pub fn bounds(&self) -> DVec2 {
        self.bounds
    }

    /// The mapping this renderer would use for `reticle`.
    pub fn translator(&self, reticle: &ReticleDefinition) -> Option<CoordinateTranslator> {
        CoordinateTranslator::for_reticle(self.bounds, reticle)
    }

    /// Run one full render pass.
    pub fn render<C: Canvas>(
        &self,
        canvas: &mut C,
        reticle: &ReticleDefinition,
        underlay: &[ReticleElement],
        overlay: &[ReticleElement],
    ) -> RenderOutcome {
        if !canvas.is_available() {
            crate::log::debug!("canvas unavailable, skipping frame");
            return RenderOutcome::Skipped(SkipReason::SurfaceUnavailable);
        }

        canvas.clear();

        let Some(translator) = self.translator(reticle) else {
            crate::log::debug!(name = %reticle.name, "reticle has no usable size, skipping elements");
            return RenderOutcome::Skipped(SkipReason::NoReticleSize);
        };

        let elements = underlay.iter().chain(&reticle.elements).chain(overlay);
        let mut count = 0;
        for element in elements {
            draw_element(canvas, &translator, element);
            count += 1;
        }

        crate::log::debug!(
            name = %reticle.name,
            underlay = underlay.len(),
            reticle = reticle.elements.len(),
            overlay = overlay.len(),
            "render pass complete"
        );
        RenderOutcome::Drawn { elements: count }
    }
}

fn width_px(t: &CoordinateTranslator, width: Option<Measurement>) -> f64 {
    width.map_or(0.0, |w| t.length(w))
}

/// Issue the canvas call for one element.
pub fn draw_element<C: Canvas>(canvas: &mut C, t: &CoordinateTranslator, element: &ReticleElement) {
    match element {
        ReticleElement::Line(line) => {
            canvas.line(
                t.to_pixel(line.start),
                t.to_pixel(line.end),
                width_px(t, line.line_width),
                &line.color,
            );
        }
        ReticleElement::Circle(circle) => {
            canvas.circle(
                t.to_pixel(circle.center),
                t.length(circle.radius),
                width_px(t, circle.line_width),
                circle.fill,
                &circle.color,
            );
        }
        ReticleElement::Rectangle(rect) => {
            canvas.rectangle(
                t.to_pixel(rect.top_left),
                t.to_pixel(rect.bottom_right()),
                width_px(t, rect.line_width),
                rect.fill,
                &rect.color,
            );
        }
        ReticleElement::Text(text) => {
            canvas.text(
                t.to_pixel(text.position),
                t.length(text.text_height),
                &text.text,
                &text.color,
                text.anchor,
            );
        }
        ReticleElement::Path(path) => draw_path(canvas, t, path),
    }
}

fn draw_path<C: Canvas>(canvas: &mut C, t: &CoordinateTranslator, path: &ReticlePath) {
    let mut builder = canvas.create_path();
    for segment in &path.segments {
        match *segment {
            PathSegment::MoveTo { position } => {
                builder.move_to(t.to_pixel(position));
            }
            PathSegment::LineTo { position } => {
                builder.line_to(t.to_pixel(position));
            }
            PathSegment::ArcTo {
                radius,
                position,
                large_arc,
                clockwise,
            } => {
                builder.arc(t.length(radius), t.to_pixel(position), large_arc, clockwise);
            }
        }
    }
    canvas.path(builder, width_px(t, path.line_width), path.fill, &path.color);
}

/// Shortest decimal form rounded to two places, never `-0`.
pub(crate) fn format_number(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0 + 0.0;
    format!("{rounded}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reticle::{ReticleCircle, ReticleLine, ReticleRectangle, ReticleText};
    use crate::types::Position;

    fn scope() -> ReticleDefinition {
        ReticleDefinition::new("scope")
            .with_size(Position::mil(10.0, 10.0))
            .with_zero(Position::mil(5.0, 5.0))
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(40.0), "40");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-0.001), "0");
        assert_eq!(format_number(1.0 / 3.0), "0.33");
    }

    #[test]
    fn test_unavailable_surface_skips_everything() {
        let mut canvas = RecordingCanvas::unavailable();
        let outcome = ReticleRenderer::new(100.0, 100.0).render(&mut canvas, &scope(), &[], &[]);
        assert_eq!(outcome, RenderOutcome::Skipped(SkipReason::SurfaceUnavailable));
        assert!(canvas.calls().is_empty());
    }

    #[test]
    fn test_no_size_clears_only() {
        let reticle = ReticleDefinition::new("blank").with_element(ReticleLine::new(
            Position::mil(0.0, 0.0),
            Position::mil(1.0, 1.0),
        ));
        let mut canvas = RecordingCanvas::new();
        let outcome = ReticleRenderer::new(100.0, 100.0).render(&mut canvas, &reticle, &[], &[]);
        assert_eq!(outcome, RenderOutcome::Skipped(SkipReason::NoReticleSize));
        assert_eq!(canvas.calls(), &[DrawCall::Clear]);
    }

    #[test]
    fn test_missing_width_is_zero() {
        let reticle = scope().with_element(ReticleLine::new(Position::mil(-1.0, 0.0), Position::mil(1.0, 0.0)));
        let mut canvas = RecordingCanvas::new();
        ReticleRenderer::new(100.0, 100.0).render(&mut canvas, &reticle, &[], &[]);
        let DrawCall::Line { from, to, width, .. } = &canvas.calls()[1] else {
            panic!("expected a line");
        };
        assert_eq!(*width, 0.0);
        assert_eq!(*from, dvec2(40.0, 50.0));
        assert_eq!(*to, dvec2(60.0, 50.0));
    }

    #[test]
    fn test_lengths_scale_horizontally() {
        let mut circle = ReticleCircle::new(Position::mil(0.0, 0.0), Measurement::mil(2.0));
        circle.line_width = Some(Measurement::mil(0.1));
        let reticle = scope().with_element(circle);
        let mut canvas = RecordingCanvas::new();
        ReticleRenderer::new(200.0, 100.0).render(&mut canvas, &reticle, &[], &[]);
        let DrawCall::Circle { center, radius, width, .. } = &canvas.calls()[1] else {
            panic!("expected a circle");
        };
        assert_eq!(*center, dvec2(100.0, 50.0));
        assert_eq!(*radius, 20.0);
        assert!((width - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rectangle_extends_down() {
        let reticle = scope().with_element(ReticleRectangle::new(Position::mil(-1.0, 1.0), Position::mil(2.0, 2.0)));
        let mut canvas = RecordingCanvas::new();
        ReticleRenderer::new(100.0, 100.0).render(&mut canvas, &reticle, &[], &[]);
        let DrawCall::Rectangle { corner1, corner2, .. } = &canvas.calls()[1] else {
            panic!("expected a rectangle");
        };
        assert_eq!(*corner1, dvec2(40.0, 40.0));
        assert_eq!(*corner2, dvec2(60.0, 60.0));
    }

    #[test]
    fn test_text_height_in_pixels() {
        let mut text = ReticleText::new(Position::mil(1.0, -1.0), Measurement::mil(0.5), "2");
        text.anchor = TextAnchor::Center;
        let reticle = scope().with_element(text);
        let mut canvas = RecordingCanvas::new();
        ReticleRenderer::new(100.0, 100.0).render(&mut canvas, &reticle, &[], &[]);
        assert_eq!(
            canvas.calls()[1],
            DrawCall::Text {
                at: dvec2(60.0, 60.0),
                height: 5.0,
                text: "2".into(),
                color: "black".into(),
                anchor: TextAnchor::Center,
            }
        );
    }

    #[test]
    fn test_path_without_move_starts_at_canvas_origin() {
        let path = ReticlePath::new().line_to(Position::mil(0.0, 0.0));
        let reticle = scope().with_element(path);
        let mut canvas = RecordingCanvas::new();
        ReticleRenderer::new(100.0, 100.0).render(&mut canvas, &reticle, &[], &[]);
        let DrawCall::Path { commands, .. } = &canvas.calls()[1] else {
            panic!("expected a path");
        };
        assert_eq!(
            commands.as_slice(),
            &[PathCommand::MoveTo(DVec2::ZERO), PathCommand::LineTo(dvec2(50.0, 50.0))]
        );
    }
}
