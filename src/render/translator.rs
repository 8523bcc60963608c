//! Angular to pixel mapping.
//!
//! The reticle extent is fitted into the canvas bounds without distortion:
//! the limiting dimension fills the canvas and the other is centered
//! (letterboxing). Angular Y grows upward and pixel Y grows downward.
//!
//! All angular values are normalized to the unit of the reticle size's X
//! axis before any arithmetic.

use glam::{DVec2, dvec2};

use crate::reticle::ReticleDefinition;
use crate::types::{AngularUnit, Measurement, Position};

/// The drawing rectangle inside the canvas bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    /// Top-left corner of the drawing rectangle.
    pub offset: DVec2,
    /// Width and height of the drawing rectangle.
    pub size: DVec2,
}

impl Letterbox {
    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, pixel: DVec2) -> bool {
        let rel = pixel - self.offset;
        rel.x >= 0.0 && rel.y >= 0.0 && rel.x < self.size.x && rel.y < self.size.y
    }
}

/// Mapping between a reticle's angular space and canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTranslator {
    unit: AngularUnit,
    letterbox: Letterbox,
    /// Pixels per angular unit on each axis.
    scale: DVec2,
    /// Zero offset in `unit`.
    zero: DVec2,
}

impl CoordinateTranslator {
    /// Build the mapping for a canvas of `bounds_w` by `bounds_h` pixels.
    ///
    /// Returns `None` when there is nothing to map onto: an absent size, a
    /// size with a zero component, non-positive bounds, or any non-finite
    /// input.
    pub fn new(bounds_w: f64, bounds_h: f64, size: Option<Position>, zero: Option<Position>) -> Option<Self> {
        let size = size?;
        let unit = size.x.unit();
        let (sx, sy) = size.in_unit(unit);
        let (zx, zy) = zero.map_or((0.0, 0.0), |z| z.in_unit(unit));

        let finite = [bounds_w, bounds_h, sx, sy, zx, zy].iter().all(|v| v.is_finite());
        if !finite || sx == 0.0 || sy == 0.0 || bounds_w <= 0.0 || bounds_h <= 0.0 {
            crate::log::trace!(bounds_w, bounds_h, "no usable reticle size, nothing to map");
            return None;
        }

        let aspect = sx / sy;
        let image = if bounds_h * aspect > bounds_w {
            dvec2(bounds_w, bounds_w / aspect)
        } else {
            dvec2(bounds_h * aspect, bounds_h)
        };
        let offset = (dvec2(bounds_w, bounds_h) - image) / 2.0;

        Some(Self {
            unit,
            letterbox: Letterbox { offset, size: image },
            scale: image / dvec2(sx, sy),
            zero: dvec2(zx, zy),
        })
    }

    /// Mapping for `reticle` drawn into a canvas of `bounds` pixels.
    pub fn for_reticle(bounds: DVec2, reticle: &ReticleDefinition) -> Option<Self> {
        Self::new(bounds.x, bounds.y, reticle.size, reticle.zero)
    }

    /// The unit angular values are normalized to.
    pub fn unit(&self) -> AngularUnit {
        self.unit
    }

    pub fn letterbox(&self) -> Letterbox {
        self.letterbox
    }

    /// Pixels per angular unit on each axis.
    pub fn scale(&self) -> DVec2 {
        self.scale
    }

    /// Forward transform: angular position to pixel.
    pub fn to_pixel(&self, position: Position) -> DVec2 {
        let (ax, ay) = position.in_unit(self.unit);
        dvec2(
            (ax + self.zero.x) * self.scale.x + self.letterbox.offset.x,
            (self.zero.y - ay) * self.scale.y + self.letterbox.offset.y,
        )
    }

    /// An angular length in pixels, on the horizontal scale.
    pub fn length(&self, length: Measurement) -> f64 {
        length.in_unit(self.unit) * self.scale.x
    }

    /// Inverse transform: pixel to angular position, or `None` outside the
    /// drawing rectangle.
    pub fn to_angular(&self, pixel: DVec2) -> Option<Position> {
        if !self.letterbox.contains(pixel) {
            return None;
        }
        let rel = pixel - self.letterbox.offset;
        Some(Position::of(
            rel.x / self.scale.x - self.zero.x,
            self.zero.y - rel.y / self.scale.y,
            self.unit,
        ))
    }
}

/// One-shot forward transform for `reticle` on a canvas of `bounds` pixels.
pub fn angular_to_pixel(bounds: DVec2, reticle: &ReticleDefinition, position: Position) -> Option<DVec2> {
    CoordinateTranslator::for_reticle(bounds, reticle).map(|t| t.to_pixel(position))
}

/// One-shot inverse transform for `reticle` on a canvas of `bounds` pixels.
pub fn pixel_to_angular(bounds: DVec2, reticle: &ReticleDefinition, pixel: DVec2) -> Option<Position> {
    CoordinateTranslator::for_reticle(bounds, reticle)?.to_angular(pixel)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    fn assert_point_eq(actual: DVec2, expected: DVec2) {
        assert!(
            (actual - expected).abs().max_element() < EPSILON,
            "point mismatch: {actual} != {expected}"
        );
    }

    fn mil_size(x: f64, y: f64) -> Option<Position> {
        Some(Position::mil(x, y))
    }

    #[test]
    fn test_letterbox_landscape() {
        let t = CoordinateTranslator::new(200.0, 100.0, mil_size(10.0, 10.0), None).unwrap();
        let lb = t.letterbox();
        assert_eq!(lb.size, dvec2(100.0, 100.0));
        assert_eq!(lb.offset, dvec2(50.0, 0.0));
    }

    #[test]
    fn test_letterbox_portrait() {
        let t = CoordinateTranslator::new(100.0, 300.0, mil_size(10.0, 10.0), None).unwrap();
        let lb = t.letterbox();
        assert_eq!(lb.size, dvec2(100.0, 100.0));
        assert_eq!(lb.offset, dvec2(0.0, 100.0));
    }

    #[test]
    fn test_letterbox_keeps_fractional_size() {
        let t = CoordinateTranslator::new(100.0, 100.0, mil_size(3.0, 1.0), None).unwrap();
        let lb = t.letterbox();
        assert_point_eq(lb.size, dvec2(100.0, 100.0 / 3.0));
        assert_point_eq(lb.offset, dvec2(0.0, (100.0 - 100.0 / 3.0) / 2.0));
    }

    #[test]
    fn test_zero_size_guard() {
        assert!(CoordinateTranslator::new(200.0, 200.0, mil_size(0.0, 10.0), None).is_none());
        assert!(CoordinateTranslator::new(200.0, 200.0, mil_size(10.0, 0.0), None).is_none());
        assert!(CoordinateTranslator::new(200.0, 200.0, None, None).is_none());
    }

    #[test]
    fn test_bad_bounds_guard() {
        assert!(CoordinateTranslator::new(0.0, 200.0, mil_size(10.0, 10.0), None).is_none());
        assert!(CoordinateTranslator::new(200.0, -1.0, mil_size(10.0, 10.0), None).is_none());
        assert!(CoordinateTranslator::new(f64::NAN, 200.0, mil_size(10.0, 10.0), None).is_none());
        assert!(
            CoordinateTranslator::new(200.0, 200.0, mil_size(10.0, 10.0), Some(Position::mil(f64::INFINITY, 0.0)))
                .is_none()
        );
    }

    #[test]
    fn test_forward_scenario() {
        let t = CoordinateTranslator::new(200.0, 200.0, mil_size(10.0, 10.0), Some(Position::mil(0.0, 0.0))).unwrap();
        let scale = 200.0 / 10.0;
        assert_eq!(t.scale(), dvec2(scale, scale));
        let expected = dvec2((2.0 + 0.0) * scale + 0.0, (0.0 - 3.0) * scale + 0.0);
        assert_point_eq(t.to_pixel(Position::mil(2.0, 3.0)), expected);
    }

    #[test]
    fn test_zero_moves_origin() {
        let t = CoordinateTranslator::new(200.0, 200.0, mil_size(10.0, 10.0), Some(Position::mil(5.0, 5.0))).unwrap();
        assert_point_eq(t.to_pixel(Position::mil(0.0, 0.0)), dvec2(100.0, 100.0));
        assert_point_eq(t.to_pixel(Position::mil(-5.0, 5.0)), dvec2(0.0, 0.0));
    }

    #[test]
    fn test_mixed_units_normalize_to_size_x() {
        let size = Position::new(Measurement::mil(10.0), Measurement::mil(10.0).to(AngularUnit::Moa));
        let t = CoordinateTranslator::new(200.0, 200.0, Some(size), None).unwrap();
        assert_eq!(t.unit(), AngularUnit::Mil);
        assert_point_eq(t.scale(), dvec2(20.0, 20.0));
        let p = Position::new(Measurement::mil(1.0).to(AngularUnit::Degree), Measurement::mil(-1.0));
        assert_point_eq(t.to_pixel(p), dvec2(20.0, 20.0));
    }

    #[test]
    fn test_length_uses_horizontal_scale() {
        let t = CoordinateTranslator::new(200.0, 100.0, mil_size(10.0, 10.0), None).unwrap();
        assert!((t.length(Measurement::mil(0.5)) - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_inverse_bounds_are_half_open() {
        let t = CoordinateTranslator::new(200.0, 100.0, mil_size(10.0, 10.0), None).unwrap();
        assert!(t.to_angular(dvec2(50.0, 0.0)).is_some());
        assert!(t.to_angular(dvec2(149.999, 99.999)).is_some());
        assert!(t.to_angular(dvec2(150.0, 50.0)).is_none());
        assert!(t.to_angular(dvec2(100.0, 100.0)).is_none());
        assert!(t.to_angular(dvec2(49.9, 50.0)).is_none());
    }

    #[test]
    fn test_round_trip_pixel() {
        let t = CoordinateTranslator::new(320.0, 180.0, mil_size(16.0, 12.0), Some(Position::mil(8.0, 6.0))).unwrap();
        let lb = t.letterbox();
        for i in 0..10 {
            for j in 0..10 {
                let px = lb.offset + lb.size * dvec2(i as f64 + 0.5, j as f64 + 0.5) / 10.0;
                let angular = t.to_angular(px).unwrap();
                assert_point_eq(t.to_pixel(angular), px);
            }
        }
    }

    #[test]
    fn test_round_trip_angular() {
        let t = CoordinateTranslator::new(300.0, 300.0, mil_size(20.0, 10.0), Some(Position::mil(10.0, 5.0))).unwrap();
        for (x, y) in [(0.0, 0.0), (-9.5, 4.5), (9.0, -4.0), (3.25, 1.5)] {
            let pixel = t.to_pixel(Position::mil(x, y));
            let back = t.to_angular(pixel).unwrap();
            let (bx, by) = back.in_unit(AngularUnit::Mil);
            assert!((bx - x).abs() < EPSILON && (by - y).abs() < EPSILON);
        }
    }

    #[test]
    fn test_one_shot_helpers() {
        let reticle = ReticleDefinition::new("r").with_size(Position::mil(10.0, 10.0));
        let bounds = dvec2(200.0, 200.0);
        let pixel = angular_to_pixel(bounds, &reticle, Position::mil(1.0, -1.0)).unwrap();
        assert_point_eq(pixel, dvec2(20.0, 20.0));
        let back = pixel_to_angular(bounds, &reticle, pixel).unwrap();
        assert_point_eq(dvec2(back.x.value(), back.y.value()), dvec2(1.0, -1.0));

        let empty = ReticleDefinition::new("empty");
        assert!(angular_to_pixel(bounds, &empty, Position::mil(0.0, 0.0)).is_none());
        assert!(pixel_to_angular(bounds, &empty, dvec2(10.0, 10.0)).is_none());
    }
}
