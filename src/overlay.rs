//! Ready-made overlay elements
//!
//! Builders for the marks drawn over a reticle that are not part of its
//! design: a cross at the middle of the extent and markers for externally
//! computed trajectory points. Pass the results as the `overlay` argument of
//! [`ReticleRenderer::render`](crate::render::ReticleRenderer::render).

use crate::reticle::{ReticleCircle, ReticleDefinition, ReticleElement, ReticleLine, ReticleText};
use crate::render::defaults;
use crate::types::{Measurement, Position};

/// Fraction of the reticle width a center mark spans by default.
const CENTER_MARK_RATIO: f64 = 1.0 / 10.0;

/// One point of a trajectory, already converted to an angular offset.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryPoint {
    pub position: Position,
    /// Usually the range, e.g. `"300"`.
    pub label: Option<String>,
}

impl TrajectoryPoint {
    pub fn new(position: Position) -> Self {
        Self { position, label: None }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A horizontal and a vertical line crossing at the middle of the extent.
///
/// `length` defaults to a tenth of the reticle width. Returns nothing when
/// the reticle has no size.
pub fn center_marks(reticle: &ReticleDefinition, length: Option<Measurement>, color: &str) -> Vec<ReticleElement> {
    let (Some(center), Some(size)) = (reticle.center(), reticle.size) else {
        return Vec::new();
    };
    let half = length.unwrap_or(size.x * CENTER_MARK_RATIO) / 2.0;

    let mut horizontal = ReticleLine::new(
        Position::new(center.x - half, center.y),
        Position::new(center.x + half, center.y),
    );
    horizontal.color = color.to_string();
    let mut vertical = ReticleLine::new(
        Position::new(center.x, center.y - half),
        Position::new(center.x, center.y + half),
    );
    vertical.color = color.to_string();

    vec![horizontal.into(), vertical.into()]
}

/// A hollow circle per trajectory point, plus its label to the right when
/// it has one. Markers are sized like BDC markers.
///
/// Returns nothing when the reticle has no size.
pub fn trajectory_markers(reticle: &ReticleDefinition, points: &[TrajectoryPoint], color: &str) -> Vec<ReticleElement> {
    let Some(size) = reticle.size else {
        return Vec::new();
    };
    let radius = size.x * defaults::BDC_MARKER_RATIO;

    let mut elements = Vec::with_capacity(points.len() * 2);
    for point in points {
        let mut marker = ReticleCircle::new(point.position, radius);
        marker.color = color.to_string();
        elements.push(marker.into());

        if let Some(label) = &point.label {
            let at = Position::new(point.position.x + radius * 2.0, point.position.y - radius);
            let mut text = ReticleText::new(at, radius * 2.0, label.clone());
            text.color = color.to_string();
            elements.push(text.into());
        }
    }
    elements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reticle::Element;
    use crate::types::AngularUnit;

    fn scope() -> ReticleDefinition {
        ReticleDefinition::new("scope")
            .with_size(Position::mil(20.0, 10.0))
            .with_zero(Position::mil(10.0, 5.0))
    }

    #[test]
    fn test_center_marks_cross_at_center() {
        let marks = center_marks(&scope(), Some(Measurement::mil(4.0)), "red");
        assert_eq!(marks.len(), 2);
        let ReticleElement::Line(h) = &marks[0] else {
            panic!("expected a line");
        };
        assert_eq!(h.start, Position::mil(-2.0, 0.0));
        assert_eq!(h.end, Position::mil(2.0, 0.0));
        let ReticleElement::Line(v) = &marks[1] else {
            panic!("expected a line");
        };
        assert_eq!(v.start, Position::mil(0.0, -2.0));
        assert_eq!(v.end, Position::mil(0.0, 2.0));
        assert!(marks.iter().all(|m| m.color() == "red"));
    }

    #[test]
    fn test_center_marks_follow_off_center_zero() {
        let reticle = scope().with_zero(Position::mil(10.0, 2.0));
        let marks = center_marks(&reticle, None, "black");
        let ReticleElement::Line(h) = &marks[0] else {
            panic!("expected a line");
        };
        assert_eq!(h.start.y, Measurement::mil(-3.0));
        assert_eq!(h.start.x, Measurement::mil(-1.0));
    }

    #[test]
    fn test_center_marks_need_size() {
        assert!(center_marks(&ReticleDefinition::new("blank"), None, "black").is_empty());
    }

    #[test]
    fn test_trajectory_markers() {
        let points = [
            TrajectoryPoint::new(Position::mil(0.0, 0.0)),
            TrajectoryPoint::new(Position::mil(0.0, -1.5)).with_label("300"),
        ];
        let elements = trajectory_markers(&scope(), &points, "green");
        let kinds: Vec<&str> = elements.iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, ["circle", "circle", "text"]);

        let ReticleElement::Text(label) = &elements[2] else {
            panic!("expected a label");
        };
        assert_eq!(label.text, "300");
        assert_eq!(label.text_height.unit(), AngularUnit::Mil);
        assert!((label.text_height.value() - 0.8).abs() < 1e-12);
        assert!((label.position.x.value() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_trajectory_markers_need_size() {
        let points = [TrajectoryPoint::new(Position::mil(0.0, 0.0))];
        assert!(trajectory_markers(&ReticleDefinition::new("blank"), &points, "green").is_empty());
    }
}
