//! Endpoint-to-center arc conversion.
//!
//! Reticle paths describe arcs the SVG way: a radius, the two endpoints, and
//! the large-arc and sweep flags. Raster backends want the center form
//! instead: the oval's bounding rectangle, a start angle and a signed sweep.
//! Angles are in degrees, measured in pixel space (Y down), so a positive
//! extent turns clockwise on screen.

use glam::{DVec2, dvec2};

/// An arc in center form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterArc {
    /// Horizontal and vertical radii, after any scale-up needed to reach the
    /// endpoint.
    pub radii: DVec2,
    pub center: DVec2,
    /// Angle of the start point, in degrees within (-360, 360).
    pub start_angle: f64,
    /// Signed sweep in degrees. Positive turns clockwise on screen.
    pub extent: f64,
}

impl CenterArc {
    /// Top-left and bottom-right corners of the oval the arc lies on.
    pub fn oval(&self) -> (DVec2, DVec2) {
        (self.center - self.radii, self.center + self.radii)
    }

    /// Point on the oval at `angle` degrees.
    pub fn point_at(&self, angle: f64) -> DVec2 {
        let a = angle.to_radians();
        self.center + self.radii * dvec2(a.cos(), a.sin())
    }

    pub fn start_point(&self) -> DVec2 {
        self.point_at(self.start_angle)
    }

    pub fn end_point(&self) -> DVec2 {
        self.point_at(self.start_angle + self.extent)
    }
}

/// Sign used for the arc math: zero counts as positive.
fn sign(v: f64) -> f64 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

/// Angle between two vectors in degrees, clamped against rounding.
fn angle_between(u: DVec2, v: DVec2) -> f64 {
    let denom = u.length() * v.length();
    if denom == 0.0 {
        return 0.0;
    }
    (u.dot(v) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Convert an SVG endpoint arc with rotation 0 to center form.
///
/// Radii too small to span the endpoints are scaled up uniformly until they
/// do, which puts the center on the chord midpoint.
pub fn center_arc(r: f64, start: DVec2, end: DVec2, large_arc: bool, clockwise: bool) -> CenterArc {
    let mut rx = r.abs();
    let mut ry = r.abs();

    let half = (start - end) / 2.0;
    let (dx2, dy2) = (half.x, half.y);

    if rx > 0.0 {
        let ratio = (dx2 * dx2) / (rx * rx) + (dy2 * dy2) / (ry * ry);
        if ratio > 1.0 {
            let k = ratio.sqrt();
            rx *= k;
            ry *= k;
        }
    }

    let (prx, pry) = (rx * rx, ry * ry);
    let (px, py) = (dx2 * dx2, dy2 * dy2);

    let arc_sign = if large_arc == clockwise { -1.0 } else { 1.0 };
    let denom = prx * py + pry * px;
    let radicand = if denom == 0.0 {
        0.0
    } else {
        ((prx * pry - prx * py - pry * px) / denom).max(0.0)
    };
    let coef = arc_sign * radicand.sqrt();

    let offset = if rx == 0.0 || ry == 0.0 {
        DVec2::ZERO
    } else {
        dvec2(coef * (rx * dy2 / ry), coef * -(ry * dx2 / rx))
    };
    let center = (start + end) / 2.0 + offset;

    let u = dvec2(dx2 - offset.x, dy2 - offset.y);
    let v = dvec2(-dx2 - offset.x, -dy2 - offset.y);

    let start_angle = if u.length() == 0.0 {
        0.0
    } else {
        sign(u.y) * (u.x / u.length()).clamp(-1.0, 1.0).acos().to_degrees()
    };

    let mut extent = sign(u.perp_dot(v)) * angle_between(u, v);
    if !clockwise && extent > 0.0 {
        extent -= 360.0;
    } else if clockwise && extent < 0.0 {
        extent += 360.0;
    }

    CenterArc {
        radii: dvec2(rx, ry),
        center,
        start_angle: start_angle % 360.0,
        extent: extent % 360.0,
    }
}
