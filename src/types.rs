//! Angular measurement primitives.
//!
//! Every piece of reticle geometry is a [`Measurement`]: a magnitude tagged
//! with the [`AngularUnit`] it was authored in. Values are converted through a
//! fixed factor table to radians and back, so mixing units is always explicit.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
        }
    }
}

impl std::error::Error for NumericError {}

/// A unit of angular measure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum AngularUnit {
    Radian,
    Degree,
    /// Minute of angle, 1/60 of a degree.
    Moa,
    /// NATO mil, 1/6400 of a circle.
    #[default]
    Mil,
    MilliRadian,
    /// 1/6000 of a circle.
    Thousand,
    InchesPer100Yards,
    CmPer100Meters,
}

impl AngularUnit {
    pub const ALL: [AngularUnit; 8] = [
        AngularUnit::Radian,
        AngularUnit::Degree,
        AngularUnit::Moa,
        AngularUnit::Mil,
        AngularUnit::MilliRadian,
        AngularUnit::Thousand,
        AngularUnit::InchesPer100Yards,
        AngularUnit::CmPer100Meters,
    ];

    /// Radians per one of this unit.
    pub fn radians(self) -> f64 {
        use std::f64::consts::PI;
        match self {
            AngularUnit::Radian => 1.0,
            AngularUnit::Degree => PI / 180.0,
            AngularUnit::Moa => PI / 10_800.0,
            AngularUnit::Mil => PI / 3_200.0,
            AngularUnit::MilliRadian => 0.001,
            AngularUnit::Thousand => PI / 3_000.0,
            AngularUnit::InchesPer100Yards => 1.0 / 3_600.0,
            AngularUnit::CmPer100Meters => 1.0 / 10_000.0,
        }
    }

    /// Short symbol used when formatting and parsing.
    pub fn symbol(self) -> &'static str {
        match self {
            AngularUnit::Radian => "rad",
            AngularUnit::Degree => "deg",
            AngularUnit::Moa => "moa",
            AngularUnit::Mil => "mil",
            AngularUnit::MilliRadian => "mrad",
            AngularUnit::Thousand => "ths",
            AngularUnit::InchesPer100Yards => "in/100yd",
            AngularUnit::CmPer100Meters => "cm/100m",
        }
    }

    /// Look up a unit by symbol, ignoring case.
    pub fn from_symbol(symbol: &str) -> Option<AngularUnit> {
        let symbol = symbol.trim().to_ascii_lowercase();
        match symbol.as_str() {
            "°" | "deg" => return Some(AngularUnit::Degree),
            "'" => return Some(AngularUnit::Moa),
            _ => {}
        }
        AngularUnit::ALL.into_iter().find(|unit| unit.symbol() == symbol)
    }

    /// Convert a raw value between two units.
    pub fn convert(value: f64, from: AngularUnit, to: AngularUnit) -> f64 {
        if from == to {
            value
        } else {
            value * from.radians() / to.radians()
        }
    }
}

impl fmt::Display for AngularUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// An angular magnitude tagged with its unit.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Measurement {
    value: f64,
    unit: AngularUnit,
}

impl Measurement {
    /// Create a measurement (unchecked).
    /// Use `try_new` for user-provided values.
    #[inline]
    pub const fn new(value: f64, unit: AngularUnit) -> Self {
        Measurement { value, unit }
    }

    /// Create a measurement with validation (rejects NaN/infinite)
    pub fn try_new(value: f64, unit: AngularUnit) -> Result<Self, NumericError> {
        if value.is_nan() {
            Err(NumericError::NaN)
        } else if value.is_infinite() {
            Err(NumericError::Infinite)
        } else {
            Ok(Measurement { value, unit })
        }
    }

    pub const fn mil(value: f64) -> Self {
        Measurement::new(value, AngularUnit::Mil)
    }

    pub const fn moa(value: f64) -> Self {
        Measurement::new(value, AngularUnit::Moa)
    }

    pub const fn zero(unit: AngularUnit) -> Self {
        Measurement::new(0.0, unit)
    }

    /// The magnitude in the unit this measurement was created with.
    #[inline]
    pub fn value(self) -> f64 {
        self.value
    }

    #[inline]
    pub fn unit(self) -> AngularUnit {
        self.unit
    }

    /// The magnitude expressed in `unit`.
    #[inline]
    pub fn in_unit(self, unit: AngularUnit) -> f64 {
        AngularUnit::convert(self.value, self.unit, unit)
    }

    /// The same angle re-tagged in `unit`.
    pub fn to(self, unit: AngularUnit) -> Measurement {
        Measurement::new(self.in_unit(unit), unit)
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.value == 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.value.is_finite()
    }

    pub fn abs(self) -> Measurement {
        Measurement::new(self.value.abs(), self.unit)
    }

    pub fn min(self, other: Measurement) -> Measurement {
        if other.in_unit(self.unit) < self.value {
            other.to(self.unit)
        } else {
            self
        }
    }

    pub fn max(self, other: Measurement) -> Measurement {
        if other.in_unit(self.unit) > self.value {
            other.to(self.unit)
        } else {
            self
        }
    }
}

impl Add for Measurement {
    type Output = Measurement;
    fn add(self, rhs: Measurement) -> Measurement {
        Measurement::new(self.value + rhs.in_unit(self.unit), self.unit)
    }
}

impl Sub for Measurement {
    type Output = Measurement;
    fn sub(self, rhs: Measurement) -> Measurement {
        Measurement::new(self.value - rhs.in_unit(self.unit), self.unit)
    }
}

impl Mul<f64> for Measurement {
    type Output = Measurement;
    fn mul(self, rhs: f64) -> Measurement {
        Measurement::new(self.value * rhs, self.unit)
    }
}

impl Div<f64> for Measurement {
    type Output = Measurement;
    fn div(self, rhs: f64) -> Measurement {
        Measurement::new(self.value / rhs, self.unit)
    }
}

impl Neg for Measurement {
    type Output = Measurement;
    fn neg(self) -> Measurement {
        Measurement::new(-self.value, self.unit)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*}{}", p, self.value, self.unit),
            None => write!(f, "{}{}", self.value, self.unit),
        }
    }
}

/// A point in angular space. The two axes may carry different units.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Position {
    pub x: Measurement,
    pub y: Measurement,
}

impl Position {
    pub const fn new(x: Measurement, y: Measurement) -> Self {
        Position { x, y }
    }

    /// Both components in the same unit.
    pub const fn of(x: f64, y: f64, unit: AngularUnit) -> Self {
        Position {
            x: Measurement::new(x, unit),
            y: Measurement::new(y, unit),
        }
    }

    pub const fn mil(x: f64, y: f64) -> Self {
        Position::of(x, y, AngularUnit::Mil)
    }

    pub const fn moa(x: f64, y: f64) -> Self {
        Position::of(x, y, AngularUnit::Moa)
    }

    pub fn zero(unit: AngularUnit) -> Self {
        Position::of(0.0, 0.0, unit)
    }

    /// Both components as raw values in `unit`.
    pub fn in_unit(self, unit: AngularUnit) -> (f64, f64) {
        (self.x.in_unit(unit), self.y.in_unit(unit))
    }

    pub fn to(self, unit: AngularUnit) -> Position {
        Position::new(self.x.to(unit), self.y.to(unit))
    }

    /// True when either component is zero (an unusable reticle size).
    pub fn has_zero_component(self) -> bool {
        self.x.is_zero() || self.y.is_zero()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "({:.*}, {:.*})", p, self.x, p, self.y),
            None => write!(f, "({}, {})", self.x, self.y),
        }
    }
}

/// Axis-aligned box in angular space, stored as raw values in one unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngularBox {
    pub unit: AngularUnit,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl AngularBox {
    /// Create an empty box (will expand on first point)
    pub fn new(unit: AngularUnit) -> Self {
        AngularBox {
            unit,
            min_x: f64::MAX,
            min_y: f64::MAX,
            max_x: f64::MIN,
            max_y: f64::MIN,
        }
    }

    /// Check if the box is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: Position) {
        let (x, y) = p.in_unit(self.unit);
        self.expand_raw(x, y);
    }

    pub(crate) fn expand_raw(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Expand to include a circle given by center and radius
    pub fn expand_circle(&mut self, center: Position, radius: Measurement) {
        let (cx, cy) = center.in_unit(self.unit);
        let r = radius.in_unit(self.unit).abs();
        self.expand_raw(cx - r, cy - r);
        self.expand_raw(cx + r, cy + r);
    }

    /// Inflate every side by `amount`
    pub fn inflate(&mut self, amount: Measurement) {
        if self.is_empty() {
            return;
        }
        let d = amount.in_unit(self.unit).abs();
        self.min_x -= d;
        self.min_y -= d;
        self.max_x += d;
        self.max_y += d;
    }

    /// Inclusive containment test
    pub fn contains(&self, p: Position) -> bool {
        if self.is_empty() {
            return false;
        }
        let (x, y) = p.in_unit(self.unit);
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    pub fn width(&self) -> Measurement {
        Measurement::new(self.max_x - self.min_x, self.unit)
    }

    pub fn height(&self) -> Measurement {
        Measurement::new(self.max_y - self.min_y, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    // ==================== AngularUnit tests ====================

    #[test]
    fn unit_convert_identity() {
        for unit in AngularUnit::ALL {
            assert_eq!(AngularUnit::convert(1.25, unit, unit), 1.25);
        }
    }

    #[test]
    fn unit_convert_degree_to_moa() {
        assert!(approx(AngularUnit::convert(1.0, AngularUnit::Degree, AngularUnit::Moa), 60.0));
    }

    #[test]
    fn unit_convert_circle_in_mils() {
        let mils = AngularUnit::convert(360.0, AngularUnit::Degree, AngularUnit::Mil);
        assert!(approx(mils, 6400.0));
        let thousands = AngularUnit::convert(360.0, AngularUnit::Degree, AngularUnit::Thousand);
        assert!(approx(thousands, 6000.0));
    }

    #[test]
    fn unit_convert_mrad_to_cm_per_100m() {
        let cm = AngularUnit::convert(1.0, AngularUnit::MilliRadian, AngularUnit::CmPer100Meters);
        assert!(approx(cm, 10.0));
    }

    #[test]
    fn unit_convert_round_trips() {
        for from in AngularUnit::ALL {
            for to in AngularUnit::ALL {
                let there = AngularUnit::convert(3.5, from, to);
                let back = AngularUnit::convert(there, to, from);
                assert!(approx(back, 3.5), "{from} -> {to} -> {from} gave {back}");
            }
        }
    }

    #[test]
    fn unit_symbol_lookup_is_case_insensitive() {
        assert_eq!(AngularUnit::from_symbol("MIL"), Some(AngularUnit::Mil));
        assert_eq!(AngularUnit::from_symbol("Moa"), Some(AngularUnit::Moa));
        assert_eq!(AngularUnit::from_symbol("IN/100YD"), Some(AngularUnit::InchesPer100Yards));
        assert_eq!(AngularUnit::from_symbol("°"), Some(AngularUnit::Degree));
        assert_eq!(AngularUnit::from_symbol("furlong"), None);
    }

    #[test]
    fn unit_symbols_round_trip() {
        for unit in AngularUnit::ALL {
            assert_eq!(AngularUnit::from_symbol(unit.symbol()), Some(unit));
        }
    }

    // ==================== Measurement tests ====================

    #[test]
    fn measurement_try_new_rejects_nan() {
        assert_eq!(Measurement::try_new(f64::NAN, AngularUnit::Mil), Err(NumericError::NaN));
    }

    #[test]
    fn measurement_try_new_rejects_infinity() {
        assert_eq!(
            Measurement::try_new(f64::NEG_INFINITY, AngularUnit::Moa),
            Err(NumericError::Infinite)
        );
    }

    #[test]
    fn measurement_arithmetic_keeps_lhs_unit() {
        let a = Measurement::moa(60.0);
        let b = Measurement::new(1.0, AngularUnit::Degree);
        let sum = a + b;
        assert_eq!(sum.unit(), AngularUnit::Moa);
        assert!(approx(sum.value(), 120.0));
        assert!(approx((a - b).value(), 0.0));
        assert_eq!(a * 2.0, Measurement::moa(120.0));
        assert_eq!(a / 4.0, Measurement::moa(15.0));
        assert_eq!(-a, Measurement::moa(-60.0));
    }

    #[test]
    fn measurement_to_other_unit() {
        let m = Measurement::new(1.0, AngularUnit::MilliRadian).to(AngularUnit::CmPer100Meters);
        assert_eq!(m.unit(), AngularUnit::CmPer100Meters);
        assert!(approx(m.value(), 10.0));
    }

    #[test]
    fn measurement_min_max_across_units() {
        let a = Measurement::moa(30.0);
        let b = Measurement::new(1.0, AngularUnit::Degree);
        assert_eq!(a.min(b), a);
        assert!(approx(a.max(b).value(), 60.0));
        assert_eq!(a.max(b).unit(), AngularUnit::Moa);
    }

    #[test]
    fn measurement_display() {
        assert_eq!(Measurement::mil(2.5).to_string(), "2.5mil");
        assert_eq!(format!("{:.3}", Measurement::moa(1.0)), "1.000moa");
    }

    // ==================== Position tests ====================

    #[test]
    fn position_in_mixed_units() {
        let p = Position::new(Measurement::moa(60.0), Measurement::new(1.0, AngularUnit::Degree));
        let (x, y) = p.in_unit(AngularUnit::Degree);
        assert!(approx(x, 1.0));
        assert!(approx(y, 1.0));
    }

    #[test]
    fn position_moa_constructor() {
        let p = Position::moa(1.0, -2.0);
        assert_eq!(p, Position::new(Measurement::moa(1.0), Measurement::moa(-2.0)));
        assert_eq!(p.x.unit(), AngularUnit::Moa);
    }

    #[test]
    fn position_zero_component() {
        assert!(Position::mil(0.0, 5.0).has_zero_component());
        assert!(Position::mil(5.0, 0.0).has_zero_component());
        assert!(!Position::mil(5.0, 5.0).has_zero_component());
    }

    // ==================== AngularBox tests ====================

    #[test]
    fn box_new_is_empty() {
        let b = AngularBox::new(AngularUnit::Mil);
        assert!(b.is_empty());
        assert!(!b.contains(Position::mil(0.0, 0.0)));
    }

    #[test]
    fn box_expand_and_contains() {
        let mut b = AngularBox::new(AngularUnit::Mil);
        b.expand_point(Position::mil(-1.0, 2.0));
        b.expand_point(Position::mil(3.0, -4.0));
        assert!(b.contains(Position::mil(0.0, 0.0)));
        assert!(b.contains(Position::mil(3.0, 2.0)));
        assert!(!b.contains(Position::mil(3.1, 0.0)));
        assert_eq!(b.width(), Measurement::mil(4.0));
        assert_eq!(b.height(), Measurement::mil(6.0));
    }

    #[test]
    fn box_expand_circle() {
        let mut b = AngularBox::new(AngularUnit::Mil);
        b.expand_circle(Position::mil(1.0, 1.0), Measurement::mil(2.0));
        assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (-1.0, -1.0, 3.0, 3.0));
    }

    #[test]
    fn box_inflate_leaves_empty_box_alone() {
        let mut b = AngularBox::new(AngularUnit::Mil);
        b.inflate(Measurement::mil(1.0));
        assert!(b.is_empty());

        b.expand_point(Position::mil(0.0, 0.0));
        b.inflate(Measurement::mil(0.5));
        assert!(b.contains(Position::mil(0.5, -0.5)));
    }
}
