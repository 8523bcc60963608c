//! Color names and stroke policy shared by every backend.

use std::fmt;

use super::defaults;

/// An sRGB color with straight alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 0xff }
    }

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a }
    }

    pub fn is_opaque(self) -> bool {
        self.a == 0xff
    }

    /// Alpha as a fraction in `[0, 1]`.
    pub fn opacity(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// Resolve a palette name or hex string. Never fails: empty, unknown and
    /// malformed values resolve to black.
    pub fn resolve(name: &str) -> Color {
        let name = name.trim();
        if name.is_empty() {
            return Color::BLACK;
        }
        let lower = name.to_ascii_lowercase();
        named(&lower).or_else(|| parse_hex(&lower)).unwrap_or_else(|| {
            crate::log::trace!(color = name, "unknown color, using black");
            Color::BLACK
        })
    }
}

impl fmt::Display for Color {
    /// `#rrggbb`; alpha is carried separately as an opacity.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn named(name: &str) -> Option<Color> {
    let c = match name {
        "black" => Color::BLACK,
        "blue" => Color::rgb(0x00, 0x00, 0xff),
        "brown" => Color::rgb(0xa5, 0x2a, 0x2a),
        "cyan" | "aqua" => Color::rgb(0x00, 0xff, 0xff),
        "darkblue" => Color::rgb(0x00, 0x00, 0x8b),
        "darkcyan" => Color::rgb(0x00, 0x8b, 0x8b),
        "darkgray" => Color::rgb(0xa9, 0xa9, 0xa9),
        "darkgreen" => Color::rgb(0x00, 0x64, 0x00),
        "darkmagenta" => Color::rgb(0x8b, 0x00, 0x8b),
        "darkorange" => Color::rgb(0xff, 0x8c, 0x00),
        "darkred" => Color::rgb(0x8b, 0x00, 0x00),
        "darkviolet" => Color::rgb(0x94, 0x00, 0xd3),
        "gold" => Color::rgb(0xff, 0xd7, 0x00),
        "goldenrod" => Color::rgb(0xda, 0xa5, 0x20),
        "gray" | "grey" => Color::rgb(0x80, 0x80, 0x80),
        "green" => Color::rgb(0x00, 0x80, 0x00),
        "greenyellow" => Color::rgb(0xad, 0xff, 0x2f),
        "indigo" => Color::rgb(0x4b, 0x00, 0x82),
        "lightgray" => Color::rgb(0xd3, 0xd3, 0xd3),
        "lime" => Color::rgb(0x00, 0xff, 0x00),
        "magenta" | "fuchsia" => Color::rgb(0xff, 0x00, 0xff),
        "maroon" => Color::rgb(0x80, 0x00, 0x00),
        "mediumblue" => Color::rgb(0x00, 0x00, 0xcd),
        "mediumpurple" => Color::rgb(0x93, 0x70, 0xdb),
        "navy" => Color::rgb(0x00, 0x00, 0x80),
        "olive" => Color::rgb(0x80, 0x80, 0x00),
        "orange" => Color::rgb(0xff, 0xa5, 0x00),
        "pink" => Color::rgb(0xff, 0xc0, 0xcb),
        "purple" => Color::rgb(0x80, 0x00, 0x80),
        "red" => Color::rgb(0xff, 0x00, 0x00),
        "silver" => Color::rgb(0xc0, 0xc0, 0xc0),
        "teal" => Color::rgb(0x00, 0x80, 0x80),
        "violet" => Color::rgb(0xee, 0x82, 0xee),
        "white" => Color::WHITE,
        "yellow" => Color::rgb(0xff, 0xff, 0x00),
        _ => return None,
    };
    Some(c)
}

/// `#rgb`, `#argb`, `#rrggbb` or `#aarrggbb`, with the `#` optional.
fn parse_hex(s: &str) -> Option<Color> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&digits[i..=i], 16).ok();
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    match digits.len() {
        3 => Some(Color::rgb(nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17)),
        4 => Some(Color::argb(
            nibble(0)? * 17,
            nibble(1)? * 17,
            nibble(2)? * 17,
            nibble(3)? * 17,
        )),
        6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color::argb(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

/// Device stroke width for a requested pixel width: below the threshold it
/// becomes the minimum stroke, otherwise it rounds to a whole unit (ties to
/// even). The result is never below the minimum stroke, so a half-pixel line
/// stays visible.
pub fn stroke_width(width: f64) -> f64 {
    if width.is_nan() || width < defaults::MIN_STROKE_THRESHOLD {
        defaults::MIN_STROKE_WIDTH
    } else {
        width.round_ties_even().max(defaults::MIN_STROKE_WIDTH)
    }
}

/// Device font size for a requested text height, on the same policy as
/// [`stroke_width`].
pub fn font_size(height: f64) -> f64 {
    if height.is_nan() || height < defaults::MIN_FONT_THRESHOLD {
        defaults::MIN_FONT_SIZE
    } else {
        height.round_ties_even().max(defaults::MIN_FONT_SIZE)
    }
}
