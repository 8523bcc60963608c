//! In-memory canvas that records every call.
//!
//! Used as a headless backend and as the test double for the renderer. The
//! `Display` form of a [`DrawCall`] rounds to two decimals and prints one
//! call per line, which keeps snapshot tests readable.

use std::fmt;

use glam::DVec2;

use super::canvas::{Canvas, TextAnchor};
use super::format_number as num;
use super::path_builder::{PathBuilder, PathCommand, PathCommands};

/// One recorded canvas call. Colors and widths are kept exactly as given.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Circle {
        center: DVec2,
        radius: f64,
        width: f64,
        fill: bool,
        color: String,
    },
    Line {
        from: DVec2,
        to: DVec2,
        width: f64,
        color: String,
    },
    Rectangle {
        corner1: DVec2,
        corner2: DVec2,
        width: f64,
        fill: bool,
        color: String,
    },
    Text {
        at: DVec2,
        height: f64,
        text: String,
        color: String,
        anchor: TextAnchor,
    },
    Path {
        commands: PathCommands,
        width: f64,
        fill: bool,
        color: String,
    },
}

fn pt(p: DVec2) -> String {
    format!("({}, {})", num(p.x), num(p.y))
}

fn style(fill: bool) -> &'static str {
    if fill { "fill" } else { "stroke" }
}

impl fmt::Display for DrawCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCall::Clear => write!(f, "clear"),
            DrawCall::Circle {
                center,
                radius,
                width,
                fill,
                color,
            } => write!(
                f,
                "circle {} r={} w={} {} {color}",
                pt(*center),
                num(*radius),
                num(*width),
                style(*fill)
            ),
            DrawCall::Line { from, to, width, color } => {
                write!(f, "line {} -> {} w={} {color}", pt(*from), pt(*to), num(*width))
            }
            DrawCall::Rectangle {
                corner1,
                corner2,
                width,
                fill,
                color,
            } => write!(
                f,
                "rect {} {} w={} {} {color}",
                pt(*corner1),
                pt(*corner2),
                num(*width),
                style(*fill)
            ),
            DrawCall::Text {
                at,
                height,
                text,
                color,
                anchor,
            } => write!(f, "text {} h={} {anchor:?} {text:?} {color}", pt(*at), num(*height)),
            DrawCall::Path {
                commands,
                width,
                fill,
                color,
            } => {
                write!(f, "path w={} {} {color}:", num(*width), style(*fill))?;
                for command in commands.iter() {
                    match command {
                        PathCommand::MoveTo(p) => write!(f, " M{}", pt(*p))?,
                        PathCommand::LineTo(p) => write!(f, " L{}", pt(*p))?,
                        PathCommand::ArcTo(arc) => {
                            let (tl, br) = arc.oval();
                            let sign = if arc.extent < 0.0 { "" } else { "+" };
                            write!(
                                f,
                                " A[{} {}] {}{sign}{}",
                                pt(tl),
                                pt(br),
                                num(arc.start_angle),
                                num(arc.extent)
                            )?
                        }
                        PathCommand::Close => write!(f, " Z")?,
                    }
                }
                Ok(())
            }
        }
    }
}

/// A [`Canvas`] that keeps a log of [`DrawCall`]s.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    available: bool,
    calls: Vec<DrawCall>,
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self {
            available: true,
            calls: Vec::new(),
        }
    }
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// A canvas whose surface reports itself unavailable.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            calls: Vec::new(),
        }
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    /// Every recorded call, one per line.
    pub fn log(&self) -> String {
        self.calls.iter().map(|c| format!("{c}\n")).collect()
    }
}

impl Canvas for RecordingCanvas {
    type Path = PathCommands;

    fn is_available(&self) -> bool {
        self.available
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn circle(&mut self, center: DVec2, radius: f64, width: f64, fill: bool, color: &str) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            width,
            fill,
            color: color.to_string(),
        });
    }

    fn line(&mut self, from: DVec2, to: DVec2, width: f64, color: &str) {
        self.calls.push(DrawCall::Line {
            from,
            to,
            width,
            color: color.to_string(),
        });
    }

    fn rectangle(&mut self, corner1: DVec2, corner2: DVec2, width: f64, fill: bool, color: &str) {
        self.calls.push(DrawCall::Rectangle {
            corner1,
            corner2,
            width,
            fill,
            color: color.to_string(),
        });
    }

    fn text(&mut self, at: DVec2, height: f64, text: &str, color: &str, anchor: TextAnchor) {
        self.calls.push(DrawCall::Text {
            at,
            height,
            text: text.to_string(),
            color: color.to_string(),
            anchor,
        });
    }

    fn create_path(&mut self) -> PathBuilder<PathCommands> {
        PathBuilder::default()
    }

    fn path(&mut self, path: PathBuilder<PathCommands>, width: f64, fill: bool, color: &str) {
        self.calls.push(DrawCall::Path {
            commands: path.into_sink(),
            width,
            fill,
            color: color.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn test_records_in_order() {
        let mut canvas = RecordingCanvas::new();
        canvas.clear();
        canvas.line(dvec2(0.0, 0.0), dvec2(1.0, 1.0), 1.0, "red");
        canvas.circle(dvec2(2.0, 2.0), 3.0, 0.0, true, "blue");
        assert_eq!(canvas.calls().len(), 3);
        assert_eq!(canvas.calls()[0], DrawCall::Clear);
        assert!(matches!(canvas.calls()[2], DrawCall::Circle { fill: true, .. }));
    }

    #[test]
    fn test_unavailable_flag() {
        let mut canvas = RecordingCanvas::unavailable();
        assert!(!canvas.is_available());
        canvas.set_available(true);
        assert!(canvas.is_available());
    }

    #[test]
    fn test_take_calls_empties_log() {
        let mut canvas = RecordingCanvas::new();
        canvas.clear();
        assert_eq!(canvas.take_calls(), vec![DrawCall::Clear]);
        assert!(canvas.calls().is_empty());
    }

    #[test]
    fn test_log_format() {
        let mut canvas = RecordingCanvas::new();
        canvas.rectangle(dvec2(1.0, 2.0), dvec2(3.5, -0.0), 0.0, false, "black");
        canvas.text(dvec2(10.0, 20.0), 12.0, "5", "darkblue", TextAnchor::Left);
        let mut path = canvas.create_path();
        path.move_to(dvec2(0.0, 0.0)).arc(5.0, dvec2(10.0, 0.0), false, true).close();
        canvas.path(path, 2.0, false, "black");
        insta::assert_snapshot!(canvas.log().trim_end(), @r#"
        rect (1, 2) (3.5, 0) w=0 stroke black
        text (10, 20) h=12 Left "5" darkblue
        path w=2 stroke black: M(0, 0) A[(0, -5) (10, 5)] 180+180 Z
        "#);
    }
}
