//! Path builder for reticle paths.
//!
//! A [`PathBuilder`] turns move/line/arc steps in pixel space into primitive
//! commands on a [`PathSink`]. It owns the current-point state machine:
//!
//! - the current point starts undefined; the first `line_to` or `arc` before
//!   any `move_to` emits an implicit move to the canvas origin
//! - an arc whose endpoint lies within [`DEGENERATE_EPSILON`] of the current
//!   point on both axes emits nothing
//! - an arc whose radius is below [`DEGENERATE_EPSILON`] emits a straight line
//! - every step leaves the current point at its target, emitted or not
//!
//! [`PathCommands`] is a sink that keeps the commands so they can be
//! inspected or replayed into another sink.
//!
//! [`DEGENERATE_EPSILON`]: super::defaults::DEGENERATE_EPSILON

use glam::DVec2;

use super::arc::{CenterArc, center_arc};
use super::defaults::DEGENERATE_EPSILON;

/// Receiver of primitive path commands.
pub trait PathSink {
    fn move_to(&mut self, to: DVec2);
    fn line_to(&mut self, to: DVec2);
    /// Append an arc along the oval of `arc`, starting at its start angle.
    fn arc_to(&mut self, arc: &CenterArc);
    fn close(&mut self);
}

/// One primitive path command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(DVec2),
    LineTo(DVec2),
    ArcTo(CenterArc),
    Close,
}

/// Ordered, replayable list of path commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathCommands {
    commands: Vec<PathCommand>,
}

impl PathCommands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathCommand> {
        self.commands.iter()
    }

    pub fn as_slice(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Feed every command, in order, into `sink`.
    pub fn replay<S: PathSink + ?Sized>(&self, sink: &mut S) {
        for command in &self.commands {
            match command {
                PathCommand::MoveTo(p) => sink.move_to(*p),
                PathCommand::LineTo(p) => sink.line_to(*p),
                PathCommand::ArcTo(arc) => sink.arc_to(arc),
                PathCommand::Close => sink.close(),
            }
        }
    }
}

impl PathSink for PathCommands {
    fn move_to(&mut self, to: DVec2) {
        self.commands.push(PathCommand::MoveTo(to));
    }

    fn line_to(&mut self, to: DVec2) {
        self.commands.push(PathCommand::LineTo(to));
    }

    fn arc_to(&mut self, arc: &CenterArc) {
        self.commands.push(PathCommand::ArcTo(*arc));
    }

    fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }
}

/// Builder that tracks the current point and feeds a [`PathSink`].
#[derive(Debug, Clone)]
pub struct PathBuilder<S> {
    sink: S,
    /// Undefined until the first move.
    current: Option<DVec2>,
    /// Start of the current subpath, where `close` returns to.
    subpath_start: DVec2,
}

impl<S: PathSink> PathBuilder<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            current: None,
            subpath_start: DVec2::ZERO,
        }
    }

    /// The current point, if any command has defined one.
    pub fn current(&self) -> Option<DVec2> {
        self.current
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Finish building and hand back the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Current point, emitting the implicit origin move if there is none yet.
    fn ensure_current(&mut self) -> DVec2 {
        match self.current {
            Some(p) => p,
            None => {
                self.move_to(DVec2::ZERO);
                DVec2::ZERO
            }
        }
    }

    pub fn move_to(&mut self, to: DVec2) -> &mut Self {
        self.sink.move_to(to);
        self.current = Some(to);
        self.subpath_start = to;
        self
    }

    pub fn line_to(&mut self, to: DVec2) -> &mut Self {
        self.ensure_current();
        self.sink.line_to(to);
        self.current = Some(to);
        self
    }

    /// SVG-style endpoint arc from the current point to `to`.
    pub fn arc(&mut self, r: f64, to: DVec2, large_arc: bool, clockwise: bool) -> &mut Self {
        let from = self.ensure_current();
        let delta = to - from;

        if delta.x.abs() < DEGENERATE_EPSILON && delta.y.abs() < DEGENERATE_EPSILON {
            crate::log::trace!(x = to.x, y = to.y, "arc endpoint coincides with current point, skipped");
        } else if r < DEGENERATE_EPSILON {
            crate::log::debug!(r, "arc radius below a pixel, drawing a line");
            self.sink.line_to(to);
        } else {
            let arc = center_arc(r, from, to, large_arc, clockwise);
            self.sink.arc_to(&arc);
        }

        self.current = Some(to);
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.sink.close();
        if self.current.is_some() {
            self.current = Some(self.subpath_start);
        }
        self
    }
}

impl Default for PathBuilder<PathCommands> {
    fn default() -> Self {
        PathBuilder::new(PathCommands::new())
    }
}
