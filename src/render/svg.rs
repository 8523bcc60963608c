//! SVG canvas backend.
//!
//! Draw calls become `<circle>`, `<line>`, `<rect>`, `<text>` and `<path>`
//! nodes of an [`svg::Document`] sized to the canvas bounds. Center-form arcs
//! are written back out as SVG `A` commands.
//!
//! Paint and font descriptions are memoized per thread. Each cache is dropped
//! wholesale once it grows past its limit; entries are pure functions of their
//! key, so the output does not depend on what happens to be cached.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::io;
use std::rc::Rc;

use glam::{DVec2, dvec2};
use ::svg::{self, Document, node::element as svg_element};

use super::RenderOptions;
use super::arc::CenterArc;
use super::canvas::{Canvas, TextAnchor};
use super::color::{Color, font_size, stroke_width};
use super::defaults;
use super::format_number as num;
use super::path_builder::{PathBuilder, PathSink};
use crate::errors::RenderError;

/// Resolved stroke or fill attributes for one `(color, width, fill)` key.
#[derive(Debug, Clone, PartialEq)]
struct Paint {
    color: Color,
    width: f64,
    fill: bool,
}

impl Paint {
    fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = Vec::with_capacity(6);
        if self.fill {
            attrs.push(("fill", self.color.to_string()));
            attrs.push(("stroke", "none".to_string()));
            if !self.color.is_opaque() {
                attrs.push(("fill-opacity", num(self.color.opacity())));
            }
        } else {
            attrs.push(("fill", "none".to_string()));
            attrs.push(("stroke", self.color.to_string()));
            attrs.push(("stroke-width", num(self.width)));
            attrs.push(("stroke-linecap", "round".to_string()));
            attrs.push(("stroke-linejoin", "round".to_string()));
            if !self.color.is_opaque() {
                attrs.push(("stroke-opacity", num(self.color.opacity())));
            }
        }
        attrs
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Font {
    family: String,
    size: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PaintKey {
    color: String,
    width_bits: u64,
    fill: bool,
}

thread_local! {
    static PAINT_CACHE: RefCell<HashMap<PaintKey, Rc<Paint>>> = RefCell::new(HashMap::new());
    static FONT_CACHE: RefCell<HashMap<(String, u64), Rc<Font>>> = RefCell::new(HashMap::new());
}

fn paint(color: &str, width: f64, fill: bool) -> Rc<Paint> {
    let width = stroke_width(width);
    let key = PaintKey {
        color: color.to_string(),
        width_bits: width.to_bits(),
        fill,
    };
    PAINT_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if let Some(p) = cache.get(&key) {
            return Rc::clone(p);
        }
        if cache.len() > defaults::PAINT_CACHE_LIMIT {
            crate::log::debug!(entries = cache.len(), "paint cache full, clearing");
            cache.clear();
        }
        let p = Rc::new(Paint {
            color: Color::resolve(color),
            width,
            fill,
        });
        cache.insert(key, Rc::clone(&p));
        p
    })
}

fn font(family: &str, height: f64) -> Rc<Font> {
    let size = font_size(height);
    let key = (family.to_string(), size.to_bits());
    FONT_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if let Some(f) = cache.get(&key) {
            return Rc::clone(f);
        }
        if cache.len() > defaults::FONT_CACHE_LIMIT {
            crate::log::debug!(entries = cache.len(), "font cache full, clearing");
            cache.clear();
        }
        let f = Rc::new(Font {
            family: family.to_string(),
            size,
        });
        cache.insert(key, Rc::clone(&f));
        f
    })
}

/// Drop this thread's paint and font caches.
pub fn clear_caches() {
    PAINT_CACHE.with(|c| c.borrow_mut().clear());
    FONT_CACHE.with(|c| c.borrow_mut().clear());
}

/// Number of cached paints and fonts on this thread.
pub fn cache_sizes() -> (usize, usize) {
    (
        PAINT_CACHE.with(|c| c.borrow().len()),
        FONT_CACHE.with(|c| c.borrow().len()),
    )
}

macro_rules! with_paint {
    ($node:expr, $paint:expr) => {{
        let mut node = $node;
        for (name, value) in $paint.attributes() {
            node = node.set(name, value);
        }
        node
    }};
}

/// Path sink that accumulates SVG path data.
#[derive(Debug, Clone, Default)]
pub struct SvgPath {
    data: String,
    current: Option<DVec2>,
}

impl SvgPath {
    /// The `d` attribute built so far.
    pub fn data(&self) -> &str {
        &self.data
    }

    fn push(&mut self, command: char, p: DVec2) {
        if !self.data.is_empty() {
            self.data.push(' ');
        }
        let _ = write!(self.data, "{command} {} {}", num(p.x), num(p.y));
    }

    fn push_arc(&mut self, arc: &CenterArc, extent: f64, to: DVec2) {
        let large = u8::from(extent.abs() > 180.0);
        let sweep = u8::from(extent > 0.0);
        let _ = write!(
            self.data,
            " A {} {} 0 {large} {sweep} {} {}",
            num(arc.radii.x),
            num(arc.radii.y),
            num(to.x),
            num(to.y)
        );
    }
}

impl PathSink for SvgPath {
    fn move_to(&mut self, to: DVec2) {
        self.push('M', to);
        self.current = Some(to);
    }

    fn line_to(&mut self, to: DVec2) {
        self.push('L', to);
        self.current = Some(to);
    }

    fn arc_to(&mut self, arc: &CenterArc) {
        let start = arc.start_point();
        match self.current {
            None => self.push('M', start),
            Some(p) if (p - start).length() > 1e-6 => self.push('L', start),
            Some(_) => {}
        }
        if arc.extent.abs() >= 360.0 - 1e-9 {
            // A single `A` command cannot close a full turn.
            let half = arc.extent / 2.0;
            let mid = arc.point_at(arc.start_angle + half);
            self.push_arc(arc, half, mid);
            self.push_arc(arc, half, start);
            self.current = Some(start);
        } else {
            let end = arc.end_point();
            self.push_arc(arc, arc.extent, end);
            self.current = Some(end);
        }
    }

    fn close(&mut self) {
        if !self.data.is_empty() {
            self.data.push(' ');
        }
        self.data.push('Z');
    }
}

/// Canvas that renders into an in-memory SVG document.
#[derive(Debug)]
pub struct SvgCanvas {
    size: DVec2,
    options: RenderOptions,
    document: Document,
}

impl SvgCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_options(width, height, RenderOptions::default())
    }

    pub fn with_options(width: f64, height: f64, options: RenderOptions) -> Self {
        let size = dvec2(width, height);
        Self {
            document: empty_document(size),
            size,
            options,
        }
    }

    /// Canvas bounds in pixels.
    pub fn size(&self) -> DVec2 {
        self.size
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn to_svg_string(&self) -> String {
        self.document.to_string()
    }

    /// Write the document as SVG text.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Io`] when the writer fails.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> Result<(), RenderError> {
        write!(writer, "{}", self.document)?;
        writer.flush()?;
        Ok(())
    }

    fn add(&mut self, node: impl Into<Box<dyn svg::Node>>) {
        svg::Node::append(&mut self.document, node);
    }
}

fn empty_document(size: DVec2) -> Document {
    Document::new()
        .set("viewBox", format!("0 0 {} {}", num(size.x), num(size.y)))
        .set("width", num(size.x))
        .set("height", num(size.y))
}

impl Canvas for SvgCanvas {
    type Path = SvgPath;

    fn clear(&mut self) {
        self.document = empty_document(self.size);
        let background = svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", num(self.size.x))
            .set("height", num(self.size.y))
            .set("fill", Color::resolve(&self.options.background).to_string());
        self.add(background);
    }

    fn circle(&mut self, center: DVec2, radius: f64, width: f64, fill: bool, color: &str) {
        let node = svg_element::Circle::new()
            .set("cx", num(center.x))
            .set("cy", num(center.y))
            .set("r", num(radius.abs()));
        let node = with_paint!(node, paint(color, width, fill));
        self.add(node);
    }

    fn line(&mut self, from: DVec2, to: DVec2, width: f64, color: &str) {
        let node = svg_element::Line::new()
            .set("x1", num(from.x))
            .set("y1", num(from.y))
            .set("x2", num(to.x))
            .set("y2", num(to.y));
        let node = with_paint!(node, paint(color, width, false));
        self.add(node);
    }

    fn rectangle(&mut self, corner1: DVec2, corner2: DVec2, width: f64, fill: bool, color: &str) {
        let min = corner1.min(corner2);
        let extent = (corner2 - corner1).abs();
        let node = svg_element::Rectangle::new()
            .set("x", num(min.x))
            .set("y", num(min.y))
            .set("width", num(extent.x))
            .set("height", num(extent.y));
        let node = with_paint!(node, paint(color, width, fill));
        self.add(node);
    }

    fn text(&mut self, at: DVec2, height: f64, text: &str, color: &str, anchor: TextAnchor) {
        let font = font(&self.options.font_family, height);
        let anchor = match anchor {
            TextAnchor::Left => "start",
            TextAnchor::Center => "middle",
            TextAnchor::Right => "end",
        };
        let fill = Color::resolve(color);
        let mut node = svg_element::Text::new(text)
            .set("x", num(at.x))
            .set("y", num(at.y))
            .set("font-family", font.family.clone())
            .set("font-size", num(font.size))
            .set("text-anchor", anchor)
            .set("fill", fill.to_string());
        if !fill.is_opaque() {
            node = node.set("fill-opacity", num(fill.opacity()));
        }
        self.add(node);
    }

    fn create_path(&mut self) -> PathBuilder<SvgPath> {
        PathBuilder::new(SvgPath::default())
    }

    fn path(&mut self, path: PathBuilder<SvgPath>, width: f64, fill: bool, color: &str) {
        let data = path.into_sink().data;
        if data.is_empty() {
            return;
        }
        let node = svg_element::Path::new().set("d", data);
        let node = with_paint!(node, paint(color, width, fill));
        self.add(node);
    }
}
