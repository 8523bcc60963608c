//! Interactive editing of a reticle definition
//!
//! An [`EditSession`] owns the definition being edited and exposes the
//! editor's commands. Elements and BDC points are presented as one combined
//! list: elements first, then BDC points, so a single index addresses either.

use glam::DVec2;

use crate::errors::EditError;
use crate::reticle::{
    BdcPoint, Element, PathSegment, ReticleCircle, ReticleDefinition, ReticleElement, ReticleLine, ReticlePath,
    ReticleRectangle, ReticleText,
};
use crate::render::defaults;
use crate::render::translator::pixel_to_angular;
use crate::types::{AngularUnit, Measurement, Position};

/// Units offered for the cursor readout.
pub const DISPLAY_UNITS: [AngularUnit; 4] = [
    AngularUnit::Mil,
    AngularUnit::Moa,
    AngularUnit::InchesPer100Yards,
    AngularUnit::CmPer100Meters,
];

/// Named colors offered by the element editors.
pub const STANDARD_COLORS: [&str; 28] = [
    "black",
    "white",
    "gray",
    "red",
    "green",
    "blue",
    "yellow",
    "cyan",
    "magenta",
    "orange",
    "pink",
    "purple",
    "brown",
    "navy",
    "teal",
    "lime",
    "olive",
    "maroon",
    "aqua",
    "fuchsia",
    "silver",
    "darkgray",
    "lightgray",
    "darkred",
    "darkgreen",
    "darkblue",
    "gold",
    "indigo",
];

/// What "add" creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementTemplate {
    Line,
    Circle,
    Rectangle,
    Path,
    Text,
    Bdc,
}

impl ElementTemplate {
    /// Build the default item, with every measurement in `unit`.
    pub fn instantiate(self, unit: AngularUnit) -> Item {
        let origin = Position::zero(unit);
        let one = Measurement::new(1.0, unit);
        match self {
            ElementTemplate::Line => Item::Element(ReticleLine::new(origin, origin).into()),
            ElementTemplate::Circle => Item::Element(ReticleCircle::new(origin, one).into()),
            ElementTemplate::Rectangle => Item::Element(ReticleRectangle::new(origin, Position::of(1.0, 1.0, unit)).into()),
            ElementTemplate::Path => Item::Element(ReticlePath::new().into()),
            ElementTemplate::Text => Item::Element(ReticleText::new(origin, one, "Text").into()),
            ElementTemplate::Bdc => Item::Bdc(BdcPoint::new(origin, one, one * 0.5)),
        }
    }
}

/// What "add segment" appends to a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentTemplate {
    MoveTo,
    LineTo,
    Arc,
}

impl SegmentTemplate {
    pub fn instantiate(self, unit: AngularUnit) -> PathSegment {
        let position = Position::zero(unit);
        match self {
            SegmentTemplate::MoveTo => PathSegment::MoveTo { position },
            SegmentTemplate::LineTo => PathSegment::LineTo { position },
            SegmentTemplate::Arc => PathSegment::ArcTo {
                radius: Measurement::new(1.0, unit),
                position,
                large_arc: false,
                clockwise: false,
            },
        }
    }
}

/// An owned entry of the combined list.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Element(ReticleElement),
    Bdc(BdcPoint),
}

/// A borrowed entry of the combined list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemRef<'a> {
    Element(&'a ReticleElement),
    Bdc(&'a BdcPoint),
}

impl ItemRef<'_> {
    /// One-line description for list views.
    pub fn label(&self) -> String {
        match self {
            ItemRef::Element(element) => match element {
                ReticleElement::Line(l) => format!("line {} - {}", l.start, l.end),
                ReticleElement::Circle(c) => format!("circle {} r={}", c.center, c.radius),
                ReticleElement::Rectangle(r) => format!("rectangle {} {}", r.top_left, r.size),
                ReticleElement::Text(t) => format!("text {} {:?}", t.position, t.text),
                ReticleElement::Path(p) => format!("path ({} segments)", p.segments.len()),
            },
            ItemRef::Bdc(b) => format!("bdc {}", b.position),
        }
    }
}

/// Formatted cursor coordinates, `--` when the cursor maps to nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorStatus {
    pub x: String,
    pub y: String,
}

impl CursorStatus {
    fn unmapped() -> Self {
        Self {
            x: "--".to_string(),
            y: "--".to_string(),
        }
    }
}

/// The state of one editing session.
#[derive(Debug, Clone)]
pub struct EditSession {
    reticle: ReticleDefinition,
    selected: Option<usize>,
    highlight: bool,
    display_unit: AngularUnit,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::open(blank_reticle())
    }
}

/// The definition "new" starts from: a 10×10 mil extent with the origin in
/// the middle.
pub fn blank_reticle() -> ReticleDefinition {
    ReticleDefinition::new("New Reticle")
        .with_size(Position::mil(10.0, 10.0))
        .with_zero(Position::mil(5.0, 5.0))
}

fn readout_unit(reticle: &ReticleDefinition) -> AngularUnit {
    reticle.size.map_or(AngularUnit::Mil, |size| size.x.unit())
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing an existing definition. The readout follows the unit
    /// of the reticle's horizontal size.
    pub fn open(reticle: ReticleDefinition) -> Self {
        Self {
            display_unit: readout_unit(&reticle),
            reticle,
            selected: None,
            highlight: true,
        }
    }

    pub fn reticle(&self) -> &ReticleDefinition {
        &self.reticle
    }

    /// Direct access for the definition-level fields (name, size, zero).
    pub fn reticle_mut(&mut self) -> &mut ReticleDefinition {
        &mut self.reticle
    }

    /// Replace the definition with a fresh blank one.
    pub fn new_reticle(&mut self) {
        self.replace(blank_reticle());
    }

    /// Swap in another definition, returning the previous one.
    pub fn replace(&mut self, reticle: ReticleDefinition) -> ReticleDefinition {
        self.selected = None;
        self.display_unit = readout_unit(&reticle);
        crate::log::debug!(name = %reticle.name, "replacing reticle");
        std::mem::replace(&mut self.reticle, reticle)
    }

    pub fn into_reticle(self) -> ReticleDefinition {
        self.reticle
    }

    // ------------------------------------------------------------------
    // Combined list
    // ------------------------------------------------------------------

    pub fn item_count(&self) -> usize {
        self.reticle.elements.len() + self.reticle.bdc_points.len()
    }

    pub fn item(&self, index: usize) -> Option<ItemRef<'_>> {
        let elements = self.reticle.elements.len();
        if index < elements {
            self.reticle.elements.get(index).map(ItemRef::Element)
        } else {
            self.reticle.bdc_points.get(index - elements).map(ItemRef::Bdc)
        }
    }

    pub fn items(&self) -> impl Iterator<Item = ItemRef<'_>> {
        self.reticle
            .elements
            .iter()
            .map(ItemRef::Element)
            .chain(self.reticle.bdc_points.iter().map(ItemRef::Bdc))
    }

    fn no_such_item(&self, index: usize) -> EditError {
        EditError::NoSuchItem {
            index,
            count: self.item_count(),
        }
    }

    fn check(&self, index: usize) -> Result<(), EditError> {
        if index < self.item_count() {
            Ok(())
        } else {
            Err(self.no_such_item(index))
        }
    }

    // ------------------------------------------------------------------
    // Selection and display
    // ------------------------------------------------------------------

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// # Errors
    ///
    /// [`EditError::NoSuchItem`] when `index` is past the end of the list.
    pub fn select(&mut self, index: Option<usize>) -> Result<(), EditError> {
        if let Some(i) = index {
            self.check(i)?;
        }
        self.selected = index;
        Ok(())
    }

    /// Select the topmost element under a canvas pixel, or clear the
    /// selection when nothing is hit. Returns the new selection.
    pub fn pick(&mut self, bounds: DVec2, pixel: DVec2) -> Option<usize> {
        self.selected = pixel_to_angular(bounds, &self.reticle, pixel).and_then(|p| self.reticle.element_at(p));
        self.selected
    }

    pub fn highlight(&self) -> bool {
        self.highlight
    }

    pub fn set_highlight(&mut self, highlight: bool) {
        self.highlight = highlight;
    }

    /// Flip highlighting and return the new state.
    pub fn toggle_highlight(&mut self) -> bool {
        self.highlight = !self.highlight;
        self.highlight
    }

    pub fn display_unit(&self) -> AngularUnit {
        self.display_unit
    }

    pub fn set_display_unit(&mut self, unit: AngularUnit) {
        self.display_unit = unit;
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Append a new item built from `template` and select it. Returns its
    /// index in the combined list.
    pub fn add(&mut self, template: ElementTemplate) -> usize {
        let item = template.instantiate(self.reticle.unit());
        let index = self.push(item);
        crate::log::debug!(?template, index, "added item");
        index
    }

    fn push(&mut self, item: Item) -> usize {
        let index = match item {
            Item::Element(element) => {
                self.reticle.elements.push(element);
                self.reticle.elements.len() - 1
            }
            Item::Bdc(bdc) => {
                self.reticle.bdc_points.push(bdc);
                self.item_count() - 1
            }
        };
        self.selected = Some(index);
        index
    }

    /// Remove an item. The selection moves to the item that took its place,
    /// or the new last item, or nothing when the list is now empty.
    ///
    /// # Errors
    ///
    /// [`EditError::NoSuchItem`] when `index` is past the end of the list.
    pub fn delete(&mut self, index: usize) -> Result<Item, EditError> {
        self.check(index)?;
        let elements = self.reticle.elements.len();
        let removed = if index < elements {
            Item::Element(self.reticle.elements.remove(index))
        } else {
            Item::Bdc(self.reticle.bdc_points.remove(index - elements))
        };
        let count = self.item_count();
        self.selected = (count > 0).then(|| index.min(count - 1));
        crate::log::debug!(index, remaining = count, "deleted item");
        Ok(removed)
    }

    /// Append a copy of an item and select the copy. Returns the copy's index.
    ///
    /// # Errors
    ///
    /// [`EditError::NoSuchItem`] when `index` is past the end of the list.
    pub fn duplicate(&mut self, index: usize) -> Result<usize, EditError> {
        let item = match self.item(index) {
            Some(ItemRef::Element(e)) => Item::Element(e.clone()),
            Some(ItemRef::Bdc(b)) => Item::Bdc(*b),
            None => return Err(self.no_such_item(index)),
        };
        let copy = self.push(item);
        crate::log::debug!(index, copy, "duplicated item");
        Ok(copy)
    }

    /// Mutable access to an element, for edit dialogs.
    ///
    /// # Errors
    ///
    /// [`EditError::NoSuchItem`] when `index` does not name an element.
    pub fn element_mut(&mut self, index: usize) -> Result<&mut ReticleElement, EditError> {
        let err = self.no_such_item(index);
        self.reticle.elements.get_mut(index).ok_or(err)
    }

    /// Mutable access to a BDC point by its combined-list index.
    ///
    /// # Errors
    ///
    /// [`EditError::NoSuchItem`] when `index` does not name a BDC point.
    pub fn bdc_mut(&mut self, index: usize) -> Result<&mut BdcPoint, EditError> {
        let err = self.no_such_item(index);
        let elements = self.reticle.elements.len();
        index
            .checked_sub(elements)
            .and_then(|i| self.reticle.bdc_points.get_mut(i))
            .ok_or(err)
    }

    fn path_mut(&mut self, index: usize) -> Result<&mut ReticlePath, EditError> {
        match self.element_mut(index)? {
            ReticleElement::Path(path) => Ok(path),
            _ => Err(EditError::NotAPath { index }),
        }
    }

    /// Append a segment to the path at `index`, with positions and radius in
    /// the reticle unit. Returns the segment's index within the path.
    ///
    /// # Errors
    ///
    /// [`EditError::NoSuchItem`] for a bad index, [`EditError::NotAPath`]
    /// when the element is not a path.
    pub fn add_segment(&mut self, index: usize, template: SegmentTemplate) -> Result<usize, EditError> {
        let segment = template.instantiate(self.reticle.unit());
        let path = self.path_mut(index)?;
        path.segments.push(segment);
        Ok(path.segments.len() - 1)
    }

    /// Mutable access to one path segment.
    ///
    /// # Errors
    ///
    /// As [`EditSession::add_segment`], plus [`EditError::NoSuchSegment`].
    pub fn segment_mut(&mut self, index: usize, segment: usize) -> Result<&mut PathSegment, EditError> {
        let path = self.path_mut(index)?;
        let count = path.segments.len();
        path.segments.get_mut(segment).ok_or(EditError::NoSuchSegment { index: segment, count })
    }

    /// Remove one path segment and return it.
    ///
    /// # Errors
    ///
    /// As [`EditSession::segment_mut`].
    pub fn remove_segment(&mut self, index: usize, segment: usize) -> Result<PathSegment, EditError> {
        let path = self.path_mut(index)?;
        let count = path.segments.len();
        if segment >= count {
            return Err(EditError::NoSuchSegment { index: segment, count });
        }
        Ok(path.segments.remove(segment))
    }

    // ------------------------------------------------------------------
    // Presentation
    // ------------------------------------------------------------------

    /// Elements drawn over the reticle: a circle and a drop label for every
    /// BDC point, then a highlighted copy of the selected element.
    pub fn overlay(&self) -> Vec<ReticleElement> {
        let mut overlay = Vec::new();

        if let Some(size) = self.reticle.size {
            let radius = size.x * defaults::BDC_MARKER_RATIO;
            let first_bdc = self.reticle.elements.len();
            for (i, bdc) in self.reticle.bdc_points.iter().enumerate() {
                let selected = self.highlight && self.selected == Some(first_bdc + i);
                let color = if selected {
                    defaults::SELECTED_COLOR
                } else {
                    defaults::BDC_COLOR
                };
                overlay.push(bdc_marker(bdc, radius, color));
                overlay.push(bdc_label(bdc, color));
            }
        }

        if self.highlight {
            if let Some(ItemRef::Element(element)) = self.selected.and_then(|i| self.item(i)) {
                let mut copy = element.clone();
                copy.set_color(defaults::SELECTED_COLOR);
                overlay.push(copy);
            }
        }

        overlay
    }

    /// Cursor coordinates in the display unit, three decimals each.
    pub fn cursor_status(&self, bounds: DVec2, pixel: DVec2) -> CursorStatus {
        let Some(position) = pixel_to_angular(bounds, &self.reticle, pixel) else {
            return CursorStatus::unmapped();
        };
        let unit = self.display_unit;
        CursorStatus {
            x: format!("{:.3}{}", position.x.in_unit(unit), unit.symbol()),
            y: format!("{:.3}{}", position.y.in_unit(unit), unit.symbol()),
        }
    }
}

fn bdc_marker(bdc: &BdcPoint, radius: Measurement, color: &str) -> ReticleElement {
    let mut circle = ReticleCircle::new(bdc.position, radius);
    circle.color = color.to_string();
    circle.into()
}

/// The label sits `text_offset` to the right, vertically centered on the mark,
/// and reads the mark's drop.
fn bdc_label(bdc: &BdcPoint, color: &str) -> ReticleElement {
    let at = Position::new(bdc.position.x + bdc.text_offset, bdc.position.y - bdc.text_height / 2.0);
    let mut text = ReticleText::new(at, bdc.text_height, bdc.position.y.to_string());
    text.color = color.to_string();
    text.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    fn session_with_items() -> EditSession {
        let mut s = EditSession::new();
        s.add(ElementTemplate::Line);
        s.add(ElementTemplate::Circle);
        s.add(ElementTemplate::Bdc);
        s
    }

    #[test]
    fn test_new_session_defaults() {
        let s = EditSession::new();
        assert_eq!(s.reticle().name, "New Reticle");
        assert_eq!(s.reticle().size, Some(Position::mil(10.0, 10.0)));
        assert_eq!(s.reticle().zero, Some(Position::mil(5.0, 5.0)));
        assert_eq!(s.item_count(), 0);
        assert_eq!(s.selected(), None);
        assert!(s.highlight());
        assert_eq!(s.display_unit(), AngularUnit::Mil);
    }

    #[test]
    fn test_templates_use_reticle_unit() {
        let mut s = EditSession::open(ReticleDefinition::new("moa").with_size(Position::of(20.0, 20.0, AngularUnit::Moa)));
        s.add(ElementTemplate::Circle);
        let Some(ItemRef::Element(ReticleElement::Circle(c))) = s.item(0) else {
            panic!("expected a circle");
        };
        assert_eq!(c.radius, Measurement::moa(1.0));
        assert_eq!(c.color, "black");
    }

    #[test]
    fn test_readout_follows_loaded_size_unit() {
        let moa = ReticleDefinition::new("moa").with_size(Position::moa(20.0, 20.0));
        let mut s = EditSession::open(moa.clone());
        assert_eq!(s.display_unit(), AngularUnit::Moa);

        s.new_reticle();
        assert_eq!(s.display_unit(), AngularUnit::Mil);
        s.replace(moa);
        assert_eq!(s.display_unit(), AngularUnit::Moa);

        let unsized_session = EditSession::open(ReticleDefinition::new("empty"));
        assert_eq!(unsized_session.display_unit(), AngularUnit::Mil);
    }

    #[test]
    fn test_add_selects_and_orders_bdc_last() {
        let mut s = EditSession::new();
        assert_eq!(s.add(ElementTemplate::Bdc), 0);
        assert_eq!(s.add(ElementTemplate::Line), 0);
        assert_eq!(s.selected(), Some(0));
        assert!(matches!(s.item(1), Some(ItemRef::Bdc(_))));
        assert_eq!(s.items().count(), 2);
    }

    #[test]
    fn test_bdc_template() {
        let mut s = EditSession::new();
        s.add(ElementTemplate::Bdc);
        assert_eq!(
            s.reticle().bdc_points[0],
            BdcPoint::new(Position::mil(0.0, 0.0), Measurement::mil(1.0), Measurement::mil(0.5))
        );
    }

    #[test]
    fn test_select_out_of_range() {
        let mut s = session_with_items();
        assert_eq!(s.select(Some(3)), Err(EditError::NoSuchItem { index: 3, count: 3 }));
        assert_eq!(s.select(Some(1)), Ok(()));
        assert_eq!(s.select(None), Ok(()));
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn test_delete_moves_selection() {
        let mut s = session_with_items();
        assert!(matches!(s.delete(2), Ok(Item::Bdc(_))));
        assert_eq!(s.selected(), Some(1));
        assert!(matches!(s.delete(0), Ok(Item::Element(ReticleElement::Line(_)))));
        assert_eq!(s.selected(), Some(0));
        s.delete(0).unwrap();
        assert_eq!(s.selected(), None);
        assert_eq!(s.delete(0), Err(EditError::NoSuchItem { index: 0, count: 0 }));
    }

    #[test]
    fn test_duplicate_selects_copy() {
        let mut s = session_with_items();
        assert_eq!(s.duplicate(0), Ok(2));
        assert_eq!(s.selected(), Some(2));
        assert_eq!(s.item(0), s.item(2));

        // BDC copies land at the end of the combined list
        assert_eq!(s.duplicate(3), Ok(4));
        assert!(matches!(s.item(4), Some(ItemRef::Bdc(_))));
        assert!(s.duplicate(9).is_err());
    }

    #[test]
    fn test_edit_element_and_bdc() {
        let mut s = session_with_items();
        s.element_mut(1).unwrap().set_color("red");
        assert_eq!(s.reticle().elements[1].color(), "red");
        s.bdc_mut(2).unwrap().text_height = Measurement::mil(2.0);
        assert_eq!(s.reticle().bdc_points[0].text_height, Measurement::mil(2.0));
        assert!(s.bdc_mut(0).is_err());
        assert!(s.element_mut(2).is_err());
    }

    #[test]
    fn test_segment_editing() {
        let mut s = session_with_items();
        let path = s.add(ElementTemplate::Path);
        assert_eq!(s.add_segment(path, SegmentTemplate::MoveTo), Ok(0));
        assert_eq!(s.add_segment(path, SegmentTemplate::Arc), Ok(1));
        *s.segment_mut(path, 0).unwrap() = PathSegment::MoveTo {
            position: Position::mil(1.0, 1.0),
        };
        assert_eq!(
            s.remove_segment(path, 1),
            Ok(PathSegment::ArcTo {
                radius: Measurement::mil(1.0),
                position: Position::mil(0.0, 0.0),
                large_arc: false,
                clockwise: false,
            })
        );
        assert_eq!(
            s.remove_segment(path, 5),
            Err(EditError::NoSuchSegment { index: 5, count: 1 })
        );
        assert_eq!(s.add_segment(0, SegmentTemplate::LineTo), Err(EditError::NotAPath { index: 0 }));
    }

    #[test]
    fn test_item_labels() {
        let s = session_with_items();
        let labels: Vec<String> = s.items().map(|i| i.label()).collect();
        assert_eq!(
            labels,
            [
                "line (0mil, 0mil) - (0mil, 0mil)",
                "circle (0mil, 0mil) r=1mil",
                "bdc (0mil, 0mil)",
            ]
        );
    }

    #[test]
    fn test_standard_colors_all_resolve() {
        use crate::render::color::Color;
        for name in STANDARD_COLORS.iter().filter(|n| **n != "black") {
            assert_ne!(Color::resolve(name), Color::BLACK, "{name}");
        }
    }

    #[test]
    fn test_new_reticle_resets() {
        let mut s = session_with_items();
        s.new_reticle();
        assert_eq!(s.item_count(), 0);
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn test_overlay_bdc_markers() {
        let mut s = EditSession::new();
        s.add(ElementTemplate::Bdc);
        s.bdc_mut(0).unwrap().position = Position::mil(0.0, -2.0);
        s.select(None).unwrap();

        let overlay = s.overlay();
        assert_eq!(overlay.len(), 2);
        let ReticleElement::Circle(marker) = &overlay[0] else {
            panic!("expected a marker circle");
        };
        assert_eq!(marker.radius.unit(), AngularUnit::Mil);
        assert!((marker.radius.value() - 0.2).abs() < 1e-12);
        assert_eq!(marker.color, "darkblue");
        assert!(!marker.fill);
        let ReticleElement::Text(label) = &overlay[1] else {
            panic!("expected a label");
        };
        assert_eq!(label.position, Position::mil(1.0, -2.25));
        assert_eq!(label.text, "-2mil");
    }

    #[test]
    fn test_overlay_highlights_selection() {
        let mut s = session_with_items();
        s.select(Some(2)).unwrap();
        assert_eq!(s.overlay()[0].color(), "blue");

        s.select(Some(1)).unwrap();
        let overlay = s.overlay();
        assert_eq!(overlay.len(), 3);
        assert_eq!(overlay[0].color(), "darkblue");
        assert_eq!(overlay[2].kind(), "circle");
        assert_eq!(overlay[2].color(), "blue");

        s.toggle_highlight();
        assert_eq!(s.overlay().len(), 2);
    }

    #[test]
    fn test_cursor_status() {
        let mut s = EditSession::new();
        let bounds = dvec2(100.0, 100.0);
        let status = s.cursor_status(bounds, dvec2(60.0, 40.0));
        assert_eq!(status.x, "1.000mil");
        assert_eq!(status.y, "1.000mil");

        s.set_display_unit(AngularUnit::Moa);
        assert!(s.cursor_status(bounds, dvec2(60.0, 40.0)).x.ends_with("moa"));

        assert_eq!(s.cursor_status(bounds, dvec2(100.0, 50.0)), CursorStatus::unmapped());
    }

    #[test]
    fn test_pick_topmost() {
        let mut s = EditSession::new();
        s.add(ElementTemplate::Circle);
        s.add(ElementTemplate::Circle);
        assert_eq!(s.pick(dvec2(100.0, 100.0), dvec2(50.0, 50.0)), Some(1));
        assert_eq!(s.pick(dvec2(100.0, 100.0), dvec2(5.0, 5.0)), None);
        assert_eq!(s.selected(), None);
    }
}
