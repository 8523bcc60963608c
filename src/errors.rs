//! Error types with rich diagnostics using miette
//!
//! Geometry never fails: degenerate input degrades silently inside the
//! renderer. The errors here cover the edges of the crate instead: text typed
//! into editor fields, editor commands that name a missing item, and writing
//! rendered output.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

// ============================================================================
// Parse Errors
// ============================================================================

/// Errors that occur while parsing measurement and position literals
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("invalid syntax: expected {expected}")]
    #[diagnostic(
        code(graticule::parse::syntax),
        help("write a number followed by a unit, e.g. `2.5mil` or `(1moa, -3moa)`")
    )]
    Syntax {
        expected: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("unknown angular unit: {unit}")]
    #[diagnostic(
        code(graticule::parse::unknown_unit),
        help("known units: rad, deg, moa, mil, mrad, ths, in/100yd, cm/100m")
    )]
    UnknownUnit {
        unit: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a unit")]
        span: SourceSpan,
    },

    #[error("invalid number: {message}")]
    #[diagnostic(code(graticule::parse::invalid_number))]
    InvalidNumber {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid number")]
        span: SourceSpan,
    },
}

// ============================================================================
// Edit Errors
// ============================================================================

/// Errors from editing-session commands
#[derive(Error, Diagnostic, Debug, PartialEq)]
pub enum EditError {
    #[error("no item at index {index}")]
    #[diagnostic(
        code(graticule::edit::no_such_item),
        help("the reticle has {count} elements and BDC points")
    )]
    NoSuchItem { index: usize, count: usize },

    #[error("item {index} is not a path")]
    #[diagnostic(code(graticule::edit::not_a_path))]
    NotAPath { index: usize },

    #[error("no path segment at index {index}")]
    #[diagnostic(
        code(graticule::edit::no_such_segment),
        help("the path has {count} segments")
    )]
    NoSuchSegment { index: usize, count: usize },
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors that occur while emitting rendered output
#[derive(Error, Diagnostic, Debug)]
pub enum RenderError {
    #[error("failed to write rendered output")]
    #[diagnostic(code(graticule::render::io))]
    Io(#[from] std::io::Error),
}
