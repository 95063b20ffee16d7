//! Draw Context - canvas drawing API
//!
//! The `DrawContext` trait is the surface the decorative canvas layers
//! (the particle field) paint into. Embedders implement it on top of their
//! real canvas; `RecordingContext` records commands for deferred execution
//! and for tests.
//!
//! # Example
//!
//! ```
//! use folio_core::draw::{DrawContext, RecordingContext, Stroke};
//! use folio_core::geometry::{Color, Point, Size};
//!
//! let mut ctx = RecordingContext::new(Size::new(800.0, 600.0));
//! ctx.clear();
//! ctx.fill_circle(Point::new(10.0, 10.0), 2.0, Color::WHITE);
//! ctx.stroke_line(Point::ZERO, Point::new(5.0, 5.0), &Stroke::new(0.5), Color::WHITE);
//! assert_eq!(ctx.commands().len(), 3);
//! ```

use crate::geometry::{Color, Point, Size};

/// Line stroke parameters
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    /// Line width
    pub width: f32,
}

impl Default for Stroke {
    fn default() -> Self {
        Self { width: 1.0 }
    }
}

impl Stroke {
    /// Create a new stroke with the given width
    pub fn new(width: f32) -> Self {
        Self { width }
    }
}

/// A recorded drawing operation
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole surface
    Clear,
    FillCircle {
        center: Point,
        radius: f32,
        color: Color,
    },
    StrokeLine {
        from: Point,
        to: Point,
        stroke: Stroke,
        color: Color,
    },
}

/// Unified drawing surface
pub trait DrawContext {
    /// Size of the drawing surface (backing store)
    fn viewport_size(&self) -> Size;

    /// Resize the backing store
    fn resize(&mut self, size: Size);

    /// Clear the whole surface
    fn clear(&mut self);

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color);

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke, color: Color);
}

/// A draw context that records commands
#[derive(Debug)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    viewport: Size,
}

impl RecordingContext {
    /// Create a new recording context
    pub fn new(viewport: Size) -> Self {
        Self {
            commands: Vec::new(),
            viewport,
        }
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded circle fills
    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
            .count()
    }

    /// Number of recorded line strokes
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeLine { .. }))
            .count()
    }
}

impl DrawContext for RecordingContext {
    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn resize(&mut self, size: Size) {
        self.viewport = size;
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke, color: Color) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            stroke: stroke.clone(),
            color,
        });
    }
}
