//! Custom cursor and scroll progress bar

use folio_core::{Event, Point, ScrollState};

/// Custom cursor state
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cursor {
    /// Last pointer position (viewport coordinates)
    pub position: Option<Point>,
    /// Pointer is over a link or button
    pub hovering: bool,
}

impl Cursor {
    /// Track pointer events; other events are ignored
    pub fn handle(&mut self, event: &Event) {
        match *event {
            Event::PointerMove { position } => self.position = Some(position),
            Event::PointerOver { interactive } => self.hovering = interactive,
            _ => {}
        }
    }
}

/// Width of the global progress bar, in percent of the viewport
pub fn progress_bar_width(scroll: &ScrollState) -> f32 {
    scroll.progress_percent()
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::Size;

    #[test]
    fn test_cursor_follows_pointer() {
        let mut cursor = Cursor::default();
        assert_eq!(cursor.position, None);

        cursor.handle(&Event::PointerMove {
            position: Point::new(10.0, 20.0),
        });
        cursor.handle(&Event::PointerOver { interactive: true });
        assert_eq!(cursor.position, Some(Point::new(10.0, 20.0)));
        assert!(cursor.hovering);

        cursor.handle(&Event::Scroll { offset_y: 50.0 });
        cursor.handle(&Event::PointerOver { interactive: false });
        assert!(!cursor.hovering);
        assert_eq!(cursor.position, Some(Point::new(10.0, 20.0)));
    }

    #[test]
    fn test_progress_bar_width() {
        let viewport = Size::new(1280.0, 800.0);
        assert_eq!(progress_bar_width(&ScrollState::new(800.0, viewport, 2400.0)), 50.0);
        assert_eq!(progress_bar_width(&ScrollState::new(1600.0, viewport, 2400.0)), 100.0);
        // Content no taller than the viewport
        assert_eq!(progress_bar_width(&ScrollState::new(0.0, viewport, 800.0)), 0.0);
        assert_eq!(progress_bar_width(&ScrollState::new(0.0, viewport, 500.0)), 0.0);
    }
}
